#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::io::Write;
use std::process;

use anyhow::Context;
use paperless_core::document;
use paperless_core::schema::{self, FieldDescriptor};
use paperless_reqwest::ReqwestClient;
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::{Cli, Command, HealthArgs, SchemaArgs, UpdateArgs};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "paperless_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "paperless_cli::config";
pub const TRACING_TARGET_UPDATE: &str = "paperless_cli::update";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    match cli.command {
        Command::Update(args) => update(args).await,
        Command::Schema(args) => print_schema(&args),
        Command::Health(args) => health(args).await,
    }
}

/// Runs the document update for every item, one after the other.
async fn update(args: UpdateArgs) -> anyhow::Result<()> {
    let items = args.items()?;
    let service = ReqwestClient::new(args.paperless)
        .context("failed to create Paperless client")?
        .into_service();

    tracing::info!(
        target: TRACING_TARGET_UPDATE,
        items = items.len(),
        continue_on_fail = args.continue_on_fail,
        "Processing items"
    );

    let mut outputs = Vec::with_capacity(items.len());
    for (index, params) in items.iter().enumerate() {
        let result = match schema::validate(params) {
            Ok(()) => document::execute(&service, params).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(data) => outputs.push(serde_json::to_value(&data)?),
            Err(error) if args.continue_on_fail => {
                tracing::warn!(
                    target: TRACING_TARGET_UPDATE,
                    index,
                    error = %error,
                    "Item failed, continuing"
                );
                outputs.push(failure_output(&error));
            }
            Err(error) => {
                return Err(error).with_context(|| format!("item {index} failed"));
            }
        }
    }

    print_json(&outputs)
}

/// Output recorded for a failed item when processing continues.
fn failure_output(error: &paperless_core::Error) -> Value {
    json!({ "json": { "error": error.to_string() } })
}

fn print_schema(args: &SchemaArgs) -> anyhow::Result<()> {
    let fields: Vec<&FieldDescriptor> = schema::document_update()
        .iter()
        .filter(|field| field.is_visible(&args.resource, &args.operation))
        .collect();

    print_json(&fields)
}

async fn health(args: HealthArgs) -> anyhow::Result<()> {
    let service = ReqwestClient::new(args.paperless)
        .context("failed to create Paperless client")?
        .into_service();

    let health = service
        .health_check()
        .await
        .context("health check failed")?;
    print_json(&health)?;

    anyhow::ensure!(
        health.is_healthy(),
        "Paperless is unhealthy: {}",
        health.message.as_deref().unwrap_or("no details")
    );

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to write output")?;
    writeln!(stdout)?;
    Ok(())
}
