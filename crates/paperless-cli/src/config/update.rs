//! Arguments of the `update` subcommand and item loading.

use std::fs;
use std::io::Read;

use anyhow::{Context, bail};
use clap::Args;
use paperless_core::ResourceLocator;
use paperless_core::document::{
    CustomFieldEntry, FixedCollection, TagEntry, UpdateFields, UpdateParameters,
};
use paperless_reqwest::ReqwestConfig;
use serde_json::Value;

/// Arguments of the `update` subcommand.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    #[clap(flatten)]
    pub paperless: ReqwestConfig,

    /// JSON file with one parameter object or an array of them (`-` for stdin).
    #[arg(long, value_name = "FILE", required_unless_present = "id")]
    pub input: Option<String>,

    /// Record failed items in the output and keep going.
    #[arg(long)]
    pub continue_on_fail: bool,

    #[clap(flatten)]
    pub item: ItemArgs,
}

/// A single item given with flags instead of `--input`.
#[derive(Debug, Clone, Default, Args)]
pub struct ItemArgs {
    /// Document ID or document URL (`https://.../documents/<id>/details`).
    #[arg(long, value_name = "ID|URL", conflicts_with = "input")]
    pub id: Option<String>,

    /// New title.
    #[arg(long, requires = "id")]
    pub title: Option<String>,

    /// New creation date and time.
    #[arg(long, requires = "id")]
    pub created: Option<String>,

    /// New archive serial number.
    #[arg(long = "asn", value_name = "NUMBER", requires = "id")]
    pub archive_serial_number: Option<u64>,

    /// Correspondent ID.
    #[arg(long, value_name = "ID", requires = "id")]
    pub correspondent: Option<String>,

    /// Document type ID.
    #[arg(long, value_name = "ID", requires = "id")]
    pub document_type: Option<String>,

    /// Storage path ID.
    #[arg(long, value_name = "ID", requires = "id")]
    pub storage_path: Option<String>,

    /// Tag ID; may be repeated.
    #[arg(long = "tag", value_name = "ID", requires = "id")]
    pub tags: Vec<String>,

    /// Custom field value as `<field id>=<value>`; may be repeated.
    #[arg(
        long = "custom-field",
        value_name = "ID=VALUE",
        value_parser = parse_custom_field,
        requires = "id"
    )]
    pub custom_fields: Vec<(String, String)>,

    /// Add the tags to the document's current tags instead of replacing them.
    #[arg(long, requires = "id")]
    pub append_tags: bool,
}

impl UpdateArgs {
    /// Returns the items to process, from `--input` or the inline flags.
    pub fn items(&self) -> anyhow::Result<Vec<UpdateParameters>> {
        match (&self.input, self.item.to_parameters()) {
            (Some(input), _) => {
                let content = read_input(input)?;
                parse_items(&content).with_context(|| format!("invalid input in '{input}'"))
            }
            (None, Some(params)) => Ok(vec![params]),
            (None, None) => bail!("either --input or --id is required"),
        }
    }
}

impl ItemArgs {
    /// Builds the parameters of the inline item, if `--id` was given.
    pub fn to_parameters(&self) -> Option<UpdateParameters> {
        let id = locator(self.id.as_deref()?);

        let tags = (!self.tags.is_empty()).then(|| {
            self.tags
                .iter()
                .map(|tag| TagEntry::from(locator(tag)))
                .collect::<FixedCollection<_>>()
        });

        let custom_fields = (!self.custom_fields.is_empty()).then(|| {
            self.custom_fields
                .iter()
                .map(|(field, value)| CustomFieldEntry::new(locator(field), value.as_str()))
                .collect::<FixedCollection<_>>()
        });

        let fields = UpdateFields {
            append_tags: self.append_tags,
            archive_serial_number: self.archive_serial_number,
            correspondent: self.correspondent.as_deref().map(locator),
            created: self.created.clone(),
            custom_fields,
            document_type: self.document_type.as_deref().map(locator),
            storage_path: self.storage_path.as_deref().map(locator),
            tags,
            title: self.title.clone(),
        };

        Some(UpdateParameters::new(id).with_fields(fields))
    }
}

fn locator(input: &str) -> ResourceLocator {
    let Ok(locator) = input.parse::<ResourceLocator>();
    locator
}

fn parse_custom_field(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected <field id>=<value>, got '{input}'")),
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read '{input}'"))
    }
}

/// Parses one parameter object or an array of them.
pub fn parse_items(content: &str) -> anyhow::Result<Vec<UpdateParameters>> {
    let value: Value = serde_json::from_str(content).context("input is not valid JSON")?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).with_context(|| format!("item {index} is invalid"))
            })
            .collect(),
        item => Ok(vec![
            serde_json::from_value(item).context("item is invalid")?,
        ]),
    }
}
