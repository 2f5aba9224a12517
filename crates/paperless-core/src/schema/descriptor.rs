//! Field descriptor types.
//!
//! Descriptors are plain `'static` data built with `const` builders so that a
//! whole parameter table can live in a `static`.

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use strum::{AsRefStr, Display, IntoStaticStr};

use crate::locator::{LocatorMode, ResourceLocator};
use crate::{Error, Result};

/// Kind of control a host renders for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, AsRefStr, Display, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldKind {
    Boolean,
    Number,
    String,
    DateTime,
    ResourceLocator,
    /// Bag of optional fields, each added individually.
    Collection,
    /// Repeatable group of [`FieldKind::Group`] entries.
    FixedCollection,
    /// One entry of a fixed collection.
    Group,
}

/// Default value of a field before the user touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Boolean(bool),
    EmptyString,
    /// `{"mode": "list", "value": ""}`.
    EmptyLocator,
    /// `{}`.
    EmptyObject,
}

impl DefaultValue {
    /// Returns the JSON the host starts from.
    pub fn to_value(self) -> Value {
        match self {
            Self::Boolean(value) => Value::Bool(value),
            Self::EmptyString => Value::String(String::new()),
            Self::EmptyLocator => json!({"mode": LocatorMode::List, "value": ""}),
            Self::EmptyObject => json!({}),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// A regex rule checked by the host before the operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub regex: &'static str,
    pub error_message: &'static str,
}

impl ValidationRule {
    /// Checks `input` against the rule.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error carrying the rule's message, or an
    /// internal error if the rule's regex does not compile.
    pub fn check(&self, input: &str) -> Result<()> {
        let regex = Regex::new(self.regex).map_err(|error| {
            Error::internal_error()
                .with_message(format!("Invalid validation pattern '{}'", self.regex))
                .with_source(error)
        })?;

        if regex.is_match(input) {
            Ok(())
        } else {
            Err(Error::invalid_input().with_message(self.error_message))
        }
    }
}

/// One selection mode of a resource locator field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorModeDescriptor {
    pub name: LocatorMode,
    pub display_name: &'static str,
    pub placeholder: &'static str,
    /// Search method backing a "From List" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_list_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Regex whose first capture group is the resolved value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_value: Option<&'static str>,
}

impl LocatorModeDescriptor {
    /// A searchable "From List" mode.
    pub const fn list(placeholder: &'static str, search_list_method: &'static str) -> Self {
        Self {
            name: LocatorMode::List,
            display_name: "From List",
            placeholder,
            search_list_method: Some(search_list_method),
            validation: None,
            extract_value: None,
        }
    }

    /// A free-text "By ID" mode validated against `rule`.
    pub const fn id(placeholder: &'static str, rule: ValidationRule) -> Self {
        Self {
            name: LocatorMode::Id,
            display_name: "By ID",
            placeholder,
            search_list_method: None,
            validation: Some(rule),
            extract_value: None,
        }
    }

    /// A free-text "By URL" mode; `rule.regex` also extracts the value.
    pub const fn url(placeholder: &'static str, rule: ValidationRule) -> Self {
        Self {
            name: LocatorMode::Url,
            display_name: "By URL",
            placeholder,
            search_list_method: None,
            validation: Some(rule),
            extract_value: Some(rule.regex),
        }
    }
}

/// Condition on another parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayCondition {
    pub parameter: &'static str,
    pub values: &'static [&'static str],
}

/// Conditions under which a field is shown; all must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    pub show: &'static [DisplayCondition],
}

/// Declarative description of one user-facing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiple_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub modes: &'static [LocatorModeDescriptor],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub options: &'static [FieldDescriptor],
}

impl FieldDescriptor {
    /// Creates a descriptor with the given name, label and kind.
    pub const fn new(name: &'static str, display_name: &'static str, kind: FieldKind) -> Self {
        let default = match kind {
            FieldKind::Boolean => DefaultValue::Boolean(false),
            FieldKind::ResourceLocator => DefaultValue::EmptyLocator,
            FieldKind::Collection | FieldKind::FixedCollection | FieldKind::Group => {
                DefaultValue::EmptyObject
            }
            FieldKind::Number | FieldKind::String | FieldKind::DateTime => {
                DefaultValue::EmptyString
            }
        };

        Self {
            name,
            display_name,
            kind,
            default,
            description: None,
            hint: None,
            placeholder: None,
            required: false,
            multiple_values: false,
            display_options: None,
            modes: &[],
            options: &[],
        }
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks a fixed collection as repeatable.
    pub const fn multiple_values(mut self) -> Self {
        self.multiple_values = true;
        self
    }

    pub const fn with_display_options(mut self, display_options: DisplayOptions) -> Self {
        self.display_options = Some(display_options);
        self
    }

    pub const fn with_modes(mut self, modes: &'static [LocatorModeDescriptor]) -> Self {
        self.modes = modes;
        self
    }

    pub const fn with_options(mut self, options: &'static [FieldDescriptor]) -> Self {
        self.options = options;
        self
    }

    /// Returns whether the field is shown for the given resource and operation.
    ///
    /// Fields without display options are always shown. Conditions on any
    /// other parameter never match.
    pub fn is_visible(&self, resource: &str, operation: &str) -> bool {
        let Some(display_options) = self.display_options else {
            return true;
        };

        display_options.show.iter().all(|condition| {
            let actual = match condition.parameter {
                "resource" => resource,
                "operation" => operation,
                _ => return false,
            };
            condition.values.contains(&actual)
        })
    }

    /// Looks up a nested option by name.
    pub fn option(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Looks up a locator mode.
    pub fn mode(&self, mode: LocatorMode) -> Option<&'static LocatorModeDescriptor> {
        self.modes.iter().find(|descriptor| descriptor.name == mode)
    }

    /// Checks a locator against this field's declared modes.
    ///
    /// The locator's mode must be one the field offers, and a hand-entered
    /// value must pass that mode's validation rule.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an undeclared mode or a value the
    /// rule rejects.
    pub fn validate_locator(&self, locator: &ResourceLocator) -> Result<()> {
        let mode = locator.mode();
        let Some(descriptor) = self.mode(mode) else {
            return Err(Error::invalid_input().with_message(format!(
                "{} cannot be given by {mode}",
                self.display_name
            )));
        };

        match (descriptor.validation, locator.entered_value()) {
            (Some(rule), Some(value)) => rule.check(value),
            _ => Ok(()),
        }
    }
}
