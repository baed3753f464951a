//! Plugin manifest definitions
//!
//! A command manifest:
//! ```yaml
//! name: ban
//! description: Ban a member from the server.
//! usage: "<user> [reason]"
//! category: moderation
//! permissions: [ban-members]
//! handler: ban
//! ```
//!
//! An event manifest is one entry or a list of them:
//! ```yaml
//! - signal: ready
//!   once: true
//!   handler: ready-log
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use crate::application::errors::PluginError;
use crate::domain::entities::Permission;

/// Metadata declared by a command manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandManifest {
    /// Command name (required)
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub usage: Option<String>,

    /// Category tag; `moderation` enables auditing
    #[serde(default)]
    pub category: Option<String>,

    /// Permissions the invoker must hold
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Catalogue key of the handler, defaults to `name`
    #[serde(default)]
    pub handler: Option<String>,
}

impl CommandManifest {
    pub fn handler_key(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.name)
    }
}

/// One signal subscription declared by an event manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EventManifest {
    /// Signal name (required)
    pub signal: String,

    #[serde(default)]
    pub once: bool,

    /// Catalogue key of the handler, defaults to `signal`
    #[serde(default)]
    pub handler: Option<String>,
}

impl EventManifest {
    pub fn handler_key(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.signal)
    }
}

fn parse_value(path: &Path, content: &str) -> Result<Value, PluginError> {
    serde_yaml::from_str(content).map_err(|e| PluginError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn has_text_field(value: &Value, field: &str) -> bool {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false)
}

fn decode<T: serde::de::DeserializeOwned>(
    path: &Path,
    value: Value,
    required: &'static str,
) -> Result<T, PluginError> {
    if !has_text_field(&value, required) {
        return Err(PluginError::MissingField {
            path: path.to_path_buf(),
            field: required,
        });
    }
    serde_yaml::from_value(value).map_err(|e| PluginError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Decode a command manifest, requiring a non-empty `name`
pub fn decode_command(path: &Path, content: &str) -> Result<CommandManifest, PluginError> {
    decode(path, parse_value(path, content)?, "name")
}

/// Decode an event manifest holding one entry or a sequence of entries.
///
/// The outer error covers the whole file; inner errors are per entry so one
/// malformed entry does not drop its siblings.
pub fn decode_events(
    path: &Path,
    content: &str,
) -> Result<Vec<Result<EventManifest, PluginError>>, PluginError> {
    let entries = match parse_value(path, content)? {
        Value::Sequence(items) => items,
        single @ Value::Mapping(_) => vec![single],
        _ => {
            return Err(PluginError::Parse {
                path: path.to_path_buf(),
                message: "expected a mapping or a sequence of mappings".to_string(),
            })
        }
    };

    Ok(entries
        .into_iter()
        .map(|entry| decode(path, entry, "signal"))
        .collect())
}
