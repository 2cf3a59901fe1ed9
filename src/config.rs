//! Page configuration
//!
//! Stored in `~/.config/featform/config.yaml`. Describes which elements get
//! inline widgets and which forms are intercepted, with the option values
//! applied to each.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ajax::Method;
use crate::editable::{SubmitTrigger, WidgetOptions};
use crate::field::{FieldKind, SelectOption, UnknownFieldType, DEFAULT_COLS, DEFAULT_ROWS};
use crate::form::FormOverrides;

/// Errors from loading or validating a configuration file
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(String),
    /// Writing the configuration back out failed
    Serialize(String),
    UnknownFieldType(UnknownFieldType),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Failed to read {}: {}", path, source),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::UnknownFieldType(e) => write!(f, "Invalid inplace config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::UnknownFieldType(e) => Some(e),
            ConfigError::Parse(_) | ConfigError::Serialize(_) => None,
        }
    }
}

impl From<UnknownFieldType> for ConfigError {
    fn from(e: UnknownFieldType) -> Self {
        ConfigError::UnknownFieldType(e)
    }
}

/// Defaults applied to every inline element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InplaceConfig {
    /// Elements carrying this class get a widget
    #[serde(default = "default_inplace_class")]
    pub selector_class: String,
    /// Field type tag: text, password, textarea, select, selectCheckbox
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
    #[serde(default = "default_submit")]
    pub submit: Option<String>,
    #[serde(default)]
    pub cancel: Option<String>,
    #[serde(default = "default_cancel_link")]
    pub cancel_link: Option<String>,
    #[serde(default = "default_edit_class")]
    pub edit_class: Option<String>,
    #[serde(default)]
    pub submit_by: SubmitTrigger,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default)]
    pub start_editing: bool,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

fn default_inplace_class() -> String {
    "inplace".to_string()
}

fn default_type() -> String {
    "text".to_string()
}

fn default_submit() -> Option<String> {
    Some("OK".to_string())
}

fn default_cancel_link() -> Option<String> {
    Some("Cancel".to_string())
}

fn default_edit_class() -> Option<String> {
    Some("editor_field".to_string())
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_cols() -> u32 {
    DEFAULT_COLS
}

impl Default for InplaceConfig {
    fn default() -> Self {
        Self {
            selector_class: default_inplace_class(),
            kind: default_type(),
            submit: default_submit(),
            cancel: None,
            cancel_link: default_cancel_link(),
            edit_class: default_edit_class(),
            submit_by: SubmitTrigger::default(),
            rows: default_rows(),
            cols: default_cols(),
            start_editing: false,
            options: Vec::new(),
        }
    }
}

impl InplaceConfig {
    pub fn field_kind(&self) -> Result<FieldKind, UnknownFieldType> {
        FieldKind::from_tag(&self.kind, self.rows, self.cols)
    }

    /// Widget options for one element, saving through [`crate::inplace::remote_put`]
    pub fn widget_options(&self) -> Result<WidgetOptions, ConfigError> {
        Ok(WidgetOptions {
            on_edit: None,
            on_submit: Some(crate::inplace::remote_put()),
            on_reset: None,
            edit_class: self.edit_class.clone(),
            submit_label: self.submit.clone(),
            cancel_label: self.cancel.clone(),
            cancel_link_label: self.cancel_link.clone(),
            start_editing: self.start_editing,
            kind: self.field_kind()?,
            submit_by: self.submit_by,
            select_options: self.options.clone(),
        })
    }
}

/// Which forms are intercepted and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormsConfig {
    #[serde(default = "default_form_class")]
    pub selector_class: String,
    /// Overrides the form's `method` attribute
    #[serde(default)]
    pub method: Option<String>,
    /// Overrides the form's `action` attribute
    #[serde(default)]
    pub url: Option<String>,
}

fn default_form_class() -> String {
    "action_form".to_string()
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            selector_class: default_form_class(),
            method: None,
            url: None,
        }
    }
}

impl FormsConfig {
    pub fn overrides(&self) -> FormOverrides {
        FormOverrides {
            method: self.method.as_deref().and_then(|m| m.parse::<Method>().ok()),
            url: self.url.clone(),
        }
    }
}

/// Complete page configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub inplace: InplaceConfig,
    #[serde(default)]
    pub forms: FormsConfig,
}

impl PageConfig {
    /// Load config from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse YAML and check that the field type tag is known
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.inplace.field_kind()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_bootstrap() {
        let config = PageConfig::default();
        assert_eq!(config.inplace.kind, "text");
        assert_eq!(config.inplace.submit.as_deref(), Some("OK"));
        assert_eq!(config.inplace.cancel_link.as_deref(), Some("Cancel"));
        assert_eq!(config.inplace.edit_class.as_deref(), Some("editor_field"));
        assert_eq!(config.forms.selector_class, "action_form");
    }

    #[test]
    fn test_empty_document_is_defaults() {
        assert_eq!(PageConfig::parse("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let config = PageConfig::parse(
            "inplace:\n  type: textarea\n  rows: 3\n  submitBy: change\n  startEditing: true\n",
        )
        .unwrap();
        assert_eq!(config.inplace.submit_by, SubmitTrigger::Change);
        assert!(config.inplace.start_editing);
        assert_eq!(
            config.inplace.field_kind().unwrap(),
            FieldKind::Textarea { rows: 3, cols: 10 }
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = PageConfig::parse("inplace:\n  type: date\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFieldType(_)));
    }

    #[test]
    fn test_form_overrides() {
        let config = PageConfig::parse("forms:\n  method: put\n  url: /x\n").unwrap();
        let overrides = config.forms.overrides();
        assert_eq!(overrides.method, Some(Method::Put));
        assert_eq!(overrides.url.as_deref(), Some("/x"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PageConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(PageConfig::parse(&yaml).unwrap(), config);
    }

    #[test]
    fn test_error_messages_name_the_direction() {
        assert_eq!(
            ConfigError::Serialize("bad tag".into()).to_string(),
            "Failed to serialize config: bad tag"
        );
        assert_eq!(
            ConfigError::Parse("bad tag".into()).to_string(),
            "Failed to parse config: bad tag"
        );
    }
}
