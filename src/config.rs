// src/config.rs

//! Profile store loading (`qconfig.json`).
//!
//! The store is a flat JSON object holding the index coordinates. If the
//! primary file is absent, the template is copied into place so a first run
//! leaves something to fill in. Constructed once at process start and passed
//! by reference everywhere; never mutated afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Default path of the primary profile store.
pub const DEFAULT_CONFIG_FILE: &str = "qconfig.json";

/// Template copied into place on first run.
pub const DEFAULT_TEMPLATE_FILE: &str = "qconfig.template.json";

/// Index coordinates for an Amazon Q Business application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QConfig {
    pub region: String,
    pub application_id: String,
    pub index_id: String,
    pub role_arn: String,

    /// Provider-specific extras, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl QConfig {
    /// Load the profile store, falling back to the template if the primary
    /// file does not exist.
    ///
    /// A malformed file, or both files missing, is an unrecoverable setup
    /// error and is never retried.
    pub fn load(config_path: &Path, template_path: &Path) -> Result<Self> {
        match fs::read_to_string(config_path) {
            Ok(content) => {
                let config = Self::parse(&content, config_path)?;

                let empty = config.empty_fields();
                if !empty.is_empty() {
                    log::warn!(
                        "Some values in {} are empty: {}. Please fill them in.",
                        config_path.display(),
                        empty.join(", ")
                    );
                }

                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Self::bootstrap(config_path, template_path)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Copy the template into place and return its contents.
    fn bootstrap(config_path: &Path, template_path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(template_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::config(format!(
                    "Neither {} nor {} found. Please create a configuration file.",
                    config_path.display(),
                    template_path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::parse(&content, template_path)?;
        fs::write(config_path, serde_json::to_string_pretty(&config)?)?;

        log::warn!(
            "Configuration file {} not found. Copied template {}.",
            config_path.display(),
            template_path.display()
        );
        log::warn!("Please fill in the configuration values before uploading.");

        Ok(config)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            AppError::config(format!(
                "Error parsing {}: {}. Please ensure it's valid JSON.",
                path.display(),
                e
            ))
        })
    }

    /// Names of fields that are still empty (required fields plus any extras
    /// with empty or null values).
    pub fn empty_fields(&self) -> Vec<String> {
        let mut empty = Vec::new();

        for (name, value) in [
            ("region", &self.region),
            ("application_id", &self.application_id),
            ("index_id", &self.index_id),
            ("role_arn", &self.role_arn),
        ] {
            if value.trim().is_empty() {
                empty.push(name.to_string());
            }
        }

        for (key, value) in &self.extra {
            let is_empty = match value {
                Value::Null => true,
                Value::String(s) => s.trim().is_empty(),
                _ => false,
            };
            if is_empty {
                empty.push(key.clone());
            }
        }

        empty
    }
}
