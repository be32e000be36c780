//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Autodiscern.
//! The Autodiscern project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Transformer Configuration
//!
//! [`AdTransformerConfig`] is the immutable option set a transformer is built
//! from. It can be assembled with fluent setters or loaded from JSON or YAML;
//! every field is optional and falls back to its default.
//!
//! ```rust
//! use autodiscern::config::AdTransformerConfig;
//! use autodiscern::operators::segment::AdSegmentMode;
//!
//! let config = AdTransformerConfig::new()
//!     .html_to_plain_text(true)
//!     .segment_into(AdSegmentMode::Sentences)
//!     .flatten(true);
//! assert!(config.validate().is_ok());
//!
//! let loaded = AdTransformerConfig::from_yaml_str("segment_into: sents\nflatten: true\n").unwrap();
//! assert_eq!(loaded.segment_into, AdSegmentMode::Sentences);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{AdError, Result};
use crate::operators::segment::AdSegmentMode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdTransformerConfig {
    /// Keep headings and links instead of reducing to plain text.
    pub leave_some_html: bool,
    /// With `leave_some_html`, encode the kept tags as plain-text markers.
    pub html_to_plain_text: bool,
    #[serde(deserialize_with = "deserialize_segment_mode")]
    pub segment_into: AdSegmentMode,
    /// Replace newlines and clean up punctuation after reduction.
    pub remove_newlines: bool,
    /// Expand segmented records into one record per segment.
    pub flatten: bool,
    /// Run the marker annotation passes.
    pub annotate_html: bool,
    pub parallelism: bool,
    pub num_cores: usize,
}

impl Default for AdTransformerConfig {
    fn default() -> Self {
        Self {
            leave_some_html: false,
            html_to_plain_text: false,
            segment_into: AdSegmentMode::None,
            remove_newlines: true,
            flatten: false,
            annotate_html: false,
            parallelism: false,
            num_cores: num_cpus::get(),
        }
    }
}

// Accepts `null` as well as any mode alias.
fn deserialize_segment_mode<'de, D>(deserializer: D) -> std::result::Result<AdSegmentMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) => value.parse().map_err(serde::de::Error::custom),
        None => Ok(AdSegmentMode::None),
    }
}

fn invalid(err: impl std::fmt::Display) -> AdError {
    AdError::config(format!("invalid transformer configuration: {err}"))
}

impl AdTransformerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leave_some_html(mut self, enabled: bool) -> Self {
        self.leave_some_html = enabled;
        self
    }

    pub fn html_to_plain_text(mut self, enabled: bool) -> Self {
        self.html_to_plain_text = enabled;
        self
    }

    pub fn segment_into(mut self, mode: AdSegmentMode) -> Self {
        self.segment_into = mode;
        self
    }

    pub fn remove_newlines(mut self, enabled: bool) -> Self {
        self.remove_newlines = enabled;
        self
    }

    pub fn flatten(mut self, enabled: bool) -> Self {
        self.flatten = enabled;
        self
    }

    pub fn annotate_html(mut self, enabled: bool) -> Self {
        self.annotate_html = enabled;
        self
    }

    pub fn parallelism(mut self, enabled: bool) -> Self {
        self.parallelism = enabled;
        self
    }

    pub fn num_cores(mut self, cores: usize) -> Self {
        self.num_cores = cores;
        self
    }

    /// Parses the segmentation mode from one of its aliases.
    pub fn segment_into_str(self, mode: &str) -> Result<Self> {
        Ok(self.segment_into(mode.parse()?))
    }

    pub fn from_json(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(invalid)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(invalid)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(invalid)
    }

    /// Loads a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(AdError::config(format!(
                "unsupported config file '{}', expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }

    /// Rejects option sets the executor cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.num_cores == 0 {
            return Err(AdError::config("num_cores must be at least 1"));
        }
        Ok(())
    }

    /// Option combinations that run but are unlikely to be intended.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.leave_some_html && !self.segment_into.is_none() && !self.html_to_plain_text {
            warnings.push(
                "segmentation does not work well with html remaining in the text; \
                 consider enabling html_to_plain_text",
            );
        }
        if self.flatten && self.segment_into.is_none() {
            warnings.push("flattening is only meaningful when segmentation is also applied");
        }
        if self.parallelism && !cfg!(feature = "parallel") {
            warnings.push("parallelism requested but the 'parallel' feature is disabled; running serially");
        }
        warnings
    }
}
