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

//! # Autodiscern Error Module
//!
//! This module defines the error types used throughout the transformation
//! pipeline for consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors while loading configuration files
//! - **Serde**: JSON/YAML (de)serialization failures
//! - **Config**: Invalid transformer configuration, raised at construction
//! - **Validation**: Records that break the data model (missing id, duplicates)
//! - **Transform**: Failures in a string-level transform for one record
//! - **Annotation**: Failures in a dict-level annotation for one record
//! - **Pipeline**: Executor failures (worker pool setup, stage orchestration)
//! - **Internal**: Unexpected internal failures
//!
//! ## Usage
//!
//! ```rust
//! use autodiscern::errors::{AdError, Result};
//!
//! fn check_cores(num_cores: usize) -> Result<usize> {
//!     if num_cores == 0 {
//!         return Err(AdError::config("num_cores must be at least 1"));
//!     }
//!     Ok(num_cores)
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Autodiscern.
pub type Result<T> = std::result::Result<T, AdError>;

/// Canonical error enumeration for Autodiscern.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum AdError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Invalid transformer configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Records that do not satisfy the data model.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A string-level transform failed.
    #[error("transform '{transform}' failed: {message}")]
    Transform { transform: String, message: String },

    /// A dict-level annotation failed.
    #[error("annotation '{annotation}' failed: {message}")]
    Annotation { annotation: String, message: String },

    /// Failures that occur while orchestrating a batch.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AdError {
    fn from(err: io::Error) -> Self {
        AdError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdError {
    fn from(err: serde_json::Error) -> Self {
        AdError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for AdError {
    fn from(err: serde_yaml::Error) -> Self {
        AdError::Serde(err.to_string())
    }
}

impl AdError {
    /// Helper to construct configuration errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        AdError::Config {
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        AdError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct transform errors.
    pub fn transform(name: impl Into<String>, message: impl Into<String>) -> Self {
        AdError::Transform {
            transform: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct annotation errors.
    pub fn annotation(name: impl Into<String>, message: impl Into<String>) -> Self {
        AdError::Annotation {
            annotation: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        AdError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        AdError::Internal(message.into())
    }
}
