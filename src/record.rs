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

//! # Autodiscern Record Module
//!
//! An [`AdRecord`] is one article (or one segment of an article) flowing
//! through the transformation pipeline. It is a free-form field map that always
//! carries `content` and an identifying field (`id` or `entity_id`), and may
//! carry `url`, `sub_id` and the annotation fields `html_tags`, `domains` and
//! `link_type`.
//!
//! Transforms never mutate a record in place: every pass builds a new record
//! that copies all fields except the ones it rewrites.
//!
//! ## Usage Example
//!
//! ```rust
//! use autodiscern::record::{AdRecord, records_to_set};
//! use serde_json::json;
//!
//! let record = AdRecord::new(0, "<p>Hello</p>").with_field("url", json!("https://www.mind.org.uk"));
//! let set = records_to_set(vec![record]).unwrap();
//! assert!(set.contains_key("0"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AdError, Result};

/// Field holding the text (or list of segments) being transformed.
pub const CONTENT_FIELD: &str = "content";
/// Primary identifier field.
pub const ID_FIELD: &str = "id";
/// Identifier field used when `id` is absent.
pub const ENTITY_ID_FIELD: &str = "entity_id";
/// Segment position assigned by flattening.
pub const SUB_ID_FIELD: &str = "sub_id";
/// Source URL of the article.
pub const URL_FIELD: &str = "url";
/// Tag names recovered from plain-text markers.
pub const HTML_TAGS_FIELD: &str = "html_tags";
/// Link domains recovered from link markers.
pub const DOMAINS_FIELD: &str = "domains";
/// `internal`/`external` classification aligned with `domains`.
pub const LINK_TYPE_FIELD: &str = "link_type";

/// Keyed collection of records, in caller insertion order.
pub type AdRecordSet = IndexMap<String, AdRecord>;

/// Convenience alias for working on positional batches of records.
pub type AdRecordBatch = Vec<AdRecord>;

/// Fundamental data unit processed by the transformation pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdRecord {
    fields: Map<String, Value>,
}

impl AdRecord {
    /// Constructs a record from an identifier and raw content.
    pub fn new(id: impl Into<Value>, content: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id.into());
        fields.insert(CONTENT_FIELD.to_string(), Value::String(content.into()));
        AdRecord { fields }
    }

    /// Wraps an existing field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        AdRecord { fields }
    }

    /// Builds a record from a JSON object value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(AdRecord { fields }),
            other => Err(AdError::validation(format!(
                "record must be a JSON object, got {other}"
            ))),
        }
    }

    /// Returns the record with `key` set to `value`.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn content(&self) -> Option<&Value> {
        self.fields.get(CONTENT_FIELD)
    }

    /// Returns `content` when it is a plain string.
    pub fn content_str(&self) -> Option<&str> {
        self.content().and_then(Value::as_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.fields.get(URL_FIELD).and_then(Value::as_str)
    }

    pub fn sub_id(&self) -> Option<u64> {
        self.fields.get(SUB_ID_FIELD).and_then(Value::as_u64)
    }

    /// Reads a list-of-strings annotation field, ignoring non-string entries.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Copies every field except `content`, then sets the new content.
    pub fn derive_with_content(&self, content: Value) -> Self {
        let mut fields: Map<String, Value> = self
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != CONTENT_FIELD)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        fields.insert(CONTENT_FIELD.to_string(), content);
        AdRecord { fields }
    }

    /// Derives the record identifier, see [`record_identifier`].
    pub fn identifier(&self) -> Result<String> {
        record_identifier(self)
    }
}

/// Content carried by a record: raw text, or the segments produced by the
/// segmenter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdContent {
    Text(String),
    Segments(Vec<String>),
}

impl AdContent {
    /// Reads the content field of a record.
    pub fn from_record(record: &AdRecord) -> Result<Self> {
        match record.content() {
            Some(Value::String(text)) => Ok(AdContent::Text(text.clone())),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        AdError::validation("content segments must all be strings")
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(AdContent::Segments),
            Some(other) => Err(AdError::validation(format!(
                "content must be a string or a list of strings, got {other}"
            ))),
            None => Err(AdError::validation("record has no 'content' field")),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            AdContent::Text(text) => Value::String(text),
            AdContent::Segments(segments) => {
                Value::Array(segments.into_iter().map(Value::String).collect())
            }
        }
    }
}

fn render_id(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Derives the identifier used to key a record.
///
/// Uses `id`, falling back to `entity_id` when `id` is absent. When the record
/// carries a `sub_id` the identifier becomes `"{id}-{sub_id}"`.
pub fn record_identifier(record: &AdRecord) -> Result<String> {
    let base = record
        .get(ID_FIELD)
        .or_else(|| record.get(ENTITY_ID_FIELD))
        .ok_or_else(|| AdError::validation("record has neither 'id' nor 'entity_id'"))?;

    let base = render_id(base);
    match record.get(SUB_ID_FIELD) {
        Some(sub_id) => Ok(format!("{}-{}", base, render_id(sub_id))),
        None => Ok(base),
    }
}

/// Converts a positional batch into a keyed set.
///
/// Identifiers must be unique across the batch; a repeated identifier is a
/// validation error rather than a silent overwrite.
pub fn records_to_set(records: AdRecordBatch) -> Result<AdRecordSet> {
    let mut set = AdRecordSet::with_capacity(records.len());
    for record in records {
        let id = record_identifier(&record)?;
        if set.contains_key(&id) {
            return Err(AdError::validation(format!(
                "duplicate record identifier '{id}'"
            )));
        }
        set.insert(id, record);
    }
    Ok(set)
}
