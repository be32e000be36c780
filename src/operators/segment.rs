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

//! # Segmenter
//!
//! Splits normalized text into words, sentences or paragraphs, and flattens
//! segmented records into one record per segment.
//!
//! Word and sentence boundaries come from a pluggable [`AdTokenizer`]. The
//! bundled tokenizers follow Unicode UAX #29 segmentation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::{AdError, Result};
use crate::operators::normalize::condense_line_breaks;
use crate::record::{AdContent, AdRecordBatch, SUB_ID_FIELD};

/// External tokenization capability used by word and sentence segmentation.
pub trait AdTokenizer: fmt::Debug + Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word tokenizer on UAX #29 word boundaries. Punctuation becomes its own
/// token, whitespace is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdWordTokenizer;

impl AdTokenizer for AdWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|token| !token.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Sentence boundary detector on UAX #29 sentence boundaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdSentenceTokenizer;

impl AdTokenizer for AdSentenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_sentences().map(str::to_string).collect()
    }
}

/// Segmentation granularity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AdSegmentMode {
    #[default]
    None,
    Words,
    Sentences,
    Paragraphs,
}

impl AdSegmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdSegmentMode::None => "none",
            AdSegmentMode::Words => "words",
            AdSegmentMode::Sentences => "sentences",
            AdSegmentMode::Paragraphs => "paragraphs",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, AdSegmentMode::None)
    }

    /// Tokenizer registered for this mode. Paragraphs split on line breaks and
    /// need none.
    pub fn default_tokenizer(&self) -> Option<Arc<dyn AdTokenizer>> {
        match self {
            AdSegmentMode::Words => Some(Arc::new(AdWordTokenizer)),
            AdSegmentMode::Sentences => Some(Arc::new(AdSentenceTokenizer)),
            AdSegmentMode::None | AdSegmentMode::Paragraphs => None,
        }
    }
}

impl FromStr for AdSegmentMode {
    type Err = AdError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(AdSegmentMode::None),
            "w" | "word" | "words" => Ok(AdSegmentMode::Words),
            "s" | "sent" | "sents" | "sentence" | "sentences" => Ok(AdSegmentMode::Sentences),
            "p" | "para" | "paragraph" | "paragraphs" => Ok(AdSegmentMode::Paragraphs),
            _ => Err(AdError::config(format!("invalid segment_into: '{value}'"))),
        }
    }
}

impl TryFrom<String> for AdSegmentMode {
    type Error = AdError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AdSegmentMode> for String {
    fn from(mode: AdSegmentMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for AdSegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Segmentation transform: a mode bound to its tokenizer.
#[derive(Clone, Debug)]
pub struct AdSegmenter {
    mode: AdSegmentMode,
    tokenizer: Option<Arc<dyn AdTokenizer>>,
}

impl AdSegmenter {
    /// Builds a segmenter with the default tokenizer for `mode`.
    pub fn new(mode: AdSegmentMode) -> Self {
        AdSegmenter {
            mode,
            tokenizer: mode.default_tokenizer(),
        }
    }

    /// Builds a segmenter with a caller-supplied tokenizer. The tokenizer is
    /// ignored for paragraph segmentation.
    pub fn with_tokenizer(mode: AdSegmentMode, tokenizer: Arc<dyn AdTokenizer>) -> Self {
        AdSegmenter {
            mode,
            tokenizer: Some(tokenizer),
        }
    }

    pub fn mode(&self) -> AdSegmentMode {
        self.mode
    }

    /// Splits `text` into segments.
    pub fn segment(&self, text: &str) -> Vec<String> {
        match self.mode {
            AdSegmentMode::None => vec![text.to_string()],
            AdSegmentMode::Words => self.tokenize(text),
            AdSegmentMode::Sentences => self
                .tokenize(text)
                .into_iter()
                .map(|sentence| sentence.trim().to_string())
                .collect(),
            AdSegmentMode::Paragraphs => to_paragraphs(text),
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        match &self.tokenizer {
            Some(tokenizer) => tokenizer.tokenize(text),
            None => vec![text.to_string()],
        }
    }
}

/// Splits text on line breaks after condensing them. A trailing empty
/// paragraph is kept.
pub fn to_paragraphs(text: &str) -> Vec<String> {
    condense_line_breaks(text)
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Expands every record with segment-list content into one record per
/// segment, tagged with its zero-based `sub_id`.
///
/// Text content is treated as a single segment.
pub fn flatten_records(records: AdRecordBatch) -> Result<AdRecordBatch> {
    let mut output = Vec::with_capacity(records.len());
    for parent in records {
        let segments = match AdContent::from_record(&parent)? {
            AdContent::Segments(segments) => segments,
            AdContent::Text(text) => vec![text],
        };
        for (position, segment) in segments.into_iter().enumerate() {
            let child = parent
                .derive_with_content(Value::String(segment))
                .with_field(SUB_ID_FIELD, Value::from(position));
            output.push(child);
        }
    }
    Ok(output)
}
