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

//! # Autodiscern Operator Module
//!
//! A transformer is described by two ordered lists of plain-data descriptors
//! that a single dispatch loop interprets:
//!
//! - [`AdTransform`]: string level. Reads `content` and writes new `content`.
//!   Only [`AdTransform::Segment`] turns text into a list of segments, and it
//!   always runs last.
//! - [`AdAnnotation`]: record level. Runs after all transforms (and after
//!   flattening) and may add fields as well as rewrite `content`.
//!
//! String transforms given segment-list content are applied to each segment.
//!
//! ## Error Handling
//!
//! [`execute_transform`] and [`execute_annotation`] wrap failures with the
//! descriptor name and the identifier of the record that failed.

use crate::errors::{AdError, Result};
use crate::operators::annotate::{annotate_and_clean_html, annotate_internal_external_links};
use crate::operators::html::{AdHtmlMode, AdHtmlReducer};
use crate::operators::normalize::{regex_out_punctuation_and_white_space, remove_newlines};
use crate::operators::segment::{AdSegmentMode, AdSegmenter};
use crate::record::{AdContent, AdRecord};

/// String-level transform descriptor.
#[derive(Clone, Debug)]
pub enum AdTransform {
    /// Parse and reduce HTML with one of the reducer presets.
    ReduceHtml(AdHtmlReducer),
    /// Replace newlines with spaces.
    RemoveNewlines,
    /// Collapse punctuation and whitespace runs.
    CleanPunctuation,
    /// Split text into segments.
    Segment(AdSegmenter),
}

impl AdTransform {
    pub fn name(&self) -> &'static str {
        match self {
            AdTransform::ReduceHtml(reducer) => match reducer.mode() {
                AdHtmlMode::PlainText => "html.plain_text",
                AdHtmlMode::LimitedHtml => "html.limited_html",
                AdHtmlMode::PlainTextMarkers => "html.plain_text_markers",
            },
            AdTransform::RemoveNewlines => "normalize.remove_newlines",
            AdTransform::CleanPunctuation => "normalize.punctuation",
            AdTransform::Segment(segmenter) => match segmenter.mode() {
                AdSegmentMode::None => "segment.none",
                AdSegmentMode::Words => "segment.words",
                AdSegmentMode::Sentences => "segment.sentences",
                AdSegmentMode::Paragraphs => "segment.paragraphs",
            },
        }
    }

    fn apply_str(&self, text: &str) -> String {
        match self {
            AdTransform::ReduceHtml(reducer) => reducer.reduce(text),
            AdTransform::RemoveNewlines => remove_newlines(text),
            AdTransform::CleanPunctuation => regex_out_punctuation_and_white_space(text),
            // segmentation is handled by `apply`
            AdTransform::Segment(_) => text.to_string(),
        }
    }

    /// Applies the transform to record content.
    pub fn apply(&self, content: AdContent) -> Result<AdContent> {
        match (self, content) {
            (AdTransform::Segment(segmenter), AdContent::Text(text)) => {
                Ok(AdContent::Segments(segmenter.segment(&text)))
            }
            (AdTransform::Segment(_), AdContent::Segments(_)) => Err(AdError::transform(
                self.name(),
                "content is already segmented",
            )),
            (_, AdContent::Text(text)) => Ok(AdContent::Text(self.apply_str(&text))),
            (_, AdContent::Segments(segments)) => Ok(AdContent::Segments(
                segments.iter().map(|segment| self.apply_str(segment)).collect(),
            )),
        }
    }
}

/// Record-level annotation descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdAnnotation {
    /// Recover tag presence and link domains from markers, then strip them.
    HtmlTags { extract_domains: bool },
    /// Classify recovered link domains against the record `url`.
    LinkType,
}

impl AdAnnotation {
    pub fn name(&self) -> &'static str {
        match self {
            AdAnnotation::HtmlTags { .. } => "annotate.html_tags",
            AdAnnotation::LinkType => "annotate.link_type",
        }
    }

    pub fn apply(&self, record: &AdRecord) -> Result<AdRecord> {
        match self {
            AdAnnotation::HtmlTags { extract_domains } => {
                annotate_and_clean_html(record, *extract_domains)
            }
            AdAnnotation::LinkType => annotate_internal_external_links(record),
        }
    }
}

fn describe(record: &AdRecord) -> String {
    record
        .identifier()
        .unwrap_or_else(|_| "<unidentified>".to_string())
}

/// Runs every transform over a record's content, in order, and returns the
/// derived record.
pub fn execute_transforms(transforms: &[AdTransform], record: &AdRecord) -> Result<AdRecord> {
    let mut content = AdContent::from_record(record)
        .map_err(|err| AdError::validation(format!("record {}: {}", describe(record), err)))?;
    for transform in transforms {
        content = execute_transform(transform, content, record)?;
    }
    Ok(record.derive_with_content(content.into_value()))
}

/// Applies one transform, tagging failures with the transform name and the
/// record identifier.
pub fn execute_transform(
    transform: &AdTransform,
    content: AdContent,
    record: &AdRecord,
) -> Result<AdContent> {
    transform.apply(content).map_err(|err| {
        AdError::transform(
            transform.name(),
            format!("record {}: {}", describe(record), err),
        )
    })
}

/// Runs every annotation over a record, in order.
pub fn execute_annotations(annotations: &[AdAnnotation], record: AdRecord) -> Result<AdRecord> {
    let mut current = record;
    for annotation in annotations {
        current = execute_annotation(annotation, &current)?;
    }
    Ok(current)
}

/// Applies one annotation, tagging failures with the annotation name and the
/// record identifier.
pub fn execute_annotation(annotation: &AdAnnotation, record: &AdRecord) -> Result<AdRecord> {
    annotation.apply(record).map_err(|err| {
        AdError::annotation(
            annotation.name(),
            format!("record {}: {}", describe(record), err),
        )
    })
}
