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

//! # Annotator
//!
//! Record-level passes that run after every transform. They recover the
//! structure that [`AdHtmlMode::PlainTextMarkers`](crate::operators::html::AdHtmlMode)
//! encoded as plain-text markers, then strip the markers from `content`.
//!
//! Link markers are read token by token on single spaces, and the link domain
//! is expected to be glued to the end of the marker. A marker that does not
//! sit on a token boundary is not parsed reliably.

use serde_json::Value;

use crate::domain::{extract_domain, NO_DOMAIN};
use crate::errors::{AdError, Result};
use crate::operators::html::{
    H1_MARKER, H2_MARKER, H3_MARKER, H4_MARKER, LINK_MARKER, LIST_ITEM_MARKER, TABLE_ROW_MARKER,
};
use crate::record::{
    AdContent, AdRecord, DOMAINS_FIELD, HTML_TAGS_FIELD, LINK_TYPE_FIELD,
};

/// Tracked markers and the tag they stand for, in reporting order.
pub const TAG_MARKERS: &[(&str, &str)] = &[
    (H1_MARKER, "h1"),
    (H2_MARKER, "h2"),
    (H3_MARKER, "h3"),
    (H4_MARKER, "h4"),
    (LINK_MARKER, "a"),
    (LIST_ITEM_MARKER, "li"),
    (TABLE_ROW_MARKER, "tr"),
];

pub const INTERNAL_LINK: &str = "internal";
pub const EXTERNAL_LINK: &str = "external";

/// Result of scanning one text for markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdMarkerScan {
    /// Text with markers removed.
    pub content: String,
    /// Tag names found, one per marker type.
    pub html_tags: Vec<&'static str>,
    /// Link domains, left to right.
    pub domains: Vec<String>,
}

/// Splits a token holding a link marker into the surrounding text and the
/// domain glued to the marker.
fn split_link_token(token: &str) -> (String, String) {
    let position = token.find(LINK_MARKER).unwrap_or(0);
    let marker_and_domain = &token[position..];
    let domain = marker_and_domain.replace(LINK_MARKER, "");
    let cleaned = token.replace(marker_and_domain, "");
    (cleaned, domain)
}

fn strip_link_markers(content: &str, domains: &mut Vec<String>) -> String {
    let mut kept: Vec<String> = Vec::new();
    for token in content.split(' ') {
        if token.contains(LINK_MARKER) {
            let (cleaned, domain) = split_link_token(token);
            domains.push(domain);
            if !cleaned.is_empty() {
                kept.push(cleaned);
            }
        } else if !token.is_empty() {
            kept.push(token.to_string());
        }
    }
    kept.join(" ").trim_end().to_string()
}

/// Detects and strips every tracked marker in `content`.
///
/// With `extract_domains` off, link markers are stripped like the others and
/// their glued domains are left in the text.
pub fn scan_markers(content: &str, extract_domains: bool) -> AdMarkerScan {
    let mut scan = AdMarkerScan {
        content: content.to_string(),
        ..AdMarkerScan::default()
    };

    for (marker, tag) in TAG_MARKERS {
        if !scan.content.contains(marker) {
            continue;
        }
        scan.content = if *marker == LINK_MARKER && extract_domains {
            strip_link_markers(&scan.content, &mut scan.domains)
        } else {
            scan.content.replace(marker, " ").trim().to_string()
        };
        scan.html_tags.push(*tag);
    }
    scan
}

fn string_values<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(items.into_iter().map(|item| Value::String(item.into())).collect())
}

/// Records which tracked tag types appear in `content` (`html_tags`) and the
/// link domains (`domains`), then strips the markers.
///
/// Segment-list content is scanned segment by segment; tag types are merged
/// in marker order and domains concatenated in segment order.
pub fn annotate_and_clean_html(record: &AdRecord, extract_domains: bool) -> Result<AdRecord> {
    let content = AdContent::from_record(record)
        .map_err(|err| AdError::annotation("html_tags", err.to_string()))?;

    let (content, html_tags, domains) = match content {
        AdContent::Text(text) => {
            let scan = scan_markers(&text, extract_domains);
            (AdContent::Text(scan.content), scan.html_tags, scan.domains)
        }
        AdContent::Segments(segments) => {
            let mut cleaned = Vec::with_capacity(segments.len());
            let mut found: Vec<&'static str> = Vec::new();
            let mut domains = Vec::new();
            for segment in &segments {
                let scan = scan_markers(segment, extract_domains);
                cleaned.push(scan.content);
                found.extend(scan.html_tags);
                domains.extend(scan.domains);
            }
            let html_tags = TAG_MARKERS
                .iter()
                .map(|(_, tag)| *tag)
                .filter(|tag| found.contains(tag))
                .collect();
            (AdContent::Segments(cleaned), html_tags, domains)
        }
    };

    Ok(record
        .derive_with_content(content.into_value())
        .with_field(HTML_TAGS_FIELD, string_values(html_tags))
        .with_field(DOMAINS_FIELD, string_values(domains)))
}

/// Classifies each entry of `domains` as `internal` (no domain, or the same
/// organisation as the record `url`) or `external`, into `link_type`.
///
/// Records without a `url` are returned unchanged with a warning.
pub fn annotate_internal_external_links(record: &AdRecord) -> Result<AdRecord> {
    let Some(url) = record.url() else {
        log::warn!(
            "text url is not available for linked domain comparison (record {})",
            record.identifier().unwrap_or_else(|_| "<unidentified>".to_string())
        );
        return Ok(record.clone());
    };

    let source_domain = extract_domain(url);
    let link_types = record.string_list(DOMAINS_FIELD).into_iter().map(|domain| {
        if domain == NO_DOMAIN || domain == source_domain {
            INTERNAL_LINK
        } else {
            EXTERNAL_LINK
        }
    });

    Ok(record
        .clone()
        .with_field(LINK_TYPE_FIELD, string_values(link_types)))
}
