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

use std::io::Write;

use autodiscern::config::AdTransformerConfig;
use autodiscern::operators::segment::AdSegmentMode;
use autodiscern::{AdError, AdTransformer};
use serde_json::json;

#[test]
fn defaults_match_the_plain_text_pipeline() {
    let config = AdTransformerConfig::default();
    assert!(!config.leave_some_html);
    assert!(!config.html_to_plain_text);
    assert_eq!(config.segment_into, AdSegmentMode::None);
    assert!(config.remove_newlines);
    assert!(!config.flatten);
    assert!(!config.annotate_html);
    assert!(!config.parallelism);
    assert_eq!(config.num_cores, num_cpus::get());
}

#[test]
fn segment_aliases_load_from_json() {
    for (alias, mode) in [
        ("w", AdSegmentMode::Words),
        ("word", AdSegmentMode::Words),
        ("sent", AdSegmentMode::Sentences),
        ("sentence", AdSegmentMode::Sentences),
        ("para", AdSegmentMode::Paragraphs),
        ("paragraphs", AdSegmentMode::Paragraphs),
    ] {
        let config = AdTransformerConfig::from_json(&json!({ "segment_into": alias })).unwrap();
        assert_eq!(config.segment_into, mode, "alias {alias}");
    }
}

#[test]
fn invalid_segment_mode_fails_fast() {
    let err = AdTransformerConfig::from_json(&json!({"segment_into": "chapters"})).unwrap_err();
    match err {
        AdError::Config { message } => assert!(message.contains("chapters")),
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(AdTransformerConfig::new().segment_into_str("chapters").is_err());
}

#[test]
fn yaml_config_loads() {
    let yaml = "leave_some_html: true\nhtml_to_plain_text: true\nsegment_into: s\nannotate_html: true\nnum_cores: 2\n";
    let config = AdTransformerConfig::from_yaml_str(yaml).unwrap();
    assert!(config.leave_some_html && config.html_to_plain_text && config.annotate_html);
    assert_eq!(config.segment_into, AdSegmentMode::Sentences);
    assert_eq!(config.num_cores, 2);
}

#[test]
fn config_file_is_read_by_extension() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"flatten": true, "segment_into": "p"}}"#).unwrap();

    let config = AdTransformerConfig::from_path(file.path()).unwrap();
    assert!(config.flatten);
    assert_eq!(config.segment_into, AdSegmentMode::Paragraphs);
}

#[test]
fn unknown_config_extension_is_rejected() {
    let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    assert!(matches!(
        AdTransformerConfig::from_path(file.path()),
        Err(AdError::Config { .. })
    ));
}

#[test]
fn config_serializes_mode_as_canonical_name() {
    let config = AdTransformerConfig::new().segment_into(AdSegmentMode::Words);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["segment_into"], json!("words"));
}

#[test]
fn transformer_rejects_zero_cores() {
    let err = AdTransformer::new(AdTransformerConfig::new().num_cores(0)).unwrap_err();
    assert!(matches!(err, AdError::Config { .. }));
}

#[test]
fn html_left_in_segmented_text_warns() {
    let config = AdTransformerConfig::new()
        .leave_some_html(true)
        .segment_into(AdSegmentMode::Sentences);
    assert_eq!(config.warnings().len(), 1);

    let clean = config.html_to_plain_text(true);
    assert!(clean.warnings().is_empty());
}
