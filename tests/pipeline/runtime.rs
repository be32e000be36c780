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

use std::sync::Arc;

use autodiscern::operators::segment::{AdSegmentMode, AdTokenizer};
use autodiscern::record::{records_to_set, AdRecord, AdRecordSet};
use autodiscern::{AdError, AdTransformer, AdTransformerConfig};
use serde_json::json;

const ANTIDEPRESSANTS_HTML: &str = include_str!("../fixtures/antidepressants.html");

fn set_of(records: Vec<AdRecord>) -> AdRecordSet {
    records_to_set(records).unwrap()
}

#[test]
fn article_reduces_to_one_sentence_per_line() {
    let transformer =
        AdTransformer::new(AdTransformerConfig::new().remove_newlines(false)).unwrap();
    let output = transformer
        .apply(set_of(vec![AdRecord::new(0, ANTIDEPRESSANTS_HTML)]))
        .unwrap();

    let expected = [
        "Antidepressants. ",
        "Antidepressants are medications primarily used for treating depression. ",
        "What Are Antidepressants? ",
        "Antidepressants are medications used to treat depression. Some of these medications are blue. ",
        "(Click Antidepressant Uses for more information on what they are used for, including possible off-label uses.). ",
        "Types of Antidepressants. ",
        "There are several types of antidepressants available to treat depression.",
    ]
    .join("\n");

    assert_eq!(output.len(), 1);
    assert_eq!(output["0"].content_str(), Some(expected.as_str()));
    assert_eq!(output["0"].get("id"), Some(&json!(0)));
}

#[test]
fn default_pipeline_reduces_a_header() {
    let transformer = AdTransformer::new(AdTransformerConfig::new()).unwrap();
    let output = transformer
        .apply(set_of(vec![AdRecord::new(0, "<h1>I am a Header</h1>")]))
        .unwrap();
    assert_eq!(output["0"].content_str(), Some("I am a Header."));
}

#[test]
fn flattening_rekeys_segment_lists() {
    let transformer = AdTransformer::new(AdTransformerConfig::new().flatten(true)).unwrap();
    let input = AdRecord::new(0, "").with_field("content", json!(["a", "b", "c"]));
    let output = transformer.apply(set_of(vec![input])).unwrap();

    let keys: Vec<_> = output.keys().cloned().collect();
    assert_eq!(keys, vec!["0-0", "0-1", "0-2"]);
    for (position, (_, record)) in output.iter().enumerate() {
        assert_eq!(record.sub_id(), Some(position as u64));
    }
    assert_eq!(output["0-2"].content_str(), Some("c"));
}

#[test]
fn paragraphs_flatten_into_child_records() {
    let transformer = AdTransformer::new(
        AdTransformerConfig::new()
            .segment_into(AdSegmentMode::Paragraphs)
            .flatten(true),
    )
    .unwrap();
    let input = AdRecord::new(0, "<p>One.</p><p>Two.</p>").with_field("url", json!("https://www.mind.org.uk/"));
    let output = transformer.apply(set_of(vec![input])).unwrap();

    assert_eq!(output["0-0"].content_str(), Some("One. "));
    assert_eq!(output["0-1"].content_str(), Some("Two."));
    assert_eq!(output["0-1"].url(), Some("https://www.mind.org.uk/"));
}

#[test]
fn default_cleanup_keeps_paragraph_boundaries() {
    let transformer =
        AdTransformer::new(AdTransformerConfig::new().segment_into(AdSegmentMode::Paragraphs)).unwrap();
    let output = transformer
        .apply_records(vec![AdRecord::new(0, "<p>One.</p><p>Two.</p><p>Three.</p>")])
        .unwrap();
    assert_eq!(output[0].content(), Some(&json!(["One. ", "Two. ", "Three."])));
}

#[test]
fn marker_pipeline_annotates_links() {
    let transformer = AdTransformer::new(
        AdTransformerConfig::new()
            .leave_some_html(true)
            .html_to_plain_text(true)
            .annotate_html(true),
    )
    .unwrap();
    let html = r#"<h2>Treatment</h2><p>See <a href="https://www.mind.org.uk/x">Mind</a> or <a href="http://depression.emedtv.com/x">eMedTV</a>.</p>"#;
    let input = AdRecord::new(1, html).with_field("url", json!("https://www.mind.org.uk/depression"));

    let output = transformer.apply(set_of(vec![input])).unwrap();
    let record = &output["1"];

    assert_eq!(record.content_str(), Some("Treatment. See Mind or eMedTV ."));
    assert_eq!(record.get("html_tags"), Some(&json!(["h2", "a"])));
    assert_eq!(record.get("domains"), Some(&json!(["mind", "emedtv"])));
    assert_eq!(record.get("link_type"), Some(&json!(["internal", "external"])));
}

#[test]
fn annotation_without_url_is_not_fatal() {
    let transformer = AdTransformer::new(
        AdTransformerConfig::new()
            .leave_some_html(true)
            .html_to_plain_text(true)
            .annotate_html(true),
    )
    .unwrap();
    let output = transformer
        .apply(set_of(vec![AdRecord::new(5, r#"<a href="/local">here</a>"#)]))
        .unwrap();

    assert_eq!(output["5"].get("domains"), Some(&json!(["NA"])));
    assert!(output["5"].get("link_type").is_none());
}

#[test]
fn parallel_and_serial_runs_agree() {
    let base = AdTransformerConfig::new()
        .leave_some_html(true)
        .html_to_plain_text(true)
        .segment_into(AdSegmentMode::Sentences)
        .flatten(true)
        .annotate_html(true);
    let serial = AdTransformer::new(base.clone()).unwrap();
    let parallel = AdTransformer::new(base.parallelism(true).num_cores(3)).unwrap();

    let records: Vec<AdRecord> = (0..24)
        .map(|id| {
            AdRecord::new(
                id,
                format!(
                    "<h1>Article {id}</h1><p>First claim. See <a href=\"https://site{id}.org/a\">source</a>.</p><ul><li>Point</li></ul>"
                ),
            )
            .with_field("url", json!(format!("https://www.site{}.org/", id % 3)))
        })
        .collect();

    let from_serial = serial.apply(set_of(records.clone())).unwrap();
    let from_parallel = parallel.apply(set_of(records.clone())).unwrap();
    assert_eq!(from_serial, from_parallel);
    assert_eq!(
        from_serial.keys().collect::<Vec<_>>(),
        from_parallel.keys().collect::<Vec<_>>()
    );

    let positional = parallel.apply_records(records).unwrap();
    let ids: Vec<_> = positional.iter().map(|r| r.get("id").cloned()).collect();
    let mut sorted = ids.clone();
    sorted.sort_by_key(|id| id.as_ref().and_then(|v| v.as_u64()));
    assert_eq!(ids, sorted);
}

#[test]
fn bad_record_fails_the_batch() {
    for parallelism in [false, true] {
        let transformer =
            AdTransformer::new(AdTransformerConfig::new().parallelism(parallelism).num_cores(2))
                .unwrap();
        let records = vec![
            AdRecord::new("good", "<p>fine</p>"),
            AdRecord::new("bad", "").with_field("content", json!(42)),
        ];
        let err = transformer.apply_records(records).unwrap_err();
        assert!(err.to_string().contains("bad"), "{err}");
    }
}

#[test]
fn invalid_mode_in_config_fails_construction() {
    let err = AdTransformerConfig::from_json(&json!({"segment_into": "pages"}))
        .and_then(AdTransformer::new)
        .unwrap_err();
    assert!(matches!(err, AdError::Config { .. }));
}

#[derive(Debug)]
struct WhitespaceTokenizer;

impl AdTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[test]
fn custom_tokenizer_drives_word_segmentation() {
    let transformer = AdTransformer::new(AdTransformerConfig::new().segment_into(AdSegmentMode::Words))
        .unwrap()
        .with_tokenizer(Arc::new(WhitespaceTokenizer));
    let output = transformer
        .apply_records(vec![AdRecord::new(0, "<p>Take two, daily</p>")])
        .unwrap();
    assert_eq!(output[0].content(), Some(&json!(["Take", "two,", "daily."])));
}

#[test]
fn progress_names_each_stage() {
    let transformer = AdTransformer::new(AdTransformerConfig::new().annotate_html(true)).unwrap();
    let seen = std::sync::Mutex::new(Vec::new());
    transformer
        .apply_with_progress(vec![AdRecord::new(0, "<p>x</p>")], |stage, _, _| {
            seen.lock().unwrap().push(stage.to_string());
        })
        .unwrap();
    assert_eq!(seen.into_inner().unwrap(), vec!["transform", "annotate"]);
}
