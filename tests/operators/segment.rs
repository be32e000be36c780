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

use autodiscern::operators::segment::{
    flatten_records, to_paragraphs, AdSegmentMode, AdSegmenter, AdTokenizer,
};
use autodiscern::record::AdRecord;
use serde_json::json;

#[derive(Debug)]
struct WhitespaceTokenizer;

impl AdTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[test]
fn sentences_are_stripped() {
    let segmenter = AdSegmenter::new(AdSegmentMode::Sentences);
    assert_eq!(
        segmenter.segment("First one. Second one."),
        vec!["First one.", "Second one."]
    );
}

#[test]
fn words_keep_token_order() {
    let segmenter = AdSegmenter::new(AdSegmentMode::Words);
    assert_eq!(
        segmenter.segment("Antidepressants treat depression."),
        vec!["Antidepressants", "treat", "depression", "."]
    );
}

#[test]
fn caller_tokenizer_is_used() {
    let segmenter = AdSegmenter::with_tokenizer(AdSegmentMode::Words, Arc::new(WhitespaceTokenizer));
    assert_eq!(segmenter.segment("Take two, daily."), vec!["Take", "two,", "daily."]);
}

#[test]
fn paragraphs_keep_trailing_empty_segment() {
    assert_eq!(to_paragraphs("One. \nTwo."), vec!["One. ", "Two."]);
    assert_eq!(to_paragraphs("Two<br/>"), vec!["Two", ""]);
}

#[test]
fn no_segmentation_returns_the_text() {
    let segmenter = AdSegmenter::new(AdSegmentMode::None);
    assert_eq!(segmenter.segment("whole text"), vec!["whole text"]);
}

#[test]
fn flatten_assigns_positional_sub_ids() {
    let parent = AdRecord::new(0, "")
        .with_field("content", json!(["a", "b", "c"]))
        .with_field("url", json!("https://www.mind.org.uk/"));

    let children = flatten_records(vec![parent]).unwrap();
    assert_eq!(children.len(), 3);
    for (position, child) in children.iter().enumerate() {
        assert_eq!(child.sub_id(), Some(position as u64));
        assert_eq!(child.url(), Some("https://www.mind.org.uk/"));
        assert_eq!(child.identifier().unwrap(), format!("0-{position}"));
    }
    assert_eq!(children[1].content_str(), Some("b"));
}

#[test]
fn flatten_treats_text_as_one_segment() {
    let children = flatten_records(vec![AdRecord::new(4, "single")]).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].identifier().unwrap(), "4-0");
    assert_eq!(children[0].content_str(), Some("single"));
}

#[test]
fn empty_segment_list_flattens_to_nothing() {
    let parent = AdRecord::new(9, "").with_field("content", json!([]));
    assert!(flatten_records(vec![parent]).unwrap().is_empty());
}
