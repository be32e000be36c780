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

//! # Text Normalizer
//!
//! Cleans up the whitespace and punctuation artifacts left behind when HTML
//! tags are rewritten into sentence-delimiting markers.
//!
//! Two passes are exposed:
//!
//! - [`regex_out_punctuation_and_white_space`]: collapses runs of periods,
//!   question/exclamation marks, spaces and newlines into one canonical
//!   delimiter, and drops a stray leading period.
//! - [`condense_line_breaks`]: collapses blank lines and turns leftover `<br>`
//!   tags into newlines.

use std::sync::OnceLock;

use regex::Regex;

/// Upper bound on cleanup passes; real input converges in one or two.
const MAX_CLEANUP_PASSES: usize = 64;

struct CleanupRules {
    spaces: Regex,
    period_run: Regex,
    question_run: Regex,
    exclamation_run: Regex,
    period_break_run: Regex,
    question_break_run: Regex,
    exclamation_break_run: Regex,
    br_tag: Regex,
    break_run: Regex,
}

fn rules() -> &'static CleanupRules {
    static RULES: OnceLock<CleanupRules> = OnceLock::new();
    RULES.get_or_init(|| CleanupRules {
        spaces: Regex::new(r" +").unwrap(),
        period_run: Regex::new(r"[.][. ]{2,}").unwrap(),
        question_run: Regex::new(r"[?][. ]{2,}").unwrap(),
        exclamation_run: Regex::new(r"[!][. ]{2,}").unwrap(),
        period_break_run: Regex::new(r"[.][. \n]{2,}").unwrap(),
        question_break_run: Regex::new(r"[?][. \n]{2,}").unwrap(),
        exclamation_break_run: Regex::new(r"[!][. \n]{2,}").unwrap(),
        br_tag: Regex::new(r"<br[/]*>").unwrap(),
        break_run: Regex::new(r"[ \n]{2,}").unwrap(),
    })
}

fn cleanup_pass(text: &str) -> String {
    let rules = rules();

    let text = text.replace("?.", "?");
    let text = rules.spaces.replace_all(&text, " ");

    let text = rules.period_run.replace_all(&text, ". ");
    let text = rules.question_run.replace_all(&text, "? ");
    let text = rules.exclamation_run.replace_all(&text, "! ");
    let text = rules.period_break_run.replace_all(&text, ". \n");
    let text = rules.question_break_run.replace_all(&text, "? \n");
    let text = rules.exclamation_break_run.replace_all(&text, "! \n");

    // a period left at the very start of the document is an artifact
    let text = text.trim_start();
    match text.strip_prefix('.') {
        Some(rest) => rest.trim_start().to_string(),
        None => text.to_string(),
    }
}

/// Cleans up excess whitespace and punctuation.
///
/// The rule set is re-applied until the text stops changing, so the result is
/// a fixed point: cleaning already cleaned text is a no-op.
pub fn regex_out_punctuation_and_white_space(text: &str) -> String {
    let mut current = cleanup_pass(text);
    for _ in 1..MAX_CLEANUP_PASSES {
        let next = cleanup_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Collapses runs of spaces and newlines into a single `" \n"` and rewrites
/// literal `<br>`/`<br/>` remnants into newlines.
pub fn condense_line_breaks(text: &str) -> String {
    let rules = rules();

    let text = rules.spaces.replace_all(text, " ");
    let text = text.trim();
    let text = rules.br_tag.replace_all(text, "\n");
    rules.break_run.replace_all(&text, " \n").into_owned()
}

/// Replaces every occurrence of each character in `chars` with `replacement`.
pub fn replace_chars(text: &str, chars: &[char], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if chars.contains(&ch) {
            out.push_str(replacement);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Newlines are not rendered by browsers, so they carry no structure in raw
/// HTML and are flattened before parsing.
pub fn clear_non_rendered_html(text: &str) -> String {
    text.replace('\n', " ")
}

pub fn remove_newlines(text: &str) -> String {
    replace_chars(text, &['\n'], " ")
}
