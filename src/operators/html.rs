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

//! # HTML Reducer
//!
//! Reduces scraped article HTML to text. The document is parsed with the
//! error tolerant html5ever parser, then rendered back to a string while every
//! tag is classified into exactly one bucket:
//!
//! - **keep with attributes**: the tag is written back verbatim
//! - **keep**: the tag is written back without attributes
//! - **replace**: the tag wrapper is dropped, its contents are kept and wrapped
//!   in a `(start, end)` marker pair
//!
//! Tags that are not explicitly classified fall into the replace bucket with
//! the default marker pair, so no tag survives outside the keep sets.
//! `script`, `style` and `noscript` elements are dropped together with their
//! contents. Comments, CDATA, processing instructions and doctypes are dropped.
//!
//! ## Presets
//!
//! | Mode                       | Result                                                      |
//! |----------------------------|-------------------------------------------------------------|
//! | [`AdHtmlMode::PlainText`]  | plain text, block boundaries become `". \n"`                |
//! | [`AdHtmlMode::LimitedHtml`]| headings and links kept, link targets reduced to a domain   |
//! | [`AdHtmlMode::PlainTextMarkers`] | plain text with `thisisa...tag` markers for annotation |

use std::collections::{HashMap, HashSet};

use scraper::node::{Element, Node};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::domain::{extract_domain, link_domain};
use crate::operators::normalize::{
    clear_non_rendered_html, condense_line_breaks, regex_out_punctuation_and_white_space,
    replace_chars,
};

/// Elements removed together with everything inside them.
pub const STRIP_WITH_CONTENTS: &[&str] = &["style", "script", "noscript"];

/// Marker for `h1` in the plain-text marker preset.
pub const H1_MARKER: &str = "thisisah1tag";
pub const H2_MARKER: &str = "thisisah2tag";
pub const H3_MARKER: &str = "thisisah3tag";
pub const H4_MARKER: &str = "thisisah4tag";
/// Marker for `a`; the link domain is glued to its end.
pub const LINK_MARKER: &str = "thisisalinktag";
pub const LIST_ITEM_MARKER: &str = "thisisalistitemtag";
pub const TABLE_ROW_MARKER: &str = "thisisatablerowtag";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Which reduction preset to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdHtmlMode {
    /// Reduce to plain text.
    PlainText,
    /// Keep headings and links, reduce everything else.
    LimitedHtml,
    /// Reduce to plain text, leaving recoverable markers for headings, links,
    /// list items and table rows.
    PlainTextMarkers,
}

/// Tag classification tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdTagRules {
    /// Tags kept with their attributes.
    pub keep_with_attrs: HashSet<String>,
    /// Tags kept with attributes cleared.
    pub keep: HashSet<String>,
    /// Tags replaced by a `(start, end)` marker pair.
    pub replace: HashMap<String, (String, String)>,
    /// Marker used on both sides of tags absent from `replace`.
    pub default_replacement: String,
    /// Append the link domain to the start marker of replaced `a` tags.
    pub include_link_domains: bool,
}

/// Bucket a tag falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdTagAction<'a> {
    KeepWithAttrs,
    Keep,
    Replace(&'a str, &'a str),
}

impl AdTagRules {
    /// Classifies a tag. Precedence: keep-with-attributes, keep, replace.
    pub fn classify(&self, tag: &str) -> AdTagAction<'_> {
        if self.keep_with_attrs.contains(tag) {
            AdTagAction::KeepWithAttrs
        } else if self.keep.contains(tag) {
            AdTagAction::Keep
        } else {
            match self.replace.get(tag) {
                Some((start, end)) => AdTagAction::Replace(start, end),
                None => AdTagAction::Replace(&self.default_replacement, &self.default_replacement),
            }
        }
    }

    fn with_replacements(mut self, pairs: &[(&str, &str, &str)]) -> Self {
        for (tag, start, end) in pairs {
            self.replace
                .insert(tag.to_string(), (start.to_string(), end.to_string()));
        }
        self
    }

    pub fn plain_text() -> Self {
        AdTagRules::default().with_replacements(&[
            ("br", ".\n", ".\n"),
            ("h1", "\n", ". \n"),
            ("h2", "\n", ". \n"),
            ("h3", "\n", ". \n"),
            ("h4", "\n", ". \n"),
            ("p", "\n", ". \n"),
            ("div", "\n", ". \n"),
        ])
    }

    pub fn limited_html() -> Self {
        let mut rules = AdTagRules::default().with_replacements(&[
            ("br", ".\n", ".\n"),
            ("p", "\n", "\n"),
        ]);
        rules.keep = ["h1", "h2", "h3", "h4"].iter().map(|t| t.to_string()).collect();
        rules.keep_with_attrs = std::iter::once("a".to_string()).collect();
        rules
    }

    pub fn plain_text_markers() -> Self {
        let mut rules = AdTagRules::default().with_replacements(&[
            ("br", ".\n", ".\n"),
            ("h1", " thisisah1tag ", ". \n"),
            ("h2", " thisisah2tag ", ". \n"),
            ("h3", " thisisah3tag ", ". \n"),
            ("h4", " thisisah4tag ", ". \n"),
            ("a", " thisisalinktag ", " "),
            ("li", "\n thisisalistitemtag ", ". \n"),
            ("tr", "\n thisisatablerowtag ", ". \n"),
            ("p", "\n", ". \n"),
            ("div", ". \n", ". \n"),
        ]);
        rules.include_link_domains = true;
        rules
    }
}

/// Parses HTML and renders it back according to a set of [`AdTagRules`].
#[derive(Clone, Debug)]
pub struct AdHtmlReducer {
    mode: AdHtmlMode,
    rules: AdTagRules,
}

impl AdHtmlReducer {
    pub fn new(mode: AdHtmlMode) -> Self {
        let rules = match mode {
            AdHtmlMode::PlainText => AdTagRules::plain_text(),
            AdHtmlMode::LimitedHtml => AdTagRules::limited_html(),
            AdHtmlMode::PlainTextMarkers => AdTagRules::plain_text_markers(),
        };
        AdHtmlReducer { mode, rules }
    }

    /// Uses custom tag tables with the parsing behaviour of `mode`.
    pub fn with_rules(mode: AdHtmlMode, rules: AdTagRules) -> Self {
        AdHtmlReducer { mode, rules }
    }

    pub fn mode(&self) -> AdHtmlMode {
        self.mode
    }

    pub fn rules(&self) -> &AdTagRules {
        &self.rules
    }

    /// Runs the full reduction: parse, render, clean up.
    pub fn reduce(&self, html: &str) -> String {
        let source = match self.mode {
            AdHtmlMode::LimitedHtml => html.to_string(),
            AdHtmlMode::PlainText | AdHtmlMode::PlainTextMarkers => clear_non_rendered_html(html),
        };

        let text = self.replace_html(&source);
        let text = replace_chars(&text, &['\t', '\u{a0}'], " ");
        let text = regex_out_punctuation_and_white_space(&text);
        condense_line_breaks(&text)
    }

    /// Renders `html` with tags kept or replaced, without any cleanup.
    pub fn replace_html(&self, html: &str) -> String {
        let document = Html::parse_fragment(html);
        let mut out = String::with_capacity(html.len());
        self.render_children(document.root_element(), &mut out);
        out
    }

    fn render_children(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.render_element(child_element, out);
                    }
                }
                // comments, doctypes and processing instructions carry no text
                _ => {}
            }
        }
    }

    fn render_element(&self, element: ElementRef<'_>, out: &mut String) {
        let value = element.value();
        let name = value.name();
        if STRIP_WITH_CONTENTS.contains(&name) {
            return;
        }

        match self.rules.classify(name) {
            AdTagAction::KeepWithAttrs => {
                out.push('<');
                out.push_str(name);
                self.write_attributes(value, out);
                self.close_open_tag(element, name, out);
            }
            AdTagAction::Keep => {
                out.push('<');
                out.push_str(name);
                self.close_open_tag(element, name, out);
            }
            AdTagAction::Replace(start, end) => {
                if name == "a" && self.rules.include_link_domains {
                    out.push_str(start.trim_end());
                    out.push_str(&link_domain(link_target(value).unwrap_or_default()));
                    out.push(' ');
                } else {
                    out.push_str(start);
                }
                self.render_children(element, out);
                out.push_str(end);
            }
        }
    }

    fn close_open_tag(&self, element: ElementRef<'_>, name: &str, out: &mut String) {
        if VOID_ELEMENTS.contains(&name) {
            out.push_str("/>");
            return;
        }
        out.push('>');
        self.render_children(element, out);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    fn write_attributes(&self, element: &Element, out: &mut String) {
        // links in limited HTML only keep their target, reduced to a domain
        if self.mode == AdHtmlMode::LimitedHtml && element.name() == "a" {
            for attr in ["href", "src"] {
                if let Some(target) = element.attr(attr) {
                    push_attribute(out, attr, &extract_domain(target));
                }
            }
            return;
        }
        for (attr, value) in element.attrs() {
            push_attribute(out, attr, value);
        }
    }
}

fn link_target(element: &Element) -> Option<&str> {
    element.attr("href").or_else(|| element.attr("src"))
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&value.replace('"', "&quot;"));
    out.push('"');
}
