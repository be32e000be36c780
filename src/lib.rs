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

//! # Autodiscern Core Library
//!
//! Turns scraped health-information articles into normalized text records for
//! DISCERN quality scoring. Raw HTML is reduced to text (optionally keeping a
//! small tag whitelist or encoding it as plain-text markers), cleaned up,
//! segmented into words, sentences or paragraphs, optionally flattened into one
//! record per segment, and annotated with the structure the markers recorded.
//!
//! ## Module Overview
//!
//! - **errors**: [`AdError`] and the crate-wide [`Result`]
//! - **record**: [`AdRecord`], content access and identifier rules
//! - **config**: [`AdTransformerConfig`] and its JSON/YAML loaders
//! - **domain**: registrable domain extraction for link comparison
//! - **operators**: the HTML reducer, normalizer, segmenter and annotator
//! - **operator**: transform and annotation descriptors and their dispatch
//! - **pipeline**: [`AdTransformer`], the serial/parallel executor
//!
//! ## Feature Flags
//!
//! - `parallel`: runs stages on a rayon worker pool when `parallelism` is set
//! - `full`: enables all features (default)
//!
//! ## Quick Start
//!
//! ```rust
//! use autodiscern::{AdRecord, AdTransformer, AdTransformerConfig};
//! use autodiscern::record::records_to_set;
//!
//! let transformer = AdTransformer::new(AdTransformerConfig::new()).unwrap();
//! let records = records_to_set(vec![AdRecord::new(0, "<h1>I am a Header</h1>")]).unwrap();
//!
//! let output = transformer.apply(records).unwrap();
//! assert_eq!(output["0"].content_str(), Some("I am a Header."));
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems fail at construction. A record that cannot be
//! transformed fails the whole batch with an error naming the pass and the
//! record identifier.

pub mod config;
pub mod domain;
pub mod errors;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod record;

pub use config::AdTransformerConfig;
pub use domain::{extract_domain, NO_DOMAIN};
pub use errors::{AdError, Result};
pub use operator::{AdAnnotation, AdTransform};
pub use operators::html::{AdHtmlMode, AdHtmlReducer, AdTagRules};
pub use operators::segment::{AdSegmentMode, AdSegmenter, AdTokenizer};
pub use pipeline::AdTransformer;
pub use record::{AdContent, AdRecord, AdRecordBatch, AdRecordSet};
