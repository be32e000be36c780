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

//! # Operators Module
//!
//! The concrete passes a transformer is assembled from.
//!
//! ## Operator Categories
//!
//! - **html**: HTML parsing and tag reduction presets
//! - **normalize**: punctuation, whitespace and line-break cleanup
//! - **segment**: word, sentence and paragraph segmentation, flattening
//! - **annotate**: marker recovery and internal/external link classification
//!
//! Each pass is a pure function of one record (or one string); iteration and
//! concurrency belong to [`crate::pipeline`].

pub mod annotate;
pub mod html;
pub mod normalize;
pub mod segment;
