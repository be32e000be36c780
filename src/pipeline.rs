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

//! # Autodiscern Pipeline Module
//!
//! [`AdTransformer`] runs three stages over a batch of records:
//!
//! 1. **transform**: every configured [`AdTransform`] over each record's content
//! 2. **flatten** (optional): one record per segment, keyed `"{id}-{sub_id}"`
//! 3. **annotate** (optional): every configured [`AdAnnotation`] over each record
//!
//! Each stage finishes for the whole batch before the next one starts. Within
//! a stage records are independent, so with `parallelism` enabled the stage
//! runs on a rayon pool of `num_cores` threads that lives for that one stage.
//! Results are gathered in input order and the first failing record aborts
//! the batch, in both modes.

use std::sync::Arc;

use crate::config::AdTransformerConfig;
use crate::errors::Result;
use crate::operator::{execute_annotations, execute_transforms, AdAnnotation, AdTransform};
use crate::operators::html::{AdHtmlMode, AdHtmlReducer};
use crate::operators::segment::{flatten_records, AdSegmentMode, AdSegmenter, AdTokenizer};
use crate::record::{records_to_set, AdRecord, AdRecordBatch, AdRecordSet};

pub const TRANSFORM_STAGE: &str = "transform";
pub const FLATTEN_STAGE: &str = "flatten";
pub const ANNOTATE_STAGE: &str = "annotate";

/// Configured transformation pipeline.
#[derive(Clone, Debug)]
pub struct AdTransformer {
    config: AdTransformerConfig,
    transforms: Vec<AdTransform>,
    annotations: Vec<AdAnnotation>,
}

impl AdTransformer {
    /// Builds the transform and annotation lists for `config`.
    ///
    /// Fails on an invalid configuration; questionable option combinations are
    /// logged as warnings.
    pub fn new(config: AdTransformerConfig) -> Result<Self> {
        config.validate()?;
        for warning in config.warnings() {
            log::warn!("{warning}");
        }

        let html_mode = match (config.leave_some_html, config.html_to_plain_text) {
            (false, _) => AdHtmlMode::PlainText,
            (true, false) => AdHtmlMode::LimitedHtml,
            (true, true) => AdHtmlMode::PlainTextMarkers,
        };

        // Paragraphs are split on the newlines the reducer emits, so they must
        // be cut before newline removal; the cleanup then runs per paragraph.
        let paragraphs_first = config.segment_into == AdSegmentMode::Paragraphs;
        let segment = AdTransform::Segment(AdSegmenter::new(config.segment_into));

        let mut transforms = vec![AdTransform::ReduceHtml(AdHtmlReducer::new(html_mode))];
        if paragraphs_first {
            transforms.push(segment.clone());
        }
        if config.remove_newlines {
            transforms.push(AdTransform::RemoveNewlines);
            transforms.push(AdTransform::CleanPunctuation);
        }
        if !config.segment_into.is_none() && !paragraphs_first {
            transforms.push(segment);
        }

        let annotations = if config.annotate_html {
            vec![
                AdAnnotation::HtmlTags {
                    extract_domains: true,
                },
                AdAnnotation::LinkType,
            ]
        } else {
            Vec::new()
        };

        log::debug!(
            "transformer built: transforms=[{}], annotations=[{}], flatten={}, parallelism={}",
            transforms.iter().map(AdTransform::name).collect::<Vec<_>>().join(", "),
            annotations.iter().map(AdAnnotation::name).collect::<Vec<_>>().join(", "),
            config.flatten,
            config.parallelism,
        );

        Ok(AdTransformer {
            config,
            transforms,
            annotations,
        })
    }

    /// Replaces the tokenizer used by word or sentence segmentation.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn AdTokenizer>) -> Self {
        for transform in &mut self.transforms {
            if let AdTransform::Segment(segmenter) = transform {
                *segmenter = AdSegmenter::with_tokenizer(segmenter.mode(), tokenizer.clone());
            }
        }
        self
    }

    pub fn config(&self) -> &AdTransformerConfig {
        &self.config
    }

    pub fn transforms(&self) -> &[AdTransform] {
        &self.transforms
    }

    pub fn annotations(&self) -> &[AdAnnotation] {
        &self.annotations
    }

    /// Transforms a keyed record set and re-keys the result, since flattening
    /// changes identifiers.
    pub fn apply(&self, records: AdRecordSet) -> Result<AdRecordSet> {
        let batch = records.into_values().collect();
        records_to_set(self.apply_records(batch)?)
    }

    /// Transforms a positional batch. Output order follows input order.
    pub fn apply_records(&self, batch: AdRecordBatch) -> Result<AdRecordBatch> {
        self.apply_with_progress(batch, |_, _, _| {})
    }

    /// Like [`apply_records`](Self::apply_records), reporting
    /// `(stage, records_in, records_out)` after every stage that ran.
    pub fn apply_with_progress(
        &self,
        batch: AdRecordBatch,
        progress: impl Fn(&str, usize, usize),
    ) -> Result<AdRecordBatch> {
        let before = batch.len();
        let mut batch = self.run_stage(TRANSFORM_STAGE, batch, |record| {
            execute_transforms(&self.transforms, &record)
        })?;
        progress(TRANSFORM_STAGE, before, batch.len());

        if self.config.flatten {
            let before = batch.len();
            batch = flatten_records(batch)?;
            log::debug!("flattened {} records into {}", before, batch.len());
            progress(FLATTEN_STAGE, before, batch.len());
        }

        if !self.annotations.is_empty() {
            let before = batch.len();
            batch = self.run_stage(ANNOTATE_STAGE, batch, |record| {
                execute_annotations(&self.annotations, record)
            })?;
            progress(ANNOTATE_STAGE, before, batch.len());
        }

        Ok(batch)
    }

    fn run_stage<F>(&self, stage: &str, batch: AdRecordBatch, worker: F) -> Result<AdRecordBatch>
    where
        F: Fn(AdRecord) -> Result<AdRecord> + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallelism {
                return self.run_parallel(stage, batch, worker);
            }
        }

        log::debug!("stage '{}' running serially over {} records", stage, batch.len());
        batch.into_iter().map(worker).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<F>(&self, stage: &str, batch: AdRecordBatch, worker: F) -> Result<AdRecordBatch>
    where
        F: Fn(AdRecord) -> Result<AdRecord> + Send + Sync,
    {
        use rayon::prelude::*;

        use crate::errors::AdError;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_cores)
            .thread_name(|index| format!("autodiscern-worker-{index}"))
            .build()
            .map_err(|err| AdError::pipeline(stage, format!("failed to build worker pool: {err}")))?;

        log::debug!(
            "stage '{}' running on {} threads over {} records",
            stage,
            self.config.num_cores,
            batch.len()
        );
        pool.install(|| batch.into_par_iter().map(|record| worker(record)).collect())
    }
}
