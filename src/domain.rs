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

//! # Registrable Domain Extraction
//!
//! Links are compared by organisation, not by host: `drugs.rcpsych.co.uk` and
//! `depression.rcpsych.co.uk` both resolve to `rcpsych`. The public suffix list
//! decides where the registrable domain starts, so `co.uk` style suffixes are
//! handled correctly.

use url::{Host, Url};

/// Sentinel recorded for links whose target has no domain (relative paths,
/// fragments, `mailto:` links).
pub const NO_DOMAIN: &str = "NA";

/// Extracts the organisation label of the registrable domain of `url`.
///
/// Returns an empty string when no host can be found.
pub fn extract_domain(url: &str) -> String {
    let url = url.trim();
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => return addr.to_string(),
            Some(Host::Ipv6(addr)) => return addr.to_string(),
            None => return String::new(),
        },
        Err(_) => bare_host(url),
    };

    domain_label(&host)
}

/// Like [`extract_domain`], but maps "no domain" onto [`NO_DOMAIN`].
pub fn link_domain(url: &str) -> String {
    let domain = extract_domain(url);
    if domain.is_empty() {
        NO_DOMAIN.to_string()
    } else {
        domain
    }
}

// Scheme-less input such as `www.mind.org.uk/information` or `//cdn.example.org/x`.
fn bare_host(url: &str) -> String {
    let rest = url.strip_prefix("//").unwrap_or(url);
    if rest.starts_with(['/', '.', '#', '?']) {
        return String::new();
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.trim_end_matches('.').to_ascii_lowercase()
}

fn domain_label(host: &str) -> String {
    let host = host.trim_end_matches('.');
    if host.is_empty() {
        return String::new();
    }
    match psl::domain_str(host) {
        Some(registrable) => registrable
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string(),
        // A bare public suffix such as `co.uk` names no organisation.
        None if host.contains('.') => String::new(),
        None => host.to_string(),
    }
}
