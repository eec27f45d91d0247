//! Analytics aggregation
//!
//! Reduces a link's click history into summary counters, computed on demand
//! for every request. Click volumes in this domain are small enough that no
//! caching or incremental maintenance is needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::click_recorder::DIRECT_REFERRER;
use crate::storage::Link;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_clicks: usize,
    /// UTC calendar date (`YYYY-MM-DD`) -> count; only dates with clicks
    pub clicks_by_date: BTreeMap<String, u64>,
    /// Raw user-agent string -> count; the raw string is the key by design
    pub browsers: BTreeMap<String, u64>,
    pub countries: BTreeMap<String, u64>,
    pub referrers: BTreeMap<String, u64>,
}

/// Aggregate a link's click history into a summary.
///
/// Ownership must already have been checked by the caller; no authorization
/// happens here. Calling this twice on an unchanged link yields identical
/// summaries.
pub fn aggregate(link: &Link) -> AnalyticsSummary {
    let mut clicks_by_date = BTreeMap::new();
    let mut browsers = BTreeMap::new();
    let mut countries = BTreeMap::new();
    let mut referrers = BTreeMap::new();

    for click in &link.clicks {
        let date = click.timestamp.format("%Y-%m-%d").to_string();
        *clicks_by_date.entry(date).or_insert(0) += 1;

        if let Some(ref user_agent) = click.user_agent {
            *browsers.entry(user_agent.clone()).or_insert(0) += 1;
        }

        // Recording always fills the country, so an empty value only occurs
        // on rows written outside the service; those are skipped rather than
        // lumped under "Unknown".
        if !click.country.is_empty() {
            *countries.entry(click.country.clone()).or_insert(0) += 1;
        }

        let referrer = if click.referrer.is_empty() {
            DIRECT_REFERRER
        } else {
            click.referrer.as_str()
        };
        *referrers.entry(referrer.to_string()).or_insert(0) += 1;
    }

    AnalyticsSummary {
        total_clicks: link.clicks.len(),
        clicks_by_date,
        browsers,
        countries,
        referrers,
    }
}
