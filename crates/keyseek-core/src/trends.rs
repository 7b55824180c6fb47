//! Google Trends lookup links for generated keywords.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::criteria::Audience;

/// Build the trend-check URL for one keyword, scoped to the last month and
/// to the region implied by the target audience.
pub fn trend_url(keyword: &str, audience: Audience) -> String {
    let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC);
    format!(
        "https://trends.google.com/trends/explore?date=today%201-m&geo={}&q={}",
        audience.geo(),
        encoded
    )
}
