//! Built-in ordinal scales for listings data.
//!
//! | rule | source | labels (ascending) |
//! |---|---|---|
//! | [`review_rule`] | review score (0-5) | `no_reviews` .. `top_reviews` |
//! | [`first_review_age_rule`] | days since first review | `no_review_yet` .. `legacy (over 5 years)` |
//! | [`last_review_recency_rule`] | days since last review | `no_review` .. `dormant (over a year)` |
//! | [`host_rate_rule`] | response/acceptance rate in % | `0-20%` .. `98%+`, `Missing` |

use super::{Band, IntervalRule, OrderedCategory};
use once_cell::sync::Lazy;

pub const REVIEW_LABELS: [&str; 5] = [
    "no_reviews",
    "low_reviews",
    "medium_reviews",
    "high_reviews",
    "top_reviews",
];

pub const FIRST_REVIEW_AGE_LABELS: [&str; 7] = [
    "no_review_yet",
    "very_new (<= 1 month)",
    "new (<= 6 months)",
    "established (<= 1 year)",
    "mature (<= 3 years)",
    "veteran (<= 5 years)",
    "legacy (over 5 years)",
];

pub const LAST_REVIEW_RECENCY_LABELS: [&str; 7] = [
    "no_review",
    "very_recent (<= 1 week)",
    "recent (<= 1 month)",
    "somewhat_recent (<= 3 months)",
    "old (<= 6 months)",
    "very_old (<= 1 year)",
    "dormant (over a year)",
];

pub const HOST_RATE_LABELS: [&str; 6] = ["0-20%", "20-60%", "60-90%", "90-98%", "98%+", "Missing"];

// `high_reviews` is closed on both ends: 4.6 and 4.8 are both high.
static REVIEW_RULE: Lazy<IntervalRule> = Lazy::new(|| {
    IntervalRule::from_static(
        OrderedCategory::from_static("review_score", &REVIEW_LABELS, 0),
        None,
        &[
            (Band::Below(4.0), "low_reviews"),
            (Band::Below(4.6), "medium_reviews"),
            (Band::AtMost(4.8), "high_reviews"),
        ],
        Some("top_reviews"),
    )
});

static FIRST_REVIEW_AGE_RULE: Lazy<IntervalRule> = Lazy::new(|| {
    IntervalRule::from_static(
        OrderedCategory::from_static("first_review_age", &FIRST_REVIEW_AGE_LABELS, 0),
        None,
        &[
            (Band::AtMost(30.0), FIRST_REVIEW_AGE_LABELS[1]),
            (Band::AtMost(180.0), FIRST_REVIEW_AGE_LABELS[2]),
            (Band::AtMost(365.0), FIRST_REVIEW_AGE_LABELS[3]),
            (Band::AtMost(1095.0), FIRST_REVIEW_AGE_LABELS[4]),
            (Band::AtMost(1825.0), FIRST_REVIEW_AGE_LABELS[5]),
        ],
        Some(FIRST_REVIEW_AGE_LABELS[6]),
    )
});

static LAST_REVIEW_RECENCY_RULE: Lazy<IntervalRule> = Lazy::new(|| {
    IntervalRule::from_static(
        OrderedCategory::from_static("last_review_recency", &LAST_REVIEW_RECENCY_LABELS, 0),
        None,
        &[
            (Band::AtMost(7.0), LAST_REVIEW_RECENCY_LABELS[1]),
            (Band::AtMost(30.0), LAST_REVIEW_RECENCY_LABELS[2]),
            (Band::AtMost(90.0), LAST_REVIEW_RECENCY_LABELS[3]),
            (Band::AtMost(180.0), LAST_REVIEW_RECENCY_LABELS[4]),
            (Band::AtMost(365.0), LAST_REVIEW_RECENCY_LABELS[5]),
        ],
        Some(LAST_REVIEW_RECENCY_LABELS[6]),
    )
});

// Bins are right-closed with the lowest edge included; anything outside
// [0, 100] is treated as missing.
static HOST_RATE_RULE: Lazy<IntervalRule> = Lazy::new(|| {
    IntervalRule::from_static(
        OrderedCategory::from_static("host_rate", &HOST_RATE_LABELS, 5),
        Some(0.0),
        &[
            (Band::AtMost(20.0), HOST_RATE_LABELS[0]),
            (Band::AtMost(60.0), HOST_RATE_LABELS[1]),
            (Band::AtMost(90.0), HOST_RATE_LABELS[2]),
            (Band::AtMost(98.0), HOST_RATE_LABELS[3]),
            (Band::AtMost(100.0), HOST_RATE_LABELS[4]),
        ],
        None,
    )
});

/// Review score -> `no_reviews < low_reviews < medium_reviews < high_reviews < top_reviews`.
///
/// `< 4.0` low, `[4.0, 4.6)` medium, `[4.6, 4.8]` high, `> 4.8` top.
pub fn review_rule() -> &'static IntervalRule {
    &REVIEW_RULE
}

/// Days since first review -> listing maturity.
pub fn first_review_age_rule() -> &'static IntervalRule {
    &FIRST_REVIEW_AGE_RULE
}

/// Days since last review -> review freshness.
pub fn last_review_recency_rule() -> &'static IntervalRule {
    &LAST_REVIEW_RECENCY_RULE
}

/// Host response/acceptance rate (percent) -> rate band.
pub fn host_rate_rule() -> &'static IntervalRule {
    &HOST_RATE_RULE
}
