//! Freshness classification of a scraped series.
//!
//! The classification is derived on demand from a [`Snapshot`] and is
//! never stored. Rules, first match wins:
//!
//! 1. no snapshot or no publications: `Unknown`
//! 2. latest upload is 90+ days old, or a group preference is set and the
//!    latest uploader does not match it: `Red`
//! 3. latest upload is 80 to 89 days old, or more than one group uploaded
//!    the newest chapter: `Yellow`
//! 4. otherwise `Green`
//!
//! A missing or unparseable upload date counts as published today.

use chrono::NaiveDate;

use crate::{
    types::{FreshnessStatus, GroupPreference, Snapshot},
    utils,
};

pub const STALE_AFTER_DAYS: i64 = 90;
pub const AGING_AFTER_DAYS: i64 = 80;

pub fn classify(
    snapshot: Option<&Snapshot>,
    preference: &GroupPreference,
    today: NaiveDate,
) -> FreshnessStatus {
    let Some(snapshot) = snapshot else {
        return FreshnessStatus::Unknown;
    };
    let Some(latest) = snapshot.latest() else {
        return FreshnessStatus::Unknown;
    };

    let published = latest.published_on().unwrap_or(today);
    let age = utils::days_between(published, today);

    if age >= STALE_AFTER_DAYS || (preference.is_set() && !preference.matches(&latest.group)) {
        return FreshnessStatus::Red;
    }

    if age >= AGING_AFTER_DAYS || snapshot.publications.len() > 1 {
        return FreshnessStatus::Yellow;
    }

    FreshnessStatus::Green
}
