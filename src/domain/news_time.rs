//! Ordering keys for relative-time labels such as `2시간 전` or `1일 전`.
//!
//! The dashboard historically ordered news by the leading integer of the
//! label alone, ignoring the unit, so `1일 전` ties with `1시간 전` and
//! `12시간 전` sorts after `3일 전`. That ordering is kept as the default.
//! [`NewsSort::Elapsed`] converts the label to minutes instead.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsSort {
    /// Leading integer of the label, unit ignored.
    #[default]
    LeadingInteger,
    /// Elapsed minutes, unit-aware.
    Elapsed,
}

impl NewsSort {
    /// Sort key for a label. Labels the policy cannot read sort last.
    pub fn key(&self, label: &str) -> u64 {
        let parsed = match self {
            NewsSort::LeadingInteger => leading_integer(label),
            NewsSort::Elapsed => elapsed_minutes(label),
        };
        parsed.unwrap_or(u64::MAX)
    }
}

impl fmt::Display for NewsSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsSort::LeadingInteger => f.write_str("label"),
            NewsSort::Elapsed => f.write_str("elapsed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown news sort: {0} (expected label or elapsed)")]
pub struct UnknownNewsSort(pub String);

impl FromStr for NewsSort {
    type Err = UnknownNewsSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" | "leading_integer" => Ok(NewsSort::LeadingInteger),
            "elapsed" | "timestamp" => Ok(NewsSort::Elapsed),
            other => Err(UnknownNewsSort(other.to_string())),
        }
    }
}

/// Digits at the start of the label, after leading whitespace.
pub fn leading_integer(label: &str) -> Option<u64> {
    let trimmed = label.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Minutes elapsed for labels of the form `<n><unit> 전`.
pub fn elapsed_minutes(label: &str) -> Option<u64> {
    let trimmed = label.trim();
    if trimmed.starts_with("방금") {
        return Some(0);
    }
    let amount = leading_integer(trimmed)?;
    let rest = trimmed
        .trim_start()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start();

    let per_unit = if rest.starts_with("분") {
        1
    } else if rest.starts_with("시간") {
        60
    } else if rest.starts_with("일") {
        60 * 24
    } else if rest.starts_with("주") {
        60 * 24 * 7
    } else if rest.starts_with("개월") {
        60 * 24 * 30
    } else if rest.starts_with("년") {
        60 * 24 * 365
    } else {
        return None;
    };
    amount.checked_mul(per_unit)
}
