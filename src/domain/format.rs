//! Value formatting for tooltips, labels and axis ticks.

use crate::domain::series::MetricKey;

/// Unit suffix shown after a metric value.
pub fn metric_unit(key: MetricKey) -> &'static str {
    match key {
        MetricKey::Eps | MetricKey::Bps => "원",
        MetricKey::Roe | MetricKey::Roa | MetricKey::DebtRatio => "%",
        MetricKey::EvEbitda | MetricKey::Per | MetricKey::Pbr => "배",
    }
}

/// Tooltip text for a metric value.
pub fn format_metric(key: MetricKey, value: f64) -> String {
    match key {
        MetricKey::Eps | MetricKey::Bps => format_won(value),
        _ => format!("{}{}", value, metric_unit(key)),
    }
}

/// `75000` -> `75,000원`
pub fn format_won(value: f64) -> String {
    format!("{}원", group_thousands(value))
}

/// Digit grouping with at most three fraction digits, trailing zeros dropped.
pub fn group_thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let fixed = format!("{abs:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Price axis tick: `1.2M`, `75K`, or the plain value below a thousand.
pub fn compact_tick(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        group_thousands(value)
    }
}

/// Thousands tick used on the daily chart and the EPS/BPS sub-charts.
pub fn kilo_tick(value: f64) -> String {
    format!("{:.0}k", value / 1_000.0)
}

/// Axis tick for a metric sub-chart.
pub fn metric_tick(key: MetricKey, value: f64) -> String {
    match key {
        MetricKey::Eps | MetricKey::Bps => kilo_tick(value),
        _ => group_thousands(value),
    }
}

pub const AXIS_TICK_COUNT: usize = 5;

/// Evenly spaced tick labels from `lo` to `hi` inclusive. A flat range
/// yields one tick; an empty or non-finite range yields none.
pub fn axis_ticks(lo: f64, hi: f64, format: impl Fn(f64) -> String) -> Vec<String> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Vec::new();
    }
    if lo == hi {
        return vec![format(lo)];
    }
    let step = (hi - lo) / (AXIS_TICK_COUNT - 1) as f64;
    (0..AXIS_TICK_COUNT)
        .map(|i| format(lo + step * i as f64))
        .collect()
}

/// Smallest and largest finite value, if any.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn won_values_are_grouped() {
        assert_eq!(format_won(75_000.0), "75,000원");
        assert_eq!(format_won(750_000.0), "750,000원");
        assert_eq!(format_won(999.0), "999원");
        assert_eq!(format_won(1_234_567.0), "1,234,567원");
    }

    #[test]
    fn grouping_keeps_up_to_three_fraction_digits() {
        assert_eq!(group_thousands(63_750.5), "63,750.5");
        assert_eq!(group_thousands(1234.56789), "1,234.568");
        assert_eq!(group_thousands(-4200.0), "-4,200");
        assert_eq!(group_thousands(0.0), "0");
    }

    #[test]
    fn metric_formatters_by_key() {
        assert_eq!(format_metric(MetricKey::Eps, 5420.0), "5,420원");
        assert_eq!(format_metric(MetricKey::Roe, 9.8), "9.8%");
        assert_eq!(format_metric(MetricKey::Per, 27.0), "27배");
        assert_eq!(format_metric(MetricKey::DebtRatio, 45.2), "45.2%");
        assert_eq!(format_metric(MetricKey::EvEbitda, 8.5), "8.5배");
    }

    #[test]
    fn compact_ticks() {
        assert_eq!(compact_tick(750_000.0), "750K");
        assert_eq!(compact_tick(1_260_000.0), "1.3M");
        assert_eq!(compact_tick(500.0), "500");
    }

    #[test]
    fn metric_ticks() {
        assert_eq!(metric_tick(MetricKey::Bps, 55_280.0), "55k");
        assert_eq!(metric_tick(MetricKey::Pbr, 1.3), "1.3");
        assert_eq!(metric_tick(MetricKey::Roe, 0.1 + 0.2), "0.3");
    }

    #[test]
    fn axis_ticks_span_the_range() {
        assert_eq!(
            axis_ticks(70_000.0, 78_000.0, kilo_tick),
            vec!["70k", "72k", "74k", "76k", "78k"]
        );
        assert_eq!(axis_ticks(5.0, 5.0, group_thousands), vec!["5"]);
        assert!(axis_ticks(2.0, 1.0, group_thousands).is_empty());
        assert!(axis_ticks(f64::NAN, 1.0, group_thousands).is_empty());
    }

    #[test]
    fn value_range_skips_non_finite() {
        assert_eq!(value_range([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(value_range(std::iter::empty()), None);
    }
}
