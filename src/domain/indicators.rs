//! Moving averages and RSI attached to price rows at load time.
//!
//! Windows are trailing and counted in rows per symbol. A row with fewer
//! predecessors than the period averages over what it has, so there is no
//! warmup gap. RSI uses plain (not Wilder-smoothed) means of the last 14
//! close-to-close changes, the first row counting as a change of zero:
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! With no losses in the window the ratio is undefined and RSI is `None`.

use crate::domain::market_data::PriceRow;

pub const MA_SHORT: usize = 5;
pub const MA_MEDIUM: usize = 20;
pub const MA_LONG: usize = 60;
pub const RSI_PERIOD: usize = 14;

/// Mean of each value and up to `period - 1` values before it.
pub fn trailing_mean(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..values.len())
        .map(|i| {
            let window = &values[(i + 1).saturating_sub(period)..=i];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

pub fn relative_strength(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let changes: Vec<f64> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| if i == 0 { 0.0 } else { close - closes[i - 1] })
        .collect();
    let gains: Vec<f64> = changes.iter().map(|c| c.max(0.0)).collect();
    let losses: Vec<f64> = changes.iter().map(|c| (-c).max(0.0)).collect();

    trailing_mean(&gains, period)
        .into_iter()
        .zip(trailing_mean(&losses, period))
        .map(|(avg_gain, avg_loss)| {
            if avg_loss == 0.0 {
                None
            } else {
                Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
            }
        })
        .collect()
}

/// Fills `ma_*` and `rsi_14` on every row. Rows must already be sorted by
/// symbol, then date.
pub fn attach_indicators(rows: &mut [PriceRow]) {
    for group in rows.chunk_by_mut(|a, b| a.symbol == b.symbol) {
        let closes: Vec<f64> = group.iter().map(|r| r.close).collect();
        let ma_5 = trailing_mean(&closes, MA_SHORT);
        let ma_20 = trailing_mean(&closes, MA_MEDIUM);
        let ma_60 = trailing_mean(&closes, MA_LONG);
        let rsi = relative_strength(&closes, RSI_PERIOD);

        for (i, row) in group.iter_mut().enumerate() {
            row.ma_5 = Some(ma_5[i]);
            row.ma_20 = Some(ma_20[i]);
            row.ma_60 = Some(ma_60[i]);
            row.rsi_14 = rsi[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn row(symbol: &str, day: u32, close: f64) -> PriceRow {
        PriceRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            symbol: symbol.to_string(),
            close,
            ..PriceRow::default()
        }
    }

    #[test]
    fn trailing_mean_uses_partial_windows() {
        let means = trailing_mean(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);
        assert_eq!(means[0], 1.0);
        assert_eq!(means[1], 1.5);
        assert_eq!(means[4], 3.0);
        assert_eq!(means[5], 4.0);
    }

    #[test]
    fn trailing_mean_empty_and_zero_period() {
        assert!(trailing_mean(&[], 5).is_empty());
        assert_eq!(trailing_mean(&[2.0, 4.0], 0), vec![2.0, 4.0]);
    }

    #[test]
    fn rsi_without_losses_is_none() {
        let rsi = relative_strength(&[1.0, 2.0, 3.0, 4.0], RSI_PERIOD);
        assert!(rsi.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let rsi = relative_strength(&[4.0, 3.0, 2.0], RSI_PERIOD);
        assert_eq!(rsi[0], None);
        assert_relative_eq!(rsi[2].unwrap(), 0.0);
    }

    #[test]
    fn rsi_mixed_changes() {
        // changes 0, +2, -1: avg gain 2/3, avg loss 1/3
        let rsi = relative_strength(&[10.0, 12.0, 11.0], RSI_PERIOD);
        assert_relative_eq!(rsi[2].unwrap(), 100.0 - 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn rsi_window_drops_old_changes() {
        // one early loss followed by gains only
        let mut closes = vec![10.0, 9.0];
        closes.extend((1..=14).map(|i| 9.0 + i as f64));
        let rsi = relative_strength(&closes, RSI_PERIOD);
        assert!(rsi[14].is_some());
        assert_eq!(rsi[15], None);
    }

    #[test]
    fn attach_indicators_restarts_per_symbol() {
        let mut rows = vec![
            row("AAA", 1, 10.0),
            row("AAA", 2, 20.0),
            row("BBB", 1, 100.0),
            row("BBB", 2, 90.0),
        ];
        attach_indicators(&mut rows);

        assert_eq!(rows[1].ma_5, Some(15.0));
        assert_eq!(rows[1].ma_60, Some(15.0));
        assert_eq!(rows[1].rsi_14, None);
        assert_eq!(rows[2].ma_20, Some(100.0));
        assert_eq!(rows[3].ma_5, Some(95.0));
        assert_relative_eq!(rows[3].rsi_14.unwrap(), 0.0);
    }
}
