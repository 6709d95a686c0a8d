//! Merges per-company series into render-ready structures.
//!
//! Each merge walks the selection in order and produces one structure for
//! the presentation layer. An empty selection yields [`Merged::Empty`] so the
//! caller can show a prompt-to-select state instead of an empty chart.
//! Colours come from the selection position, not the company id.

use crate::domain::directory::CompanyDirectory;
use crate::domain::format::{
    axis_ticks, compact_tick, format_metric, format_won, group_thousands, kilo_tick, metric_tick,
    metric_unit, value_range,
};
use crate::domain::market_data::PriceRow;
use crate::domain::news_time::NewsSort;
use crate::domain::palette::{category_color, color_for_position, color_index};
use crate::domain::selection::Selection;
use crate::domain::series::{MetricKey, SeriesPoint, TaggedNewsItem, TargetPriceTable};
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::series_port::SeriesProvider;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Output of every merge: either nothing to show, or a complete payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Merged<T> {
    Empty,
    Ready(T),
}

impl<T> Merged<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Merged::Empty)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Merged::Ready(v) => Some(v),
            Merged::Empty => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Merged::Ready(v) => Some(v),
            Merged::Empty => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Merged<U> {
        match self {
            Merged::Ready(v) => Merged::Ready(f(v)),
            Merged::Empty => Merged::Empty,
        }
    }
}

/// One company's column on the shared x-axis. `values[i]` belongs to
/// `x_axis_keys[i]`; `None` marks a date the company has no point for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumn {
    pub company_id: String,
    pub label: String,
    pub color_index: usize,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSeries {
    pub x_axis_keys: Vec<NaiveDate>,
    /// `M/D` tick labels, parallel to `x_axis_keys`.
    pub display_keys: Vec<String>,
    pub columns: Vec<SeriesColumn>,
    /// Value-axis labels from the lowest to the highest point.
    pub y_ticks: Vec<String>,
}

impl MergedSeries {
    pub fn column(&self, company_id: &str) -> Option<&SeriesColumn> {
        self.columns.iter().find(|c| c.company_id == company_id)
    }

    pub fn value_at(&self, company_id: &str, date: NaiveDate) -> Option<f64> {
        let idx = self.x_axis_keys.binary_search(&date).ok()?;
        self.column(company_id)?.values[idx]
    }

    pub fn with_y_ticks(mut self, format: impl Fn(f64) -> String) -> Self {
        let values = self.columns.iter().flat_map(|c| c.values.iter().flatten().copied());
        self.y_ticks = value_range(values)
            .map(|(lo, hi)| axis_ticks(lo, hi, format))
            .unwrap_or_default();
        self
    }
}

/// Input to [`merge_columns`]: one company's cells plus its legend label.
/// A `None` cell still puts its date on the shared axis.
#[derive(Debug, Clone)]
pub struct ColumnInput {
    pub company_id: String,
    pub label: String,
    pub cells: Vec<(NaiveDate, Option<f64>)>,
}

impl ColumnInput {
    pub fn new(company_id: &str, label: &str, cells: Vec<(NaiveDate, Option<f64>)>) -> Self {
        Self {
            company_id: company_id.to_string(),
            label: label.to_string(),
            cells,
        }
    }

    pub fn from_points(company_id: &str, label: &str, points: &[SeriesPoint]) -> Self {
        Self::new(
            company_id,
            label,
            points.iter().map(|p| (p.date, Some(p.value))).collect(),
        )
    }
}

/// Unions every column's dates, sorts them ascending, and lays each column
/// over the union. A date repeated within one column keeps its last cell.
pub fn merge_columns(inputs: Vec<ColumnInput>) -> Merged<MergedSeries> {
    if inputs.is_empty() {
        return Merged::Empty;
    }

    let x_axis_keys: Vec<NaiveDate> = inputs
        .iter()
        .flat_map(|c| c.cells.iter().map(|(date, _)| *date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = inputs
        .into_iter()
        .enumerate()
        .map(|(position, input)| {
            let by_date: BTreeMap<NaiveDate, Option<f64>> = input.cells.into_iter().collect();
            SeriesColumn {
                values: x_axis_keys
                    .iter()
                    .map(|d| by_date.get(d).copied().flatten())
                    .collect(),
                company_id: input.company_id,
                label: input.label,
                color_index: color_index(position),
                color: color_for_position(position),
            }
        })
        .collect();

    let display_keys = x_axis_keys
        .iter()
        .map(|d| format!("{}/{}", d.month(), d.day()))
        .collect();

    Merged::Ready(MergedSeries {
        x_axis_keys,
        display_keys,
        columns,
        y_ticks: Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBar {
    pub company_id: String,
    pub company_label: String,
    pub value: f64,
    pub formatted: String,
    pub color_index: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGroup {
    pub key: MetricKey,
    pub label: &'static str,
    pub unit: &'static str,
    pub bars: Vec<MetricBar>,
    /// Bar-axis labels from zero (or the lowest negative bar) to the tallest bar.
    pub y_ticks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedMetricView {
    pub groups: Vec<MetricGroup>,
}

impl MergedMetricView {
    pub fn group(&self, key: MetricKey) -> Option<&MetricGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetPriceBlock {
    pub company_id: String,
    pub company_name: String,
    pub current_price_label: String,
    pub table: TargetPriceTable,
    /// Bar-axis labels from zero to the highest annual scenario.
    pub y_ticks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTargetPrices {
    pub blocks: Vec<TargetPriceBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedNews {
    pub sort: String,
    pub items: Vec<TaggedNewsItem>,
}

/// Chip shown for each selected company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionChip {
    pub company_id: String,
    pub label: String,
    pub color: &'static str,
}

/// Every view for one selection, as consumed by the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPayload {
    pub selection: Vec<SelectionChip>,
    pub daily_prices: Merged<MergedSeries>,
    pub target_prices: Merged<MergedTargetPrices>,
    pub metrics: Merged<MergedMetricView>,
    pub news: Merged<MergedNews>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Daily,
    Target,
    Metrics,
    News,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0} (expected daily, target, metrics, news or all)")]
pub struct UnknownView(pub String);

impl FromStr for DashboardView {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "prices" => Ok(DashboardView::Daily),
            "target" | "target-price" => Ok(DashboardView::Target),
            "metrics" => Ok(DashboardView::Metrics),
            "news" => Ok(DashboardView::News),
            "all" => Ok(DashboardView::All),
            other => Err(UnknownView(other.to_string())),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardView::Daily => "daily",
            DashboardView::Target => "target",
            DashboardView::Metrics => "metrics",
            DashboardView::News => "news",
            DashboardView::All => "all",
        };
        f.write_str(name)
    }
}

/// The output of one [`DashboardView`]. Serializes as the inner merge
/// result, without a view tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewPayload {
    Daily(Merged<MergedSeries>),
    Target(Merged<MergedTargetPrices>),
    Metrics(Merged<MergedMetricView>),
    News(Merged<MergedNews>),
    All(Merged<DashboardPayload>),
}

pub struct AggregationEngine<'a> {
    directory: &'a CompanyDirectory,
    provider: &'a dyn SeriesProvider,
    news_sort: NewsSort,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(directory: &'a CompanyDirectory, provider: &'a dyn SeriesProvider) -> Self {
        Self {
            directory,
            provider,
            news_sort: NewsSort::default(),
        }
    }

    pub fn with_news_sort(mut self, sort: NewsSort) -> Self {
        self.news_sort = sort;
        self
    }

    pub fn chips(&self, selection: &Selection) -> Vec<SelectionChip> {
        selection
            .iter()
            .enumerate()
            .map(|(position, id)| SelectionChip {
                company_id: id.to_string(),
                label: self.directory.display_name(id).to_string(),
                color: color_for_position(position),
            })
            .collect()
    }

    /// Daily price lines, one column per selected company.
    pub fn daily_prices(&self, selection: &Selection) -> Merged<MergedSeries> {
        let inputs: Vec<ColumnInput> = selection
            .iter()
            .map(|id| {
                ColumnInput::from_points(
                    id,
                    self.directory.display_name(id),
                    &self.provider.daily_prices(id),
                )
            })
            .collect();
        let merged = merge_columns(inputs).map(|series| series.with_y_ticks(kilo_tick));
        if let Merged::Ready(series) = &merged {
            tracing::debug!(
                columns = series.columns.len(),
                dates = series.x_axis_keys.len(),
                "merged daily prices"
            );
        }
        merged
    }

    /// One bar group per metric key, bars in selection order.
    pub fn metrics(&self, selection: &Selection) -> Merged<MergedMetricView> {
        if selection.is_empty() {
            return Merged::Empty;
        }

        let records: Vec<_> = selection
            .iter()
            .map(|id| (id, self.provider.financial_metrics(id)))
            .collect();

        let groups = MetricKey::ALL
            .into_iter()
            .map(|key| {
                let bars: Vec<MetricBar> = records
                    .iter()
                    .enumerate()
                    .map(|(position, (id, record))| {
                        let value = record.get(key);
                        MetricBar {
                            company_id: id.to_string(),
                            company_label: self.directory.display_name(id).to_string(),
                            value,
                            formatted: format_metric(key, value),
                            color_index: color_index(position),
                            color: color_for_position(position),
                        }
                    })
                    .collect();
                let (lo, hi) = value_range(bars.iter().map(|b| b.value)).unwrap_or((0.0, 0.0));
                MetricGroup {
                    key,
                    label: key.label(),
                    unit: metric_unit(key),
                    y_ticks: axis_ticks(lo.min(0.0), hi.max(0.0), |v| metric_tick(key, v)),
                    bars,
                }
            })
            .collect();

        tracing::debug!(companies = records.len(), "merged financial metrics");
        Merged::Ready(MergedMetricView { groups })
    }

    /// One independent scenario block per selected company. Blank ids are
    /// skipped; unknown ids get the provider's fallback base price.
    pub fn target_prices(&self, selection: &Selection) -> Merged<MergedTargetPrices> {
        let blocks: Vec<TargetPriceBlock> = selection
            .iter()
            .filter(|id| {
                let valid = !id.trim().is_empty();
                if !valid {
                    tracing::warn!("skipping blank company id in target-price view");
                }
                valid
            })
            .map(|id| {
                let table = self.provider.target_price_scenarios(id);
                let top = value_range(table.annual_values()).map_or(0.0, |(_, hi)| hi);
                TargetPriceBlock {
                    company_id: id.to_string(),
                    company_name: self.directory.display_name(id).to_string(),
                    current_price_label: format_won(table.current_price),
                    y_ticks: axis_ticks(0.0, top.max(0.0), compact_tick),
                    table,
                }
            })
            .collect();

        if blocks.is_empty() {
            return Merged::Empty;
        }
        tracing::debug!(blocks = blocks.len(), "merged target prices");
        Merged::Ready(MergedTargetPrices { blocks })
    }

    /// Flattens every selected company's news, tags each item with its
    /// source, then stable-sorts by the configured relative-time key.
    pub fn news(&self, selection: &Selection) -> Merged<MergedNews> {
        if selection.is_empty() {
            return Merged::Empty;
        }

        let mut items: Vec<TaggedNewsItem> = selection
            .iter()
            .flat_map(|id| {
                let company_name = self.directory.display_name(id).to_string();
                self.provider
                    .news(id)
                    .into_iter()
                    .map(move |mut item| {
                        item.company_id = id.to_string();
                        TaggedNewsItem {
                            category_color: category_color(&item.category),
                            company_name: company_name.clone(),
                            item,
                        }
                    })
            })
            .collect();

        let sort = self.news_sort;
        items.sort_by_key(|n| sort.key(&n.item.relative_time_label));

        tracing::debug!(items = items.len(), %sort, "merged news");
        Merged::Ready(MergedNews {
            sort: sort.to_string(),
            items,
        })
    }

    pub fn view(&self, view: DashboardView, selection: &Selection) -> ViewPayload {
        match view {
            DashboardView::Daily => ViewPayload::Daily(self.daily_prices(selection)),
            DashboardView::Target => ViewPayload::Target(self.target_prices(selection)),
            DashboardView::Metrics => ViewPayload::Metrics(self.metrics(selection)),
            DashboardView::News => ViewPayload::News(self.news(selection)),
            DashboardView::All if selection.is_empty() => ViewPayload::All(Merged::Empty),
            DashboardView::All => ViewPayload::All(Merged::Ready(self.dashboard(selection))),
        }
    }

    pub fn dashboard(&self, selection: &Selection) -> DashboardPayload {
        DashboardPayload {
            selection: self.chips(selection),
            daily_prices: self.daily_prices(selection),
            target_prices: self.target_prices(selection),
            metrics: self.metrics(selection),
            news: self.news(selection),
        }
    }
}

/// Multi-symbol EPS history on a shared date axis. Every returned row puts
/// its date on the axis, even when its EPS is missing. Symbols whose lookup
/// fails or that have no EPS value at all are left out; when none remain
/// the result is [`Merged::Empty`].
pub fn merge_eps_history(port: &dyn MarketDataPort, symbols: &[String]) -> Merged<MergedSeries> {
    let inputs = symbols
        .iter()
        .map(|symbol| {
            let rows = port.financial_info(symbol).unwrap_or_else(|e| {
                tracing::warn!(%symbol, error = %e, "financial info unavailable");
                Vec::new()
            });
            ColumnInput::new(
                symbol,
                &format!("{symbol} EPS"),
                rows.iter().map(|r| (r.date, r.eps)).collect(),
            )
        })
        .collect();

    let Merged::Ready(mut series) = merge_columns(inputs) else {
        return Merged::Empty;
    };
    series.columns.retain(|c| {
        let has_data = c.values.iter().any(Option::is_some);
        if !has_data {
            tracing::info!(symbol = %c.company_id, "no EPS data for symbol");
        }
        has_data
    });
    if series.columns.is_empty() {
        return Merged::Empty;
    }
    for (position, column) in series.columns.iter_mut().enumerate() {
        column.color_index = color_index(position);
        column.color = color_for_position(position);
    }
    Merged::Ready(series.with_y_ticks(group_thousands))
}

/// Price/volume history for one symbol. Fetch failures and empty results
/// both come back as [`Merged::Empty`], so stale charts get cleared.
pub fn load_price_history(
    port: &dyn MarketDataPort,
    symbol: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Merged<Vec<PriceRow>> {
    match port.stock_prices(symbol, start_date, end_date) {
        Ok(rows) if !rows.is_empty() => Merged::Ready(rows),
        Ok(_) => {
            tracing::info!(%symbol, "no price data for symbol");
            Merged::Empty
        }
        Err(e) => {
            tracing::warn!(%symbol, error = %e, "price data unavailable");
            Merged::Empty
        }
    }
}
