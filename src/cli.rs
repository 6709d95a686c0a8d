//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::csv_market_data::CsvMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixed_series_provider::FixedSeriesProvider;
use crate::adapters::mock_series_provider::{FALLBACK_BASE_PRICE, MockSeriesProvider};
use crate::domain::aggregation::{
    AggregationEngine, DashboardPayload, DashboardView, Merged, MergedMetricView, MergedNews,
    MergedSeries, MergedTargetPrices, ViewPayload,
};
use crate::domain::company::{CompanyRecord, SectorFilter};
use crate::domain::directory::CompanyDirectory;
use crate::domain::error::DashboardError;
use crate::domain::format::group_thousands;
use crate::domain::news_time::NewsSort;
use crate::domain::selection::parse_selection;
use crate::domain::settings::DashboardSettings;
use crate::domain::summary::{
    daily_title, empty_prompt, news_summary, selected_summary, target_summary, view_title,
};
use crate::logging::init_tracing;
use crate::ports::series_port::SeriesProvider;

#[derive(Parser, Debug)]
#[command(name = "stockboard", about = "Multi-company stock comparison dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List companies, optionally filtered by name/ticker and sector
    Companies {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sector: Option<SectorFilter>,
    },
    /// Render dashboard views for a selection of companies
    Dashboard {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated company ids, overriding the configured selection
        #[arg(short, long)]
        select: Option<String>,
        #[arg(long, default_value = "all")]
        view: DashboardView,
        #[arg(long)]
        news_sort: Option<NewsSort>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the JSON API server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Companies { search, sector } => {
            run_companies(search.as_deref(), sector.unwrap_or_default())
        }
        Command::Dashboard {
            config,
            select,
            view,
            news_sort,
            seed,
            json,
        } => run_dashboard(DashboardArgs {
            config,
            select,
            view,
            news_sort,
            seed,
            json,
        }),
        Command::Validate { config } => run_validate(&config),
        Command::Serve { config } => run_serve(&config),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

pub fn load_settings(path: Option<&Path>) -> Result<DashboardSettings, DashboardError> {
    match path {
        Some(path) => {
            let adapter = FileConfigAdapter::from_file(path)?;
            DashboardSettings::from_config(&adapter)
        }
        None => Ok(DashboardSettings::default()),
    }
}

/// Random daily prices from the built-in tables, or closing prices from
/// `prices_csv` when one is configured.
pub fn build_provider(
    settings: &DashboardSettings,
    directory: &CompanyDirectory,
) -> Result<Arc<dyn SeriesProvider + Send + Sync>, DashboardError> {
    let mut mock = MockSeriesProvider::new().with_window_days(settings.price_window_days);
    if let Some(seed) = settings.seed {
        mock = mock.with_seed(seed);
    }
    if let Some(as_of) = settings.as_of {
        mock = mock.with_as_of(as_of);
    }

    let Some(prices_csv) = &settings.prices_csv else {
        return Ok(Arc::new(mock));
    };

    let market_data = CsvMarketData::load(Some(prices_csv), None)?;
    let tickers: Vec<(String, String)> = directory
        .all()
        .iter()
        .map(|c| (c.id.clone(), c.ticker_code.clone()))
        .collect();
    let fixed = FixedSeriesProvider::snapshot(
        &mock,
        directory.all().iter().map(|c| c.id.as_str()),
        FALLBACK_BASE_PRICE,
    )
    .load_closing_prices(&market_data, &tickers)?;
    Ok(Arc::new(fixed))
}

fn run_companies(search: Option<&str>, sector: SectorFilter) -> Result<(), DashboardError> {
    init_tracing(crate::domain::settings::DEFAULT_LOG_LEVEL);
    let directory = CompanyDirectory::builtin();
    let matches = directory.filter(search.unwrap_or(""), sector);
    print!("{}", render_companies(&matches));
    Ok(())
}

pub fn render_companies(records: &[&CompanyRecord]) -> String {
    let mut out = String::new();
    for c in records {
        let _ = writeln!(
            out,
            "{:<14} {:<8} {:<12} {}",
            c.id,
            c.ticker_code,
            c.name,
            c.sector.label()
        );
    }
    let _ = writeln!(out, "{}개 기업", records.len());
    out
}

struct DashboardArgs {
    config: Option<PathBuf>,
    select: Option<String>,
    view: DashboardView,
    news_sort: Option<NewsSort>,
    seed: Option<u64>,
    json: bool,
}

fn run_dashboard(args: DashboardArgs) -> Result<(), DashboardError> {
    let mut settings = load_settings(args.config.as_deref())?;
    init_tracing(&settings.log_level);

    if let Some(raw) = &args.select {
        settings.selection = parse_selection(raw)?;
    }
    if let Some(sort) = args.news_sort {
        settings.news_sort = sort;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let directory = CompanyDirectory::builtin();
    for id in settings.selection.iter() {
        if !directory.contains(id) {
            tracing::warn!(%id, "company not in directory, using fallback data");
        }
    }

    let provider = build_provider(&settings, &directory)?;
    let engine = AggregationEngine::new(&directory, provider.as_ref())
        .with_news_sort(settings.news_sort);
    let payload = engine.view(args.view, &settings.selection);

    if args.json {
        let json = serde_json::to_string_pretty(&payload)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        println!("{json}");
    } else {
        print!(
            "{}",
            render_view(args.view, &payload, settings.price_window_days)
        );
    }
    Ok(())
}

/// Plain-text rendering of one view.
pub fn render_view(view: DashboardView, payload: &ViewPayload, window_days: usize) -> String {
    let mut out = String::new();
    match payload {
        ViewPayload::Daily(m) => render_daily(&mut out, m, window_days),
        ViewPayload::Target(m) => render_target(&mut out, m),
        ViewPayload::Metrics(m) => render_metrics(&mut out, m),
        ViewPayload::News(m) => render_news(&mut out, m),
        ViewPayload::All(m) => render_all(&mut out, view, m, window_days),
    }
    out
}

fn render_all(
    out: &mut String,
    view: DashboardView,
    merged: &Merged<DashboardPayload>,
    window_days: usize,
) {
    let _ = writeln!(out, "# {}", view_title(view));
    let Merged::Ready(payload) = merged else {
        let _ = writeln!(out, "{}", empty_prompt(view));
        return;
    };
    let chips: Vec<&str> = payload.selection.iter().map(|c| c.label.as_str()).collect();
    let _ = writeln!(
        out,
        "{}: {}",
        selected_summary(chips.len()),
        chips.join(", ")
    );
    let _ = writeln!(out);
    render_daily(out, &payload.daily_prices, window_days);
    let _ = writeln!(out);
    render_target(out, &payload.target_prices);
    let _ = writeln!(out);
    render_metrics(out, &payload.metrics);
    let _ = writeln!(out);
    render_news(out, &payload.news);
}

fn render_daily(out: &mut String, merged: &Merged<MergedSeries>, window_days: usize) {
    let view = DashboardView::Daily;
    let _ = writeln!(out, "## {}", daily_title(window_days));
    let Merged::Ready(series) = merged else {
        let _ = writeln!(out, "{}", empty_prompt(view));
        return;
    };
    let _ = write!(out, "{:<6}", "날짜");
    for col in &series.columns {
        let _ = write!(out, " {:>12}", col.label);
    }
    let _ = writeln!(out);
    for (i, key) in series.display_keys.iter().enumerate() {
        let _ = write!(out, "{key:<6}");
        for col in &series.columns {
            let cell = col.values[i]
                .map(|v| group_thousands(v.round()))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(out, " {cell:>12}");
        }
        let _ = writeln!(out);
    }
}

fn render_target(out: &mut String, merged: &Merged<MergedTargetPrices>) {
    let view = DashboardView::Target;
    let _ = writeln!(out, "## {}", view_title(view));
    let Merged::Ready(targets) = merged else {
        let _ = writeln!(out, "{}", empty_prompt(view));
        return;
    };
    let _ = writeln!(out, "{}", target_summary(targets.blocks.len()));
    for block in &targets.blocks {
        let _ = writeln!(
            out,
            "{} (현재가 {})",
            block.company_name, block.current_price_label
        );
        for row in &block.table.rows {
            let _ = writeln!(
                out,
                "  {:<10} 연간 {:>10}  분기 {:>10}",
                row.severity.label(),
                group_thousands(row.annual_value),
                group_thousands(row.quarterly_value)
            );
        }
    }
}

fn render_metrics(out: &mut String, merged: &Merged<MergedMetricView>) {
    let view = DashboardView::Metrics;
    let _ = writeln!(out, "## {}", view_title(view));
    let Merged::Ready(metrics) = merged else {
        let _ = writeln!(out, "{}", empty_prompt(view));
        return;
    };
    for group in &metrics.groups {
        let _ = writeln!(out, "{} ({})", group.label, group.unit);
        for bar in &group.bars {
            let _ = writeln!(out, "  {:<12} {:>14}", bar.company_label, bar.formatted);
        }
    }
}

fn render_news(out: &mut String, merged: &Merged<MergedNews>) {
    let view = DashboardView::News;
    let Merged::Ready(news) = merged else {
        let _ = writeln!(out, "## {}", view_title(view));
        let _ = writeln!(out, "{}", empty_prompt(view));
        return;
    };
    let _ = writeln!(out, "## {}", news_summary(news.items.len()));
    for tagged in &news.items {
        let _ = writeln!(
            out,
            "[{}] [{}] {}",
            tagged.company_name, tagged.item.category, tagged.item.title
        );
        let _ = writeln!(
            out,
            "  {} · {}",
            tagged.item.source, tagged.item.relative_time_label
        );
    }
}

fn run_validate(config_path: &Path) -> Result<(), DashboardError> {
    let settings = load_settings(Some(config_path))?;
    init_tracing(&settings.log_level);
    for path in [&settings.prices_csv, &settings.financial_info_csv]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            return Err(DashboardError::DataSource {
                reason: format!("file not found: {}", path.display()),
            });
        }
    }
    println!("Configuration is valid.");
    println!("  selection: {}", settings.selection.ids().join(","));
    println!("  price window: {} days", settings.price_window_days);
    println!("  news sort: {}", settings.news_sort);
    println!("  bind: {}", settings.bind);
    Ok(())
}

fn run_serve(config_path: &Path) -> Result<(), DashboardError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, serve};

        let settings = load_settings(Some(config_path))?;
        init_tracing(&settings.log_level);

        let directory = CompanyDirectory::builtin();
        let provider = build_provider(&settings, &directory)?;
        let market_data = CsvMarketData::load(
            settings.prices_csv.as_deref(),
            settings.financial_info_csv.as_deref(),
        )?;

        let state = AppState::new(directory, provider)
            .with_market_data(Arc::new(market_data))
            .with_default_selection(settings.selection.clone())
            .with_news_sort(settings.news_sort);

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(serve(state, &settings.bind))
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        Err(DashboardError::ConfigInvalid {
            section: "server".to_string(),
            key: "bind".to_string(),
            reason: "built without the web feature".to_string(),
        })
    }
}
