//! Logidash - Main Entry Point
//!
//! Prints one page of the logistics analytics API as text tables.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use logidash::components::data_table::TableInteractions;
use logidash::constants::TOP_ROUTES_LIMIT;
use logidash::domain::config::LogConfig;
use logidash::domain::{AppConfig, DashboardQuery, DatePreset, DateRange, TrendInterval};
use logidash::eventing::UiEvent;
use logidash::features::PageKind;
use logidash::features::costs::CostsPage;
use logidash::features::dashboard::DashboardPage;
use logidash::features::routes::RoutesPage;
use logidash::features::shipments::ShipmentsPage;
use logidash::features::vehicles::VehiclesPage;
use logidash::helpers::get_or_create_data_dir;
use logidash::services::{ApiClient, Notifier, StatusPoller};
use logidash::state::{Overlay, SystemState};

#[derive(Parser)]
#[command(name = "logidash")]
#[command(about = "Text reports from the logistics analytics API", long_about = None)]
struct Args {
    /// dashboard, shipments, vehicles, routes or costs
    #[arg(value_name = "PAGE", default_value = "dashboard")]
    report: PageKind,

    /// Range start (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Range end (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// today, last-7-days, last-30-days, last-month or last-year
    #[arg(long, conflicts_with = "start")]
    preset: Option<DatePreset>,

    /// Dashboard trend interval: week, month or year
    #[arg(long, default_value = "week")]
    interval: TrendInterval,

    /// Dashboard periods back (1-12)
    #[arg(long, default_value_t = 1)]
    periods_back: u32,

    /// Search term for the shipments or vehicles local table
    #[arg(long)]
    search: Option<String>,

    /// Search term typed into the paginated tables (shipments and routes pages)
    #[arg(long)]
    table_search: Option<String>,

    /// Click a paginated table's column header by field name; repeat to flip the direction
    #[arg(long = "sort", value_name = "FIELD")]
    sort: Vec<String>,

    /// Page to show in the paginated tables
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page: Option<u32>,

    /// Number of top-performing routes (routes page)
    #[arg(long, default_value_t = TOP_ROUTES_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Vehicle id to drill into (vehicles page)
    #[arg(long)]
    vehicle: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,
}

fn init_tracing(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::LocalTime::rfc_3339());

    let (file, guard) = if config.file {
        let dir = get_or_create_data_dir().context("resolving the log directory")?;
        let appender = tracing_appender::rolling::daily(dir.join("logs"), "logidash.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .init();
    Ok(guard)
}

fn resolve_range(args: &Args, config: &AppConfig, today: NaiveDate) -> anyhow::Result<DateRange> {
    if let (Some(start), Some(end)) = (&args.start, &args.end) {
        return Ok(DateRange::parse(start, end)?);
    }
    if let Some(preset) = args.preset {
        return Ok(preset.range(today)?);
    }
    if let Some(range) = config.range.date_range()? {
        return Ok(range);
    }
    Ok(DateRange::last_year(today)?)
}

fn print_overlay(overlay: &Overlay) {
    eprintln!("{}\n{}\n", overlay.title(), overlay.message());
}

/// Check the recalculation status, waiting out a running calculation
async fn wait_for_backend(api: &ApiClient, interval: std::time::Duration) -> SystemState {
    let mut poller = StatusPoller::spawn(Arc::new(api.clone()), interval);
    let mut rx = poller.subscribe();

    // Err means the first check failed and the poller already stopped
    if rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if let Some(overlay @ Overlay::Calculating) = state.overlay() {
            print_overlay(&overlay);
        }
    }
    poller.settled().await
}

fn drain_toasts(events: &crossbeam_channel::Receiver<UiEvent>) {
    for event in events.try_iter() {
        match event {
            UiEvent::Toast { message, severity } => eprintln!("[{}] {}", severity.label(), message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load().context("loading configuration")?;
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    let _guard = init_tracing(&config.log)?;
    tracing::info!(page = %args.report, api = %config.api.base_url, "Starting Logidash");

    let today = Local::now().date_naive();
    let range = resolve_range(&args, &config, today)?;

    let (notifier, toasts) = Notifier::channel();
    let api = ApiClient::new(&config.api, notifier)?;

    let system = wait_for_backend(&api, config.system.poll_interval()).await;
    if let Some(overlay @ Overlay::Failed(_)) = system.overlay() {
        print_overlay(&overlay);
    }
    if let Some(at) = &system.last_calculated_at {
        tracing::info!("Analytics last calculated at {}", at);
    }

    let interactions = TableInteractions {
        search: args.table_search.clone(),
        sort: args.sort.clone(),
        page: args.page,
    };

    let output = match args.report {
        PageKind::Dashboard => {
            let query = DashboardQuery::for_interval(args.interval, args.periods_back, today)?;
            let page = DashboardPage::new(api, query);
            page.load().await;
            page.render()
        }
        PageKind::Shipments => {
            let mut page = ShipmentsPage::new(api, &config.table, range);
            if let Some(term) = &args.search {
                page.expensive_routes_mut().set_search_term(term.as_str());
            }
            page.load().await?;
            if !interactions.is_empty() {
                page.interact(&interactions).await?;
            }
            page.render()
        }
        PageKind::Vehicles => {
            let mut page = VehiclesPage::new(api, range);
            if let Some(term) = &args.search {
                page.table_mut().set_search_term(term.as_str());
            }
            page.load().await;
            let mut output = page.render();
            if let Some(id) = &args.vehicle {
                page.load_detail(id).await;
                output.push('\n');
                output.push_str(&page.render_detail());
            }
            output
        }
        PageKind::Routes => {
            let page = RoutesPage::new(api, &config.table, range).with_top_limit(args.limit);
            page.load().await?;
            if !interactions.is_empty() {
                page.interact(&interactions).await?;
            }
            page.render()
        }
        PageKind::Costs => {
            let page = CostsPage::new(api, range);
            page.load().await;
            page.render()
        }
    };

    print!("{output}");
    drain_toasts(&toasts);
    Ok(())
}
