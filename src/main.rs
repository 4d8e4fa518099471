use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tripdesk::config::AppConfig;
use tripdesk::error::AppError;
use tripdesk::telemetry;
use tripdesk::workflows::booking::{
    booking_router, BookingService, MemoryBookingRepository, Room, RoomId,
};
use tripdesk::workflows::refund::{self, refund_router, MemoryBillRepository, RefundService};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Tripdesk Booking Service",
    about = "Run the travel-booking backend or exercise its policies from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote a refund for a paid amount and departure date
    Refund {
        #[command(subcommand)]
        command: RefundCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum RefundCommand {
    /// Print the refund tier, percentage, and amount for a booking
    Quote(RefundQuoteArgs),
}

#[derive(Args, Debug)]
struct RefundQuoteArgs {
    /// Total paid amount to refund against
    #[arg(long, value_parser = parse_money)]
    total: Decimal,
    /// Departure (check-in) date of the booking (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    departure: NaiveDate,
    /// Evaluation date for the quote (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Refund {
            command: RefundCommand::Quote(args),
        } => run_refund_quote(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_money(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as a decimal amount ({err})"))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let bookings = Arc::new(MemoryBookingRepository::with_rooms(demo_rooms()));
    let booking_service = Arc::new(BookingService::new(
        bookings,
        config.booking.auto_confirm,
    ));
    let bills = Arc::new(MemoryBillRepository::default());
    let refund_service = Arc::new(RefundService::new(bills));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(booking_router(booking_service))
        .merge(refund_router(refund_service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tripdesk booking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_refund_quote(args: RefundQuoteArgs) -> Result<(), AppError> {
    let RefundQuoteArgs {
        total,
        departure,
        today,
    } = args;

    let now = match today {
        Some(date) => midnight_utc(date),
        None => Utc::now(),
    };

    let quote = refund::quote(total, midnight_utc(departure), now)?;

    println!("Refund quote");
    println!("Total paid: {total}");
    println!(
        "Days until departure: {} ({})",
        quote.days_until_departure, quote.policy_label
    );
    println!(
        "Refund: {}% -> {}",
        quote.percentage, quote.refund_amount
    );

    Ok(())
}

/// Rooms registered at startup until catalog persistence lands.
fn demo_rooms() -> Vec<Room> {
    vec![
        Room {
            id: RoomId("room-101".to_string()),
            name: "Standard Double".to_string(),
            nightly_rate: Decimal::new(12_500, 2),
        },
        Room {
            id: RoomId("room-102".to_string()),
            name: "Deluxe Twin".to_string(),
            nightly_rate: Decimal::new(17_900, 2),
        },
        Room {
            id: RoomId("suite-201".to_string()),
            name: "Harbor Suite".to_string(),
            nightly_rate: Decimal::new(32_000, 2),
        },
    ]
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_parser_accepts_decimal_amounts() {
        assert_eq!(parse_money("125.50"), Ok(Decimal::new(12_550, 2)));
        assert!(parse_money("not-money").is_err());
    }

    #[test]
    fn date_parser_requires_iso_format() {
        assert!(parse_date("2026-09-10").is_ok());
        assert!(parse_date("10/09/2026").is_err());
    }

    #[test]
    fn demo_catalog_has_unique_room_ids() {
        let rooms = demo_rooms();
        let mut ids: Vec<_> = rooms.iter().map(|room| room.id.0.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rooms.len());
    }
}
