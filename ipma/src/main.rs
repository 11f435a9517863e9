use std::process::ExitCode;

use clap::Parser;
use ipma::{Coordinate, DayOffset, ForecastPeriod, IpmaConfig, Language, Location, Session};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Weather at a point in Portugal, from IPMA open data")]
struct Cli {
    /// Latitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    latitude: f64,
    /// Longitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    longitude: f64,
    /// Also resolve the nearest sea location.
    #[arg(long)]
    sea: bool,
}

fn print_or_dash(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}{unit}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ipma=info")),
        )
        .init();

    let cli = Cli::parse();
    let coordinate = match Coordinate::new(cli.latitude, cli.longitude) {
        Ok(coordinate) => coordinate,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let session = match Session::new(IpmaConfig::from_env()) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "could not create session");
            return ExitCode::FAILURE;
        }
    };

    let location = match Location::resolve(&session, coordinate, cli.sea).await {
        Ok(location) => location,
        Err(e) => {
            error!(error = %e, %coordinate, "could not resolve location");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} ({}), station {} ({})",
        location.name(),
        location.global_id(),
        location.station_name(),
        location.station_id()
    );
    if let Some(sea) = location.sea_location_name() {
        println!("Sea location: {sea}");
    }
    println!();

    match location.observation().await {
        Some(obs) => println!(
            "Now: {}, {} humidity, {} wind",
            print_or_dash(obs.temperature, "°C"),
            print_or_dash(obs.humidity, "%"),
            print_or_dash(obs.wind_intensity_km, " km/h")
        ),
        None => println!("Now: no observation available"),
    }
    println!();

    println!("Forecast:");
    for forecast in location.forecast(ForecastPeriod::Daily).await {
        println!(
            "  {}  {} / {}  {}",
            forecast.forecast_time.format("%a %d %b"),
            print_or_dash(forecast.min_temperature, "°C"),
            print_or_dash(forecast.max_temperature(), "°C"),
            forecast.description(Language::English)
        );
    }

    if cli.sea {
        println!();
        println!("Sea:");
        for sea in location.sea_forecast().await {
            println!("  {sea}");
        }
    }

    println!();
    for day in [DayOffset::Today, DayOffset::Tomorrow] {
        if let Some(risk) = location.fire_risk(day).await {
            println!("Fire risk {}: {}", day.label(), risk.level.label(Language::English));
        }
    }
    if let Some(uv) = location.uv_risk().await {
        println!("UV: {uv}");
    }

    match location.warnings().await {
        Ok(warnings) if warnings.is_empty() => println!("No active warnings"),
        Ok(warnings) => {
            println!("Warnings:");
            for warning in warnings {
                println!("  {warning}");
            }
        }
        Err(e) => {
            error!(error = %e, "could not retrieve warnings");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
