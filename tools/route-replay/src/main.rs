use anyhow::{bail, Context, Result};
use clap::Parser;
use commonspot_navigation::{parse_route_detailed, MANEUVER_THRESHOLD_M};
use std::path::PathBuf;

mod fixes;
mod output;
mod replay;

use fixes::read_fixes;
use output::write_route_geojson;
use replay::replay;

#[derive(Parser, Debug)]
#[command(
    name = "route-replay",
    author,
    version,
    about = "Replay recorded position fixes against an OSRM route response",
    long_about = "Parses a saved OSRM route response, feeds a recorded track to the \
                  navigation tracker one fix at a time, and reports every maneuver \
                  reached.\n\n\
                  The track may be a GeoJSON LineString, MultiPoint, or a \
                  FeatureCollection of Points in recording order."
)]
struct Args {
    /// Saved OSRM route response (JSON)
    #[arg(short, long)]
    route: PathBuf,

    /// Recorded position fixes (GeoJSON)
    #[arg(short, long)]
    fixes: PathBuf,

    /// Distance in meters at which a maneuver counts as reached
    #[arg(short, long, default_value_t = MANEUVER_THRESHOLD_M)]
    threshold: f64,

    /// Write the route, maneuvers, and events to this GeoJSON file
    #[arg(long)]
    geojson_out: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Route Replay ===");
    log::info!("Route: {}", args.route.display());
    log::info!("Fixes: {}", args.fixes.display());

    if args.threshold.is_nan() || args.threshold <= 0.0 {
        bail!("Threshold must be positive, got {}", args.threshold);
    }

    let body = std::fs::read(&args.route)
        .with_context(|| format!("Failed to read route file: {}", args.route.display()))?;
    let outcome = parse_route_detailed(&body).context("Failed to parse route response")?;

    for skipped in &outcome.skipped {
        log::warn!(
            "  Skipped leg {} step {}: {}",
            skipped.leg_index,
            skipped.step_index,
            skipped.reason
        );
    }

    let route = outcome.route;
    log::info!(
        "  {} maneuvers, {:.0} m, {} s",
        route.steps().len(),
        route.total_distance_m(),
        route.total_duration_s()
    );
    for (index, step) in route.steps().iter().enumerate() {
        log::debug!("    {:>3}: {}", index, step.instruction);
    }

    let fixes = read_fixes(&args.fixes)?;
    log::info!("  {} position fixes", fixes.len());

    log::info!("");
    log::info!("Replaying with {:.1} m threshold...", args.threshold);
    let (events, stats) = replay(route.clone(), &fixes, args.threshold)?;

    log::info!("");
    stats.log_summary();

    if let Some(path) = &args.geojson_out {
        write_route_geojson(&route, &fixes, &events, path)?;
        log::info!("Wrote GeoJSON to {}", path.display());
    }

    Ok(())
}
