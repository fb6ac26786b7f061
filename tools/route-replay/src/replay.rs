use anyhow::{Context, Result};
use commonspot_navigation::{GeoPoint, NavigationEvent, NavigationTracker, Route, TrackerState};

/// An event together with the fix that caused it
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayEvent {
    pub fix_index: usize,
    pub event: NavigationEvent,
}

#[derive(Debug, Default)]
pub struct ReplayStats {
    pub fixes_total: usize,
    pub fixes_used: usize,
    pub steps_total: usize,
    pub steps_reached: usize,
    pub arrived: bool,
    /// Closest approach to the maneuver that was still pending at the end
    pub closest_pending_m: Option<f64>,
}

impl ReplayStats {
    pub fn log_summary(&self) {
        log::info!("=== Replay Summary ===");
        log::info!("Fixes: {} used of {}", self.fixes_used, self.fixes_total);
        log::info!("Maneuvers reached: {}/{}", self.steps_reached, self.steps_total);
        if self.arrived {
            log::info!("Arrived at destination");
        } else if let Some(distance) = self.closest_pending_m {
            log::info!("Did not arrive, closest approach to next maneuver: {:.1} m", distance);
        } else {
            log::info!("Did not arrive");
        }
    }
}

/// Feed every fix to a fresh tracker, stopping at arrival.
pub fn replay(
    route: Route,
    fixes: &[GeoPoint],
    threshold_m: f64,
) -> Result<(Vec<ReplayEvent>, ReplayStats)> {
    let mut stats = ReplayStats {
        fixes_total: fixes.len(),
        steps_total: route.steps().len(),
        ..Default::default()
    };

    let mut tracker = NavigationTracker::with_threshold(threshold_m);
    tracker.start(route).context("Route cannot be navigated")?;

    let mut events = Vec::new();
    let mut pending_step = 0;

    for (fix_index, fix) in fixes.iter().enumerate() {
        if tracker.state() != TrackerState::Navigating {
            break;
        }

        if let Some(step) = tracker.current_step() {
            if tracker.current_step_index() != pending_step {
                pending_step = tracker.current_step_index();
                stats.closest_pending_m = None;
            }
            let distance = fix.distance_to(&step.maneuver_location);
            stats.closest_pending_m = Some(
                stats
                    .closest_pending_m
                    .map_or(distance, |closest| closest.min(distance)),
            );
        }

        stats.fixes_used += 1;
        let event = tracker
            .on_position_update(*fix)
            .with_context(|| format!("Fix {} rejected", fix_index))?;

        if let Some(event) = event {
            match event {
                NavigationEvent::Advanced { step_index } => {
                    let instruction = tracker
                        .current_step()
                        .map(|step| step.instruction.as_str())
                        .unwrap_or_default();
                    log::info!("  fix {:>5}: step {} -> {}", fix_index, step_index, instruction);
                }
                NavigationEvent::Arrived => {
                    log::info!("  fix {:>5}: arrived", fix_index);
                    stats.arrived = true;
                }
            }
            events.push(ReplayEvent { fix_index, event });
        }
    }

    stats.steps_reached = if stats.arrived {
        stats.steps_total
    } else {
        tracker.current_step_index()
    };

    Ok((events, stats))
}
