//! The `watch` command: run check cycles on the configured schedule until
//! the process is interrupted.

use anyhow::bail;
use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use crate::api::Mode;
use crate::commands::Out;
use crate::schedule::Schedule;
use crate::{Config, Result};

/// Runs projection cycles forever, waking for whichever schedule fires next.
///
/// A cycle that fires on the check schedule runs without an update
/// notification; one that fires on the update schedule sends it. Cycles
/// never overlap, and a shutdown signal is honored only between cycles so a
/// cycle in flight always finishes.
pub async fn watch(config: &Config, mode: Mode) -> Result<Out<()>> {
    let check_schedule = config.schedule();
    let update_schedule = config.update_schedule();
    if check_schedule.is_none() && update_schedule.is_none() {
        bail!(
            "Watch mode needs at least one of 'schedule' or 'update_schedule' in the config file"
        );
    }

    if let Some(schedule) = check_schedule {
        info!("Check schedule: {schedule}");
    }
    if let Some(schedule) = update_schedule {
        info!("Update schedule: {schedule}");
    }

    let now = Local::now().naive_local();
    let mut next_check = check_schedule.map(|s| first_deadline(s, now));
    let mut next_update = update_schedule.map(|s| first_deadline(s, now));

    loop {
        // Whichever deadline comes first decides when to wake up.
        let deadline = match (next_check, next_update) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => unreachable!("at least one schedule is configured"),
        };

        if !wait_until(deadline).await {
            break;
        }

        let now = Local::now().naive_local();
        let check_due = next_check.is_some_and(|t| t <= now);
        let update_due = next_update.is_some_and(|t| t <= now);

        match super::check(config, mode, update_due).await {
            Ok(out) => out.print(),
            Err(e) => error!("Projection cycle failed: {e:#}"),
        }

        if check_due {
            if let Some(schedule) = check_schedule {
                next_check = Some(schedule.next_after(now));
            }
        }
        if update_due {
            if let Some(schedule) = update_schedule {
                next_update = Some(schedule.next_after(now));
            }
        }
    }

    Ok(Out::new_message("Shutdown complete"))
}

/// Interval schedules run a first cycle right away; daily schedules wait
/// for their wall-clock time.
fn first_deadline(schedule: Schedule, now: NaiveDateTime) -> NaiveDateTime {
    if schedule.fires_immediately() {
        now
    } else {
        schedule.next_after(now)
    }
}

/// Sleeps until `deadline`, returning `false` if a shutdown signal arrived
/// first.
async fn wait_until(deadline: NaiveDateTime) -> bool {
    let now = Local::now().naive_local();
    let wait = deadline - now;
    if wait <= chrono::Duration::zero() {
        return true;
    }
    let wait = wait.to_std().unwrap_or_default();
    info!("Next cycle at {deadline} ({:.1} minutes away)", wait.as_secs_f64() / 60.0);
    tokio::select! {
        _ = tokio::time::sleep(wait) => true,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            false
        }
    }
}
