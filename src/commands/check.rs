//! The `check` command: run one projection cycle.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info};

use crate::api::{client, fetch_snapshot, Mode, Snapshot};
use crate::commands::Out;
use crate::model::Amount;
use crate::notify::{Broker, Notification, Severity};
use crate::projection::{run_projection, ProjectionOutcome};
use crate::{Config, Result};

/// The structured output of one check cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub account_name: String,
    pub balance: Amount,
    pub window_end: NaiveDate,
    pub outcome: ProjectionOutcome,
}

/// Fetches a fresh snapshot, runs the projection and sends whatever
/// notifications the result calls for.
///
/// An alert goes out only when the projected minimum breaches the threshold,
/// and a failure to deliver it fails the cycle. A routine update goes out
/// when `send_update` is set; its delivery failures are logged and swallowed
/// so a flaky update channel cannot take down watch mode.
pub async fn check(config: &Config, mode: Mode, send_update: bool) -> Result<Out<CheckReport>> {
    let today = Local::now().date_naive();
    let window_end = config.window_end(today);
    info!(
        "Checking account {} from {today} through {window_end}",
        config.account_id()
    );

    let budget = client(config, mode);
    let snapshot = fetch_snapshot(budget.as_ref(), config.account_id(), config.cc_categories())
        .await
        .context("Failed to fetch budget data")?;

    let outcome = run_projection(
        snapshot.balance,
        &snapshot.scheduled,
        snapshot.pending.clone(),
        config.account_id(),
        today,
        window_end,
        config.threshold(),
    )?;

    let message = render_report(&snapshot, &outcome, window_end);

    if outcome.decision.is_breach() {
        let severity = if outcome.result.minimum_balance.is_negative() {
            Severity::Warning
        } else {
            Severity::Info
        };
        let notification = Notification::new(
            "YNAB Balance Alert",
            format!(
                "Your {} balance is projected to drop to {} by {}. Minimum threshold: {}.",
                snapshot.account_name,
                outcome.result.minimum_balance,
                outcome.result.minimum_date.format("%b %d, %Y"),
                config.threshold(),
            ),
            severity,
        );
        Broker::from_config(config.channels())
            .send(&notification)
            .await
            .context("Failed to send the balance alert")?;
    }

    if send_update {
        let notification = update_notification(config, &outcome, window_end);
        if let Err(e) = Broker::from_config(config.update_channels())
            .send(&notification)
            .await
        {
            error!("Failed to send the balance update: {e:#}");
        }
    }

    Ok(Out::new(
        message,
        CheckReport {
            account_name: snapshot.account_name,
            balance: snapshot.balance,
            window_end,
            outcome,
        },
    ))
}

fn render_report(snapshot: &Snapshot, outcome: &ProjectionOutcome, window_end: NaiveDate) -> String {
    let mut lines = vec![
        format!("Account: {}", snapshot.account_name),
        format!("Current balance: {}", snapshot.balance),
    ];

    if outcome.occurrences.is_empty() {
        lines.push(format!("No scheduled transactions through {window_end}"));
    } else {
        lines.push(format!(
            "{} scheduled transactions through {window_end}:",
            outcome.occurrences.len()
        ));
        for occurrence in &outcome.occurrences {
            lines.push(format!(
                "  {}  {:<40} {:>12}",
                occurrence.date,
                occurrence.label,
                occurrence.amount.to_string()
            ));
        }
    }

    if !outcome.reconciliation.residual.is_empty() {
        lines.push(format!(
            "Unscheduled credit card payments (applied at window start): {}",
            outcome.reconciliation.unscheduled_total
        ));
        for payment in &outcome.reconciliation.residual {
            lines.push(format!("  {:<42} {:>12}", payment.name, payment.amount.to_string()));
        }
    }

    lines.push(format!(
        "Projected minimum balance: {} on {}",
        outcome.result.minimum_balance, outcome.result.minimum_date
    ));

    lines.join("\n")
}

fn update_notification(
    config: &Config,
    outcome: &ProjectionOutcome,
    window_end: NaiveDate,
) -> Notification {
    let (severity, status) = if outcome.decision.is_breach() {
        (Severity::Warning, "below the threshold")
    } else {
        (Severity::Success, "on track")
    };
    Notification::new(
        "YNAB Balance Update",
        format!(
            "Projected minimum {} on {} (window through {}). Threshold: {}. Balance is {status}.",
            outcome.result.minimum_balance,
            outcome.result.minimum_date.format("%b %d, %Y"),
            window_end.format("%b %d, %Y"),
            config.threshold(),
        ),
        severity,
    )
}
