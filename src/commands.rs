//! One-shot operations run from the command line instead of the TUI.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::api::{DashboardApi, SettingsAck, ThresholdOverrides};
use crate::data::LiveBoard;

/// Fetch the current metrics once, render them and write the board summary
/// as pretty JSON to `path`.
pub async fn export_metrics(api: &dyn DashboardApi, path: &Path) -> Result<LiveBoard> {
    let response = api.fetch_metrics().await.context("Failed to fetch metrics")?;

    let mut board = LiveBoard::new();
    board.apply(&response);
    write_export(&board, path)?;

    tracing::info!(path = %path.display(), "Exported metrics");
    Ok(board)
}

/// Write `board` as pretty JSON to `path`.
pub fn write_export(board: &LiveBoard, path: &Path) -> Result<()> {
    if !board.is_loaded() {
        bail!("No data to export");
    }
    let json = serde_json::to_string_pretty(&board.to_export_json())?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Parse a `KEY=VALUE` threshold override.
///
/// Values containing a `.` are sent as floats, everything else as integers.
pub fn parse_override(raw: &str) -> Result<(String, serde_json::Number)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected KEY=VALUE, got '{}'", raw);
    };
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        bail!("Missing threshold name in '{}'", raw);
    }

    let number = if value.contains('.') {
        let parsed: f64 = value
            .parse()
            .with_context(|| format!("Invalid number for {}: '{}'", key, value))?;
        match serde_json::Number::from_f64(parsed) {
            Some(n) => n,
            None => bail!("Invalid number for {}: '{}'", key, value),
        }
    } else {
        let parsed: i64 = value
            .parse()
            .with_context(|| format!("Invalid integer for {}: '{}'", key, value))?;
        serde_json::Number::from(parsed)
    };

    Ok((key.to_string(), number))
}

/// Parse every override, then push them to the backend in one request.
pub async fn push_overrides(api: &dyn DashboardApi, raw: &[String]) -> Result<SettingsAck> {
    let overrides = raw
        .iter()
        .map(|s| parse_override(s))
        .collect::<Result<ThresholdOverrides>>()?;

    let ack = api.update_settings(&overrides).await.context("Failed to update settings")?;
    tracing::info!(
        status = %ack.status,
        keys = overrides.len(),
        config = ?ack.config,
        "Updated thresholds"
    );
    Ok(ack)
}
