use std::fs::OpenOptions;
use std::io::Write;

use chrono::{Local, NaiveDateTime};

use crate::errors::AppError;
use crate::store::Storage;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends one `[timestamp] message` line to the notification log. Append
/// failures are logged and swallowed; logging must never fail the operation
/// that triggered it.
pub fn append(storage: &Storage, message: &str) {
    let line = format!("[{}] {}\n", Local::now().format(TIMESTAMP_FORMAT), message);

    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(storage.log_path())
        .and_then(|mut file| file.write_all(line.as_bytes()));
    if let Err(e) = result {
        tracing::warn!(error = %e, "failed to append notification line");
    }

    tracing::info!("notification: {message}");
}

/// Returns the most recent `limit` lines, newest first. Lines that do not
/// carry the `[timestamp] message` shape are skipped.
pub fn recent(storage: &Storage, limit: usize) -> Result<Vec<String>, AppError> {
    let path = storage.log_path();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(&path)?;
    let lines = raw
        .lines()
        .rev()
        .filter(|line| parse_line(line).is_some())
        .take(limit)
        .map(str::to_string)
        .collect();
    Ok(lines)
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (timestamp, message) = line.strip_prefix('[')?.split_once("] ")?;
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    Some((timestamp, message))
}
