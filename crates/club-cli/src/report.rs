//! Rendering of the day report.
//!
//! The text format is the club's log format:
//!
//! ```text
//! 08:00              <- opening time
//! 08:10 1 alice      <- every event of the final log
//! 19:00              <- closing time
//! 1 10 00:45         <- table, revenue, occupied time
//! ```

use std::fmt::Write;

use anyhow::{Context, Result};
use club_core::{ClockTime, DayReport, EventKind, format_hm};
use serde::Serialize;

/// Formats the report in the plain text log format.
pub fn format_report(report: &DayReport) -> String {
    let mut output = String::new();

    writeln!(output, "{}", report.opening).unwrap();
    for event in &report.events {
        writeln!(output, "{event}").unwrap();
    }
    writeln!(output, "{}", report.closing).unwrap();
    for table in &report.tables {
        writeln!(
            output,
            "{} {} {}",
            table.number,
            table.revenue,
            format_hm(table.occupied_minutes)
        )
        .unwrap();
    }

    output
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    time: ClockTime,
    code: u8,
    #[serde(flatten)]
    kind: &'a EventKind,
}

#[derive(Serialize)]
struct JsonTable {
    number: usize,
    revenue: u64,
    occupied_minutes: u32,
    occupied: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    opening: ClockTime,
    closing: ClockTime,
    events: Vec<JsonEvent<'a>>,
    tables: Vec<JsonTable>,
}

/// Formats the report as pretty-printed JSON.
pub fn format_report_json(report: &DayReport) -> Result<String> {
    let json = JsonReport {
        opening: report.opening,
        closing: report.closing,
        events: report
            .events
            .iter()
            .map(|e| JsonEvent {
                time: e.time,
                code: e.kind.code(),
                kind: &e.kind,
            })
            .collect(),
        tables: report
            .tables
            .iter()
            .map(|t| JsonTable {
                number: t.number,
                revenue: t.revenue,
                occupied_minutes: t.occupied_minutes,
                occupied: format_hm(t.occupied_minutes),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&json).context("failed to serialize report")
}
