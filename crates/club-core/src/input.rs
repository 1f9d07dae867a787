//! Reading and validating the day's input file.
//!
//! ```text
//! 3 09:00 19:00 10        <- tables, opening, closing, hourly rate
//! 08:48 1 client1         <- time, event code, client [, table]
//! 09:54 2 client1 1
//! ```
//!
//! Any defect rejects the whole file before the simulation starts.

use crate::error::{InputError, LineError};
use crate::event::{Event, EventKind};
use crate::processor::ClubSettings;
use crate::time::ClockTime;
use crate::types::ClientId;

const HEADER_FIELDS: usize = 4;
const EVENT_FIELDS: usize = 3;
const SAT_EVENT_FIELDS: usize = 4;

/// A validated input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubInput {
    pub settings: ClubSettings,
    pub events: Vec<Event>,
}

/// Parses the full contents of an input file.
pub fn parse_input(content: &str) -> Result<ClubInput, InputError> {
    let mut lines = content.lines();
    let header = lines.next().ok_or(InputError::Empty)?;
    let settings = parse_header(header)?;

    let mut events = Vec::new();
    let mut previous = None;
    for (index, line) in lines.enumerate() {
        let event = parse_event(line, settings.tables, previous).map_err(|reason| InputError::Line {
            line_number: index + 2,
            line: line.to_string(),
            reason,
        })?;
        previous = Some(event.time);
        events.push(event);
    }

    tracing::debug!(tables = settings.tables, events = events.len(), "parsed input");
    Ok(ClubInput { settings, events })
}

fn parse_header(line: &str) -> Result<ClubSettings, InputError> {
    let fail = |reason: String| InputError::Header {
        line: line.to_string(),
        reason,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[tables, opening, closing, rate] = fields.as_slice() else {
        return Err(fail(format!(
            "expected {HEADER_FIELDS} fields, got {}",
            fields.len()
        )));
    };

    let tables: usize = tables
        .parse()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| fail(format!("table count {tables:?} is not a positive integer")))?;
    let opening = opening.parse::<ClockTime>().map_err(|e| fail(e.to_string()))?;
    let closing = closing.parse::<ClockTime>().map_err(|e| fail(e.to_string()))?;
    if closing < opening {
        return Err(fail(format!(
            "closing time {closing} is before opening time {opening}"
        )));
    }
    let hourly_rate: u32 = rate
        .parse()
        .map_err(|_| fail(format!("hourly rate {rate:?} is not a non-negative integer")))?;

    Ok(ClubSettings {
        tables,
        opening,
        closing,
        hourly_rate,
    })
}

fn parse_event(
    line: &str,
    tables: usize,
    previous: Option<ClockTime>,
) -> Result<Event, LineError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(EVENT_FIELDS..=SAT_EVENT_FIELDS).contains(&fields.len()) {
        return Err(LineError::FieldCount(fields.len()));
    }

    let time: ClockTime = fields[0].parse()?;
    let code: u8 = fields[1]
        .parse()
        .map_err(|_| LineError::EventCode(fields[1].to_string()))?;
    let client = ClientId::new(fields[2])?;
    if let Some(previous) = previous.filter(|&p| time < p) {
        return Err(LineError::NotMonotonic { time, previous });
    }

    let expected = if code == EventKind::SAT {
        SAT_EVENT_FIELDS
    } else {
        EVENT_FIELDS
    };
    let kind = match code {
        EventKind::ARRIVED => EventKind::ClientArrived { client },
        EventKind::SAT => {
            let Some(raw) = fields.get(3) else {
                return Err(LineError::WrongArity { code, expected });
            };
            let table = raw
                .parse()
                .ok()
                .filter(|n| (1..=tables).contains(n))
                .ok_or_else(|| LineError::TableOutOfRange {
                    value: (*raw).to_string(),
                    max: tables,
                })?;
            EventKind::ClientSat { client, table }
        }
        EventKind::WAITS => EventKind::ClientWaits { client },
        EventKind::LEFT => EventKind::ClientLeft { client },
        _ => return Err(LineError::EventCode(fields[1].to_string())),
    };
    if fields.len() != expected {
        return Err(LineError::WrongArity { code, expected });
    }
    Ok(Event::new(time, kind))
}
