//! Fatal errors. Business-rule violations are events, not errors.

use thiserror::Error;

use crate::time::ClockTime;
use crate::types::{TableNumber, ValidationError};

/// A precondition the simulation cannot recover from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Sessions cannot span midnight.
    #[error("session at table {table} ends at {end}, before it started at {start}")]
    SessionEndsBeforeStart {
        table: TableNumber,
        start: ClockTime,
        end: ClockTime,
    },

    /// Only reachable through a derived seating event built by hand.
    #[error("table {number} is already occupied by {occupant}")]
    TableOccupied { number: TableNumber, occupant: String },

    #[error("table {number} does not exist (club has {count} tables)")]
    NoSuchTable { number: TableNumber, count: usize },
}

/// Why the input file was rejected before the simulation started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input is empty")]
    Empty,

    #[error("invalid header on line 1: {line:?}: {reason}")]
    Header { line: String, reason: String },

    #[error("invalid input format on line {line_number}: {line:?}: {reason}")]
    Line {
        line_number: usize,
        line: String,
        reason: LineError,
    },
}

/// The specific defect of a rejected event line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected 3 or 4 fields, got {0}")]
    FieldCount(usize),

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("unknown event code {0:?}")]
    EventCode(String),

    #[error("table {value:?} is not in 1..={max}")]
    TableOutOfRange { value: String, max: usize },

    #[error("event code {code} takes {expected} fields")]
    WrongArity { code: u8, expected: usize },

    #[error("time {time} is earlier than the previous event at {previous}")]
    NotMonotonic { time: ClockTime, previous: ClockTime },
}
