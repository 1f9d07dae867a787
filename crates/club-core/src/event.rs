//! Club events: client actions read from the input log and the events the
//! club synthesizes in response.

use std::fmt;

use serde::Serialize;

use crate::time::ClockTime;
use crate::types::{ClientId, TableNumber};

/// Business rules a client action can break.
///
/// A violation never aborts the day; it is recorded as an event right after
/// the action that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleViolation {
    /// The client is already inside the club.
    YouShallNotPass,
    /// The client arrived outside opening hours.
    NotOpenYet,
    /// The requested table is taken.
    PlaceIsBusy,
    /// The client is not inside the club.
    ClientUnknown,
    /// The client asked to wait while a table is free.
    #[serde(rename = "ICanWaitNoLonger!")]
    ICanWaitNoLonger,
}

impl RuleViolation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YouShallNotPass => "YouShallNotPass",
            Self::NotOpenYet => "NotOpenYet",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ClientUnknown => "ClientUnknown",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened. Codes 1-4 come from the input log; 11-13 are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Code 1.
    ClientArrived { client: ClientId },
    /// Code 2.
    ClientSat { client: ClientId, table: TableNumber },
    /// Code 3.
    ClientWaits { client: ClientId },
    /// Code 4.
    ClientLeft { client: ClientId },
    /// Code 11: ejected by an overflowing queue or by closing time.
    ClientForcedToLeave { client: ClientId },
    /// Code 12: seated from the wait queue when a table was freed.
    ClientAutoSeated { client: ClientId, table: TableNumber },
    /// Code 13.
    RuleViolation { message: RuleViolation },
}

impl EventKind {
    pub const ARRIVED: u8 = 1;
    pub const SAT: u8 = 2;
    pub const WAITS: u8 = 3;
    pub const LEFT: u8 = 4;
    pub const FORCED_TO_LEAVE: u8 = 11;
    pub const AUTO_SEATED: u8 = 12;
    pub const RULE_VIOLATION: u8 = 13;

    /// Numeric code used in the text log format.
    pub const fn code(&self) -> u8 {
        match self {
            Self::ClientArrived { .. } => Self::ARRIVED,
            Self::ClientSat { .. } => Self::SAT,
            Self::ClientWaits { .. } => Self::WAITS,
            Self::ClientLeft { .. } => Self::LEFT,
            Self::ClientForcedToLeave { .. } => Self::FORCED_TO_LEAVE,
            Self::ClientAutoSeated { .. } => Self::AUTO_SEATED,
            Self::RuleViolation { .. } => Self::RULE_VIOLATION,
        }
    }

    /// The client this event concerns, if any.
    pub const fn client(&self) -> Option<&ClientId> {
        match self {
            Self::ClientArrived { client }
            | Self::ClientSat { client, .. }
            | Self::ClientWaits { client }
            | Self::ClientLeft { client }
            | Self::ClientForcedToLeave { client }
            | Self::ClientAutoSeated { client, .. } => Some(client),
            Self::RuleViolation { .. } => None,
        }
    }

    pub const fn table(&self) -> Option<TableNumber> {
        match self {
            Self::ClientSat { table, .. } | Self::ClientAutoSeated { table, .. } => Some(*table),
            _ => None,
        }
    }

    /// True for events the club synthesizes rather than reads.
    pub const fn is_derived(&self) -> bool {
        self.code() > Self::LEFT
    }
}

/// A single timestamped entry of the day's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub time: ClockTime,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub const fn new(time: ClockTime, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub const fn violation(time: ClockTime, message: RuleViolation) -> Self {
        Self::new(time, EventKind::RuleViolation { message })
    }
}

/// Renders the log line: `HH:MM code body [table]`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.time, self.kind.code())?;
        match &self.kind {
            EventKind::RuleViolation { message } => write!(f, "{message}")?,
            kind => {
                if let Some(client) = kind.client() {
                    write!(f, "{client}")?;
                }
            }
        }
        if let Some(table) = self.kind.table() {
            write!(f, " {table}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn client(name: &str) -> ClientId {
        ClientId::new(name).unwrap()
    }

    #[test]
    fn display_matches_log_format() {
        let sat = Event::new(
            at("08:15"),
            EventKind::ClientSat {
                client: client("alice"),
                table: 1,
            },
        );
        assert_eq!(sat.to_string(), "08:15 2 alice 1");

        let left = Event::new(at("19:00"), EventKind::ClientForcedToLeave { client: client("bob") });
        assert_eq!(left.to_string(), "19:00 11 bob");

        let err = Event::violation(at("08:25"), RuleViolation::ICanWaitNoLonger);
        assert_eq!(err.to_string(), "08:25 13 ICanWaitNoLonger!");
    }

    #[test]
    fn derived_kinds_use_codes_above_input_range() {
        let inputs = [
            EventKind::ClientArrived { client: client("a") },
            EventKind::ClientWaits { client: client("a") },
            EventKind::ClientLeft { client: client("a") },
        ];
        assert!(inputs.iter().all(|k| !k.is_derived()));

        let seated = EventKind::ClientAutoSeated {
            client: client("a"),
            table: 2,
        };
        assert_eq!(seated.code(), 12);
        assert!(seated.is_derived());
    }

    #[test]
    fn serializes_flat_with_type_tag() {
        let event = Event::violation(at("09:00"), RuleViolation::ICanWaitNoLonger);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "time": "09:00",
                "type": "rule_violation",
                "message": "ICanWaitNoLonger!"
            })
        );
    }
}
