//! Table occupancy and billing.

use serde::Serialize;

use crate::error::SimulationError;
use crate::time::{ClockTime, MINUTES_PER_HOUR};
use crate::types::{ClientId, TableNumber};

/// The client currently at a table and when they sat down.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    client: ClientId,
    start: ClockTime,
}

/// One table and everything it accumulated over the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    number: TableNumber,
    session: Option<Session>,
    occupied_minutes: u32,
    revenue: u64,
}

impl Table {
    const fn new(number: TableNumber) -> Self {
        Self {
            number,
            session: None,
            occupied_minutes: 0,
            revenue: 0,
        }
    }

    pub const fn number(&self) -> TableNumber {
        self.number
    }

    pub const fn is_occupied(&self) -> bool {
        self.session.is_some()
    }

    pub fn occupant(&self) -> Option<&ClientId> {
        self.session.as_ref().map(|s| &s.client)
    }

    /// Total minutes of all finished sessions.
    pub const fn occupied_minutes(&self) -> u32 {
        self.occupied_minutes
    }

    /// Total billed for all finished sessions.
    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            number: self.number,
            revenue: self.revenue,
            occupied_minutes: self.occupied_minutes,
        }
    }
}

/// End-of-day figures for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub number: TableNumber,
    pub revenue: u64,
    pub occupied_minutes: u32,
}

/// What closing a session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub client: ClientId,
    pub minutes: u32,
    pub charge: u64,
}

/// Bills a session: every started hour is charged in full.
pub fn session_charge(minutes: u32, hourly_rate: u32) -> u64 {
    u64::from(minutes.div_ceil(MINUTES_PER_HOUR)) * u64::from(hourly_rate)
}

/// Fixed pool of identical tables numbered `1..=N`.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: Vec<Table>,
    hourly_rate: u32,
}

impl TableRegistry {
    pub fn new(count: usize, hourly_rate: u32) -> Self {
        Self {
            tables: (1..=count).map(Table::new).collect(),
            hourly_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, number: TableNumber) -> Option<&Table> {
        number.checked_sub(1).and_then(|i| self.tables.get(i))
    }

    fn get_mut(&mut self, number: TableNumber) -> Result<&mut Table, SimulationError> {
        let count = self.tables.len();
        number
            .checked_sub(1)
            .and_then(|i| self.tables.get_mut(i))
            .ok_or(SimulationError::NoSuchTable { number, count })
    }

    pub fn is_occupied(&self, number: TableNumber) -> Result<bool, SimulationError> {
        self.get(number)
            .map(Table::is_occupied)
            .ok_or(SimulationError::NoSuchTable {
                number,
                count: self.tables.len(),
            })
    }

    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_occupied()).count()
    }

    pub fn free_count(&self) -> usize {
        self.len() - self.occupied_count()
    }

    /// Starts a session at a free table.
    pub fn seat(
        &mut self,
        number: TableNumber,
        client: ClientId,
        start: ClockTime,
    ) -> Result<(), SimulationError> {
        let table = self.get_mut(number)?;
        if let Some(session) = &table.session {
            return Err(SimulationError::TableOccupied {
                number,
                occupant: session.client.to_string(),
            });
        }
        table.session = Some(Session { client, start });
        Ok(())
    }

    /// Ends the session at `number`, accruing its minutes and charge.
    ///
    /// Freeing an empty table settles nothing and returns `None`.
    pub fn free(
        &mut self,
        number: TableNumber,
        end: ClockTime,
    ) -> Result<Option<Settlement>, SimulationError> {
        let rate = self.hourly_rate;
        let table = self.get_mut(number)?;
        let Some(session) = table.session.take() else {
            return Ok(None);
        };
        let Some(minutes) = session.start.minutes_until(end) else {
            let start = session.start;
            table.session = Some(session);
            return Err(SimulationError::SessionEndsBeforeStart { table: number, start, end });
        };
        let charge = session_charge(minutes, rate);
        table.occupied_minutes += minutes;
        table.revenue += charge;
        tracing::debug!(table = number, client = %session.client, minutes, charge, "session settled");
        Ok(Some(Settlement {
            client: session.client,
            minutes,
            charge,
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables.iter().map(Table::summary).collect()
    }
}
