//! The club's event-processing state machine.
//!
//! # Walk
//!
//! The log is walked once, front to back. Each entry is dispatched on its
//! kind; a handler may answer with at most one derived event, which is
//! spliced in right after the trigger and skipped by the cursor (its state
//! change has already been applied by the handler that produced it).
//!
//! When the walk reaches the first entry past closing time, or the end of
//! the log, everyone still inside is forced out at closing time. Forced
//! departures never pull the next client from the wait queue.

use serde::Serialize;

use crate::clients::{ClientRegistry, Placement, WaitQueue};
use crate::error::SimulationError;
use crate::event::{Event, EventKind, RuleViolation};
use crate::log::EventLog;
use crate::tables::{TableRegistry, TableSummary};
use crate::time::ClockTime;
use crate::types::{ClientId, TableNumber};

/// Fixed parameters of the operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubSettings {
    pub tables: usize,
    pub opening: ClockTime,
    pub closing: ClockTime,
    pub hourly_rate: u32,
}

impl ClubSettings {
    pub fn is_open_at(&self, time: ClockTime) -> bool {
        self.opening <= time && time <= self.closing
    }
}

/// Everything the handlers mutate, owned in one place.
#[derive(Debug, Clone)]
pub struct ClubState {
    pub tables: TableRegistry,
    pub clients: ClientRegistry,
    pub queue: WaitQueue,
}

impl ClubState {
    pub fn new(settings: &ClubSettings) -> Self {
        Self {
            tables: TableRegistry::new(settings.tables, settings.hourly_rate),
            clients: ClientRegistry::new(),
            queue: WaitQueue::new(),
        }
    }

    pub fn free_tables(&self) -> usize {
        self.tables.free_count()
    }

    /// Describes the first broken consistency rule between the registries.
    pub fn invariant_violation(&self) -> Option<String> {
        for table in self.tables.iter() {
            if let Some(client) = table.occupant() {
                let placement = self.clients.placement(client);
                if placement != Some(Placement::AtTable(table.number())) {
                    return Some(format!(
                        "table {} is held by {client}, who is registered as {placement:?}",
                        table.number()
                    ));
                }
            }
        }
        for (client, placement) in self.clients.iter() {
            if let Placement::AtTable(number) = placement {
                let occupant = self.tables.get(number).and_then(|t| t.occupant());
                if occupant != Some(client) {
                    return Some(format!("{client} is registered at table {number}, held by {occupant:?}"));
                }
            }
        }
        if self.queue.len() > self.tables.len() {
            return Some(format!("{} clients waiting for {} tables", self.queue.len(), self.tables.len()));
        }
        for client in self.queue.iter() {
            let placement = self.clients.placement(client);
            if placement != Some(Placement::Unseated) {
                return Some(format!("{client} is waiting but registered as {placement:?}"));
            }
        }
        None
    }
}

type Reaction = Result<Option<EventKind>, SimulationError>;

fn reject(message: RuleViolation) -> Reaction {
    Ok(Some(EventKind::RuleViolation { message }))
}

fn client_arrived(
    state: &mut ClubState,
    settings: &ClubSettings,
    time: ClockTime,
    client: &ClientId,
) -> Reaction {
    if state.clients.contains(client) {
        return reject(RuleViolation::YouShallNotPass);
    }
    if !settings.is_open_at(time) {
        return reject(RuleViolation::NotOpenYet);
    }
    state.clients.admit(client.clone());
    Ok(None)
}

fn client_sat(state: &mut ClubState, time: ClockTime, client: &ClientId, table: TableNumber) -> Reaction {
    // Unknown is checked first: a stranger must never learn a table is taken.
    let Some(placement) = state.clients.placement(client) else {
        return reject(RuleViolation::ClientUnknown);
    };
    if state.tables.is_occupied(table)? {
        return reject(RuleViolation::PlaceIsBusy);
    }
    if let Some(current) = placement.table() {
        state.tables.free(current, time)?;
    }
    state.queue.remove(client);
    seat(state, time, client, table)?;
    Ok(None)
}

fn client_waits(state: &mut ClubState, time: ClockTime, client: &ClientId) -> Reaction {
    if state.free_tables() > 0 {
        return reject(RuleViolation::ICanWaitNoLonger);
    }
    // Only clients inside the club may join the queue.
    let Some(placement) = state.clients.placement(client) else {
        return reject(RuleViolation::ClientUnknown);
    };
    if placement != Placement::Unseated || state.queue.contains(client) {
        tracing::debug!(%client, ?placement, "ignoring wait request from client already seated or queued");
        return Ok(None);
    }
    if state.queue.len() >= state.tables.len() {
        client_forced_to_leave(state, time, client)?;
        return Ok(Some(EventKind::ClientForcedToLeave {
            client: client.clone(),
        }));
    }
    state.queue.push(client.clone());
    Ok(None)
}

fn client_left(state: &mut ClubState, time: ClockTime, client: &ClientId) -> Reaction {
    let Some(placement) = state.clients.placement(client) else {
        return reject(RuleViolation::ClientUnknown);
    };
    let freed = placement.table();
    if let Some(table) = freed {
        state.tables.free(table, time)?;
    }
    state.clients.remove(client);
    state.queue.remove(client);

    let Some(table) = freed else {
        return Ok(None);
    };
    let Some(next) = state.queue.pop() else {
        return Ok(None);
    };
    client_auto_seated(state, time, &next, table)?;
    Ok(Some(EventKind::ClientAutoSeated { client: next, table }))
}

/// Seats a client whose preconditions the caller has already established.
fn client_auto_seated(
    state: &mut ClubState,
    time: ClockTime,
    client: &ClientId,
    table: TableNumber,
) -> Result<(), SimulationError> {
    state.queue.remove(client);
    seat(state, time, client, table)
}

/// Removes a client without reseating anyone from the queue.
fn client_forced_to_leave(
    state: &mut ClubState,
    time: ClockTime,
    client: &ClientId,
) -> Result<(), SimulationError> {
    if let Some(table) = state.clients.placement(client).and_then(Placement::table) {
        state.tables.free(table, time)?;
    }
    state.clients.remove(client);
    state.queue.remove(client);
    Ok(())
}

fn seat(
    state: &mut ClubState,
    time: ClockTime,
    client: &ClientId,
    table: TableNumber,
) -> Result<(), SimulationError> {
    state.tables.seat(table, client.clone(), time)?;
    state.clients.place(client.clone(), Placement::AtTable(table));
    Ok(())
}

fn dispatch(state: &mut ClubState, settings: &ClubSettings, event: &Event) -> Reaction {
    let time = event.time;
    match &event.kind {
        EventKind::ClientArrived { client } => client_arrived(state, settings, time, client),
        EventKind::ClientSat { client, table } => client_sat(state, time, client, *table),
        EventKind::ClientWaits { client } => client_waits(state, time, client),
        EventKind::ClientLeft { client } => client_left(state, time, client),
        EventKind::ClientForcedToLeave { client } => {
            client_forced_to_leave(state, time, client)?;
            Ok(None)
        }
        EventKind::ClientAutoSeated { client, table } => {
            client_auto_seated(state, time, client, *table)?;
            Ok(None)
        }
        EventKind::RuleViolation { .. } => Ok(None),
    }
}

/// Runs the club's rules over an event log.
#[derive(Debug, Clone)]
pub struct EventProcessor {
    settings: ClubSettings,
    state: ClubState,
}

impl EventProcessor {
    pub fn new(settings: ClubSettings) -> Self {
        Self {
            state: ClubState::new(&settings),
            settings,
        }
    }

    pub const fn settings(&self) -> &ClubSettings {
        &self.settings
    }

    pub const fn state(&self) -> &ClubState {
        &self.state
    }

    /// Applies one event and returns the derived event it produced, if any.
    pub fn handle(&mut self, event: &Event) -> Result<Option<Event>, SimulationError> {
        tracing::debug!(time = %event.time, code = event.kind.code(), "processing event");
        let derived = dispatch(&mut self.state, &self.settings, event)?;
        debug_assert_eq!(self.state.invariant_violation(), None);
        Ok(derived.map(|kind| {
            tracing::debug!(time = %event.time, code = kind.code(), "derived event");
            Event::new(event.time, kind)
        }))
    }

    /// Walks the whole log, splicing in derived events and closing the day.
    pub fn process(&mut self, log: &mut EventLog) -> Result<(), SimulationError> {
        let mut cursor = 0;
        let mut closed = false;
        while let Some(event) = log.get(cursor) {
            if !closed && event.time > self.settings.closing {
                cursor += self.close_day(log, Some(cursor))?;
                closed = true;
                continue;
            }
            let derived = self.handle(event)?;
            if let Some(derived) = derived {
                log.insert_after(cursor, derived);
                cursor += 1;
            }
            cursor += 1;
        }
        // Nobody can get in after hours, so this only acts if the log ended
        // before closing time.
        self.close_day(log, None)?;
        Ok(())
    }

    /// Forces every client still inside out at closing time, in ascending
    /// client order.
    ///
    /// Departures are inserted before `boundary` (the first after-hours entry)
    /// or appended when `None`. Returns how many were recorded; calling it
    /// again on an empty club records nothing.
    pub fn close_day(
        &mut self,
        log: &mut EventLog,
        boundary: Option<usize>,
    ) -> Result<usize, SimulationError> {
        let closing = self.settings.closing;
        let mut forced = 0;
        while let Some(client) = self.state.clients.first().cloned() {
            client_forced_to_leave(&mut self.state, closing, &client)?;
            let event = Event::new(closing, EventKind::ClientForcedToLeave { client });
            match boundary {
                Some(index) => log.insert_before(index + forced, event),
                None => log.push(event),
            }
            forced += 1;
        }
        if forced > 0 {
            tracing::info!(forced, closing = %closing, "club closed");
        }
        Ok(forced)
    }

    pub fn table_summaries(&self) -> Vec<TableSummary> {
        self.state.tables.summaries()
    }
}

/// Final log and per-table figures for one operating day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub opening: ClockTime,
    pub closing: ClockTime,
    pub events: Vec<Event>,
    pub tables: Vec<TableSummary>,
}

/// Runs a full day from the parsed input events.
pub fn simulate_day(settings: ClubSettings, events: Vec<Event>) -> Result<DayReport, SimulationError> {
    let mut processor = EventProcessor::new(settings);
    let mut log = EventLog::new(events);
    processor.process(&mut log)?;
    Ok(DayReport {
        opening: settings.opening,
        closing: settings.closing,
        events: log.into_vec(),
        tables: processor.table_summaries(),
    })
}
