//! Core domain logic for the computer club simulator.
//!
//! This crate contains:
//! - Time handling: `HH:MM` times of day and billing durations
//! - Registries: tables, clients inside the club, and the wait queue
//! - The event processor: the rules that turn a day's input log into the
//!   final log plus per-table revenue and occupancy
//! - Input parsing: validation of the day's input file

pub mod clients;
mod error;
pub mod event;
pub mod input;
pub mod log;
pub mod processor;
pub mod tables;
pub mod time;
mod types;

pub use clients::{ClientRegistry, Placement, WaitQueue};
pub use error::{InputError, LineError, SimulationError};
pub use event::{Event, EventKind, RuleViolation};
pub use input::{ClubInput, parse_input};
pub use log::EventLog;
pub use processor::{ClubSettings, ClubState, DayReport, EventProcessor, simulate_day};
pub use tables::{Table, TableRegistry, TableSummary};
pub use time::{ClockTime, format_hm};
pub use types::{ClientId, TableNumber, ValidationError};
