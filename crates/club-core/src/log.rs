//! The day's event log.

use crate::event::Event;

/// Ordered, growable sequence of events.
///
/// Processing walks the log once and splices derived events in directly
/// after their trigger; closing-time departures go before the first
/// after-hours entry, or at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub const fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Places `event` immediately after position `cursor`.
    pub fn insert_after(&mut self, cursor: usize, event: Event) {
        self.events.insert(cursor + 1, event);
    }

    /// Places `event` at `index`, shifting that entry and everything after it.
    pub fn insert_before(&mut self, index: usize, event: Event) {
        self.events.insert(index, event);
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RuleViolation;

    fn mark(minute: u32) -> Event {
        Event::violation(
            crate::time::ClockTime::from_hm(10, minute).unwrap(),
            RuleViolation::ClientUnknown,
        )
    }

    #[test]
    fn insert_after_places_entry_behind_cursor() {
        let mut log = EventLog::new(vec![mark(0), mark(2)]);
        log.insert_after(0, mark(1));
        log.push(mark(3));
        log.insert_before(0, mark(59));
        let minutes: Vec<_> = log.iter().map(|e| e.time.minutes() % 60).collect();
        assert_eq!(minutes, [59, 0, 1, 2, 3]);

        let mut count = 0;
        for event in &log {
            assert_eq!(event.kind.code(), 13);
            count += 1;
        }
        assert_eq!(count, log.len());
    }
}
