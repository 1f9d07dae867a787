//! Who is inside the club and who is waiting for a table.

use std::collections::{BTreeMap, VecDeque};

use crate::types::{ClientId, TableNumber};

/// Where a client inside the club currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inside but without a table (just arrived, or waiting).
    Unseated,
    AtTable(TableNumber),
}

impl Placement {
    pub const fn table(self) -> Option<TableNumber> {
        match self {
            Self::Unseated => None,
            Self::AtTable(number) => Some(number),
        }
    }
}

/// Clients currently inside the club.
///
/// Membership is the single source of truth for "inside". Iteration is in
/// ascending client order.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: BTreeMap<ClientId, Placement>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.clients.contains_key(client)
    }

    pub fn placement(&self, client: &ClientId) -> Option<Placement> {
        self.clients.get(client).copied()
    }

    /// Registers a newly arrived client as unseated.
    ///
    /// Returns `false` if the client was already inside.
    pub fn admit(&mut self, client: ClientId) -> bool {
        if self.clients.contains_key(&client) {
            return false;
        }
        self.clients.insert(client, Placement::Unseated);
        true
    }

    pub fn place(&mut self, client: ClientId, placement: Placement) {
        self.clients.insert(client, placement);
    }

    /// Removes the client, returning where they were.
    pub fn remove(&mut self, client: &ClientId) -> Option<Placement> {
        self.clients.remove(client)
    }

    /// The lowest client ID still inside.
    pub fn first(&self) -> Option<&ClientId> {
        self.clients.keys().next()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClientId, Placement)> {
        self.clients.iter().map(|(id, p)| (id, *p))
    }
}

/// FIFO line of clients waiting for a table. Each client appears at most once.
#[derive(Debug, Clone, Default)]
pub struct WaitQueue {
    waiting: VecDeque<ClientId>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the client. Returns `false` if they were already waiting.
    pub fn push(&mut self, client: ClientId) -> bool {
        if self.contains(&client) {
            return false;
        }
        self.waiting.push_back(client);
        true
    }

    /// Takes the longest-waiting client.
    pub fn pop(&mut self) -> Option<ClientId> {
        self.waiting.pop_front()
    }

    /// Removes a client from anywhere in the line. Returns whether they were in it.
    pub fn remove(&mut self, client: &ClientId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|c| c != client);
        self.waiting.len() != before
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.waiting.contains(client)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientId> {
        self.waiting.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str) -> ClientId {
        ClientId::new(name).unwrap()
    }

    #[test]
    fn admit_refuses_clients_already_inside() {
        let mut registry = ClientRegistry::new();
        assert!(registry.admit(client("alice")));
        assert!(!registry.admit(client("alice")));
        assert_eq!(registry.placement(&client("alice")), Some(Placement::Unseated));
    }

    #[test]
    fn remove_reports_last_placement() {
        let mut registry = ClientRegistry::new();
        registry.admit(client("alice"));
        registry.place(client("alice"), Placement::AtTable(2));
        assert_eq!(registry.remove(&client("alice")), Some(Placement::AtTable(2)));
        assert_eq!(registry.remove(&client("alice")), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn first_is_lowest_client_id() {
        let mut registry = ClientRegistry::new();
        for name in ["zed", "bob", "mia"] {
            registry.admit(client(name));
        }
        assert_eq!(registry.first(), Some(&client("bob")));
    }

    #[test]
    fn queue_is_fifo_without_duplicates() {
        let mut queue = WaitQueue::new();
        assert!(queue.push(client("a")));
        assert!(queue.push(client("b")));
        assert!(!queue.push(client("a")));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(client("a")));
        assert_eq!(queue.pop(), Some(client("b")));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn queue_supports_removal_from_the_middle() {
        let mut queue = WaitQueue::new();
        for name in ["a", "b", "c"] {
            queue.push(client(name));
        }
        assert!(queue.remove(&client("b")));
        assert!(!queue.remove(&client("b")));
        let order: Vec<_> = queue.iter().map(ClientId::as_str).collect();
        assert_eq!(order, ["a", "c"]);
    }
}
