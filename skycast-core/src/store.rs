use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use crate::model::WeatherSnapshot;

/// Order stamp for one fetch. Tickets issued later always outrank earlier
/// ones, whatever order their responses arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Holds the most recent successfully fetched snapshot.
///
/// Every fetch reserves a ticket before it starts; a finished fetch may
/// store its result only while nothing from a later ticket has landed, so a
/// slow response can never clobber a newer one.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    next_ticket: AtomicU64,
    latest: Mutex<Option<(u64, WeatherSnapshot)>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a fetch that is about to start.
    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Store a result unless a later request already landed. Returns `false`
    /// when the result was stale and discarded.
    pub fn store(&self, ticket: RequestTicket, snapshot: WeatherSnapshot) -> bool {
        let mut slot = self.lock();

        let stale = matches!(slot.as_ref(), Some((stored, _)) if *stored > ticket.0);
        if stale {
            return false;
        }

        *slot = Some((ticket.0, snapshot));
        true
    }

    /// Most recently stored snapshot, if any.
    pub fn latest(&self) -> Option<WeatherSnapshot> {
        self.lock().as_ref().map(|(_, snapshot)| snapshot.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, WeatherSnapshot)>> {
        // The stored snapshot stays valid even if a writer panicked.
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::sample();
        snapshot.location.name = name.to_owned();
        snapshot
    }

    #[test]
    fn starts_empty_and_stores_in_order() {
        let store = SnapshotStore::new();
        assert!(store.latest().is_none());

        let first = store.begin_request();
        let second = store.begin_request();
        assert!(first < second);

        assert!(store.store(first, named("Kigali")));
        assert!(store.store(second, named("London")));

        let latest = store.latest().expect("snapshot was stored");
        assert_eq!(latest.location.name, "London");
    }

    #[test]
    fn stale_result_is_discarded() {
        let store = SnapshotStore::new();

        let slow = store.begin_request();
        let fast = store.begin_request();

        assert!(store.store(fast, named("London")));
        assert!(!store.store(slow, named("Kigali")));

        let latest = store.latest().expect("snapshot was stored");
        assert_eq!(latest.location.name, "London");
    }

    #[test]
    fn same_ticket_may_overwrite_itself() {
        let store = SnapshotStore::new();

        let ticket = store.begin_request();
        assert!(store.store(ticket, named("Kigali")));
        assert!(store.store(ticket, named("Kigali again")));

        let latest = store.latest().expect("snapshot was stored");
        assert_eq!(latest.location.name, "Kigali again");
    }
}
