use serde::{Deserialize, Serialize};

/// One listed event. Field order is the snapshot's field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub date: String,
    pub location: String,
}

impl EventRecord {
    /// Records without a name never reach a snapshot.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Snapshot envelope: `{ "scraped_at": ..., "events": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub scraped_at: String,
    pub events: Vec<EventRecord>,
}

/// A [`ScrapeResult`] plus how many event containers the page held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    pub container_count: usize,
    pub result: ScrapeResult,
}

impl ScrapeReport {
    /// No containers at all, as opposed to containers that all lacked a name.
    pub fn found_no_containers(&self) -> bool {
        self.container_count == 0
    }
}
