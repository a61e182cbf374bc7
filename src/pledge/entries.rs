/// One durably recorded participation entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryRecord {
    /// Participant display name.
    pub name: String,
    /// Participant contact address; may be empty.
    pub email: String,
    /// Seconds since session start.
    pub timestamp: f64,
}

/// Persistence seam for participation entries.
///
/// Both operations may fail independently of tree state; the session degrades
/// to a locally tracked count and never lets a failure block the visual
/// placement flow.
pub trait EntrySink {
    /// Durably append one record.
    fn append(&mut self, record: &EntryRecord) -> anyhow::Result<()>;

    /// Current durable entry count.
    fn count(&self) -> anyhow::Result<usize>;
}

/// In-memory sink, used by tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryEntrySink {
    records: Vec<EntryRecord>,
}

impl MemoryEntrySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All appended records, in order.
    pub fn records(&self) -> &[EntryRecord] {
        &self.records
    }
}

impl EntrySink for MemoryEntrySink {
    fn append(&mut self, record: &EntryRecord) -> anyhow::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn count(&self) -> anyhow::Result<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pledge/entries.rs"]
mod tests;
