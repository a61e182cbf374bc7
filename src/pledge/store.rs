use crate::{
    foundation::core::{PillarId, PledgeId, SlotId},
    foundation::rng::SeededRng,
    pledge::model::Pledge,
};

/// Name pool for synthetic pledges.
const SAMPLE_NAMES: [&str; 30] = [
    "Alex R.", "Maria S.", "James T.", "Priya K.", "Carlos M.", "Sarah L.", "David W.", "Emma C.",
    "Michael B.", "Lisa H.", "Jordan P.", "Ana G.", "Chris F.", "Nina D.", "Tom V.", "Rachel Q.",
    "Kevin Z.", "Olivia N.", "Sam Y.", "Laura X.", "Diego A.", "Sophie E.", "Ryan I.", "Maya O.",
    "Jake U.", "Zoe R.", "Ethan J.", "Chloe W.", "Noah M.", "Ava B.",
];

/// Message pool for synthetic pledges; empty entries keep some leaves silent.
const SAMPLE_MESSAGES: [&str; 13] = [
    "Hoping for a cleaner future!",
    "Reducing my carbon footprint",
    "Committed to zero waste",
    "Conserving water daily",
    "Protecting local wildlife",
    "For the next generation",
    "Small steps, big change",
    "Every drop counts",
    "Think green, live green",
    "",
    "",
    "",
    "",
];

/// Owning list of all pledges created during a session.
///
/// Pledges are never deleted; ids are indices into the list.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PledgeStore {
    pledges: Vec<Pledge>,
}

impl PledgeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a pledge, returning its id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        pillar: PillarId,
        message: impl Into<String>,
        created_at: f64,
    ) -> PledgeId {
        let id = PledgeId(self.pledges.len());
        self.pledges.push(Pledge {
            id,
            name: name.into(),
            pillar,
            message: message.into(),
            created_at,
            slot: None,
        });
        id
    }

    /// Create a synthetic pledge from the sample pools.
    pub fn create_sample(&mut self, rng: &mut SeededRng, pillars: usize, now: f64) -> PledgeId {
        let pillar = PillarId(rng.index(pillars).unwrap_or(0));
        let name = rng.pick(&SAMPLE_NAMES).copied().unwrap_or("Guest");
        let message = rng.pick(&SAMPLE_MESSAGES).copied().unwrap_or("");
        self.create(name, pillar, message, now)
    }

    /// Pledge lookup by id.
    pub fn get(&self, id: PledgeId) -> &Pledge {
        &self.pledges[id.0]
    }

    /// Mutable pledge lookup by id.
    pub fn get_mut(&mut self, id: PledgeId) -> &mut Pledge {
        &mut self.pledges[id.0]
    }

    /// The pledge currently back-linked to `slot`, if any.
    pub fn by_slot(&self, slot: SlotId) -> Option<&Pledge> {
        self.pledges.iter().find(|p| p.slot == Some(slot))
    }

    /// Number of pledges ever created.
    pub fn count(&self) -> usize {
        self.pledges.len()
    }

    /// All pledges in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Pledge> {
        self.pledges.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pledge/store.rs"]
mod tests;
