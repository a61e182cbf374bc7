use crate::{
    animation::placement::{GrowStyle, GuideId, PlacementAnim, PlacementPhase},
    animation::scheduler::Scheduler,
    foundation::core::{PillarId, PledgeId, Point, SlotId},
    foundation::error::{CanopyError, CanopyResult},
    foundation::math::dist,
    foundation::rng::SeededRng,
    layout::{chart, cluster, screensaver},
    pledge::entries::{EntryRecord, EntrySink},
    pledge::store::PledgeStore,
    render::frame,
    render::surface::DrawSurface,
    session::config::{ChartStyle, SessionConfig},
    tree::generate::generate,
    tree::model::TreeData,
    tree::slots,
};

/// A click within this distance of a selectable slot starts the guided flow.
const BRANCH_HIT_RADIUS: f64 = 60.0;

/// A click within this distance of an occupied slot counts as a leaf tap.
const LEAF_HIT_RADIUS: f64 = 45.0;

/// Outcome of a placement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The placement animation has been enqueued.
    Started {
        /// The created pledge.
        pledge: PledgeId,
        /// The slot it will occupy once grown.
        slot: SlotId,
    },
    /// No pledge was placed: the global cap is reached or no slot is
    /// eligible under the current active-branch gating. A normal terminal
    /// outcome, surfaced to users as benign status text.
    TreeFull,
}

/// Outcome of a one-pledge-per-pillar wave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PillarWave {
    /// Placements that were enqueued, in pillar order.
    pub placed: Vec<(PledgeId, SlotId)>,
    /// Pillars skipped because no slot was available.
    pub skipped: usize,
}

/// Outcome of an instant bulk placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkReport {
    /// How many placements were asked for.
    pub requested: usize,
    /// How many actually landed before the cap or slot supply stopped it.
    pub placed: usize,
    /// Session total after the batch.
    pub total_placed: usize,
}

/// One running pledge-tree session.
///
/// The explicit context object owning all mutable state: the generated tree,
/// the pledge store, the animation queue and the placement rng. There are no
/// module-level singletons; independent sessions are fully isolated. All
/// mutation happens inside [`Session::advance`] or a discrete session call,
/// so the single-threaded frame loop needs no further synchronization.
pub struct Session {
    config: SessionConfig,
    tree: TreeData,
    pledges: PledgeStore,
    scheduler: Scheduler,
    rng: SeededRng,
    entry_sink: Option<Box<dyn EntrySink>>,
    total_placed: usize,
    people_count: usize,
    local_entries: usize,
    hidden: Vec<(SlotId, PledgeId)>,
    /// Timestamp of the most recent `advance`; anchors enqueue times.
    clock: f64,
}

impl Session {
    /// Validate the config and generate the tree.
    pub fn new(config: SessionConfig) -> CanopyResult<Self> {
        config.validate()?;
        let tree = generate(config.seed);
        // Placement selection owns its own stream, offset from the tree seed
        // so reproducibility survives tree-generation changes.
        let rng = SeededRng::new(config.seed.wrapping_add(101));
        Ok(Self {
            scheduler: Scheduler::new(config.rates),
            tree,
            pledges: PledgeStore::new(),
            rng,
            entry_sink: None,
            total_placed: 0,
            people_count: 0,
            local_entries: 0,
            hidden: Vec::new(),
            clock: 0.0,
            config,
        })
    }

    /// Attach the persistence collaborator for participation entries.
    pub fn set_entry_sink(&mut self, sink: Box<dyn EntrySink>) {
        self.entry_sink = Some(sink);
    }

    /// Per-frame entry point; the host's render loop must call this exactly
    /// once per frame with a monotonically increasing timestamp in seconds.
    ///
    /// Advances the blend scalars, draws the static scene, then advances and
    /// draws every queued animation in order. Completions are processed
    /// within this same frame.
    pub fn advance(&mut self, now: f64, surface: &mut dyn DrawSurface) {
        self.clock = now;
        self.scheduler.advance_blends(&mut self.tree);
        frame::draw_frame(&mut self.tree, &self.pledges, &self.config.pillars, now, surface);
        self.scheduler
            .advance_placements(now, &mut self.tree, &mut self.pledges, surface);
    }

    /// Place one pledge with the stroke-then-grow animation.
    ///
    /// With a position `hint` the nearest selectable slot is used; otherwise
    /// a seeded-random one. Reserves the slot immediately, so rapid
    /// concurrent requests can never claim the same slot.
    pub fn place_pledge(
        &mut self,
        name: &str,
        pillar: PillarId,
        message: &str,
        hint: Option<Point>,
    ) -> CanopyResult<Placement> {
        self.check_pillar(pillar)?;
        if self.total_placed >= self.config.max_pledges {
            return Ok(Placement::TreeFull);
        }

        let slot = match hint {
            Some(p) => slots::find_nearest_slot(&self.tree, p),
            None => slots::find_available_slot(&self.tree, &mut self.rng),
        };
        let Some(slot) = slot else {
            return Ok(Placement::TreeFull);
        };

        let pledge = self.pledges.create(name, pillar, message, self.clock);
        self.enqueue_placement(pledge, slot, self.clock, self.config.durations.stroke);
        self.total_placed += 1;
        self.people_count += 1;
        self.check_growth();
        Ok(Placement::Started { pledge, slot })
    }

    /// Place one pledge per pillar for a single person, with staggered
    /// stroke starts. Stops early (partial wave) when slots run out.
    pub fn place_for_all_pillars(&mut self, name: &str) -> CanopyResult<PillarWave> {
        let mut placed = Vec::new();
        for i in 0..self.config.pillars.len() {
            if self.total_placed >= self.config.max_pledges {
                break;
            }
            let Some(slot) = slots::find_available_slot(&self.tree, &mut self.rng) else {
                break;
            };
            let pledge = self.pledges.create(name, PillarId(i), "", self.clock);
            let start_at = self.clock + i as f64 * self.config.durations.pillar_stagger;
            self.enqueue_placement(pledge, slot, start_at, self.config.durations.stroke);
            self.total_placed += 1;
            placed.push((pledge, slot));
        }
        if !placed.is_empty() {
            self.people_count += 1;
            self.check_growth();
        }
        Ok(PillarWave {
            skipped: self.config.pillars.len() - placed.len(),
            placed,
        })
    }

    /// Place `count` synthetic pledges instantly, bypassing the animation
    /// queue. Bounded by the global cap; growth is re-checked per iteration
    /// so branches unlocked mid-batch fill within the same batch.
    pub fn place_bulk(&mut self, count: usize) -> CanopyResult<BulkReport> {
        let mut placed = 0;
        for _ in 0..count {
            if self.total_placed >= self.config.max_pledges {
                break;
            }
            self.check_growth();
            let Some(slot_id) = slots::find_available_slot(&self.tree, &mut self.rng) else {
                break;
            };
            let pledge =
                self.pledges
                    .create_sample(&mut self.rng, self.config.pillars.len(), self.clock);
            let rotation = self.rng.range(-0.7, 0.7);
            let slot = self.tree.slot_mut(slot_id);
            slot.occupied = true;
            slot.reserved = true;
            slot.leaf = Some(pledge);
            slot.rotation = rotation;
            self.pledges.get_mut(pledge).slot = Some(slot_id);
            self.total_placed += 1;
            placed += 1;
        }
        self.people_count += placed;
        self.check_growth();
        tracing::debug!(requested = count, placed, "bulk placement");
        Ok(BulkReport {
            requested: count,
            placed,
            total_placed: self.total_placed,
        })
    }

    /// Begin the guided flow: reserve the selectable slot nearest to `p`
    /// (within the hit radius) and trace a guide stroke toward it.
    ///
    /// `Ok(None)` when the cap is reached or no slot is close enough. The
    /// returned guide must be resolved with [`Session::confirm_guided`] or
    /// [`Session::cancel_guided`]; an abandoned guide leaks its reservation.
    pub fn begin_guided(&mut self, p: Point) -> CanopyResult<Option<GuideId>> {
        if self.total_placed >= self.config.max_pledges {
            return Ok(None);
        }
        let Some(slot) = slots::find_nearest_slot(&self.tree, p) else {
            return Ok(None);
        };
        if dist(p, self.tree.slot(slot).pos) >= BRANCH_HIT_RADIUS {
            return Ok(None);
        }
        self.tree.slot_mut(slot).reserved = true;
        let id = self
            .scheduler
            .begin_guide(slot, self.clock, self.config.durations.guided_stroke);
        Ok(Some(id))
    }

    /// Has the guide stroke finished tracing?
    pub fn guide_ready(&self, id: GuideId) -> bool {
        self.scheduler.guide(id).is_some_and(|g| g.done)
    }

    /// Confirm a guided placement: grow a leaf on the already-traced slot.
    pub fn confirm_guided(
        &mut self,
        id: GuideId,
        name: &str,
        pillar: PillarId,
        message: &str,
    ) -> CanopyResult<Placement> {
        self.check_pillar(pillar)?;
        let guide = self
            .scheduler
            .take_guide(id)
            .ok_or_else(|| CanopyError::placement("unknown or already-resolved guide"))?;
        if self.total_placed >= self.config.max_pledges {
            self.tree.slot_mut(guide.slot).reserved = false;
            return Ok(Placement::TreeFull);
        }
        let pledge = self.pledges.create(name, pillar, message, self.clock);
        // Slot is already reserved and traced; go straight to grow.
        self.enqueue_placement(pledge, guide.slot, self.clock, 0.0);
        self.total_placed += 1;
        self.people_count += 1;
        self.check_growth();
        Ok(Placement::Started {
            pledge,
            slot: guide.slot,
        })
    }

    /// Abandon a guided placement, releasing the slot reservation.
    ///
    /// Every caller path that opens a guide must end in confirm or cancel;
    /// the engine has no reservation timeout.
    pub fn cancel_guided(&mut self, id: GuideId) -> CanopyResult<()> {
        let guide = self
            .scheduler
            .take_guide(id)
            .ok_or_else(|| CanopyError::placement("unknown or already-resolved guide"))?;
        self.tree.slot_mut(guide.slot).reserved = false;
        Ok(())
    }

    /// Compute the configured chart layout and start blending toward it.
    pub fn enter_chart_mode(&mut self) {
        match self.config.chart_style {
            ChartStyle::Radial => {
                chart::compute_chart_layout(&mut self.tree, &self.pledges, self.config.pillars.len());
            }
            ChartStyle::Cluster => {
                cluster::compute_cluster_layout(
                    &mut self.tree,
                    &self.pledges,
                    self.config.pillars.len(),
                );
            }
        }
        self.tree.chart_mode = true;
    }

    /// Start blending back from the chart to the tree.
    pub fn exit_chart_mode(&mut self) {
        self.tree.chart_mode = false;
    }

    /// Compute the screensaver disc and start blending toward it.
    pub fn enter_screensaver(&mut self) {
        if self.tree.chart_mode {
            self.exit_chart_mode();
        }
        screensaver::compute_screensaver_layout(
            &mut self.tree,
            &self.pledges,
            self.config.pillars.len(),
            self.clock,
        );
        self.tree.screensaver_mode = true;
    }

    /// Start blending back from the screensaver to the tree.
    pub fn exit_screensaver(&mut self) {
        self.tree.screensaver_mode = false;
    }

    /// Toggle the ambient wind target; strength blends toward it per frame.
    pub fn set_wind(&mut self, active: bool) {
        self.tree.wind_active = active;
    }

    /// Any placement or guide still mid-flight? Hosts defer conflicting
    /// input while this is true.
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating()
    }

    /// The occupied slot nearest to `p` within the tap radius.
    pub fn hit_test_leaf(&self, p: Point) -> Option<SlotId> {
        self.tree
            .slots
            .iter()
            .filter(|s| s.occupied && dist(p, s.pos) < LEAF_HIT_RADIUS)
            .min_by(|a, b| dist(p, a.pos).total_cmp(&dist(p, b.pos)))
            .map(|s| s.id)
    }

    /// Start a transient tap wobble on a leaf.
    pub fn flutter_leaf(&mut self, slot: SlotId, now: f64) {
        if slot.0 < self.tree.slots.len() {
            self.tree.slot_mut(slot).flutter_start = Some(now);
        }
    }

    /// Record a participation entry through the sink.
    ///
    /// Sink failures degrade to the locally tracked count and never block or
    /// fail the visual placement flow.
    pub fn record_entry(&mut self, name: &str, email: &str, now: f64) {
        self.local_entries += 1;
        if let Some(sink) = self.entry_sink.as_mut() {
            let record = EntryRecord {
                name: name.to_string(),
                email: email.to_string(),
                timestamp: now,
            };
            if let Err(err) = sink.append(&record) {
                tracing::warn!(error = %err, "entry sink append failed, keeping local count");
            }
        }
    }

    /// Durable entry count, falling back to the local count when the sink is
    /// absent or failing.
    pub fn entry_count(&self) -> usize {
        match self.entry_sink.as_ref().map(|s| s.count()) {
            Some(Ok(n)) => n,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "entry sink count failed, using local count");
                self.local_entries
            }
            None => self.local_entries,
        }
    }

    /// Temporarily hide all placed leaves while keeping their reservations,
    /// so a screensaver-to-pledge flow starts from a bare tree without any
    /// slot being stolen.
    pub fn hide_placed_leaves(&mut self) {
        self.hidden.clear();
        for slot in &mut self.tree.slots {
            if slot.occupied
                && let Some(pledge) = slot.leaf
            {
                self.hidden.push((slot.id, pledge));
                slot.occupied = false;
                slot.reserved = true;
            }
        }
    }

    /// Undo [`Session::hide_placed_leaves`] without animation.
    pub fn restore_hidden_leaves(&mut self) {
        for &(slot, _) in &self.hidden {
            self.tree.slots[slot.0].occupied = true;
        }
        self.hidden.clear();
    }

    /// Regrow all hidden leaves in a staggered bouncy wave, unlocking at
    /// least three main branches so the reveal reads as a full tree.
    pub fn reveal_hidden_leaves(&mut self, now: f64) {
        if self.hidden.is_empty() {
            return;
        }
        self.tree.active_branches = self.tree.active_branches.max(3).min(5);
        let stagger = (3.0 / self.hidden.len() as f64).clamp(0.010, 0.060);
        let hidden = std::mem::take(&mut self.hidden);
        for (i, (slot, pledge)) in hidden.into_iter().enumerate() {
            let pillar = self.pledges.get(pledge).pillar;
            let color = self
                .config
                .pillars
                .get(pillar.0)
                .map(|p| p.color)
                .unwrap_or(crate::foundation::core::Rgb8::WHITE);
            self.scheduler.enqueue(PlacementAnim {
                pledge,
                slot,
                phase: PlacementPhase::Pending,
                start_at: now + i as f64 * stagger,
                stroke_secs: 0.0,
                grow_secs: self.config.durations.bouncy_grow,
                grow_style: GrowStyle::Bouncy,
                grow_rotation: self.rng.range(-0.6, 0.6),
                color,
            });
        }
    }

    /// Session total of placed pledges, animated and bulk.
    pub fn total_placed(&self) -> usize {
        self.total_placed
    }

    /// People who have pledged (a pillar wave counts once).
    pub fn people_count(&self) -> usize {
        self.people_count
    }

    /// Currently occupied slots.
    pub fn occupied_count(&self) -> usize {
        slots::occupied_count(&self.tree)
    }

    /// Read access to the tree and its session-wide visual state.
    pub fn tree(&self) -> &TreeData {
        &self.tree
    }

    /// Read access to the pledge store.
    pub fn pledges(&self) -> &PledgeStore {
        &self.pledges
    }

    /// The validated session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn check_pillar(&self, pillar: PillarId) -> CanopyResult<()> {
        if pillar.0 >= self.config.pillars.len() {
            return Err(CanopyError::validation(format!(
                "pillar index {} out of range ({} pillars)",
                pillar.0,
                self.config.pillars.len()
            )));
        }
        Ok(())
    }

    fn enqueue_placement(&mut self, pledge: PledgeId, slot: SlotId, start_at: f64, stroke_secs: f64) {
        // Reserve at enqueue time, before any stagger delay elapses.
        self.tree.slot_mut(slot).reserved = true;
        let pillar = self.pledges.get(pledge).pillar;
        let color = self
            .config
            .pillars
            .get(pillar.0)
            .map(|p| p.color)
            .unwrap_or(crate::foundation::core::Rgb8::WHITE);
        self.scheduler.enqueue(PlacementAnim {
            pledge,
            slot,
            phase: PlacementPhase::Pending,
            start_at,
            stroke_secs,
            grow_secs: self.config.durations.grow,
            grow_style: GrowStyle::Settle,
            grow_rotation: self.rng.range(-0.6, 0.6),
            color,
        });
    }

    fn check_growth(&mut self) {
        let unlocked = slots::active_branches_for(self.total_placed);
        if unlocked > self.tree.active_branches {
            self.tree.active_branches = unlocked;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/runtime.rs"]
mod tests;
