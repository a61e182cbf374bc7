use crate::{
    animation::ease::Ease,
    animation::placement::{GuideAnim, GuideId, PlacementAnim, PlacementPhase},
    animation::sway,
    foundation::core::{Rgb8, SlotId},
    pledge::store::PledgeStore,
    render::frame,
    render::surface::{DrawSurface, LeafStyle},
    tree::model::TreeData,
};

/// Guide strokes are drawn in this fixed color rather than a pillar color.
pub const GUIDE_COLOR: Rgb8 = Rgb8::new(0xFF, 0xD5, 0x4F);

/// Per-frame fixed increments for the continuous transition scalars.
///
/// The screensaver rates are asymmetric: a slow whisk in, a faster fade out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionRates {
    /// Chart blend increment.
    pub chart: f64,
    /// Wind strength increment.
    pub wind: f64,
    /// Screensaver blend increment while entering.
    pub screensaver_in: f64,
    /// Screensaver blend increment while leaving.
    pub screensaver_out: f64,
}

impl Default for TransitionRates {
    fn default() -> Self {
        Self {
            chart: 0.025,
            wind: 0.015,
            screensaver_in: 0.004,
            screensaver_out: 0.012,
        }
    }
}

fn step_toward(value: f64, target: f64, rate: f64) -> f64 {
    if value < target {
        (value + rate).min(target)
    } else if value > target {
        (value - rate).max(target)
    } else {
        value
    }
}

/// Frame-driven animation queue.
///
/// Single-threaded and cooperative: the host calls the session's `advance`
/// once per rendered frame, which advances the blend scalars, draws the
/// static scene, then advances and draws every queued animation in order.
/// Completions run synchronously within the same frame.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<PlacementAnim>,
    guides: Vec<GuideAnim>,
    next_guide: u64,
    rates: TransitionRates,
}

impl Scheduler {
    /// Build an empty queue with the given blend rates.
    pub fn new(rates: TransitionRates) -> Self {
        Self {
            queue: Vec::new(),
            guides: Vec::new(),
            next_guide: 0,
            rates,
        }
    }

    /// Any placement or guide still in flight?
    pub fn is_animating(&self) -> bool {
        !self.queue.is_empty() || self.guides.iter().any(|g| !g.done)
    }

    /// Placements still queued or mid-animation.
    pub fn queued_placements(&self) -> usize {
        self.queue.len()
    }

    /// Add a placement to the queue. The target slot must already be reserved
    /// by the caller.
    pub fn enqueue(&mut self, anim: PlacementAnim) {
        self.queue.push(anim);
    }

    /// Start a guide stroke toward an already-reserved slot.
    pub fn begin_guide(&mut self, slot: SlotId, now: f64, duration_secs: f64) -> GuideId {
        let id = GuideId(self.next_guide);
        self.next_guide += 1;
        self.guides.push(GuideAnim {
            id,
            slot,
            started: now,
            duration_secs,
            done: false,
        });
        id
    }

    /// Look up an in-flight guide.
    pub fn guide(&self, id: GuideId) -> Option<&GuideAnim> {
        self.guides.iter().find(|g| g.id == id)
    }

    /// Remove and return a guide; the caller decides what happens to the
    /// slot reservation.
    pub fn take_guide(&mut self, id: GuideId) -> Option<GuideAnim> {
        let idx = self.guides.iter().position(|g| g.id == id)?;
        Some(self.guides.remove(idx))
    }

    /// Advance the continuous transition scalars by one frame.
    pub fn advance_blends(&self, tree: &mut TreeData) {
        let chart_target = if tree.chart_mode { 1.0 } else { 0.0 };
        tree.chart_blend = step_toward(tree.chart_blend, chart_target, self.rates.chart);

        let wind_target = if tree.wind_active { 1.0 } else { 0.0 };
        tree.wind_strength = step_toward(tree.wind_strength, wind_target, self.rates.wind);

        let ss_target = if tree.screensaver_mode { 1.0 } else { 0.0 };
        let ss_rate = if tree.screensaver_blend < ss_target {
            self.rates.screensaver_in
        } else {
            self.rates.screensaver_out
        };
        tree.screensaver_blend = step_toward(tree.screensaver_blend, ss_target, ss_rate);
    }

    /// Advance and draw every queued animation for this frame.
    ///
    /// Completions mutate slot occupancy synchronously: a finished grow marks
    /// its slot occupied, attaches the pledge, stores the resting rotation
    /// and back-links the slot id, which is the only moment occupancy becomes
    /// visible to static rendering.
    pub fn advance_placements(
        &mut self,
        now: f64,
        tree: &mut TreeData,
        pledges: &mut PledgeStore,
        surface: &mut dyn DrawSurface,
    ) {
        for guide in &mut self.guides {
            if guide.done {
                continue;
            }
            let t = ((now - guide.started) / guide.duration_secs).clamp(0.0, 1.0);
            let progress = Ease::OutCubic.apply(t);
            let path = tree.slot(guide.slot).branch_path.clone();
            frame::draw_stroke(tree, &path, GUIDE_COLOR, progress, now, 1.0, surface);
            if t >= 1.0 {
                guide.done = true;
            }
        }

        for anim in &mut self.queue {
            if let PlacementPhase::Pending = anim.phase {
                if now < anim.start_at {
                    continue;
                }
                anim.phase = if anim.stroke_secs > 0.0 {
                    PlacementPhase::Stroke { started: now }
                } else {
                    PlacementPhase::Grow { started: now }
                };
            }

            if let PlacementPhase::Stroke { started } = anim.phase {
                let t = ((now - started) / anim.stroke_secs).clamp(0.0, 1.0);
                let progress = Ease::OutCubic.apply(t);
                let path = tree.slot(anim.slot).branch_path.clone();
                frame::draw_stroke(tree, &path, anim.color, progress, now, 1.0, surface);
                if t >= 1.0 {
                    // Chained, not nested: the grow starts in the same frame
                    // the stroke completes.
                    anim.phase = PlacementPhase::Grow { started: now };
                    continue;
                }
            }

            if let PlacementPhase::Grow { started } = anim.phase {
                let t = ((now - started) / anim.grow_secs).clamp(0.0, 1.0);
                let scale = anim.grow_style.ease().apply(t);
                let slot = tree.slot(anim.slot);
                let pos = sway::swayed_slot_pos(tree, slot, now, tree.wind_strength);
                surface.leaf(pos, scale, anim.grow_rotation, anim.color, 1.0, LeafStyle::Glow);

                if t >= 1.0 {
                    let slot_id = anim.slot;
                    let slot = tree.slot_mut(slot_id);
                    slot.occupied = true;
                    slot.leaf = Some(anim.pledge);
                    slot.rotation = anim.grow_rotation;
                    pledges.get_mut(anim.pledge).slot = Some(slot_id);
                    anim.phase = PlacementPhase::Settled;
                    tracing::debug!(slot = slot_id.0, pledge = anim.pledge.0, "placement settled");
                }
            }
        }

        self.queue
            .retain(|a| !matches!(a.phase, PlacementPhase::Settled));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
