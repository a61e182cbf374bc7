use crate::{
    animation::ease::Ease,
    foundation::core::{PledgeId, Rgb8, SlotId},
};

/// How a placed leaf settles at the end of its grow animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GrowStyle {
    /// Smooth unfurl, used by the pledge flow.
    Settle,
    /// Elastic overshoot, used by the reveal wave.
    Bouncy,
}

impl GrowStyle {
    /// The easing curve this style grows with.
    pub fn ease(self) -> Ease {
        match self {
            Self::Settle => Ease::OutCubic,
            Self::Bouncy => Ease::OutElastic,
        }
    }
}

/// Phase of one in-flight placement.
///
/// The slot is reserved for the whole life of the placement; occupancy and
/// pledge ownership become visible only on the `Grow` to `Settled` edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PlacementPhase {
    /// Waiting for its staggered start time.
    Pending,
    /// Tracing the branch path toward the slot.
    Stroke {
        /// Session time the stroke began.
        started: f64,
    },
    /// Scaling the leaf up at the slot.
    Grow {
        /// Session time the grow began.
        started: f64,
    },
    /// Finished; removed from the queue at the end of the tick.
    Settled,
}

/// One queued placement animation: an explicit state machine advanced by the
/// scheduler tick, owning its slot reservation end to end.
#[derive(Clone, Debug)]
pub struct PlacementAnim {
    /// The pledge being placed.
    pub pledge: PledgeId,
    /// The reserved destination slot.
    pub slot: SlotId,
    /// Current state; advanced once per tick.
    pub phase: PlacementPhase,
    /// Session time before which the placement stays `Pending`.
    pub start_at: f64,
    /// Stroke duration in seconds; zero skips straight to `Grow`.
    pub stroke_secs: f64,
    /// Grow duration in seconds.
    pub grow_secs: f64,
    /// Settle character of the grow.
    pub grow_style: GrowStyle,
    /// Rotation the leaf grows in with and keeps once settled.
    pub grow_rotation: f64,
    /// Stroke color (the pledge's pillar color).
    pub color: Rgb8,
}

/// Handle for an in-flight guided stroke awaiting confirm or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GuideId(pub u64);

/// A guide stroke: traces the path to a reserved slot, then holds until the
/// caller confirms (grow) or cancels (release the reservation).
#[derive(Clone, Debug)]
pub struct GuideAnim {
    /// Handle returned to the caller.
    pub id: GuideId,
    /// The reserved slot being traced toward.
    pub slot: SlotId,
    /// Session time the trace began.
    pub started: f64,
    /// Trace duration in seconds.
    pub duration_secs: f64,
    /// True once the trace has fully reached the slot.
    pub done: bool,
}
