use crate::foundation::core::{BranchId, PillarId, PledgeId, Point, SlotId};

/// One curved segment of the procedurally generated tree.
///
/// Geometry is fixed forever at generation time; only the rendered position
/// varies per frame via sway, never the stored points.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Branch {
    /// Index of this branch in [`TreeData::branches`].
    pub id: BranchId,
    /// Curve start point (parent's end, or the trunk base).
    pub start: Point,
    /// Curve end point.
    pub end: Point,
    /// Quadratic control point, offset perpendicular to the chord.
    pub control: Point,
    /// 0 for the trunk; strictly parent depth + 1 below it.
    pub depth: u32,
    /// Stroke thickness in normalized units, monotonically decreasing with depth.
    pub thickness: f64,
    /// Growth direction in radians, measured up from +x on a y-down canvas.
    pub angle: f64,
    /// Chord length in normalized units.
    pub length: f64,
    /// Child branches in generation order.
    pub children: Vec<BranchId>,
    /// Which of the 5 main branches this descends from; `None` for the trunk.
    pub main_branch: Option<usize>,
}

/// Target coordinate for a slot under the chart layout.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartTarget {
    /// Normalized chart position.
    pub pos: Point,
}

/// Target placement for a leaf on the screensaver disc.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct DiscTarget {
    /// Normalized disc position.
    pub pos: Point,
    /// Scale multiplier, large at the disc center and small at the edge.
    pub scale: f64,
    /// Sunburst rotation radiating outward from the disc center.
    pub rotation: f64,
    /// Index into the active screensaver palette (0..3).
    pub color_index: usize,
    /// Assignment order; lower indices are drawn later (on top).
    pub depth_index: usize,
    /// Per-leaf factor in `[0.3, 1.0]` varying the wind sway phase/amplitude.
    pub wind_seed: f64,
    /// Shadow offset in normalized units.
    pub shadow_offset: Point,
}

/// A fixed candidate position for a placed leaf.
///
/// All slots are created at generation time and never added or destroyed;
/// only occupancy, reservation, ownership and layout targets mutate.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LeafSlot {
    /// Index of this slot in [`TreeData::slots`].
    pub id: SlotId,
    /// Resting position on the tree.
    pub pos: Point,
    /// Branch ids from the root to the attachment branch, used for sway.
    pub branch_path: Vec<BranchId>,
    /// Normalized position along the attachment branch's curve.
    pub branch_t: f64,
    /// Depth of the attachment branch.
    pub depth: u32,
    /// Main-branch index inherited from the attachment branch.
    pub main_branch: Option<usize>,
    /// True once a completed placement owns this slot.
    pub occupied: bool,
    /// True while an in-flight animation has claimed this slot.
    pub reserved: bool,
    /// The pledge displayed here; set together with `occupied`.
    pub leaf: Option<PledgeId>,
    /// Resting rotation of the drawn leaf.
    pub rotation: f64,
    /// Chart layout target, present once the chart layout has been computed.
    pub chart: Option<ChartTarget>,
    /// Screensaver target, present once the disc layout has been computed.
    pub disc: Option<DiscTarget>,
    /// Transient tap-flutter start time, cleared when the wobble ends.
    pub flutter_start: Option<f64>,
}

impl LeafSlot {
    /// True when the slot can be claimed by a new placement under the given
    /// active-branch gate.
    pub fn selectable(&self, active_branches: usize) -> bool {
        !self.occupied && !self.reserved && self.main_branch.is_none_or(|i| i < active_branches)
    }
}

/// Label summary for one pillar group of the chart layouts.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum ChartLabel {
    /// Radial pillar-chart sector label.
    Sector {
        /// Labeled pillar.
        pillar: PillarId,
        /// Mid angle of the sector.
        angle: f64,
        /// Label radius, just outside the outermost ring.
        radius: f64,
        /// Occupied slots in the sector.
        count: usize,
    },
    /// Organic cluster-chart group label.
    Cluster {
        /// Labeled pillar.
        pillar: PillarId,
        /// Cluster center.
        center: Point,
        /// Cluster radius.
        radius: f64,
        /// Occupied slots in the cluster.
        count: usize,
    },
}

impl ChartLabel {
    /// Pillar this label belongs to.
    pub fn pillar(&self) -> PillarId {
        match *self {
            Self::Sector { pillar, .. } | Self::Cluster { pillar, .. } => pillar,
        }
    }

    /// Occupied-slot count recorded for the label.
    pub fn count(&self) -> usize {
        match *self {
            Self::Sector { count, .. } | Self::Cluster { count, .. } => count,
        }
    }

    /// Normalized anchor point where the label text is drawn.
    pub fn anchor(&self, chart_center: Point) -> Point {
        match *self {
            Self::Sector { angle, radius, .. } => Point::new(
                chart_center.x + angle.cos() * radius,
                chart_center.y + angle.sin() * radius,
            ),
            Self::Cluster { center, radius, .. } => Point::new(center.x, center.y - radius - 25.0),
        }
    }
}

/// Decorative line radiating just past the screensaver disc boundary.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Stem {
    /// Inner endpoint, on the disc boundary.
    pub from: Point,
    /// Outer endpoint.
    pub to: Point,
    /// Stroke width in normalized units.
    pub width: f64,
}

/// Synthetic disc entry padding the screensaver up to its fixed leaf count.
///
/// Virtual leaves are never backed by a [`LeafSlot`]; they rest near the disc
/// center and only become visible as the screensaver blend rises.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VirtualLeaf {
    /// Synthetic id, offset past the real slot range; drives sway phase.
    pub id: usize,
    /// Resting position (disc center plus jitter).
    pub rest: Point,
    /// Resting rotation.
    pub rotation: f64,
    /// Pillar cloned from a random real donor, or drawn at random.
    pub pillar: PillarId,
    /// Disc placement.
    pub disc: DiscTarget,
}

/// One entry of the screensaver draw list.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum DiscEntry {
    /// A real occupied slot; its [`DiscTarget`] lives on the slot.
    Real(SlotId),
    /// A virtual padding leaf carrying its own target.
    Virtual(VirtualLeaf),
}

/// Precomputed screensaver disc scene.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScreensaverScene {
    /// Disc center.
    pub center: Point,
    /// Disc radius, set by the outermost complete ring.
    pub radius: f64,
    /// Entries sorted by descending depth index (edges first, center on top).
    pub draw_order: Vec<DiscEntry>,
    /// Decorative stems past the disc boundary.
    pub stems: Vec<Stem>,
    /// Session time at which the screensaver was entered; anchors the
    /// palette cycling clock.
    pub started_at: f64,
}

/// Aggregate root for one generated tree and its session-wide visual state.
///
/// Owned exclusively by the session; branches and slots are immutable in
/// geometry after [`crate::generate`], while occupancy, layout targets and
/// the continuous blend scalars mutate over the session.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TreeData {
    /// The trunk branch.
    pub root: BranchId,
    /// Flat list of all branches in generation order.
    pub branches: Vec<Branch>,
    /// Flat list of all leaf slots in generation order.
    pub slots: Vec<LeafSlot>,
    /// Configured maximum depth; equals the deepest generated branch.
    pub max_depth: u32,
    /// Normalized canvas width.
    pub width: f64,
    /// Normalized canvas height.
    pub height: f64,
    /// How many of the 5 main branches currently accept new leaves.
    pub active_branches: usize,
    /// Chart mode flag; the blend chases this target.
    pub chart_mode: bool,
    /// Chart transition scalar in `[0, 1]`.
    pub chart_blend: f64,
    /// Screensaver mode flag; the blend chases this target.
    pub screensaver_mode: bool,
    /// Screensaver transition scalar in `[0, 1]`.
    pub screensaver_blend: f64,
    /// Wind flag; the strength chases this target.
    pub wind_active: bool,
    /// Wind strength scalar in `[0, 1]`.
    pub wind_strength: f64,
    /// Labels for the most recently computed chart layout.
    pub chart_labels: Vec<ChartLabel>,
    /// Disc scene for the most recently entered screensaver.
    pub screensaver: Option<ScreensaverScene>,
}

impl TreeData {
    /// Branch lookup by id.
    pub fn branch(&self, id: BranchId) -> &Branch {
        &self.branches[id.0]
    }

    /// Slot lookup by id.
    pub fn slot(&self, id: SlotId) -> &LeafSlot {
        &self.slots[id.0]
    }

    /// Mutable slot lookup by id.
    pub fn slot_mut(&mut self, id: SlotId) -> &mut LeafSlot {
        &mut self.slots[id.0]
    }
}
