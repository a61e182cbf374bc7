//! Canopy is a procedural pledge-tree engine for interactive installations.
//!
//! A seeded generator grows a recursive branching tree on a fixed 1000x1000
//! normalized canvas and scatters leaf slots along every branch. Visitors
//! place pledges into slots through animated flows (stroke trace then leaf
//! grow), and the whole tree can blend into alternate layouts: a radial or
//! clustered pillar chart and a circle-packed screensaver disc.
//!
//! # Frame loop overview
//!
//! 1. **Generate**: `SessionConfig + seed -> TreeData` (branches and slots, pure)
//! 2. **Place**: session calls enqueue placement animations and reserve slots
//! 3. **Advance**: `Session::advance(now, surface)` blends mode scalars, draws
//!    the scene through the [`DrawSurface`] trait and steps every animation
//! 4. **Layouts** (optional): chart and screensaver targets are computed on
//!    entry and crossfaded per frame
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: generation, layouts and placement order are
//!   pure functions of the seed and the call sequence.
//! - **No IO in the engine**: drawing goes through [`DrawSurface`]; entry
//!   persistence goes through [`EntrySink`]. Hosts own both sides.
//! - **Normalized coordinates** end-to-end: hosts map to pixels with
//!   [`Viewport`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod foundation;
mod layout;
mod pledge;
mod render;
mod session;
mod tree;

pub use animation::ease::Ease;
pub use animation::placement::{GrowStyle, GuideAnim, GuideId, PlacementAnim, PlacementPhase};
pub use animation::scheduler::{GUIDE_COLOR, Scheduler, TransitionRates};
pub use animation::sway::{
    SwaySegment, control_delta, end_delta, gust, swayed_path, swayed_slot_pos, wind_offset,
};
pub use foundation::core::{
    BranchId, NORMALIZED_H, NORMALIZED_W, PillarId, PledgeId, Point, Rgb8, SlotId, Vec2,
};
pub use foundation::error::{CanopyError, CanopyResult};
pub use foundation::math::{dist, lerp, map_range, quad_len, quad_point};
pub use foundation::rng::SeededRng;
pub use layout::chart::{CHART_CENTER, compute_chart_layout};
pub use layout::cluster::compute_cluster_layout;
pub use layout::screensaver::{DISC_CENTER, DISC_LEAF_COUNT, compute_screensaver_layout};
pub use pledge::entries::{EntryRecord, EntrySink, MemoryEntrySink};
pub use pledge::model::{Pillar, Pledge};
pub use pledge::store::PledgeStore;
pub use render::frame::{draw_frame, palette_color};
pub use render::surface::{DrawOp, DrawSurface, LeafStyle, NullSurface, RecordingSurface};
pub use render::viewport::Viewport;
pub use session::config::{ChartStyle, Durations, SessionConfig};
pub use session::runtime::{BulkReport, PillarWave, Placement, Session};
pub use tree::generate::{MAX_DEPTH, generate};
pub use tree::model::{
    Branch, ChartLabel, ChartTarget, DiscEntry, DiscTarget, LeafSlot, ScreensaverScene, Stem,
    TreeData, VirtualLeaf,
};
pub use tree::slots::{
    active_branches_for, find_available_slot, find_nearest_slot, occupied_count,
};
