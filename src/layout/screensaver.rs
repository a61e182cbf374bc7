use std::f64::consts::PI;

use crate::{
    foundation::core::{PillarId, Point, SlotId},
    foundation::math::lerp,
    foundation::rng::SeededRng,
    pledge::store::PledgeStore,
    tree::model::{DiscEntry, DiscTarget, ScreensaverScene, Stem, TreeData, VirtualLeaf},
};

/// Fixed seed for the screensaver layout's own rng.
const DISC_SEED: u64 = 13;

/// The disc always displays exactly this many leaves, padding with virtual
/// leaves when fewer slots are occupied.
pub const DISC_LEAF_COUNT: usize = 200;

/// Disc center on the normalized canvas.
pub const DISC_CENTER: Point = Point::new(500.0, 470.0);

const LEAF_SPACING: f64 = 20.0;
const RING_GAP: f64 = LEAF_SPACING * 1.5;

/// Synthetic ids for virtual leaves start here, past any real slot id.
const VIRTUAL_ID_BASE: usize = 90_000;

struct RingPos {
    pos: Point,
    ring: usize,
}

/// Compute the screensaver disc: real occupied slots first, virtual padding
/// up to [`DISC_LEAF_COUNT`], laid out in complete concentric rings only.
///
/// Writes per-slot [`DiscTarget`]s and stores the depth-ordered scene on the
/// tree. `now` anchors the palette cycling clock.
#[tracing::instrument(skip(tree, pledges))]
pub fn compute_screensaver_layout(
    tree: &mut TreeData,
    pledges: &PledgeStore,
    pillar_count: usize,
    now: f64,
) {
    for slot in &mut tree.slots {
        slot.disc = None;
    }

    let mut rng = SeededRng::new(DISC_SEED);

    let occupied: Vec<SlotId> = tree
        .slots
        .iter()
        .filter(|s| s.occupied && s.leaf.is_some())
        .map(|s| s.id)
        .collect();

    // Virtual padding: clone a random donor's pillar, or draw one at random
    // when the tree is empty.
    let mut virtuals = Vec::new();
    while occupied.len() + virtuals.len() < DISC_LEAF_COUNT {
        let pillar = match rng.index(occupied.len()) {
            Some(donor) => tree
                .slot(occupied[donor])
                .leaf
                .map(|p| pledges.get(p).pillar)
                .unwrap_or(PillarId(0)),
            None => PillarId(rng.index(pillar_count).unwrap_or(0)),
        };
        virtuals.push(VirtualLeaf {
            id: VIRTUAL_ID_BASE + virtuals.len(),
            rest: Point::new(
                DISC_CENTER.x + rng.range(-80.0, 80.0),
                DISC_CENTER.y + rng.range(-80.0, 80.0),
            ),
            rotation: rng.range(-0.7, 0.7),
            pillar,
            disc: DiscTarget {
                pos: DISC_CENTER,
                scale: 1.0,
                rotation: 0.0,
                color_index: 0,
                depth_index: 0,
                wind_seed: 0.5,
                shadow_offset: Point::new(3.0, 4.0),
            },
        });
    }

    let total = occupied.len() + virtuals.len();

    // Complete rings only: center point, then rings of increasing radius; a
    // ring is skipped once fewer than half of it could be filled.
    let mut positions = vec![RingPos {
        pos: DISC_CENTER,
        ring: 0,
    }];
    let mut ring_index = 2usize;
    while positions.len() < total {
        let ring_radius = ring_index as f64 * RING_GAP;
        let circumference = 1.5 * PI * ring_radius;
        let count_in_ring = ((circumference / LEAF_SPACING).floor() as usize).max(6);

        let remaining = total - positions.len();
        if (remaining as f64) < count_in_ring as f64 * 0.5 && positions.len() > 1 {
            break;
        }

        let angle_offset = if ring_index % 2 == 1 {
            PI / count_in_ring as f64
        } else {
            0.0
        };
        for ci in 0..count_in_ring {
            let angle = ci as f64 / count_in_ring as f64 * PI * 2.0 + angle_offset;
            positions.push(RingPos {
                pos: Point::new(
                    DISC_CENTER.x + angle.cos() * ring_radius,
                    DISC_CENTER.y + angle.sin() * ring_radius,
                ),
                ring: ring_index,
            });
        }
        ring_index += 1;
    }

    // Leaves beyond the last complete ring are dropped.
    let shown = total.min(positions.len());
    let disc_radius = (ring_index - 1) as f64 * RING_GAP + LEAF_SPACING * 0.5;
    let max_ring = ring_index - 1;

    let mut entries = Vec::with_capacity(shown);
    for j in 0..shown {
        let pt = &positions[j];
        let ring_frac = if max_ring > 0 {
            pt.ring as f64 / max_ring as f64
        } else {
            0.0
        };

        let pos = Point::new(
            pt.pos.x + rng.range(-0.5, 0.5),
            pt.pos.y + rng.range(-0.5, 0.5),
        );

        // Dominant palette shade by ring band, with a 25% chance of a random
        // shade for variety.
        let mut color_index = if ring_frac < 0.35 {
            0
        } else if ring_frac < 0.7 {
            1
        } else {
            2
        };
        if rng.next() < 0.25 {
            color_index = rng.index(3).unwrap_or(0);
        }

        let base_falloff = if max_ring > 0 {
            lerp(1.6, 0.6, ring_frac)
        } else {
            1.5
        };
        let ring_mod = if pt.ring % 2 == 0 { 1.08 } else { 0.92 };
        let scale = base_falloff * ring_mod * rng.range(0.93, 1.07);

        // Sunburst: rotation radiates outward from the center.
        let radial = (pt.pos.y - DISC_CENTER.y).atan2(pt.pos.x - DISC_CENTER.x);
        let rotation = radial + PI / 2.0 + rng.range(-0.15, 0.15);

        let target = DiscTarget {
            pos,
            scale,
            rotation,
            color_index,
            depth_index: j,
            wind_seed: rng.range(0.3, 1.0),
            shadow_offset: Point::new(3.0, 4.0),
        };

        if j < occupied.len() {
            tree.slots[occupied[j].0].disc = Some(target);
            entries.push(DiscEntry::Real(occupied[j]));
        } else {
            let mut v = virtuals[j - occupied.len()].clone();
            v.disc = target;
            entries.push(DiscEntry::Virtual(v));
        }
    }

    // Edges drawn first, center last and on top.
    entries.sort_by(|a, b| depth_index(b, tree).cmp(&depth_index(a, tree)));

    let stem_count = (shown / 30 + 3).min(8);
    let mut stems = Vec::with_capacity(stem_count);
    for _ in 0..stem_count {
        let angle = rng.next() * PI * 2.0;
        let start_r = disc_radius * rng.range(0.7, 0.95);
        let end_r = disc_radius * rng.range(1.05, 1.35);
        let end_angle = angle + rng.range(-0.08, 0.08);
        stems.push(Stem {
            from: Point::new(
                DISC_CENTER.x + angle.cos() * start_r,
                DISC_CENTER.y + angle.sin() * start_r,
            ),
            to: Point::new(
                DISC_CENTER.x + end_angle.cos() * end_r,
                DISC_CENTER.y + end_angle.sin() * end_r,
            ),
            width: rng.range(0.5, 1.5),
        });
    }

    tree.screensaver = Some(ScreensaverScene {
        center: DISC_CENTER,
        radius: disc_radius,
        draw_order: entries,
        stems,
        started_at: now,
    });
}

fn depth_index(entry: &DiscEntry, tree: &TreeData) -> usize {
    match entry {
        DiscEntry::Real(id) => tree.slot(*id).disc.map(|d| d.depth_index).unwrap_or(0),
        DiscEntry::Virtual(v) => v.disc.depth_index,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/screensaver.rs"]
mod tests;
