use std::f64::consts::PI;

use crate::{
    foundation::core::{Point, SlotId},
    pledge::store::PledgeStore,
    tree::model::{ChartLabel, ChartTarget, TreeData},
};

/// Chart center on the normalized canvas.
pub const CHART_CENTER: Point = Point::new(500.0, 500.0);

/// Angular gap between sectors.
const SECTOR_GAP: f64 = 0.08;

/// Adaptive (leaf spacing, ring gap) keeping the whole chart bounded as the
/// occupied count grows.
fn spacing_for(total: usize) -> (f64, f64) {
    if total > 5000 {
        (6.0, 8.0)
    } else if total > 2000 {
        (8.0, 10.0)
    } else if total > 500 {
        (12.0, 14.0)
    } else if total > 200 {
        (18.0, 20.0)
    } else {
        (22.0, 24.0)
    }
}

/// Group occupied slots by pillar, in pillar-table order.
pub(crate) fn occupied_by_pillar(
    tree: &TreeData,
    pledges: &PledgeStore,
    pillar_count: usize,
) -> Vec<Vec<SlotId>> {
    let mut groups = vec![Vec::new(); pillar_count];
    for slot in &tree.slots {
        let Some(pledge) = slot.leaf.filter(|_| slot.occupied) else {
            continue;
        };
        let pillar = pledges.get(pledge).pillar;
        if pillar.0 < pillar_count {
            groups[pillar.0].push(slot.id);
        }
    }
    groups
}

/// Compute the radial pillar chart: one angular sector per non-empty pillar,
/// proportional to its share of the total, packed into concentric arcs.
///
/// Recomputed from scratch on every chart entry; writes per-slot targets and
/// one label per non-empty pillar onto the tree. Deterministic, no rng.
#[tracing::instrument(skip(tree, pledges))]
pub fn compute_chart_layout(tree: &mut TreeData, pledges: &PledgeStore, pillar_count: usize) {
    for slot in &mut tree.slots {
        slot.chart = None;
    }
    tree.chart_labels.clear();

    let groups = occupied_by_pillar(tree, pledges, pillar_count);
    let total: usize = groups.iter().map(Vec::len).sum();
    if total == 0 {
        return;
    }

    let (leaf_spacing, ring_gap) = spacing_for(total);
    let active: Vec<(usize, &Vec<SlotId>)> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .collect();

    let available = 2.0 * PI - SECTOR_GAP * active.len() as f64;
    let mut start_angle = -PI / 2.0;
    let mut labels = Vec::with_capacity(active.len());

    for (pillar_idx, slots) in active {
        let sector = (slots.len() as f64 / total as f64) * available;

        let mut idx = 0;
        let mut ring_radius = 30.0;
        let mut max_ring = 30.0;
        while idx < slots.len() {
            let arc_len = ring_radius * sector;
            let in_ring = ((arc_len / leaf_spacing).floor() as usize)
                .max(1)
                .min(slots.len() - idx);

            for li in 0..in_ring {
                // Spread across the middle 80% of the sector.
                let t = if in_ring == 1 {
                    0.5
                } else {
                    li as f64 / (in_ring - 1) as f64
                };
                let angle = start_angle + sector * (0.1 + t * 0.8);
                let pos = Point::new(
                    CHART_CENTER.x + angle.cos() * ring_radius,
                    CHART_CENTER.y + angle.sin() * ring_radius,
                );
                tree.slots[slots[idx].0].chart = Some(ChartTarget { pos });
                idx += 1;
            }

            max_ring = ring_radius;
            ring_radius += ring_gap;
        }

        labels.push(ChartLabel::Sector {
            pillar: crate::foundation::core::PillarId(pillar_idx),
            angle: start_angle + sector / 2.0,
            radius: max_ring + 40.0,
            count: slots.len(),
        });

        start_angle += sector + SECTOR_GAP;
    }

    tree.chart_labels = labels;
}

#[cfg(test)]
#[path = "../../tests/unit/layout/chart.rs"]
mod tests;
