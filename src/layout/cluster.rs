use std::f64::consts::PI;

use crate::{
    foundation::core::{PillarId, Point},
    foundation::rng::SeededRng,
    layout::chart::occupied_by_pillar,
    pledge::store::PledgeStore,
    tree::model::{ChartLabel, ChartTarget, TreeData},
};

/// Fixed seed for the cluster layout's own rng, keeping the jitter stable
/// across recomputation with unchanged occupancy.
const CLUSTER_SEED: u64 = 7;

/// Quadrant centers assigned to non-empty pillar groups in order.
const CLUSTER_CENTERS: [Point; 4] = [
    Point::new(300.0, 350.0),
    Point::new(700.0, 350.0),
    Point::new(300.0, 650.0),
    Point::new(700.0, 650.0),
];

fn spacing_for(total: usize) -> f64 {
    if total > 5000 {
        7.0
    } else if total > 2000 {
        9.0
    } else if total > 500 {
        13.0
    } else if total > 100 {
        18.0
    } else {
        24.0
    }
}

/// Compute the organic cluster chart: each non-empty pillar gets a quadrant
/// center and its slots walk a loosely packed outward spiral with seeded
/// radial/angular jitter.
#[tracing::instrument(skip(tree, pledges))]
pub fn compute_cluster_layout(tree: &mut TreeData, pledges: &PledgeStore, pillar_count: usize) {
    for slot in &mut tree.slots {
        slot.chart = None;
    }
    tree.chart_labels.clear();

    let groups = occupied_by_pillar(tree, pledges, pillar_count);
    let total: usize = groups.iter().map(Vec::len).sum();
    if total == 0 {
        return;
    }

    let spacing = spacing_for(total);
    let mut rng = SeededRng::new(CLUSTER_SEED);
    let mut labels = Vec::new();

    let active = groups.iter().enumerate().filter(|(_, g)| !g.is_empty());
    for (cluster_idx, (pillar_idx, slots)) in active.enumerate() {
        let center = CLUSTER_CENTERS[cluster_idx % CLUSTER_CENTERS.len()];

        let mut angle = rng.next() * PI * 2.0;
        let mut radius = 0.0f64;
        let mut max_r = 0.0f64;

        for &slot_id in slots {
            let jitter_r = rng.range(-spacing * 0.3, spacing * 0.3);
            let jitter_a = rng.range(-0.3, 0.3);
            let pos = Point::new(
                center.x + (angle + jitter_a).cos() * (radius + jitter_r),
                center.y + (angle + jitter_a).sin() * (radius + jitter_r),
            );
            tree.slots[slot_id.0].chart = Some(ChartTarget { pos });

            max_r = max_r.max(radius + jitter_r);

            // Advance along a loose spiral.
            let step = spacing / radius.max(spacing);
            angle += step * 1.2;
            radius += spacing / (PI * 2.0) * step * 3.0;
        }

        labels.push(ChartLabel::Cluster {
            pillar: PillarId(pillar_idx),
            center,
            radius: max_r.max(30.0),
            count: slots.len(),
        });
    }

    tree.chart_labels = labels;
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cluster.rs"]
mod tests;
