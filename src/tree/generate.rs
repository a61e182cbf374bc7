use std::f64::consts::PI;

use crate::{
    foundation::core::{BranchId, NORMALIZED_H, NORMALIZED_W, Point, SlotId},
    foundation::math::{map_range, quad_point},
    foundation::rng::SeededRng,
    tree::model::{Branch, LeafSlot, TreeData},
};

/// Maximum branch depth; branches at this depth carry a tip slot instead of
/// children.
pub const MAX_DEPTH: u32 = 6;

/// Fan angles of the 5 main branches, measured up from +x.
const FAN_ANGLES: [f64; 5] = [PI / 6.0, PI / 3.0, PI / 2.0, PI * 2.0 / 3.0, PI * 5.0 / 6.0];

/// Build the full tree for a seed.
///
/// Pure function of the seed: identical seeds yield bit-identical trees, with
/// branch and slot ids assigned in recursion (pre-order) order. All geometry
/// is immutable afterwards.
#[tracing::instrument]
pub fn generate(seed: u64) -> TreeData {
    let mut b = Builder {
        rng: SeededRng::new(seed),
        branches: Vec::new(),
        slots: Vec::new(),
    };

    let trunk_start = Point::new(NORMALIZED_W / 2.0, NORMALIZED_H * 0.78);
    let trunk_len = NORMALIZED_H * 0.154;
    let root = b.build_branch(trunk_start, trunk_len, PI / 2.0, 0, &[], None);

    tracing::debug!(
        branches = b.branches.len(),
        slots = b.slots.len(),
        "tree generated"
    );

    TreeData {
        root,
        branches: b.branches,
        slots: b.slots,
        max_depth: MAX_DEPTH,
        width: NORMALIZED_W,
        height: NORMALIZED_H,
        // Growth rule at zero placements: only the first main branch accepts
        // leaves until pledges unlock the rest.
        active_branches: 1,
        chart_mode: false,
        chart_blend: 0.0,
        screensaver_mode: false,
        screensaver_blend: 0.0,
        wind_active: false,
        wind_strength: 0.0,
        chart_labels: Vec::new(),
        screensaver: None,
    }
}

struct Builder {
    rng: SeededRng,
    branches: Vec<Branch>,
    slots: Vec<LeafSlot>,
}

impl Builder {
    fn build_branch(
        &mut self,
        start: Point,
        length: f64,
        angle: f64,
        depth: u32,
        path_so_far: &[BranchId],
        main_branch: Option<usize>,
    ) -> BranchId {
        let end = Point::new(start.x + angle.cos() * length, start.y - angle.sin() * length);

        // More curve near the trunk, straighter near the tips.
        let curviness = map_range(f64::from(depth), 0.0, f64::from(MAX_DEPTH), 0.06, 0.28);
        let perp = angle + PI / 2.0;
        let curve_offset = length * curviness * (self.rng.next() - 0.5) * 2.0;
        let control = Point::new(
            (start.x + end.x) / 2.0 + perp.cos() * curve_offset,
            (start.y + end.y) / 2.0 - perp.sin() * curve_offset,
        );

        let id = BranchId(self.branches.len());
        self.branches.push(Branch {
            id,
            start,
            end,
            control,
            depth,
            thickness: map_range(f64::from(depth), 0.0, f64::from(MAX_DEPTH), 8.0, 0.8),
            angle,
            length,
            children: Vec::new(),
            main_branch,
        });

        let mut path = path_so_far.to_vec();
        path.push(id);

        if depth >= 1 {
            self.scatter_slots(start, control, end, angle, depth, &path, main_branch);
        }

        if depth == MAX_DEPTH {
            // Terminal leaf exactly at the tip.
            let rotation = angle + self.rng.range(-0.5, 0.5);
            self.push_slot(end, path.clone(), 1.0, depth, main_branch, rotation);
            return id;
        }

        if depth == 0 {
            for (i, &fan) in FAN_ANGLES.iter().enumerate() {
                let child_angle = fan + self.rng.range(-0.06, 0.06);
                // Branches nearer vertical run longer.
                let child_len =
                    length * (0.50 + child_angle.sin() * 0.35) * self.rng.range(0.92, 1.08);
                let child = self.build_branch(end, child_len, child_angle, 1, &path, Some(i));
                self.branches[id.0].children.push(child);
            }
        } else {
            let spread = map_range(f64::from(depth), 1.0, f64::from(MAX_DEPTH), 0.45, 0.25);
            for j in 0..2 {
                let t = (j as f64) - 0.5;
                let mut child_angle = angle + t * spread * 2.0 + self.rng.range(-0.08, 0.08);
                let vertical = child_angle.clamp(0.0, PI).sin();
                let child_len = length * self.rng.range(0.65, 0.82) * (0.75 + vertical * 0.25);

                // Gentle clamp: keep above slight-downward growth.
                if child_angle < -0.35 {
                    child_angle = -0.35 + self.rng.range(0.0, 0.1);
                }
                if child_angle > PI + 0.35 {
                    child_angle = PI + 0.35 - self.rng.range(0.0, 0.1);
                }

                let child =
                    self.build_branch(end, child_len, child_angle, depth + 1, &path, main_branch);
                self.branches[id.0].children.push(child);
            }
        }

        id
    }

    #[allow(clippy::too_many_arguments)]
    fn scatter_slots(
        &mut self,
        start: Point,
        control: Point,
        end: Point,
        angle: f64,
        depth: u32,
        path: &[BranchId],
        main_branch: Option<usize>,
    ) {
        let count = 5 + depth as usize * 5;
        for i in 0..count {
            let base_t = 0.2 + 0.72 * i as f64 / (count - 1) as f64;
            let t = (base_t + self.rng.range(-0.06, 0.06)).clamp(0.15, 0.95);
            let on_curve = quad_point(start, control, end, t);

            let offset = self.rng.range(3.0, 8.0 + f64::from(depth) * 4.0);
            let side = if self.rng.next() < 0.5 { 1.0 } else { -1.0 };
            let off_angle = angle + side * PI / 2.0;
            let pos = Point::new(
                on_curve.x + off_angle.cos() * offset,
                on_curve.y - off_angle.sin() * offset,
            );

            let rotation = angle + self.rng.range(-0.8, 0.8);
            self.push_slot(pos, path.to_vec(), t, depth, main_branch, rotation);
        }
    }

    fn push_slot(
        &mut self,
        pos: Point,
        branch_path: Vec<BranchId>,
        branch_t: f64,
        depth: u32,
        main_branch: Option<usize>,
        rotation: f64,
    ) {
        let id = SlotId(self.slots.len());
        self.slots.push(LeafSlot {
            id,
            pos,
            branch_path,
            branch_t,
            depth,
            main_branch,
            occupied: false,
            reserved: false,
            leaf: None,
            rotation,
            chart: None,
            disc: None,
            flutter_start: None,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/generate.rs"]
mod tests;
