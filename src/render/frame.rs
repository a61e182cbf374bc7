use crate::{
    animation::ease::Ease,
    animation::sway,
    foundation::core::{BranchId, Point, Rgb8, SlotId, Vec2},
    foundation::math::{lerp, map_range, quad_len, quad_point},
    pledge::model::Pillar,
    render::surface::{DrawSurface, LeafStyle},
    tree::model::{DiscEntry, DiscTarget, TreeData},
};

/// Screensaver palettes, one per pillar theme, three shades each.
const SS_PALETTES: [[Rgb8; 3]; 4] = [
    // Blues
    [
        Rgb8::new(0x1A, 0x33, 0x66),
        Rgb8::new(0x2D, 0x6B, 0xC4),
        Rgb8::new(0x7A, 0xB5, 0xEB),
    ],
    // Turquoise
    [
        Rgb8::new(0x0D, 0x4F, 0x5A),
        Rgb8::new(0x1A, 0x9A, 0xAA),
        Rgb8::new(0x5C, 0xCE, 0xDD),
    ],
    // Greens
    [
        Rgb8::new(0x1E, 0x5C, 0x1E),
        Rgb8::new(0x48, 0xAF, 0x4C),
        Rgb8::new(0x80, 0xD2, 0x48),
    ],
    // Oranges
    [
        Rgb8::new(0x8B, 0x2F, 0x1A),
        Rgb8::new(0xE0, 0x5A, 0x2B),
        Rgb8::new(0xF4, 0xA6, 0x8A),
    ],
];

const SS_HOLD_SECS: f64 = 5.0;
const SS_FADE_SECS: f64 = 2.0;
const SS_CYCLE_SECS: f64 = SS_HOLD_SECS + SS_FADE_SECS;

const SHADOW_COLOR: Rgb8 = Rgb8::new(0x0A, 0x16, 0x28);

/// Screensaver palette color for a shade index at a given session time.
///
/// Pinned to the first palette for the initial hold, then cycling through
/// all palettes with an eased crossfade between holds.
pub fn palette_color(shade: usize, time: f64, started_at: f64) -> Rgb8 {
    let shade = shade.min(2);
    let cycle_time = (time - started_at) - SS_HOLD_SECS;
    if cycle_time <= 0.0 {
        return SS_PALETTES[0][shade];
    }

    let total = SS_PALETTES.len() as f64 * SS_CYCLE_SECS;
    let pos = cycle_time % total;
    let cur = ((pos / SS_CYCLE_SECS) as usize) % SS_PALETTES.len();
    let within = pos - cur as f64 * SS_CYCLE_SECS;

    if within <= SS_HOLD_SECS {
        SS_PALETTES[cur][shade]
    } else {
        let next = (cur + 1) % SS_PALETTES.len();
        let blend = Ease::InOutQuad.apply((within - SS_HOLD_SECS) / SS_FADE_SECS);
        SS_PALETTES[cur][shade].lerp(SS_PALETTES[next][shade], blend)
    }
}

/// Paint a partial stroke along a branch path up to `progress`, with live
/// sway applied to every segment.
pub(crate) fn draw_stroke(
    tree: &TreeData,
    path: &[BranchId],
    color: Rgb8,
    progress: f64,
    time: f64,
    alpha: f64,
    surface: &mut dyn DrawSurface,
) {
    let segments = sway::swayed_path(tree, path, time, tree.wind_strength);
    let lens: Vec<f64> = segments
        .iter()
        .map(|s| quad_len(s.start, s.control, s.end))
        .collect();
    let total: f64 = lens.iter().sum();
    let drawn = progress * total;

    let mut accumulated = 0.0;
    for (seg, &len) in segments.iter().zip(&lens) {
        if accumulated + len <= drawn {
            surface.curve(seg.start, seg.control, seg.end, 2.3, color, 0.69 * alpha);
            accumulated += len;
        } else {
            // Partial segment: split the curve at the remaining fraction.
            let t = if len > 0.0 { (drawn - accumulated) / len } else { 0.0 };
            let end = quad_point(seg.start, seg.control, seg.end, t);
            let control = Point::new(
                lerp(seg.start.x, seg.control.x, t),
                lerp(seg.start.y, seg.control.y, t),
            );
            surface.curve(seg.start, control, end, 2.3, color, 0.69 * alpha);
            break;
        }
    }
}

/// Draw the complete static scene for one frame: ground, swaying branches,
/// placed leaves blended toward the active layout, chart labels and
/// screensaver decorations.
pub fn draw_frame(
    tree: &mut TreeData,
    pledges: &crate::pledge::store::PledgeStore,
    pillars: &[Pillar],
    now: f64,
    surface: &mut dyn DrawSurface,
) {
    surface.clear();

    let eased_chart = Ease::InOutQuad.apply(tree.chart_blend);
    let eased_ss = Ease::InOutQuad.apply(tree.screensaver_blend);
    let tree_alpha = 1.0 - tree.chart_blend.max(tree.screensaver_blend);

    if tree_alpha > 0.01 {
        let ground_y = tree.height * 0.8;
        surface.line(
            Point::new(0.0, ground_y),
            Point::new(tree.width, ground_y),
            1.0,
            Rgb8::WHITE,
            0.12 * tree_alpha,
        );
        draw_branches(tree, tree.root, now, tree_alpha, Vec2::ZERO, surface);
    }

    let expired = draw_leaves(tree, pledges, pillars, now, eased_chart, eased_ss, surface);
    for id in expired {
        tree.slot_mut(id).flutter_start = None;
    }

    if tree.chart_blend > 0.01 {
        for label in &tree.chart_labels {
            let pillar = &pillars[label.pillar().0];
            let text = format!("{} ({})", pillar.name, label.count());
            let anchor = label.anchor(crate::layout::chart::CHART_CENTER);
            surface.text(anchor, &text, pillar.color, eased_chart * 0.85);
        }
    }

    if eased_ss > 0.01
        && let Some(scene) = &tree.screensaver
    {
        for stem in &scene.stems {
            surface.line(stem.from, stem.to, stem.width, Rgb8::WHITE, 0.15 * eased_ss);
        }
    }
}

fn draw_branches(
    tree: &TreeData,
    id: BranchId,
    time: f64,
    tree_alpha: f64,
    accum: Vec2,
    surface: &mut dyn DrawSurface,
) {
    let branch = tree.branch(id);
    if branch
        .main_branch
        .is_some_and(|i| i >= tree.active_branches)
    {
        return;
    }

    let own_end = sway::end_delta(branch, time, tree.wind_strength);
    let own_control = sway::control_delta(branch, time, tree.wind_strength);

    let alpha = map_range(
        f64::from(branch.depth),
        0.0,
        f64::from(tree.max_depth),
        0.7,
        0.2,
    ) * tree_alpha;
    surface.curve(
        branch.start + accum,
        branch.control + own_control + accum,
        branch.end + own_end + accum,
        branch.thickness.max(0.5),
        Rgb8::WHITE,
        alpha,
    );

    // Children inherit the accumulated parent sway plus this branch's own.
    let child_accum = accum + own_end;
    for &child in &branch.children {
        draw_branches(tree, child, time, tree_alpha, child_accum, surface);
    }
}

struct LeafView {
    phase_id: usize,
    rest: Point,
    base_rot: f64,
    pillar_color: Rgb8,
    chart: Option<Point>,
    disc: Option<DiscTarget>,
    flutter: Option<(SlotId, f64)>,
}

struct LeafPass<'a> {
    time: f64,
    eased_chart: f64,
    eased_ss: f64,
    /// Palette clock anchor of the current screensaver scene.
    started_at: f64,
    pillars: &'a [Pillar],
    expired: Vec<SlotId>,
}

/// Draw all visible leaves; returns slots whose tap flutter has expired.
fn draw_leaves(
    tree: &TreeData,
    pledges: &crate::pledge::store::PledgeStore,
    pillars: &[Pillar],
    time: f64,
    eased_chart: f64,
    eased_ss: f64,
    surface: &mut dyn DrawSurface,
) -> Vec<SlotId> {
    let mut pass = LeafPass {
        time,
        eased_chart,
        eased_ss,
        started_at: tree.screensaver.as_ref().map(|s| s.started_at).unwrap_or(0.0),
        pillars,
        expired: Vec::new(),
    };

    // Depth-sorted disc order for the whole screensaver transition avoids a
    // draw-order pop mid-blend.
    match tree.screensaver.as_ref().filter(|_| eased_ss > 0.0) {
        Some(scene) => {
            for entry in &scene.draw_order {
                match entry {
                    DiscEntry::Real(id) => pass.draw_slot(tree, pledges, *id, surface),
                    DiscEntry::Virtual(v) => {
                        let view = LeafView {
                            phase_id: v.id,
                            rest: v.rest,
                            base_rot: v.rotation,
                            pillar_color: pillars
                                .get(v.pillar.0)
                                .map(|p| p.color)
                                .unwrap_or(Rgb8::WHITE),
                            chart: None,
                            disc: Some(v.disc),
                            flutter: None,
                        };
                        pass.draw_view(view, surface);
                    }
                }
            }
        }
        None => {
            for i in 0..tree.slots.len() {
                pass.draw_slot(tree, pledges, SlotId(i), surface);
            }
        }
    }

    pass.expired
}

impl LeafPass<'_> {
    fn draw_slot(
        &mut self,
        tree: &TreeData,
        pledges: &crate::pledge::store::PledgeStore,
        id: SlotId,
        surface: &mut dyn DrawSurface,
    ) {
        let slot = tree.slot(id);
        let Some(pledge) = slot.leaf.filter(|_| slot.occupied) else {
            return;
        };
        if slot
            .main_branch
            .is_some_and(|i| i >= tree.active_branches)
        {
            return;
        }
        // Once the disc has fully settled the tree sway no longer matters.
        let rest = if self.eased_ss >= 0.95 {
            slot.pos
        } else {
            sway::swayed_slot_pos(tree, slot, self.time, tree.wind_strength)
        };
        let pillar = pledges.get(pledge).pillar;
        let view = LeafView {
            phase_id: id.0,
            rest,
            base_rot: slot.rotation,
            pillar_color: self
                .pillars
                .get(pillar.0)
                .map(|p| p.color)
                .unwrap_or(Rgb8::WHITE),
            chart: slot.chart.map(|c| c.pos),
            disc: slot.disc,
            flutter: slot.flutter_start.map(|t| (id, t)),
        };
        self.draw_view(view, surface);
    }

    fn draw_view(&mut self, view: LeafView, surface: &mut dyn DrawSurface) {
        let LeafPass {
            time,
            eased_chart,
            eased_ss,
            started_at,
            ..
        } = *self;
        let mut pos = view.rest;
        if eased_chart > 0.0
            && let Some(target) = view.chart
        {
            pos = Point::new(
                lerp(view.rest.x, target.x, eased_chart),
                lerp(view.rest.y, target.y, eased_chart),
            );
        }

        let mut rot = if eased_ss > 0.0 {
            lerp(
                view.base_rot,
                view.disc.map(|d| d.rotation).unwrap_or(0.0),
                eased_ss,
            )
        } else {
            lerp(view.base_rot, 0.0, eased_chart)
        };
        let mut scale = lerp(1.0, view.disc.map(|d| d.scale).unwrap_or(1.0), eased_ss);

        if eased_ss > 0.0
            && let Some(disc) = view.disc
        {
            pos = Point::new(
                lerp(view.rest.x, disc.pos.x, eased_ss),
                lerp(view.rest.y, disc.pos.y, eased_ss),
            );

            // Wind-like sway blending in as the screensaver settles.
            let seed = disc.wind_seed;
            let g = sway::gust(time);
            let amp = (4.0 + seed * 6.0) * g;
            let sway_blend = ((eased_ss - 0.5) * 2.0).clamp(0.0, 1.0);
            pos.x += (time * (0.35 + seed * 0.15) + view.phase_id as f64 * 0.4).sin()
                * amp
                * sway_blend;
            pos.y += (time * (0.25 + seed * 0.1) + view.phase_id as f64 * 0.3).cos()
                * amp
                * 0.4
                * sway_blend;
            // Gentle directional push, as if wind from the left.
            pos.x += g * 3.0 * sway_blend;

            if eased_ss > 0.5 {
                rot += (time * (0.35 + seed * 0.15) + view.phase_id as f64 * 0.4).sin()
                    * 0.12
                    * g
                    * sway_blend;
            }
        }

        let mut color = view.pillar_color;
        if eased_ss > 0.0 {
            let shade = view.disc.map(|d| d.color_index).unwrap_or(0);
            color = color.lerp(palette_color(shade, time, started_at), eased_ss);
        }

        if let Some((slot_id, start)) = view.flutter {
            let age = time - start;
            if age < 1.0 {
                // Quick ramp up over the first 15%, long ease back out.
                let env = if age < 0.15 {
                    age / 0.15
                } else {
                    1.0 - ((age - 0.15) / 0.85).powi(2)
                };
                rot += (age * 28.0).sin() * 0.16 * env;
                scale *= 1.0 + (age * 22.0).sin() * 0.08 * env;
            } else {
                self.expired.push(slot_id);
            }
        }

        if eased_ss > 0.0
            && let Some(disc) = view.disc
        {
            surface.leaf(
                pos + disc.shadow_offset.to_vec2(),
                scale,
                rot,
                SHADOW_COLOR,
                0.25 * eased_ss,
                LeafStyle::Flat,
            );
        }
        if eased_ss < 1.0 {
            let glow = (time * 1.2 + view.phase_id as f64 * 0.5).sin() * 0.06 + 0.94;
            surface.leaf(pos, scale, rot, color, glow * (1.0 - eased_ss), LeafStyle::Glow);
        }
        if eased_ss > 0.0 {
            surface.leaf(pos, scale, rot, color, eased_ss, LeafStyle::Flat);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
