use super::*;
use crate::{
    pledge::entries::{EntryRecord, EntrySink, MemoryEntrySink},
    render::surface::NullSurface,
    session::config::{ChartStyle, SessionConfig},
    tree::model::ChartLabel,
};

fn session() -> Session {
    Session::new(SessionConfig::default()).unwrap()
}

fn advance(session: &mut Session, times: &[f64]) {
    let mut surface = NullSurface;
    for &t in times {
        session.advance(t, &mut surface);
    }
}

fn started(placement: Placement) -> (PledgeId, SlotId) {
    match placement {
        Placement::Started { pledge, slot } => (pledge, slot),
        Placement::TreeFull => panic!("expected a started placement"),
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = SessionConfig {
        max_pledges: 0,
        ..SessionConfig::default()
    };
    assert!(Session::new(config).is_err());
}

#[test]
fn place_pledge_reserves_then_occupies_on_completion() {
    let mut s = session();
    let (pledge, slot) = started(s.place_pledge("Ada", PillarId(0), "msg", None).unwrap());

    // Reserved immediately, occupied only once the animation completes.
    assert!(s.tree().slot(slot).reserved);
    assert!(!s.tree().slot(slot).occupied);
    assert_eq!(s.total_placed(), 1);
    assert_eq!(s.people_count(), 1);
    assert_eq!(s.occupied_count(), 0);
    assert!(s.is_animating());

    advance(&mut s, &[0.1, 1.2, 2.5]);

    assert!(!s.is_animating());
    assert_eq!(s.occupied_count(), 1);
    assert_eq!(s.tree().slot(slot).leaf, Some(pledge));
    assert_eq!(s.pledges().get(pledge).slot, Some(slot));
}

#[test]
fn unknown_pillar_is_a_validation_error() {
    let mut s = session();
    assert!(s.place_pledge("Ada", PillarId(9), "", None).is_err());
}

#[test]
fn placement_order_is_reproducible_across_sessions() {
    let mut a = session();
    let mut b = session();
    for i in 0..10 {
        let (_, sa) = started(a.place_pledge("p", PillarId(i % 4), "", None).unwrap());
        let (_, sb) = started(b.place_pledge("p", PillarId(i % 4), "", None).unwrap());
        assert_eq!(sa, sb);
    }
}

#[test]
fn position_hint_picks_the_nearest_slot() {
    let mut s = session();
    let target = s
        .tree()
        .slots
        .iter()
        .find(|sl| sl.selectable(s.tree().active_branches))
        .unwrap();
    let (pos, id) = (target.pos, target.id);
    let (_, slot) = started(s.place_pledge("Ada", PillarId(0), "", Some(pos)).unwrap());
    assert_eq!(slot, id);
}

#[test]
fn cap_is_enforced() {
    let config = SessionConfig {
        max_pledges: 2,
        ..SessionConfig::default()
    };
    let mut s = Session::new(config).unwrap();
    started(s.place_pledge("a", PillarId(0), "", None).unwrap());
    started(s.place_pledge("b", PillarId(1), "", None).unwrap());
    assert_eq!(
        s.place_pledge("c", PillarId(2), "", None).unwrap(),
        Placement::TreeFull
    );
    assert_eq!(s.total_placed(), 2);
}

#[test]
fn pillar_wave_places_one_per_pillar_on_distinct_slots() {
    let mut s = session();
    let wave = s.place_for_all_pillars("Ada").unwrap();
    assert_eq!(wave.placed.len(), 4);
    assert_eq!(wave.skipped, 0);

    let mut slots: Vec<SlotId> = wave.placed.iter().map(|&(_, slot)| slot).collect();
    slots.sort();
    slots.dedup();
    assert_eq!(slots.len(), 4);

    // One person, four pledges.
    assert_eq!(s.people_count(), 1);
    assert_eq!(s.total_placed(), 4);

    // Staggered starts settle in order; by 5s everything is done.
    advance(&mut s, &[0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0]);
    assert!(!s.is_animating());
    assert_eq!(s.occupied_count(), 4);
}

#[test]
fn bulk_placement_is_instant_and_unlocks_branches_mid_batch() {
    let mut s = session();
    assert_eq!(s.tree().active_branches, 1);

    let report = s.place_bulk(250).unwrap();
    assert_eq!(report.requested, 250);
    assert_eq!(report.placed, 250);
    assert_eq!(report.total_placed, 250);
    assert_eq!(s.occupied_count(), 250);
    assert_eq!(s.people_count(), 250);
    // 250 placements unlock the third main branch.
    assert_eq!(s.tree().active_branches, 3);
    assert!(!s.is_animating());

    // Growth is monotonic and capped.
    s.place_bulk(400).unwrap();
    assert_eq!(s.tree().active_branches, 5);
}

#[test]
fn bulk_placement_respects_the_cap() {
    let config = SessionConfig {
        max_pledges: 10,
        ..SessionConfig::default()
    };
    let mut s = Session::new(config).unwrap();
    started(s.place_pledge("a", PillarId(0), "", None).unwrap());
    let report = s.place_bulk(50).unwrap();
    assert_eq!(report.placed, 9);
    assert_eq!(report.total_placed, 10);
}

#[test]
fn guided_flow_reserves_traces_and_confirms() {
    let mut s = session();
    advance(&mut s, &[0.0]);

    let pos = s
        .tree()
        .slots
        .iter()
        .find(|sl| sl.selectable(s.tree().active_branches))
        .unwrap()
        .pos;
    let guide = s.begin_guided(pos).unwrap().unwrap();
    assert!(!s.guide_ready(guide));
    assert!(s.is_animating());

    advance(&mut s, &[2.0]);
    assert!(s.guide_ready(guide));

    let (pledge, slot) = started(
        s.confirm_guided(guide, "Ada", PillarId(1), "msg").unwrap(),
    );
    // Grow only, no second stroke; settles within the grow duration.
    advance(&mut s, &[2.1, 4.0]);
    assert!(s.tree().slot(slot).occupied);
    assert_eq!(s.pledges().get(pledge).name, "Ada");

    // The guide is consumed.
    assert!(s.confirm_guided(guide, "x", PillarId(0), "").is_err());
}

#[test]
fn cancel_releases_the_reservation_for_reuse() {
    let mut s = session();
    advance(&mut s, &[0.0]);

    let target = s
        .tree()
        .slots
        .iter()
        .find(|sl| sl.selectable(s.tree().active_branches))
        .unwrap();
    let (pos, slot) = (target.pos, target.id);
    let guide = s.begin_guided(pos).unwrap().unwrap();
    assert!(s.tree().slot(slot).reserved);

    s.cancel_guided(guide).unwrap();
    assert!(!s.tree().slot(slot).reserved);
    assert!(s.cancel_guided(guide).is_err());

    // The same slot is selectable again.
    s.begin_guided(pos).unwrap().unwrap();
    assert!(s.tree().slot(slot).reserved);
}

#[test]
fn guided_far_from_any_slot_returns_none() {
    let mut s = session();
    assert!(s.begin_guided(Point::new(5.0, 995.0)).unwrap().is_none());
}

#[test]
fn chart_modes_compute_their_layout_on_entry() {
    let mut s = session();
    s.place_bulk(40).unwrap();

    s.enter_chart_mode();
    assert!(s.tree().chart_mode);
    assert!(!s.tree().chart_labels.is_empty());
    assert!(
        s.tree()
            .chart_labels
            .iter()
            .all(|l| matches!(l, ChartLabel::Sector { .. }))
    );
    advance(&mut s, &[0.0]);
    assert!(s.tree().chart_blend > 0.0);

    s.exit_chart_mode();
    assert!(!s.tree().chart_mode);

    let config = SessionConfig {
        chart_style: ChartStyle::Cluster,
        ..SessionConfig::default()
    };
    let mut c = Session::new(config).unwrap();
    c.place_bulk(40).unwrap();
    c.enter_chart_mode();
    assert!(
        c.tree()
            .chart_labels
            .iter()
            .all(|l| matches!(l, ChartLabel::Cluster { .. }))
    );
}

#[test]
fn screensaver_round_trip() {
    let mut s = session();
    s.place_bulk(20).unwrap();
    advance(&mut s, &[1.0]);

    s.enter_screensaver();
    assert!(s.tree().screensaver_mode);
    assert!(s.tree().screensaver.is_some());
    advance(&mut s, &[1.1]);
    assert!(s.tree().screensaver_blend > 0.0);

    s.exit_screensaver();
    advance(&mut s, &[1.2]);
    assert!(!s.tree().screensaver_mode);
}

#[test]
fn wind_blends_toward_its_target() {
    let mut s = session();
    s.set_wind(true);
    advance(&mut s, &[0.0, 0.1, 0.2]);
    let strength = s.tree().wind_strength;
    assert!(strength > 0.0);

    s.set_wind(false);
    advance(&mut s, &[0.3]);
    assert!(s.tree().wind_strength < strength);
}

#[test]
fn hit_test_finds_only_occupied_leaves() {
    let mut s = session();
    assert!(s.hit_test_leaf(Point::new(500.0, 500.0)).is_none());

    s.place_bulk(5).unwrap();
    let slot = s.tree().slots.iter().find(|sl| sl.occupied).unwrap();
    let (pos, id) = (slot.pos, slot.id);
    assert_eq!(s.hit_test_leaf(pos), Some(id));

    s.flutter_leaf(id, 3.0);
    assert_eq!(s.tree().slot(id).flutter_start, Some(3.0));
}

#[test]
fn entry_recording_survives_a_failing_sink() {
    struct FailingSink;
    impl EntrySink for FailingSink {
        fn append(&mut self, _: &EntryRecord) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }
        fn count(&self) -> anyhow::Result<usize> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    let mut s = session();
    s.set_entry_sink(Box::new(FailingSink));
    s.record_entry("Ada", "ada@example.com", 1.0);
    s.record_entry("Ben", "", 2.0);
    assert_eq!(s.entry_count(), 2);
}

#[test]
fn entry_recording_uses_the_sink_when_healthy() {
    let mut s = session();
    s.set_entry_sink(Box::new(MemoryEntrySink::new()));
    s.record_entry("Ada", "ada@example.com", 1.0);
    assert_eq!(s.entry_count(), 1);
}

#[test]
fn hide_keeps_reservations_and_reveal_regrows() {
    let mut s = session();
    s.place_bulk(6).unwrap();
    advance(&mut s, &[10.0]);
    assert_eq!(s.occupied_count(), 6);

    let hidden: Vec<SlotId> = s
        .tree()
        .slots
        .iter()
        .filter(|sl| sl.occupied)
        .map(|sl| sl.id)
        .collect();
    s.hide_placed_leaves();
    assert_eq!(s.occupied_count(), 0);
    // Reservations survive, so nothing can steal the hidden slots.
    assert!(hidden.iter().all(|&id| s.tree().slot(id).reserved));
    let (_, fresh) = started(s.place_pledge("Ada", PillarId(0), "", None).unwrap());
    assert!(!hidden.contains(&fresh));

    s.reveal_hidden_leaves(10.0);
    assert!(s.tree().active_branches >= 3);
    assert!(s.is_animating());
    advance(&mut s, &[10.0, 10.5, 11.5, 14.0]);
    assert_eq!(s.occupied_count(), 7);
}

#[test]
fn restore_undoes_a_hide_without_animation() {
    let mut s = session();
    s.place_bulk(4).unwrap();
    s.hide_placed_leaves();
    assert_eq!(s.occupied_count(), 0);
    s.restore_hidden_leaves();
    assert_eq!(s.occupied_count(), 4);
    assert!(!s.is_animating());
}
