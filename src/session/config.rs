use crate::{
    animation::scheduler::TransitionRates,
    foundation::error::{CanopyError, CanopyResult},
    pledge::model::Pillar,
};

/// Which chart layout `enter_chart_mode` computes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChartStyle {
    /// Radial pillar chart: proportional sectors of concentric arcs.
    #[default]
    Radial,
    /// Organic cluster chart: jittered spirals around quadrant centers.
    Cluster,
}

/// Animation durations in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Durations {
    /// Stroke trace of the pledge flow.
    pub stroke: f64,
    /// Stroke trace of the guided flow.
    pub guided_stroke: f64,
    /// Smooth leaf grow.
    pub grow: f64,
    /// Elastic leaf grow used by the reveal wave.
    pub bouncy_grow: f64,
    /// Delay between staggered per-pillar placements.
    pub pillar_stagger: f64,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            stroke: 1.0,
            guided_stroke: 1.5,
            grow: 1.2,
            bouncy_grow: 2.7,
            pillar_stagger: 0.4,
        }
    }
}

/// Session configuration: tree seed, capacity, pillar table, chart style and
/// animation timing.
///
/// Validated once at session construction; a default config produces the
/// reference tree (seed 42, cap 5000, four pillars).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SessionConfig {
    /// Seed the tree is regenerated from on every session start.
    pub seed: u64,
    /// Global maximum number of placed pledges.
    pub max_pledges: usize,
    /// Chart layout computed on chart entry.
    pub chart_style: ChartStyle,
    /// Pledge categories; pledges reference these by index.
    pub pillars: Vec<Pillar>,
    /// Animation durations.
    pub durations: Durations,
    /// Per-frame blend increments.
    pub rates: TransitionRates,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_pledges: 5000,
            chart_style: ChartStyle::default(),
            pillars: Pillar::default_set(),
            durations: Durations::default(),
            rates: TransitionRates::default(),
        }
    }
}

impl SessionConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> CanopyResult<()> {
        if self.pillars.is_empty() {
            return Err(CanopyError::validation("config must declare at least one pillar"));
        }
        if self.max_pledges == 0 {
            return Err(CanopyError::validation("max_pledges must be > 0"));
        }
        let durations = [
            self.durations.stroke,
            self.durations.guided_stroke,
            self.durations.grow,
            self.durations.bouncy_grow,
        ];
        if durations.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(CanopyError::validation(
                "animation durations must be finite and > 0",
            ));
        }
        if !self.durations.pillar_stagger.is_finite() || self.durations.pillar_stagger < 0.0 {
            return Err(CanopyError::validation(
                "pillar_stagger must be finite and >= 0",
            ));
        }
        let rates = [
            self.rates.chart,
            self.rates.wind,
            self.rates.screensaver_in,
            self.rates.screensaver_out,
        ];
        if rates.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err(CanopyError::validation(
                "transition rates must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
