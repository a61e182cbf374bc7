/// Seeded linear-congruential generator.
///
/// Every procedural decision in the engine derives from one of these, so a
/// given seed and call sequence always reproduce the same values. Call order
/// matters: reordering calls changes all subsequent output. Independent
/// subsystems (tree generation, cluster layout, screensaver layout, placement
/// selection) each own their own instance so their streams stay independent.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u64,
}

const MASK_31: u64 = 0x7FFF_FFFF;

impl SeededRng {
    /// Build a generator from a seed; only the low 31 bits are used.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed & MASK_31,
        }
    }

    /// Next float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223)
            & MASK_31;
        self.state as f64 / MASK_31 as f64
    }

    /// Uniform float in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Uniform integer in `[min, max]` (inclusive).
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        (min as f64 + self.next() * (max - min + 1) as f64).floor() as i64
    }

    /// Uniform choice from a slice; `None` when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = ((self.next() * items.len() as f64) as usize).min(items.len() - 1);
        Some(&items[idx])
    }

    /// Uniform index into a collection of `len` items; `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(((self.next() * len as f64) as usize).min(len - 1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
