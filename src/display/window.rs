//! Incremental "load more" window over a sorted list.

/// Number of posts revealed per load.
pub const POSTS_PER_LOAD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    shown: usize,
    total: usize,
    step: usize,
}

impl Window {
    /// First window over `total` items, revealing `step` at a time.
    ///
    /// A zero step is treated as one.
    pub fn new(total: usize, step: usize) -> Self {
        let step = step.max(1);
        Self {
            shown: step.min(total),
            total,
            step,
        }
    }

    pub const fn shown(&self) -> usize {
        self.shown
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn has_more(&self) -> bool {
        self.shown < self.total
    }

    /// Reveal the next step, clamped at the total.
    pub fn load_more(&mut self) {
        self.shown = (self.shown + self.step).min(self.total);
    }

    /// Apply `loads` further loads.
    pub fn advance(mut self, loads: usize) -> Self {
        for _ in 0..loads {
            if !self.has_more() {
                break;
            }
            self.load_more();
        }
        self
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.shown.min(items.len())]
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(0, POSTS_PER_LOAD)
    }
}
