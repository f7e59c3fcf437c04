/// A host loop that advances at a fixed number of ticks per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    tps: u32,
}

impl FixedClock {
    /// Returns `None` when `tps` is zero.
    pub fn new(tps: u32) -> Option<Self> {
        (tps > 0).then_some(Self { tps })
    }

    /// Ticks per second.
    #[inline]
    pub fn tps(&self) -> u32 {
        self.tps
    }

    /// Seconds covered by one tick.
    #[inline]
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tps as f64
    }

    /// Clip frames advanced per tick at `fps`.
    #[inline]
    pub(crate) fn frames_per_tick(&self, fps: u32) -> f64 {
        fps as f64 / self.tps as f64
    }
}

impl Default for FixedClock {
    /// 60 ticks per second.
    fn default() -> Self {
        Self { tps: 60 }
    }
}
