//! Exponentially-weighted moving average for per-resolver RTT tracking.

/// Decay constant for RTT averages. The newest sample receives weight
/// `2 / (RTT_EWMA_DECAY + 1)`.
pub const RTT_EWMA_DECAY: f64 = 10.0;

/// Online moving average over f64 samples (milliseconds in practice).
///
/// `value()` is negative until the first `set()` or `add()`, which lets
/// callers distinguish "never measured" from a genuine estimate.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    value: Option<f64>,
    smoothing: f64,
}

impl MovingAverage {
    pub fn new(decay: f64) -> Self {
        Self {
            value: None,
            smoothing: 2.0 / (decay + 1.0),
        }
    }

    /// Replace the current estimate.
    pub fn set(&mut self, sample: f64) {
        self.value = Some(sample);
    }

    /// Fold one sample into the estimate. The first sample seeds it.
    pub fn add(&mut self, sample: f64) {
        match self.value {
            Some(v) => self.value = Some(v + self.smoothing * (sample - v)),
            None => self.value = Some(sample),
        }
    }

    /// Current estimate, or -1.0 when no sample has been recorded yet.
    pub fn value(&self) -> f64 {
        self.value.unwrap_or(-1.0)
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(RTT_EWMA_DECAY)
    }
}
