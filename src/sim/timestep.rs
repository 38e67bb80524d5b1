//! Frame timestamp to simulation delta conversion

use crate::consts::REFERENCE_FRAME_MS;

/// Turns successive animation-frame timestamps into clamped deltas
#[derive(Debug, Clone)]
pub struct TimeStep {
    last_ms: Option<f64>,
    max_delta_ms: f32,
}

impl TimeStep {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Record `now_ms` and return the elapsed milliseconds since the previous call.
    ///
    /// The first call after construction or [`reset`](Self::reset) returns 0.
    /// Clocks running backwards yield 0, and long stalls are capped.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_delta(delta, self.max_delta_ms)
    }

    /// Forget the previous timestamp (next frame is a first frame again)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Clamp a raw delta into `[0, max_delta_ms]`; NaN becomes 0
#[inline]
pub fn clamp_delta(delta_ms: f32, max_delta_ms: f32) -> f32 {
    if delta_ms > 0.0 {
        delta_ms.min(max_delta_ms)
    } else {
        0.0
    }
}

/// Motion multiplier for a frame: 1.0 at exactly 60 Hz, never negative
#[inline]
pub fn frame_scale(delta_ms: f32) -> f32 {
    if delta_ms > 0.0 {
        delta_ms / REFERENCE_FRAME_MS
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut ts = TimeStep::new(250.0);
        assert_eq!(ts.advance(123_456.0), 0.0);
        assert!((ts.advance(123_472.0) - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_clock_clamps_to_zero() {
        let mut ts = TimeStep::new(250.0);
        ts.advance(1000.0);
        assert_eq!(ts.advance(990.0), 0.0);
        assert_eq!(frame_scale(-5.0), 0.0);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut ts = TimeStep::new(250.0);
        ts.advance(0.0);
        assert_eq!(ts.advance(5_000.0), 250.0);
    }

    #[test]
    fn test_reset_restores_first_frame() {
        let mut ts = TimeStep::new(250.0);
        ts.advance(0.0);
        ts.advance(16.0);
        ts.reset();
        assert_eq!(ts.advance(10_000.0), 0.0);
    }

    #[test]
    fn test_scale_is_refresh_rate_independent() {
        // Two 30 Hz frames cover the same ground as four 60 Hz frames
        let at_30 = frame_scale(1000.0 / 30.0) * 2.0;
        let at_60 = frame_scale(1000.0 / 60.0) * 4.0;
        assert!((at_30 - at_60).abs() < 1e-4);
        assert!((frame_scale(REFERENCE_FRAME_MS) - 1.0).abs() < 1e-6);
    }
}
