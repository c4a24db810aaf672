//! Frame clock for UI effects.
//!
//! `draw_web()` runs at the browser's frame rate with a variable delta.
//! FrameClock turns `performance.now()` timestamps into the elapsed
//! milliseconds handed to running effects, clamped so a backgrounded tab does
//! not fast-forward a transition in one frame.

/// Upper bound for a single frame's delta.
const MAX_FRAME_MS: f64 = 500.0;

pub struct FrameClock {
    /// Timestamp of the last update (ms), None before the first frame.
    last_timestamp: Option<f64>,
    /// Sub-millisecond remainder carried into the next frame.
    carry: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            carry: 0.0,
        }
    }

    /// Feed the frame's timestamp; returns whole milliseconds since the last call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        let total = self.carry + delta;
        let whole = total.floor();
        self.carry = total - whole;
        whole as u32
    }
}

/// `performance.now()` of the running page, 0 where unavailable.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
