/// Elapsed time for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame (after clamping).
    pub dt: f32,
    /// `dt` expressed in reference ticks (`dt * reference_rate`).
    /// Per-tick speeds multiplied by this give frame-rate independent motion.
    pub ticks: f32,
    /// Frames elapsed since start.
    pub frame: u64,
}

/// Variable-step frame clock.
///
/// Animation speeds are authored "per tick" of a reference display
/// (60 Hz). The clock converts real frame deltas into reference ticks so
/// motion looks identical on 60 Hz, 120 Hz or 144 Hz displays.
pub struct FrameClock {
    /// Reference tick rate in Hz.
    reference_rate: f32,
    /// Largest accepted frame delta in seconds.
    max_dt: f32,
    frame: u64,
    elapsed: f64,
}

impl FrameClock {
    pub fn new(reference_rate: f32, max_dt: f32) -> Self {
        Self {
            reference_rate,
            max_dt,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Consume one frame delta. Negative or NaN deltas count as zero and
    /// deltas above `max_dt` are clamped (tab returning from background).
    pub fn advance(&mut self, frame_dt: f32) -> FrameTime {
        let dt = if frame_dt.is_nan() { 0.0 } else { frame_dt.clamp(0.0, self.max_dt) };
        self.frame += 1;
        self.elapsed += dt as f64;
        FrameTime {
            dt,
            ticks: dt * self.reference_rate,
            frame: self.frame,
        }
    }

    /// Total accepted time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reference_rate(&self) -> f32 {
        self.reference_rate
    }
}
