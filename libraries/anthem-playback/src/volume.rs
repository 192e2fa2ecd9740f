//! Volume control with logarithmic scaling
//!
//! Volume level is 0.0-1.0, mapped to -60 dB..0 dB internally so slider
//! movement matches perceived loudness. Mute is independent of the stored
//! level: muting never changes it, and unmuting restores it exactly.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Cached linear gain multiplier
    linear_gain: f32,
}

impl Volume {
    /// Create a new volume controller at the given level
    pub fn new(level: f32) -> Self {
        let level = level.clamp(0.0, 1.0);
        Self {
            level,
            muted: false,
            linear_gain: Self::calculate_linear_gain(level),
        }
    }

    /// Set volume level (clamped to 0.0-1.0)
    ///
    /// Raising the level above zero while muted implicitly unmutes.
    pub fn set_level(&mut self, level: f32) {
        self.level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        if self.level > 0.0 && self.muted {
            self.muted = false;
        }
        self.linear_gain = Self::calculate_linear_gain(self.level);
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state without touching the level
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective gain multiplier for the media element
    ///
    /// Returns 0.0 while muted, otherwise the logarithmic gain for the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.linear_gain
        }
    }

    /// Convert level fraction to linear gain
    ///
    /// Maps 0.0-1.0 onto -60 dB..0 dB, then to linear: gain = 10^(dB/20)
    /// - 0.0 → silence
    /// - 0.5 → -30 dB → 0.0316
    /// - 1.0 →   0 dB → 1.0 (unity)
    fn calculate_linear_gain(level: f32) -> f32 {
        if level <= 0.0 {
            return 0.0;
        }
        let db = (level - 1.0) * 60.0;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
