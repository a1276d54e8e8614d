//! Tunable pacing parameters.

/// Configuration for the pacing engine.
///
/// All thresholds are tunable; the defaults are the shipped values.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    /// Nominal time allowed per question at speed 1.0, in milliseconds.
    pub base_time_ms: f64,
    /// Lower bound on the speed multiplier.
    pub min_speed: f64,
    /// Upper bound on the speed multiplier.
    pub max_speed: f64,
    /// Response ratio below which a correct answer speeds the game up.
    pub speed_up_threshold: f64,
    /// Response ratio above which a correct answer slows the game down.
    /// Between the two thresholds is a dead zone to avoid oscillation.
    pub slow_down_threshold: f64,
    /// Additive speed gain on a fast correct answer.
    pub speed_increment: f64,
    /// Additive speed loss on a slow correct answer.
    pub speed_decrement: f64,
    /// Multiplicative penalty on any wrong answer, independent of latency.
    pub error_penalty: f64,
    /// Positive adjustments are committed only every this-many answers.
    /// Penalties always commit immediately.
    pub commit_interval: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_time_ms: 5000.0,
            min_speed: 0.5,
            max_speed: 2.5,
            speed_up_threshold: 0.30,
            slow_down_threshold: 0.80,
            speed_increment: 0.05,
            speed_decrement: 0.05,
            error_penalty: 0.90,
            commit_interval: 3,
        }
    }
}

impl PacingConfig {
    /// Set the nominal per-question time in milliseconds.
    pub fn with_base_time_ms(mut self, ms: f64) -> Self {
        self.base_time_ms = ms.max(1.0);
        self
    }

    /// Set the speed bounds. `min` is clamped below `max`.
    pub fn with_speed_range(mut self, min: f64, max: f64) -> Self {
        self.min_speed = min.min(max);
        self.max_speed = max;
        self
    }

    /// Set how many answers elapse between positive commits (min 1).
    pub fn with_commit_interval(mut self, interval: u32) -> Self {
        self.commit_interval = interval.max(1);
        self
    }
}
