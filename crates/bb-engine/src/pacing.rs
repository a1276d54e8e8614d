//! The latency-driven pacing engine.
//!
//! Each answer's correctness and response time nudge a bounded speed
//! multiplier. Positive adjustments are smoothed (committed only every
//! few answers); penalties commit immediately so mistakes feel instant.
//! Phase and difficulty are derived from the committed speed, never
//! stored independently.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::PacingConfig;

/// How many recent response times the engine remembers.
const RESPONSE_WINDOW: usize = 20;

/// Coarse pacing bucket derived from the committed speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Speed below 1.2.
    Warmup,
    /// Speed in `[1.2, 1.5)`.
    Ramping,
    /// Speed at or above 1.5.
    Overdrive,
}

impl Phase {
    /// Difficulty bonus contributed by this phase.
    pub fn bonus(&self) -> u8 {
        match self {
            Self::Warmup => 0,
            Self::Ramping => 1,
            Self::Overdrive => 2,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warmup => write!(f, "warmup"),
            Self::Ramping => write!(f, "ramping"),
            Self::Overdrive => write!(f, "overdrive"),
        }
    }
}

/// Observable pacing state after one processed answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PacingSnapshot {
    /// The committed speed multiplier.
    pub speed: f64,
    /// Pacing phase derived from the committed speed.
    pub phase: Phase,
    /// Difficulty in `[1, 10]` derived from speed and phase.
    pub difficulty: u8,
    /// Total answers processed this session.
    pub questions_answered: u32,
    /// Mean of the recent response-time window, in milliseconds.
    pub avg_response_ms: f64,
}

/// Session-scoped pacing state, mutated only by [`PacingEngine::process_answer`].
///
/// Created at session start and discarded at session end; never persisted.
#[derive(Debug, Clone)]
pub struct PacingEngine {
    config: PacingConfig,
    speed: f64,
    pending_speed: f64,
    answers_since_commit: u32,
    questions_answered: u32,
    peak_speed: f64,
    difficulty: u8,
    responses: VecDeque<u32>,
}

impl PacingEngine {
    /// Create an engine at speed 1.0 in warmup.
    pub fn new(config: PacingConfig) -> Self {
        Self {
            config,
            speed: 1.0,
            pending_speed: 1.0,
            answers_since_commit: 0,
            questions_answered: 0,
            peak_speed: 1.0,
            difficulty: 1,
            responses: VecDeque::with_capacity(RESPONSE_WINDOW),
        }
    }

    /// The committed speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The highest speed committed this session.
    pub fn peak_speed(&self) -> f64 {
        self.peak_speed
    }

    /// Current pacing phase.
    pub fn phase(&self) -> Phase {
        phase_for(self.speed)
    }

    /// Current difficulty in `[1, 10]`.
    ///
    /// Starts at 1 and tracks `floor(speed × 4) + phase bonus` from the
    /// first processed answer onward.
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Total answers processed this session.
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    /// Time allowed for the next question at the committed speed, in ms.
    pub fn allowed_time_ms(&self) -> f64 {
        self.config.base_time_ms / self.speed
    }

    /// The active configuration.
    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    /// Feed one answer outcome into the engine.
    ///
    /// All inputs are clamped, never rejected; the returned snapshot
    /// reflects the committed state after this answer.
    pub fn process_answer(&mut self, correct: bool, response_time_ms: u32) -> PacingSnapshot {
        self.questions_answered += 1;
        self.answers_since_commit += 1;
        if self.responses.len() == RESPONSE_WINDOW {
            self.responses.pop_front();
        }
        self.responses.push_back(response_time_ms);

        let cfg = &self.config;
        let candidate = if correct {
            let ratio = f64::from(response_time_ms) / self.allowed_time_ms();
            if ratio < cfg.speed_up_threshold {
                (self.speed + cfg.speed_increment).min(cfg.max_speed)
            } else if ratio > cfg.slow_down_threshold {
                (self.speed - cfg.speed_decrement).max(cfg.min_speed)
            } else {
                // dead zone
                self.speed
            }
        } else {
            (self.speed * cfg.error_penalty).max(cfg.min_speed)
        };
        self.pending_speed = candidate;

        // Penalties commit instantly; gains only every Nth answer.
        if !correct || self.answers_since_commit >= cfg.commit_interval {
            self.speed = self.pending_speed;
            self.answers_since_commit = 0;
            self.peak_speed = self.peak_speed.max(self.speed);
        }

        self.difficulty = difficulty_for(self.speed, phase_for(self.speed));
        self.snapshot()
    }

    /// Reinitialize to speed 1.0, warmup, difficulty 1, clearing the
    /// response-time window and counters. The configuration is kept.
    pub fn reset(&mut self) {
        self.speed = 1.0;
        self.pending_speed = 1.0;
        self.answers_since_commit = 0;
        self.questions_answered = 0;
        self.peak_speed = 1.0;
        self.difficulty = 1;
        self.responses.clear();
    }

    /// The current observable state.
    pub fn snapshot(&self) -> PacingSnapshot {
        PacingSnapshot {
            speed: self.speed,
            phase: self.phase(),
            difficulty: self.difficulty,
            questions_answered: self.questions_answered,
            avg_response_ms: self.avg_response_ms(),
        }
    }

    fn avg_response_ms(&self) -> f64 {
        if self.responses.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.responses.iter().map(|&ms| u64::from(ms)).sum();
        sum as f64 / self.responses.len() as f64
    }
}

impl Default for PacingEngine {
    fn default() -> Self {
        Self::new(PacingConfig::default())
    }
}

fn phase_for(speed: f64) -> Phase {
    if speed < 1.2 {
        Phase::Warmup
    } else if speed < 1.5 {
        Phase::Ramping
    } else {
        Phase::Overdrive
    }
}

fn difficulty_for(speed: f64, phase: Phase) -> u8 {
    let raw = (speed * 4.0).floor() as i64 + i64::from(phase.bonus());
    raw.clamp(1, 10) as u8
}
