//! The session state machine.
//!
//! `Idle → Ready → Playing → {ContinuePending, GameOver} → Finished`.
//! Classic sessions leave `Playing` when the external clock calls
//! [`GameSession::end`]; endless sessions leave it through the continue
//! negotiation. Finalization is idempotent: the first `end` caches its
//! report and every later call returns the same report without touching
//! the persisted stats again.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use bb_core::{GameMode, MiniGame, ProfileStore};
use bb_engine::{PacingEngine, Phase, Tier, game_params, resolve_tier};
use bb_games::{Question, generate};

use crate::config::SessionConfig;
use crate::economy;
use crate::error::{SessionError, SessionResult};
use crate::provider::{AdProvider, FeedbackSink, HapticKind, NullFeedback, SoundKind};
use crate::scoring::{self, SessionReport, SessionTally};

/// Immutable record of a run-ending wrong answer in endless mode.
///
/// Carried inside [`SessionPhase::ContinuePending`] and consumed exactly
/// once when the continue resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeath {
    /// Streak at the moment of the fatal answer, restored on continue.
    pub streak: u32,
    /// Mini-game the fatal answer was given in.
    pub game: MiniGame,
    /// Question number of the fatal answer.
    pub at_question: u32,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, not yet started.
    Idle,
    /// Started; the UI is counting down.
    Ready,
    /// Accepting answers.
    Playing,
    /// An endless run hit a wrong answer; the second-chance offer is open.
    ContinuePending(PendingDeath),
    /// The run is over but not yet finalized.
    GameOver,
    /// Finalized; stats are merged and the report is cached.
    Finished,
}

impl SessionPhase {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::ContinuePending(_) => "continue_pending",
            Self::GameOver => "game_over",
            Self::Finished => "finished",
        }
    }
}

/// Pacing readout returned to the UI after each answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerFeedback {
    /// Streak-derived difficulty tier.
    pub tier: Tier,
    /// Latency-derived pacing phase.
    pub phase: Phase,
    /// Difficulty in `[1, 10]`.
    pub difficulty: u8,
    /// Committed speed multiplier.
    pub speed: f64,
    /// The mini-game the next question comes from.
    pub next_game: MiniGame,
}

/// How the player (or the countdown timer) resolves a pending continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    /// Watch a rewarded ad.
    Ad,
    /// Spend XP.
    Xp,
    /// End the run.
    Decline,
}

/// What a continue resolution led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueResolution {
    /// The run resumes with the pre-death streak restored.
    Resumed,
    /// The run is over; call [`GameSession::end`] to finalize.
    Ended,
}

/// One run of the game, from start to finalized report.
pub struct GameSession {
    id: Uuid,
    config: SessionConfig,
    pool: Vec<MiniGame>,
    phase: SessionPhase,
    pacing: PacingEngine,
    tally: SessionTally,
    current_game: MiniGame,
    continue_used: bool,
    rng: StdRng,
    started_at: Option<DateTime<Utc>>,
    report: Option<SessionReport>,
    feedback: Box<dyn FeedbackSink>,
}

impl GameSession {
    /// Create a session. Rejects a configuration whose enabled-games set
    /// contains nothing from the mixable pool.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        let pool = config.mixable_games();
        let Some(&first) = pool.first() else {
            return Err(SessionError::NoMixableGames);
        };
        let pacing = PacingEngine::new(config.pacing.clone());
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            pool,
            phase: SessionPhase::Idle,
            pacing,
            tally: SessionTally::default(),
            current_game: first,
            continue_used: false,
            rng,
            started_at: None,
            report: None,
            feedback: Box::new(NullFeedback),
        })
    }

    /// Attach an audio/haptic sink.
    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Unique id of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The session's mode.
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Live counters.
    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    /// The pacing engine (read access).
    pub fn pacing(&self) -> &PacingEngine {
        &self.pacing
    }

    /// The mini-game the next question comes from.
    pub fn current_game(&self) -> MiniGame {
        self.current_game
    }

    /// Current streak-derived tier.
    pub fn tier(&self) -> Tier {
        resolve_tier(self.tally.streak, self.config.mode)
    }

    /// Begin the session: resets pacing and tallies, picks the opening
    /// mini-game, and waits in `Ready` for the countdown to elapse.
    pub fn start(&mut self) -> SessionResult<MiniGame> {
        if self.phase != SessionPhase::Idle {
            return Err(self.bad_transition("start"));
        }
        self.pacing.reset();
        self.tally = SessionTally::default();
        self.current_game = self.pool[self.rng.random_range(0..self.pool.len())];
        self.started_at = Some(Utc::now());
        self.phase = SessionPhase::Ready;
        Ok(self.current_game)
    }

    /// The countdown elapsed; start accepting answers.
    pub fn begin_play(&mut self) -> SessionResult<()> {
        if self.phase != SessionPhase::Ready {
            return Err(self.bad_transition("begin_play"));
        }
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Generate the next question for the active mini-game at the
    /// current tier.
    pub fn next_question(&mut self) -> SessionResult<Question> {
        if self.phase != SessionPhase::Playing {
            return Err(self.bad_transition("next_question"));
        }
        let params = game_params(self.tier(), self.current_game);
        Ok(generate(self.current_game, &params, &mut self.rng))
    }

    /// Feed one answer into the session.
    ///
    /// Updates pacing, score, and streak; rotates the mini-game; in
    /// endless mode a wrong answer opens the continue negotiation (or
    /// ends the run if the one-time continue is spent).
    pub fn on_answer(
        &mut self,
        correct: bool,
        response_time_ms: u32,
    ) -> SessionResult<AnswerFeedback> {
        if self.phase != SessionPhase::Playing {
            return Err(self.bad_transition("answer"));
        }

        let tier_before = self.tier();
        let snapshot = self.pacing.process_answer(correct, response_time_ms);

        if correct {
            let points = (10.0 * snapshot.speed).round() as u64;
            self.tally.record_correct(self.current_game, points);
            self.feedback.play_sound(SoundKind::Correct);
            if self.tier() > tier_before {
                self.feedback.play_sound(SoundKind::TierUp);
                self.feedback.trigger_haptic(HapticKind::Light);
            }
        } else {
            let death = PendingDeath {
                streak: self.tally.streak,
                game: self.current_game,
                at_question: snapshot.questions_answered,
            };
            self.tally.record_wrong();
            self.feedback.play_sound(SoundKind::Wrong);
            self.feedback.trigger_haptic(HapticKind::Heavy);

            if self.config.mode == GameMode::Endless {
                if self.continue_used {
                    self.feedback.play_sound(SoundKind::GameOver);
                    self.phase = SessionPhase::GameOver;
                } else {
                    self.phase = SessionPhase::ContinuePending(death);
                }
            }
        }

        if self.phase == SessionPhase::Playing {
            self.current_game = self.pool[self.rng.random_range(0..self.pool.len())];
        }

        Ok(AnswerFeedback {
            tier: self.tier(),
            phase: snapshot.phase,
            difficulty: snapshot.difficulty,
            speed: snapshot.speed,
            next_game: self.current_game,
        })
    }

    /// The pending-death record, if a continue is open.
    pub fn pending_death(&self) -> Option<PendingDeath> {
        match self.phase {
            SessionPhase::ContinuePending(death) => Some(death),
            _ => None,
        }
    }

    /// Resolve the continue negotiation.
    ///
    /// The ad path absorbs provider failure as a grant (policy, see
    /// [`crate::provider::AdOutcome::absorb_failure`]); the XP path fails
    /// without consuming the offer if the balance is short. A grant
    /// restores the pre-death streak and resumes play. The continue does
    /// not touch the ad gate's counter.
    pub fn resolve_continue(
        &mut self,
        choice: ContinueChoice,
        provider: &mut dyn AdProvider,
        profile: &mut ProfileStore,
    ) -> SessionResult<ContinueResolution> {
        let SessionPhase::ContinuePending(death) = self.phase else {
            return Err(SessionError::NoPendingContinue);
        };

        let granted = match choice {
            ContinueChoice::Decline => false,
            ContinueChoice::Ad => provider.show_rewarded().is_granted(),
            ContinueChoice::Xp => {
                let cost = self.config.continue_cost;
                profile.update_stats(|stats| economy::spend_xp(stats, cost))??;
                true
            }
        };

        if granted {
            // Undo the fatal answer's effect on the streak; score and
            // wrong count stand.
            self.tally.streak = death.streak;
            self.continue_used = true;
            self.phase = SessionPhase::Playing;
            self.current_game = self.pool[self.rng.random_range(0..self.pool.len())];
            Ok(ContinueResolution::Resumed)
        } else {
            self.feedback.play_sound(SoundKind::GameOver);
            self.phase = SessionPhase::GameOver;
            Ok(ContinueResolution::Ended)
        }
    }

    /// End the run without finalizing.
    ///
    /// Called by the player's end-run action or by the continue
    /// countdown timer expiring; both are treated identically to an
    /// explicit decline.
    pub fn end_run(&mut self) -> SessionResult<()> {
        match self.phase {
            SessionPhase::Playing | SessionPhase::ContinuePending(_) => {
                self.feedback.play_sound(SoundKind::GameOver);
                self.phase = SessionPhase::GameOver;
                Ok(())
            }
            SessionPhase::GameOver => Ok(()),
            _ => Err(self.bad_transition("end_run")),
        }
    }

    /// Finalize the session on the given calendar date.
    ///
    /// Merges the tally into the persisted stats, counts the session
    /// toward the ad gate, and caches the report. Idempotent: duplicate
    /// termination events get the cached report back and accrue nothing.
    pub fn end_on(
        &mut self,
        today: NaiveDate,
        explicit_xp: Option<u64>,
        profile: &mut ProfileStore,
    ) -> SessionResult<SessionReport> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        match self.phase {
            SessionPhase::Idle | SessionPhase::Ready => return Err(SessionError::NotStarted),
            SessionPhase::Playing
            | SessionPhase::ContinuePending(_)
            | SessionPhase::GameOver => {}
            // Unreachable while the report cache is empty.
            SessionPhase::Finished => return Err(self.bad_transition("end")),
        }

        let mode = self.config.mode;
        let tally = &self.tally;
        let (xp_gained, is_new_high_score) =
            profile.update_stats(|stats| scoring::finalize(tally, mode, today, explicit_xp, stats))?;
        profile.update_ads(economy::record_session)?;

        let duration_secs = self
            .started_at
            .map(|t| (Utc::now() - t).num_seconds().max(0) as u64)
            .unwrap_or(0);

        let report = SessionReport {
            mode,
            score: self.tally.score,
            streak: self.tally.best_streak,
            correct: self.tally.correct,
            wrong: self.tally.wrong,
            xp_gained,
            is_new_high_score,
            duration_secs,
        };
        self.report = Some(report.clone());
        self.phase = SessionPhase::Finished;
        Ok(report)
    }

    /// Finalize the session dated today (local calendar).
    pub fn end(
        &mut self,
        explicit_xp: Option<u64>,
        profile: &mut ProfileStore,
    ) -> SessionResult<SessionReport> {
        self.end_on(Local::now().date_naive(), explicit_xp, profile)
    }

    fn bad_transition(&self, event: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            event,
            phase: self.phase.name(),
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("mode", &self.config.mode)
            .field("phase", &self.phase)
            .field("tally", &self.tally)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{AdOutcome, GrantingProvider};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    struct Scripted(AdOutcome);

    impl AdProvider for Scripted {
        fn show_interstitial(&mut self) -> AdOutcome {
            self.0
        }
        fn show_rewarded(&mut self) -> AdOutcome {
            self.0
        }
    }

    fn playing(mode: GameMode) -> GameSession {
        let mut session = GameSession::new(SessionConfig::new(mode)).unwrap();
        session.start().unwrap();
        session.begin_play().unwrap();
        session
    }

    fn fast_ms(session: &GameSession) -> u32 {
        (session.pacing().allowed_time_ms() * 0.1) as u32
    }

    #[test]
    fn rejects_empty_pool() {
        let cfg = SessionConfig::new(GameMode::Classic).with_games(vec![]);
        assert!(matches!(
            GameSession::new(cfg),
            Err(SessionError::NoMixableGames)
        ));
    }

    #[test]
    fn answer_requires_playing_phase() {
        let mut session = GameSession::new(SessionConfig::new(GameMode::Classic)).unwrap();
        assert!(session.on_answer(true, 1000).is_err());
        session.start().unwrap();
        assert!(session.on_answer(true, 1000).is_err());
        session.begin_play().unwrap();
        assert!(session.on_answer(true, 1000).is_ok());
    }

    #[test]
    fn classic_wrong_answer_keeps_playing() {
        let mut session = playing(GameMode::Classic);
        session.on_answer(true, 1000).unwrap();
        session.on_answer(false, 1000).unwrap();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.tally().streak, 0);
        assert_eq!(session.tally().wrong, 1);
    }

    #[test]
    fn endless_wrong_answer_opens_continue() {
        let mut session = playing(GameMode::Endless);
        for _ in 0..7 {
            session.on_answer(true, 1000).unwrap();
        }
        session.on_answer(false, 1000).unwrap();

        let death = session.pending_death().expect("continue should be open");
        assert_eq!(death.streak, 7);
        assert_eq!(session.tally().streak, 0);
    }

    #[test]
    fn continue_with_xp_restores_streak() {
        let mut profile = ProfileStore::in_memory();
        profile.update_stats(|s| s.total_xp = 150).unwrap();

        let mut session = playing(GameMode::Endless);
        for _ in 0..7 {
            session.on_answer(true, 1000).unwrap();
        }
        session.on_answer(false, 1000).unwrap();

        let res = session
            .resolve_continue(ContinueChoice::Xp, &mut GrantingProvider, &mut profile)
            .unwrap();
        assert_eq!(res, ContinueResolution::Resumed);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.tally().streak, 7);
        assert_eq!(profile.stats().total_xp, 50);
        // The continue never touches the gate counter.
        assert_eq!(profile.ads().games_since_last_ad, 0);
    }

    #[test]
    fn continue_with_insufficient_xp_is_rejected() {
        let mut profile = ProfileStore::in_memory();
        profile.update_stats(|s| s.total_xp = 30).unwrap();

        let mut session = playing(GameMode::Endless);
        session.on_answer(false, 1000).unwrap();

        let err = session
            .resolve_continue(ContinueChoice::Xp, &mut GrantingProvider, &mut profile)
            .unwrap_err();
        assert!(matches!(err, SessionError::InsufficientXp { .. }));
        // Balance untouched, offer still open.
        assert_eq!(profile.stats().total_xp, 30);
        assert!(session.pending_death().is_some());
    }

    #[test]
    fn continue_via_failing_ad_is_granted() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Endless);
        for _ in 0..3 {
            session.on_answer(true, 1000).unwrap();
        }
        session.on_answer(false, 1000).unwrap();

        let res = session
            .resolve_continue(
                ContinueChoice::Ad,
                &mut Scripted(AdOutcome::Failed),
                &mut profile,
            )
            .unwrap();
        assert_eq!(res, ContinueResolution::Resumed);
        assert_eq!(session.tally().streak, 3);
    }

    #[test]
    fn continue_via_declined_ad_ends_run() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Endless);
        session.on_answer(false, 1000).unwrap();

        let res = session
            .resolve_continue(
                ContinueChoice::Ad,
                &mut Scripted(AdOutcome::Declined),
                &mut profile,
            )
            .unwrap();
        assert_eq!(res, ContinueResolution::Ended);
        assert_eq!(session.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn continue_is_one_time() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Endless);

        session.on_answer(false, 1000).unwrap();
        session
            .resolve_continue(ContinueChoice::Ad, &mut GrantingProvider, &mut profile)
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Playing);

        // Second death ends the run outright.
        session.on_answer(false, 1000).unwrap();
        assert_eq!(session.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn timer_expiry_matches_explicit_decline() {
        let mut session = playing(GameMode::Endless);
        session.on_answer(false, 1000).unwrap();
        session.end_run().unwrap();
        assert_eq!(session.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn finalize_merges_and_is_idempotent() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Classic);
        for _ in 0..6 {
            session.on_answer(true, 1000).unwrap();
        }

        let report = session.end_on(today(), None, &mut profile).unwrap();
        assert_eq!(report.correct, 6);
        assert_eq!(report.streak, 6);
        // 6*10 + floor(6/5)*25
        assert_eq!(report.xp_gained, 85);
        assert!(report.is_new_high_score);
        assert_eq!(profile.stats().total_games_played, 1);
        assert_eq!(profile.ads().games_since_last_ad, 1);

        // A duplicate termination event accrues nothing.
        let again = session.end_on(today(), None, &mut profile).unwrap();
        assert_eq!(again, report);
        assert_eq!(profile.stats().total_games_played, 1);
        assert_eq!(profile.stats().total_xp, 85);
        assert_eq!(profile.ads().games_since_last_ad, 1);
    }

    #[test]
    fn explicit_xp_overrides_formula() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Classic);
        session.on_answer(true, 1000).unwrap();

        let report = session.end_on(today(), Some(777), &mut profile).unwrap();
        assert_eq!(report.xp_gained, 777);
        assert_eq!(profile.stats().total_xp, 777);
    }

    #[test]
    fn finalize_from_continue_pending_acts_as_decline() {
        let mut profile = ProfileStore::in_memory();
        let mut session = playing(GameMode::Endless);
        for _ in 0..4 {
            session.on_answer(true, 1000).unwrap();
        }
        session.on_answer(false, 1000).unwrap();

        let report = session.end_on(today(), None, &mut profile).unwrap();
        assert_eq!(report.streak, 4);
        assert_eq!(profile.stats().endless_best_streak, 4);
        assert_eq!(session.phase(), SessionPhase::Finished);
    }

    #[test]
    fn finalize_before_start_errors() {
        let mut profile = ProfileStore::in_memory();
        let mut session = GameSession::new(SessionConfig::new(GameMode::Classic)).unwrap();
        assert!(matches!(
            session.end_on(today(), None, &mut profile),
            Err(SessionError::NotStarted)
        ));
    }

    #[test]
    fn rotation_stays_within_enabled_pool() {
        let pool = vec![MiniGame::QuickMath, MiniGame::ColorMatch];
        let cfg = SessionConfig::new(GameMode::Classic).with_games(pool.clone());
        let mut session = GameSession::new(cfg).unwrap();
        session.start().unwrap();
        session.begin_play().unwrap();

        for _ in 0..30 {
            let feedback = session.on_answer(true, 1000).unwrap();
            assert!(pool.contains(&feedback.next_game));
        }
    }

    #[test]
    fn questions_come_from_the_active_game() {
        let cfg = SessionConfig::new(GameMode::Classic).with_games(vec![MiniGame::QuickMath]);
        let mut session = GameSession::new(cfg).unwrap();
        session.start().unwrap();
        session.begin_play().unwrap();

        let q = session.next_question().unwrap();
        assert!(!q.options.is_empty());
        assert!(q.answer < q.options.len());
    }

    #[test]
    fn score_scales_with_committed_speed() {
        let mut session = playing(GameMode::Classic);
        // At speed 1.0 a correct answer is worth 10.
        let fast = fast_ms(&session);
        session.on_answer(true, fast).unwrap();
        assert_eq!(session.tally().score, 10);
    }

    #[test]
    fn tier_rises_with_streak() {
        let mut session = playing(GameMode::Endless);
        assert_eq!(session.tier().value(), 1);
        for _ in 0..3 {
            session.on_answer(true, 1000).unwrap();
        }
        assert_eq!(session.tier().value(), 2);
    }
}
