use std::path::Path;

use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bb_session::{
    ContinueChoice, ContinueResolution, GameSession, GrantingProvider, SessionConfig, SessionPhase,
    economy,
};

pub fn run(
    profile_path: &Path,
    mode: &str,
    questions: u32,
    seed: u64,
    skill: f64,
    verbose: bool,
) -> Result<(), String> {
    let mode = super::parse_mode(mode)?;
    let skill = skill.clamp(0.0, 1.0);
    let mut profile = super::open_profile(profile_path);

    let config = SessionConfig::new(mode).with_seed(seed);
    let mut session = GameSession::new(config).map_err(|e| e.to_string())?;
    session.start().map_err(|e| e.to_string())?;
    session.begin_play().map_err(|e| e.to_string())?;

    // Separate RNG for the bot so its play never perturbs question
    // generation for a given seed.
    let mut bot = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut provider = GrantingProvider;

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({mode} mode, {questions} questions, seed={seed}, skill={skill})").dimmed()
    );

    for number in 1..=questions {
        if session.phase() != SessionPhase::Playing {
            break;
        }

        let game = session.current_game();
        let question = session.next_question().map_err(|e| e.to_string())?;
        let correct = bot.random_bool(skill);
        let latency_ms =
            (session.pacing().allowed_time_ms() * bot.random_range(0.15..0.85)) as u32;

        let feedback = session
            .on_answer(correct, latency_ms)
            .map_err(|e| e.to_string())?;

        if verbose {
            let mark = if correct {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "  {} {mark} [{game}] {} {}",
                format!("[q{number:>3}]").dimmed(),
                question.prompt,
                format!(
                    "(tier {}, {} d{}, x{:.2})",
                    feedback.tier.value(),
                    feedback.phase,
                    feedback.difficulty,
                    feedback.speed
                )
                .dimmed()
            );
        }

        if session.pending_death().is_some() {
            if verbose {
                println!("  {}", "continue offered — watching rewarded ad".yellow());
            }
            let resolution = session
                .resolve_continue(ContinueChoice::Ad, &mut provider, &mut profile)
                .map_err(|e| e.to_string())?;
            if resolution == ContinueResolution::Ended {
                break;
            }
        }
    }

    let report = session.end(None, &mut profile).map_err(|e| e.to_string())?;

    println!();
    println!("  {}", "Session Report".bold().underline());
    println!("  Score:       {}", report.score);
    println!("  Best streak: {}", report.streak);
    println!("  Answers:     {} correct, {} wrong", report.correct, report.wrong);
    println!("  XP gained:   {}", report.xp_gained);
    if report.is_new_high_score {
        println!("  {}", "New high score!".green().bold());
    }
    println!("  Duration:    {}s", report.duration_secs);

    if economy::should_gate(profile.ads(), mode) {
        println!();
        println!("  {}", "Ad break: showing interstitial...".yellow());
        profile
            .update_ads(|ads| economy::watch_ad(&mut GrantingProvider, ads))
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
