use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use bb_core::MiniGame;

pub fn run(profile_path: &Path) -> Result<(), String> {
    let profile = super::open_profile(profile_path);
    let stats = profile.stats();
    let ads = profile.ads();

    println!("  {}", "Player Profile".bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);
    table.add_row(vec![
        "Classic high score".to_string(),
        stats.classic_high_score.to_string(),
    ]);
    table.add_row(vec![
        "Endless best streak".to_string(),
        stats.endless_best_streak.to_string(),
    ]);
    table.add_row(vec!["Total XP".to_string(), stats.total_xp.to_string()]);
    table.add_row(vec![
        "Games played".to_string(),
        stats.total_games_played.to_string(),
    ]);
    table.add_row(vec![
        "Correct answers".to_string(),
        stats.total_correct_answers.to_string(),
    ]);
    table.add_row(vec![
        "Correct per game".to_string(),
        format!("{:.1}", stats.correct_per_game()),
    ]);
    table.add_row(vec!["Day streak".to_string(), stats.day_streak.to_string()]);
    table.add_row(vec![
        "Last played".to_string(),
        stats
            .last_played
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string()),
    ]);
    table.add_row(vec![
        "Ads watched".to_string(),
        ads.total_ads_watched.to_string(),
    ]);
    table.add_row(vec![
        "Ads skipped (XP)".to_string(),
        format!("{} ({} XP spent)", ads.total_ads_skipped, ads.xp_spent_on_skips),
    ]);
    println!("{table}");

    let leveled: Vec<_> = MiniGame::MIXABLE
        .iter()
        .filter(|game| stats.game_level(**game) > 0)
        .collect();
    if !leveled.is_empty() {
        println!();
        let mut levels = Table::new();
        levels.set_content_arrangement(ContentArrangement::Dynamic);
        levels.set_header(vec!["Mini-game", "Level"]);
        for game in leveled {
            levels.add_row(vec![game.label().to_string(), stats.game_level(*game).to_string()]);
        }
        println!("{levels}");
    }

    Ok(())
}
