//! Question generation per mini-game.
//!
//! Each generator builds one multiple-choice item from the tier-scaled
//! parameters. Distractors are kept distinct from the answer and from
//! each other; the answer lands at a random option index.

use rand::Rng;
use rand::rngs::StdRng;

use bb_core::MiniGame;
use bb_engine::GameParams;

use crate::question::Question;

const COLORS: [&str; 8] = [
    "Red", "Green", "Blue", "Yellow", "Purple", "Orange", "Cyan", "Pink",
];

const SHAPES: [&str; 5] = ["circle", "square", "triangle", "star", "diamond"];

const CATEGORIES: [[&str; 6]; 4] = [
    ["apple", "pear", "plum", "cherry", "grape", "peach"],
    ["dog", "cat", "horse", "sheep", "goat", "mouse"],
    ["hammer", "wrench", "pliers", "saw", "drill", "chisel"],
    ["oak", "birch", "maple", "willow", "cedar", "elm"],
];

/// Generate one quiz item for the given mini-game.
pub fn generate(game: MiniGame, params: &GameParams, rng: &mut StdRng) -> Question {
    match game {
        MiniGame::QuickMath => quick_math(params, rng),
        MiniGame::ColorMatch => color_match(params, rng),
        MiniGame::SequenceRecall => sequence_recall(params, rng),
        MiniGame::ShapeCount => shape_count(params, rng),
        MiniGame::OddOneOut => odd_one_out(params, rng),
    }
}

fn quick_math(params: &GameParams, rng: &mut StdRng) -> Question {
    let count = params.operand_count.max(2);
    let mut total = rng.random_range(params.operand_min..=params.operand_max);
    let mut prompt = total.to_string();

    for _ in 1..count {
        let operand = rng.random_range(params.operand_min..=params.operand_max);
        if rng.random_range(0..2) == 0 {
            total += operand;
            prompt.push_str(&format!(" + {operand}"));
        } else {
            total -= operand;
            prompt.push_str(&format!(" - {operand}"));
        }
    }

    let options = numeric_options(total, params.option_count as usize, rng);
    let answer = options.iter().position(|o| *o == total.to_string()).unwrap_or(0);
    Question {
        prompt,
        options,
        answer,
    }
}

fn color_match(params: &GameParams, rng: &mut StdRng) -> Question {
    let word = COLORS[rng.random_range(0..COLORS.len())];
    let ink = COLORS[rng.random_range(0..COLORS.len())];
    let prompt = format!("The word \"{word}\" is shown in {ink} ink. What color is the ink?");

    let mut options = vec![ink.to_string()];
    while options.len() < (params.option_count as usize).min(COLORS.len()) {
        let candidate = COLORS[rng.random_range(0..COLORS.len())].to_string();
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    let answer = place_answer(&mut options, rng);
    Question {
        prompt,
        options,
        answer,
    }
}

fn sequence_recall(params: &GameParams, rng: &mut StdRng) -> Question {
    let len = params.sequence_len.max(2) as usize;
    let sequence: Vec<u32> = (0..len).map(|_| rng.random_range(0..10)).collect();
    let shown = join_digits(&sequence);
    let prompt = format!("Recall the sequence shown for {} ms: {shown}", params.show_time_ms);

    let mut options = vec![shown.clone()];
    while options.len() < params.option_count.max(2) as usize {
        let mut variant = sequence.clone();
        let i = rng.random_range(0..variant.len());
        variant[i] = (variant[i] + rng.random_range(1..10)) % 10;
        let text = join_digits(&variant);
        if !options.contains(&text) {
            options.push(text);
        }
    }
    let answer = place_answer(&mut options, rng);
    Question {
        prompt,
        options,
        answer,
    }
}

fn shape_count(params: &GameParams, rng: &mut StdRng) -> Question {
    let cells = params.grid_size.max(2) * params.grid_size.max(2);
    let target = SHAPES[rng.random_range(0..SHAPES.len())];
    let count = rng.random_range(1..=cells.min(12)) as i64;
    let prompt = format!(
        "A {0}x{0} grid flashes for {1} ms. How many {target}s did it contain?",
        params.grid_size.max(2),
        params.show_time_ms
    );

    let options = numeric_options(count, params.option_count as usize, rng);
    let answer = options.iter().position(|o| *o == count.to_string()).unwrap_or(0);
    Question {
        prompt,
        options,
        answer,
    }
}

fn odd_one_out(params: &GameParams, rng: &mut StdRng) -> Question {
    let home = rng.random_range(0..CATEGORIES.len());
    let mut other = rng.random_range(0..CATEGORIES.len());
    while other == home {
        other = rng.random_range(0..CATEGORIES.len());
    }

    let option_count = (params.option_count as usize).clamp(3, CATEGORIES[home].len());
    let mut options: Vec<String> = Vec::with_capacity(option_count);
    while options.len() < option_count - 1 {
        let item = CATEGORIES[home][rng.random_range(0..CATEGORIES[home].len())].to_string();
        if !options.contains(&item) {
            options.push(item);
        }
    }
    let odd = CATEGORIES[other][rng.random_range(0..CATEGORIES[other].len())].to_string();
    let answer = rng.random_range(0..options.len() + 1);
    options.insert(answer, odd);

    Question {
        prompt: "Which one does not belong?".to_string(),
        options,
        answer,
    }
}

/// Build distinct numeric options around `answer` and include it.
fn numeric_options(answer: i64, count: usize, rng: &mut StdRng) -> Vec<String> {
    let count = count.max(2);
    let mut values = vec![answer];
    while values.len() < count {
        let offset = rng.random_range(1..=10);
        let candidate = if rng.random_range(0..2) == 0 {
            answer + offset
        } else {
            answer - offset
        };
        if !values.contains(&candidate) {
            values.push(candidate);
        }
    }
    // Move the answer to a random slot.
    let target = rng.random_range(0..values.len());
    values.swap(0, target);
    values.into_iter().map(|v| v.to_string()).collect()
}

/// Insert-position shuffle: move the answer (at index 0) to a random slot
/// and return its new index.
fn place_answer(options: &mut [String], rng: &mut StdRng) -> usize {
    let target = rng.random_range(0..options.len());
    options.swap(0, target);
    target
}

fn join_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
