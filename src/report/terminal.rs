//! Console rendering of the learned-profile table and the score table.
//!
//! Column layout: profile name, d_shape, d_strength, d_drops, total score.

use crate::config::defaults::REPORT_RULE_WIDTH;
use crate::profiles::{ProfileFailure, ProfileLibrary};
use crate::types::{Diagnosis, FeatureTuple, ScoreRow};

fn rule(ch: char) -> String {
    let mut line: String = std::iter::repeat(ch).take(REPORT_RULE_WIDTH).collect();
    line.push('\n');
    line
}

/// One line per learned profile, in registration order.
pub fn render_learned(library: &ProfileLibrary) -> String {
    library
        .iter()
        .map(|(name, f)| {
            format!(
                " [LEARNED] {:7} -> Shape={:.2} | Strength={:.2} | Drops={}\n",
                name, f.shape, f.strength, f.drops
            )
        })
        .collect()
}

/// One line per reference that could not be learned.
pub fn render_failures(failures: &[ProfileFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!(" [SKIPPED] {:7} -> {}\n", failure.name, failure.error))
        .collect()
}

fn score_line(row: &ScoreRow) -> String {
    format!(
        " {:<10} | {:<10.2} | {:<10.2} | {:<10} | {:.1}\n",
        row.profile, row.d_shape, row.d_strength, row.d_drops, row.total_score
    )
}

/// Full explainable analysis: input features, per-profile deltas and scores,
/// and the resolved result line.
pub fn render_diagnosis(diagnosis: &Diagnosis) -> String {
    let mut out = format!(" [INPUT] {}\n", diagnosis.target);
    out.push_str(&rule('-'));
    out.push_str(&format!(
        " {:<10} | {:<10} | {:<10} | {:<10} | {}\n",
        "PROFILE", "d_SHAPE", "d_STR", "d_DROPS", "SCORE (Low=Best)"
    ));
    out.push_str(&rule('-'));
    out.extend(diagnosis.rows.iter().map(score_line));
    out.push_str(&rule('-'));
    out.push_str(&render_result(diagnosis));
    out.push('\n');
    out.push_str(&rule('='));
    out
}

/// `>> RESULT: <description>`
pub fn render_result(diagnosis: &Diagnosis) -> String {
    format!(">> RESULT: {}", diagnosis.description)
}

/// Bench-style summary of a single capture.
pub fn render_analysis(features: &FeatureTuple) -> String {
    format!(
        "RESULTS: Acc={:.1}% | Shape={:.2} | Str={:.2} | Drops={}",
        features.accuracy_percent(),
        features.shape,
        features.strength,
        features.drops
    )
}
