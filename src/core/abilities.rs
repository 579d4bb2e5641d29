//! Ability score helpers for stat blocks.

/// Lowest and highest ability scores the SRD defines.
pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 30;

/// Signed modifier label for an ability score (`14` -> `"+2"`, `8` -> `"-1"`).
///
/// Returns `None` outside `1..=30`.
pub fn score_to_modifier(score: i64) -> Option<String> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return None;
    }
    let modifier = (score - 10).div_euclid(2);
    Some(match modifier {
        m if m > 0 => format!("+{m}"),
        m => m.to_string(),
    })
}
