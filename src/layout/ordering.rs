//! Deterministic ordering of grid-area identifiers.
//!
//! Controls are attached, and encoded into frames, by category first:
//!
//! ```text
//! s/j  joysticks        100000
//! m    motion axes      200000
//! p    pedals           300000
//! k    knobs            400000
//! a    analog buttons   500000
//! b    buttons          600000
//! d    D-pad            700000
//! dbg  debug label      999998
//! *    anything else    999999999
//! ```
//!
//! Inside a category the remaining characters are accumulated in base 256:
//! shorter suffixes come first (`b9 < b10`) and equal lengths compare by code
//! point (`b1 < b9 < ba`).

use tracing::trace;

pub const DEBUG_ID: &str = "dbg";

const DEBUG_SCORE: u64 = 999_998;
const UNKNOWN_SCORE: u64 = 999_999_999;
/// Scores at or above this are not refined by the id suffix.
const REFINE_LIMIT: u64 = 999_990;

fn category(id: &str) -> u64 {
    if id == DEBUG_ID {
        return DEBUG_SCORE;
    }
    match id.chars().next() {
        Some('s' | 'j') => 100_000,
        Some('m') => 200_000,
        Some('p') => 300_000,
        Some('k') => 400_000,
        Some('a') => 500_000,
        Some('b') => 600_000,
        Some('d') => 700_000,
        _ => UNKNOWN_SCORE,
    }
}

/// Sort key of one identifier. Lower scores come first.
pub fn sort_score(id: &str) -> u64 {
    let base = category(id);
    if base >= REFINE_LIMIT {
        return base;
    }
    let suffix = id
        .chars()
        .skip(1)
        .fold(0u64, |acc, c| acc.saturating_mul(256).saturating_add(c as u64));
    base.saturating_add(suffix)
}

/// Drops placeholders and duplicates, then sorts by [`sort_score`].
///
/// The sort is stable: ids with equal scores keep their first-seen order.
pub fn order<I, S>(raw_ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids: Vec<String> = Vec::new();
    for raw in raw_ids {
        let id = raw.as_ref().trim();
        if id.is_empty() || id == "." {
            continue;
        }
        if ids.iter().any(|seen| seen == id) {
            trace!("Dropping duplicate grid area {}", id);
            continue;
        }
        ids.push(id.to_string());
    }
    ids.sort_by_key(|id| sort_score(id));
    ids
}
