//! Decision scoring and winner selection.
//!
//! Per tick, each decision's score is
//!
//! ```text
//! raw   = Σ condition.weight(observed_value) * connection.weight
//! score = raw * (enabled ? total_score : 0)
//!       + (block running && focus_when_selected && active) ? focus_boost : 0
//! ```
//!
//! Scores are sorted ascending with an unstable comparison sort — only
//! sortedness matters, never the relative order of equal scores — and the
//! winner is drawn uniformly at random from the contiguous maximal-score
//! suffix.  Confining the draw to the top group prevents deterministic
//! oscillation between equal-score decisions while staying reproducible
//! under a seeded generator.

use ua_core::BrainRng;
use ua_graph::TemplateInstance;

use crate::compile::CompiledDecision;

/// One decision's score for the current tick.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ScoreEntry {
    /// Index into the compiled-decision list.
    pub slot:  usize,
    pub score: f64,
}

/// Score every compiled decision into `out` (cleared first, original
/// compiled order).
pub(crate) fn score_all<H>(
    compiled:        &[CompiledDecision],
    instance:        &TemplateInstance<H>,
    active:          Option<usize>,
    actions_running: bool,
    out:             &mut Vec<ScoreEntry>,
) {
    out.clear();

    for (slot, cd) in compiled.iter().enumerate() {
        let decision = &instance.decisions[cd.decision];

        let mut total = 0.0;
        for block in &cd.blocks {
            let observed = &instance.observers[block.observer].value;
            total += instance.conditions[block.condition].compare.weight(observed) * block.weight;
        }

        total *= if decision.enabled { decision.total_score } else { 0.0 };

        let focused = decision.focus_when_selected && active == Some(slot);
        if actions_running && focused {
            total += decision.focus_boost;
        }

        out.push(ScoreEntry { slot, score: total });
    }
}

/// Sort ascending and pick uniformly at random among the decisions sharing
/// the maximal score.  Returns the winner's compiled-decision slot.
///
/// Must be called with at least one entry; the placeholder decision
/// guarantees that.
pub(crate) fn pick(entries: &mut [ScoreEntry], rng: &mut BrainRng) -> usize {
    entries.sort_unstable_by(|a, b| a.score.total_cmp(&b.score));

    let last = entries.len() - 1;
    let best = entries[last].score;

    // First index from the end scoring strictly below the maximum; the top
    // group is everything after it.
    let mut group_start = 0;
    for i in (0..last).rev() {
        if entries[i].score < best {
            group_start = i + 1;
            break;
        }
    }

    entries[rng.gen_range(group_start..entries.len())].slot
}
