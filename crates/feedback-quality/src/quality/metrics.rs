use super::config::{FieldProfile, LengthProfile, MarkerCaps, MetricWeights};
use super::domain::MetricSet;
use super::lexicon::{count_digit_runs, tokenize, word_count, Lexicon};

/// Compiled lexicons the hit-rate metrics count against.
pub(crate) struct Lexicons {
    pub specificity: Lexicon,
    pub concreteness: Lexicon,
    pub actionability: Lexicon,
}

/// Sub-scores for non-blank `text` under `profile`.
pub(crate) fn measure(
    text: &str,
    profile: &FieldProfile,
    lexicons: &Lexicons,
    caps: &MarkerCaps,
) -> MetricSet {
    let words = word_count(text);
    let tokens = tokenize(text);

    let specificity_hits = lexicons.specificity.count(&tokens) + count_digit_runs(text);
    let concrete_hits = lexicons.concreteness.count(&tokens);
    let action_hits = lexicons.actionability.count(&tokens);

    let actionability = hit_rate_score(action_hits, caps.actionability.expected(words))
        * profile.actionability_multiplier;

    MetricSet {
        length: to_metric(length_score(words, &profile.length)),
        specificity: to_metric(hit_rate_score(
            specificity_hits,
            caps.specificity.expected(words),
        )),
        concreteness: to_metric(hit_rate_score(
            concrete_hits,
            caps.concreteness.expected(words),
        )),
        actionability: to_metric(actionability),
    }
}

/// Piecewise word-count score.
pub(crate) fn length_score(words: usize, profile: &LengthProfile) -> f64 {
    let words = words as f64;
    let min = profile.min as f64;
    let ideal = profile.ideal as f64;
    let max = profile.max as f64;

    if words < min {
        40.0 * words / min
    } else if words < ideal {
        40.0 + 60.0 * (words - min) / (ideal - min)
    } else if words <= max {
        100.0
    } else {
        let overage = ((words - max) / max).min(1.0);
        (100.0 - 30.0 * overage).max(70.0)
    }
}

/// `20 + 80 * min(1, hits / expected)`.
pub(crate) fn hit_rate_score(hits: usize, expected: usize) -> f64 {
    let ratio = (hits as f64 / expected.max(1) as f64).min(1.0);
    20.0 + 80.0 * ratio
}

pub(crate) fn weighted_score(metrics: &MetricSet, weights: &MetricWeights) -> u8 {
    let total = weights.length * f64::from(metrics.length)
        + weights.specificity * f64::from(metrics.specificity)
        + weights.concreteness * f64::from(metrics.concreteness)
        + weights.actionability * f64::from(metrics.actionability);
    to_metric(total)
}

fn to_metric(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
