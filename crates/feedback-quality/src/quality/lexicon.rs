//! Marker word lists and the token matcher the sub-metrics count hits with.
//!
//! Matching is lexical only: text is lower-cased and split into word tokens,
//! `%` is kept as a token of its own, and a term may span several words
//! ("last week"). Each token position counts at most once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Digit runs, with decimal or thousands separators folded into one run.
    static ref DIGIT_RUN: Regex =
        Regex::new(r"\d+(?:[.,]\d+)*").expect("digit run pattern is valid");
}

/// Word-form variants a lexicon term also matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inflection {
    /// Exact token only.
    #[default]
    None,
    /// `-s` / `-es` plurals.
    Plural,
    /// `-s`, `-es`, `-ed`, `-d`, `-ing` (dropping a trailing `e`).
    Verb,
}

/// Serializable word list as it appears in a scoring profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub inflection: Inflection,
    pub terms: Vec<String>,
}

impl LexiconConfig {
    fn from_static(inflection: Inflection, terms: &[&str]) -> Self {
        Self {
            inflection,
            terms: terms.iter().map(|term| term.to_string()).collect(),
        }
    }

    /// Temporal markers, quantifiers and comparatives.
    pub fn specificity_markers() -> Self {
        Self::from_static(Inflection::None, SPECIFICITY_MARKERS)
    }

    pub fn concrete_nouns() -> Self {
        Self::from_static(Inflection::Plural, CONCRETE_NOUNS)
    }

    pub fn action_verbs() -> Self {
        Self::from_static(Inflection::Verb, ACTION_VERBS)
    }
}

/// Compiled form of a [`LexiconConfig`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    inflection: Inflection,
    /// Tokenized terms, longest phrase first so multi-word terms win.
    terms: Vec<Vec<String>>,
}

impl Lexicon {
    pub fn compile(config: &LexiconConfig) -> Self {
        let mut terms: Vec<Vec<String>> = config
            .terms
            .iter()
            .map(|term| tokenize(term))
            .filter(|tokens| !tokens.is_empty())
            .collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()));
        terms.dedup();

        Self {
            inflection: config.inflection,
            terms,
        }
    }

    /// Count of non-overlapping term hits in already tokenized text.
    pub fn count(&self, tokens: &[String]) -> usize {
        let mut hits = 0;
        let mut position = 0;

        while position < tokens.len() {
            let matched = self
                .terms
                .iter()
                .find(|term| self.matches_at(term, &tokens[position..]));

            match matched {
                Some(term) => {
                    hits += 1;
                    position += term.len();
                }
                None => position += 1,
            }
        }

        hits
    }

    fn matches_at(&self, term: &[String], tokens: &[String]) -> bool {
        if term.len() > tokens.len() {
            return false;
        }

        let last = term.len() - 1;
        term.iter().zip(tokens).enumerate().all(|(index, (word, token))| {
            if index == last {
                matches_inflected(token, word, self.inflection)
            } else {
                token == word
            }
        })
    }
}

/// Lower-cased word tokens; `%` is emitted as a standalone token.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || (ch == '\'' && !current.is_empty()) {
            current.extend(ch.to_lowercase());
            continue;
        }

        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current).trim_end_matches('\'').to_string());
        }
        if ch == '%' {
            tokens.push("%".to_string());
        }
    }

    if !current.is_empty() {
        tokens.push(current.trim_end_matches('\'').to_string());
    }

    tokens
}

/// Number of digit runs such as `3`, `99.8` or `1,200`.
pub fn count_digit_runs(text: &str) -> usize {
    DIGIT_RUN.find_iter(text).count()
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn matches_inflected(token: &str, stem: &str, inflection: Inflection) -> bool {
    if token == stem {
        return true;
    }

    let Some(suffix) = token.strip_prefix(stem) else {
        return inflection == Inflection::Verb && matches_e_drop(token, stem);
    };

    match inflection {
        Inflection::None => false,
        Inflection::Plural => matches!(suffix, "s" | "es"),
        Inflection::Verb => {
            matches!(suffix, "s" | "es" | "ed" | "ing") || (suffix == "d" && stem.ends_with('e'))
        }
    }
}

/// `schedule` -> `scheduling`.
fn matches_e_drop(token: &str, stem: &str) -> bool {
    stem.strip_suffix('e')
        .and_then(|root| token.strip_prefix(root))
        .map(|suffix| suffix == "ing")
        .unwrap_or(false)
}

const SPECIFICITY_MARKERS: &[&str] = &[
    // Temporal
    "yesterday",
    "today",
    "tomorrow",
    "last week",
    "this week",
    "next week",
    "last month",
    "this month",
    "next month",
    "past",
    "recently",
    "daily",
    "weekly",
    "monthly",
    "quarter",
    "quarterly",
    "annually",
    "morning",
    "afternoon",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "during",
    "since",
    "when",
    // Quantifiers
    "all",
    "every",
    "each",
    "several",
    "many",
    "most",
    "few",
    "once",
    "twice",
    "always",
    "never",
    "percent",
    "%",
    // Comparatives
    "more",
    "less",
    "fewer",
    "than",
    "faster",
    "slower",
    "better",
    "worse",
    "higher",
    "lower",
    "increased",
    "decreased",
    "improved",
    "reduced",
];

const CONCRETE_NOUNS: &[&str] = &[
    "meeting",
    "client",
    "customer",
    "deadline",
    "project",
    "report",
    "presentation",
    "email",
    "deliverable",
    "team",
    "colleague",
    "stakeholder",
    "document",
    "proposal",
    "budget",
    "quality",
    "accuracy",
    "goal",
    "target",
    "milestone",
    "sprint",
    "feedback",
    "call",
    "ticket",
    "release",
    "process",
    "training",
    "workshop",
    "manager",
    "timeline",
    "agenda",
    "spreadsheet",
    "dashboard",
    "survey",
    "demo",
    "one-on-one",
];

const ACTION_VERBS: &[&str] = &[
    "schedule",
    "set",
    "create",
    "complete",
    "deliver",
    "review",
    "prepare",
    "practice",
    "attend",
    "share",
    "send",
    "follow",
    "check",
    "meet",
    "discuss",
    "plan",
    "planning",
    "implement",
    "track",
    "update",
    "improve",
    "focus",
    "start",
    "stop",
    "continue",
    "try",
    "ask",
    "provide",
    "offer",
    "support",
    "help",
    "maintain",
    "lead",
    "document",
    "commit",
    "agree",
    "coach",
    "mentor",
    "organize",
    "prioritize",
    "delegate",
    "communicate",
    "clarify",
    "adjust",
    "develop",
];
