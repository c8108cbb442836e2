#![allow(dead_code)]

//! Linguistic parsing — an injectable capability, not a hard dependency.
//!
//! Passive-voice tagging and sentence splitting are the only analyses that
//! need a parse; everything else in the pipeline is plain pattern matching.
//! The capability is carried as `Arc<dyn Linguistics>` in the analyzer,
//! constructed once at startup and read-only afterwards. `NoopLinguistics`
//! stands in when no parser is available: the dependent sub-analyzers then
//! return empty results and the pipeline keeps going.

use std::sync::Arc;

/// Dependency tag marking a passive auxiliary ("was" in "was promoted").
pub const DEP_AUXPASS: &str = "auxpass";

/// One token of a dependency parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    pub token: String,
    pub lemma: String,
    /// Dependency relation tag. `auxpass` marks a passive auxiliary.
    pub dep: String,
    /// Lemma of the syntactic head; for `auxpass` tokens this is the
    /// governing verb of the passive construction.
    pub head: String,
}

/// The parsing capability consumed by the quality analyzer.
pub trait Linguistics: Send + Sync {
    /// Dependency-parses the text. An implementation without real parsing
    /// support returns an empty vector.
    fn parse(&self, text: &str) -> Vec<ParsedToken>;

    /// Splits the text into sentences, each a sequence of tokens. An
    /// implementation without sentence support returns an empty vector.
    fn sentences(&self, text: &str) -> Vec<Vec<String>>;
}

/// Convenience constructor for the default production capability.
pub fn default_linguistics() -> Arc<dyn Linguistics> {
    Arc::new(HeuristicLinguistics)
}

// ────────────────────────────────────────────────────────────────────────────
// NoopLinguistics — degraded mode
// ────────────────────────────────────────────────────────────────────────────

/// Always-empty implementation. Verb-passivity and sentence statistics
/// degrade to empty results; nothing else in the pipeline is affected.
pub struct NoopLinguistics;

impl Linguistics for NoopLinguistics {
    fn parse(&self, _text: &str) -> Vec<ParsedToken> {
        Vec::new()
    }

    fn sentences(&self, _text: &str) -> Vec<Vec<String>> {
        Vec::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicLinguistics — rule-based default
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based parse: whitespace tokenization, lowercase lemmas, passive
/// detection as "auxiliary followed by a past participle" (an optional
/// adverb may sit between them), and sentence splitting on terminators.
/// Coarse compared to a statistical parser, but dependency-free and
/// deterministic.
pub struct HeuristicLinguistics;

const PASSIVE_AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "get", "got", "gets",
];

/// Participles that do not end in "-ed".
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "begun", "brought", "built", "chosen", "done", "driven", "given", "grown", "held", "kept",
    "known", "led", "made", "put", "run", "seen", "sent", "set", "shown", "sold", "spent",
    "taken", "taught", "thought", "won", "written",
];

/// Adverbs commonly interposed in passive constructions ("was later promoted").
const INTERPOSED_ADVERBS: &[&str] = &[
    "also", "initially", "later", "not", "previously", "recently", "subsequently", "then",
];

impl Linguistics for HeuristicLinguistics {
    fn parse(&self, text: &str) -> Vec<ParsedToken> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let lemmas: Vec<String> = words.iter().map(|w| lemma_of(w)).collect();

        let mut tokens = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let (dep, head) = match passive_head(&lemmas, i) {
                Some(head) => (DEP_AUXPASS.to_string(), head),
                None => (String::new(), String::new()),
            };
            tokens.push(ParsedToken {
                token: (*word).to_string(),
                lemma: lemmas[i].clone(),
                dep,
                head,
            });
        }
        tokens
    }

    fn sentences(&self, text: &str) -> Vec<Vec<String>> {
        text.split(['.', '!', '?'])
            .map(|sentence| {
                sentence
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect()
    }
}

/// If the token at `i` is a passive auxiliary governed by a following
/// participle, returns that participle's lemma.
fn passive_head(lemmas: &[String], i: usize) -> Option<String> {
    if !PASSIVE_AUXILIARIES.contains(&lemmas[i].as_str()) {
        return None;
    }
    let mut j = i + 1;
    if j < lemmas.len() && INTERPOSED_ADVERBS.contains(&lemmas[j].as_str()) {
        j += 1;
    }
    let candidate = lemmas.get(j)?;
    if is_participle(candidate) {
        Some(candidate.clone())
    } else {
        None
    }
}

fn is_participle(lemma: &str) -> bool {
    (lemma.len() > 3 && lemma.ends_with("ed")) || IRREGULAR_PARTICIPLES.contains(&lemma)
}

fn lemma_of(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
