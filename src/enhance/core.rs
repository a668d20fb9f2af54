/*!
 * Core enhancement engine.
 *
 * The engine is a pure function over strings: given a text and an ordered
 * list of enhancement operations, it rewrites every occurrence of each
 * operation's target substring with the transformed version. Operations are
 * applied strictly in order, each one against the cumulative result of the
 * previous ones.
 */

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::cache::EnhancementCache;

// @const: Lowercase-name lookup table for parsing enhancement kinds
static KIND_BY_NAME: Lazy<HashMap<&'static str, EnhancementKind>> = Lazy::new(|| {
    EnhancementKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), *kind))
        .collect()
});

/// The closed set of enhancement kinds.
///
/// `Emotion` and `Exclamation` are alternate occupants of the same slot;
/// which one is active is decided by [`crate::app_config::EmphasisVariant`],
/// not here. The engine itself will transform either.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementKind {
    // @kind: Append a trailing ellipsis
    Pause,
    // @kind: Upper-case and wrap in double quotes
    Emphasize,
    // @kind: Wrap in ** emphasis markers
    Emotion,
    // @kind: Append a question mark
    Question,
    // @kind: Wrap in double quotes
    Quote,
    // @kind: Upper-case and append an exclamation mark (variant of Emotion)
    Exclamation,
}

impl EnhancementKind {
    /// Every kind the engine knows about, in display order
    pub const ALL: [EnhancementKind; 6] = [
        Self::Pause,
        Self::Emphasize,
        Self::Emotion,
        Self::Question,
        Self::Quote,
        Self::Exclamation,
    ];

    // @returns: Capitalized kind name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pause => "Pause",
            Self::Emphasize => "Emphasize",
            Self::Emotion => "Emotion",
            Self::Question => "Question",
            Self::Quote => "Quote",
            Self::Exclamation => "Exclamation",
        }
    }

    // @returns: Lowercase kind identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Emphasize => "emphasize",
            Self::Emotion => "emotion",
            Self::Question => "question",
            Self::Quote => "quote",
            Self::Exclamation => "exclamation",
        }
    }

    /// Transform a matched substring.
    ///
    /// Total over strings; the match is exhaustive so an unhandled kind
    /// cannot silently fall through to a no-op.
    pub fn transform(&self, matched: &str) -> String {
        match self {
            Self::Pause => format!("{}...", matched),
            Self::Emphasize => format!("\"{}\"", matched.to_uppercase()),
            Self::Emotion => format!("**{}**", matched),
            Self::Question => format!("{}?", matched),
            Self::Quote => format!("\"{}\"", matched),
            Self::Exclamation => format!("{}!", matched.to_uppercase()),
        }
    }
}

impl fmt::Display for EnhancementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnhancementKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        KIND_BY_NAME
            .get(s.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "Unknown enhancement kind '{}' (valid kinds: {})",
                    s,
                    Self::ALL.map(|k| k.as_str()).join(", ")
                )
            })
    }
}

/// A single enhancement operation: a kind plus the exact substring it targets.
///
/// Immutable once created. An empty target makes the operation a no-op at
/// application time; it is accepted here so callers never need a special
/// case for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EnhancementOp {
    /// Which transform to apply
    pub kind: EnhancementKind,

    /// Exact substring to locate and replace
    pub target: String,
}

impl EnhancementOp {
    /// Create a new operation
    pub fn new(kind: EnhancementKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
        }
    }

    /// Parse an operation from a `kind=target` spec string.
    ///
    /// Only the first `=` separates kind from target, so targets may
    /// themselves contain `=`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (kind, target) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid enhancement spec '{}', expected KIND=TARGET", spec))?;
        Ok(Self::new(kind.trim().parse::<EnhancementKind>()?, target))
    }

    /// Whether applying this operation can never change a text
    pub fn is_noop(&self) -> bool {
        self.target.is_empty()
    }
}

impl fmt::Display for EnhancementOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.target)
    }
}

/// Apply an ordered list of operations to a text.
///
/// Each operation performs a global replace of its target in the cumulative
/// result of all prior operations, so later operations match against
/// newly-produced text. An empty operation list returns the input unchanged;
/// an empty or never-occurring target leaves that step a no-op. Total and
/// deterministic, which is what makes [`EnhancementCache`] sound.
pub fn apply_ops(text: &str, ops: &[EnhancementOp]) -> String {
    let mut result = text.to_string();
    for op in ops {
        // Zero-length targets are skipped outright: a zero-length match
        // would otherwise expand at every position.
        if op.target.is_empty() {
            continue;
        }
        result = result.replace(&op.target, &op.kind.transform(&op.target));
    }
    result
}

/// Enhancement service wrapping the pure engine with memoization.
///
/// Holds no other state; two calls with the same arguments return the same
/// output whether or not the cache is enabled.
pub struct Enhancer {
    /// Memoization cache keyed on (text, ops)
    cache: EnhancementCache,
}

impl Enhancer {
    /// Create a new enhancer
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            cache: EnhancementCache::new(cache_enabled),
        }
    }

    /// Apply operations to a text, consulting the cache first
    pub fn enhance(&self, text: &str, ops: &[EnhancementOp]) -> String {
        if let Some(cached) = self.cache.get(text, ops) {
            return cached;
        }

        let output = apply_ops(text, ops);
        self.cache.store(text, ops, &output);
        output
    }

    /// Access the underlying cache, e.g. for statistics reporting
    pub fn cache(&self) -> &EnhancementCache {
        &self.cache
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for Enhancer {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}
