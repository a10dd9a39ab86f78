//! Name comparison strategies for the final tie-break
//!
//! When two teams are level on every numeric criterion the table falls back
//! to their display names. How names compare depends on the deployment
//! language, so the comparator is injected into the engine rather than
//! hard-coded.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// Strategy for ordering two display names
pub trait NameComparator: Send + Sync + Debug {
    /// Compare two names, ascending
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain code-point ordering
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalComparator;

impl NameComparator for OrdinalComparator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// One piece of a collation key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    /// Digit run with leading zeros stripped; compared by length, then digits
    Number(usize, String),
    Text(String),
}

/// Locale-aware collator
///
/// Comparison is caseless. For Hebrew locales (`he`, `iw`) vowel points and
/// cantillation marks are ignored and final letter forms sort as their base
/// letter, so "ים" and "ימ" are equal at the primary level. With `numeric`
/// enabled digit runs compare by value ("כיתה 2" before "כיתה 10").
/// Names that are equal at the primary level fall back to code-point order.
#[derive(Debug, Clone)]
pub struct LocaleCollator {
    locale: String,
    hebrew: bool,
    numeric: bool,
}

impl LocaleCollator {
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        Self {
            hebrew: language == "he" || language == "iw",
            locale,
            numeric: false,
        }
    }

    /// Compare digit runs by numeric value
    pub fn with_numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn fold_char(&self, c: char, out: &mut String) {
        if self.hebrew {
            if is_hebrew_mark(c) {
                return;
            }
            out.push(hebrew_base_letter(c));
            return;
        }
        out.extend(c.to_lowercase());
    }

    fn sort_key(&self, name: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut digits = String::new();

        for c in name.chars() {
            if self.numeric && c.is_ascii_digit() {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                digits.push(c);
                continue;
            }
            if !digits.is_empty() {
                segments.push(number_segment(std::mem::take(&mut digits)));
            }
            self.fold_char(c, &mut text);
        }

        if !digits.is_empty() {
            segments.push(number_segment(digits));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        segments
    }
}

impl NameComparator for LocaleCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a)
            .cmp(&self.sort_key(b))
            .then_with(|| a.cmp(b))
    }
}

fn number_segment(digits: String) -> Segment {
    let trimmed = digits.trim_start_matches('0').to_string();
    Segment::Number(trimmed.len(), trimmed)
}

// Points and cantillation marks; maqaf, paseq, sof pasuq and nun hafukha are punctuation.
fn is_hebrew_mark(c: char) -> bool {
    ('\u{0591}'..='\u{05C7}').contains(&c)
        && !matches!(c, '\u{05BE}' | '\u{05C0}' | '\u{05C3}' | '\u{05C6}')
}

fn hebrew_base_letter(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => {
            let mut lower = other.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => other,
            }
        }
    }
}

/// Pick a comparator for a locale tag
///
/// An empty tag or `"ordinal"` selects code-point ordering.
pub fn comparator_for_locale(locale: &str, numeric: bool) -> Arc<dyn NameComparator> {
    let locale = locale.trim();
    if locale.is_empty() || locale.eq_ignore_ascii_case("ordinal") {
        return Arc::new(OrdinalComparator);
    }
    let collator = LocaleCollator::new(locale).with_numeric(numeric);
    debug!(
        "Using locale collator for {} (numeric: {})",
        collator.locale(),
        numeric
    );
    Arc::new(collator)
}
