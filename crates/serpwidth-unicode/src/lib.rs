// this_file: crates/serpwidth-unicode/src/lib.rs

//! Script classification: which font should measure this string?
//!
//! The classifier walks the string left to right and stops at the first
//! code point that falls inside one of its rule ranges. Rules are tried in
//! a fixed priority order (Thai, then Korean, then CJK), so a string that
//! opens with Thai and continues in Chinese is measured with the Thai font.
//! Strings with no qualifying code point, including the empty string, use
//! the default (Latin) font.
//!
//! This is a heuristic. A mostly-Chinese title that happens to start with
//! a single Hangul syllable is classified as Korean.

use std::ops::RangeInclusive;

use serpwidth_core::FontRole;

/// A font role and the code point ranges that call for it
#[derive(Debug, Clone, Copy)]
pub struct ScriptRule {
    pub role: FontRole,
    pub ranges: &'static [RangeInclusive<u32>],
}

impl ScriptRule {
    pub fn matches(&self, ch: char) -> bool {
        let cp = u32::from(ch);
        self.ranges.iter().any(|range| range.contains(&cp))
    }
}

const THAI: &[RangeInclusive<u32>] = &[0x0E00..=0x0E7F];

const KOREAN: &[RangeInclusive<u32>] = &[
    // Hangul Syllables
    0xAC00..=0xD7AF,
    // Hangul Jamo
    0x1100..=0x11FF,
    // Hangul Compatibility Jamo
    0x3130..=0x318F,
    // Hangul Jamo Extended-A
    0xA960..=0xA97F,
    // Hangul Jamo Extended-B
    0xD7B0..=0xD7FF,
];

const CJK: &[RangeInclusive<u32>] = &[
    // CJK Unified Ideographs
    0x4E00..=0x9FFF,
    // Extension A
    0x3400..=0x4DBF,
    // Radicals Supplement
    0x2E80..=0x2EFF,
    // Symbols and Punctuation
    0x3000..=0x303F,
    // Hiragana
    0x3040..=0x309F,
    // Katakana
    0x30A0..=0x30FF,
    // Halfwidth and Fullwidth Forms
    0xFF00..=0xFFEF,
    // Extension B
    0x20000..=0x2A6DF,
];

/// Rules in priority order
pub const RULES: [ScriptRule; 3] = [
    ScriptRule {
        role: FontRole::Thai,
        ranges: THAI,
    },
    ScriptRule {
        role: FontRole::Korean,
        ranges: KOREAN,
    },
    ScriptRule {
        role: FontRole::Cjk,
        ranges: CJK,
    },
];

/// Picks a font role from the code points of a string
#[derive(Debug, Clone)]
pub struct ScriptClassifier {
    rules: Vec<ScriptRule>,
}

impl ScriptClassifier {
    /// The standard Thai > Korean > CJK table
    pub fn new() -> Self {
        Self {
            rules: RULES.to_vec(),
        }
    }

    /// A classifier with a custom rule table, tried in the given order
    pub fn with_rules(rules: Vec<ScriptRule>) -> Self {
        Self { rules }
    }

    /// The role for a single character, if any rule claims it
    pub fn role_for_char(&self, ch: char) -> Option<FontRole> {
        self.rules
            .iter()
            .find(|rule| rule.matches(ch))
            .map(|rule| rule.role)
    }

    /// The role of the first qualifying character, or `Default`
    pub fn classify(&self, text: &str) -> FontRole {
        text.chars()
            .find_map(|ch| self.role_for_char(ch))
            .unwrap_or(FontRole::Default)
    }
}

impl Default for ScriptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the standard rule table
pub fn classify(text: &str) -> FontRole {
    text.chars()
        .find_map(|ch| RULES.iter().find(|rule| rule.matches(ch)).map(|rule| rule.role))
        .unwrap_or(FontRole::Default)
}


#[cfg(test)]
mod proptests;
