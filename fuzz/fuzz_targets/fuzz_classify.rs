//! Fuzz script classification with arbitrary strings
//!
//! Classification must never panic, and the role it returns must be the
//! role of some character in the text (or Default when none qualifies).

#![no_main]

use libfuzzer_sys::fuzz_target;
use serpwidth_core::FontRole;
use serpwidth_unicode::ScriptClassifier;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let classifier = ScriptClassifier::new();
    let role = classifier.classify(text);
    let first = text.chars().find_map(|ch| classifier.role_for_char(ch));

    assert_eq!(role, first.unwrap_or(FontRole::Default));
});
