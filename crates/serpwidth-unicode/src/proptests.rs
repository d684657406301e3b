use super::*;
use proptest::prelude::*;

// Property: ASCII never needs a fallback font
proptest! {
    #[test]
    fn prop_ascii_is_default(s in "[ -~]*") {
        prop_assert_eq!(classify(&s), FontRole::Default);
    }
}

// Property: a Latin prefix never changes the verdict
proptest! {
    #[test]
    fn prop_latin_prefix_is_transparent(prefix in "[a-zA-Z0-9 |.,-]{0,40}", s in "\\PC*") {
        let combined = format!("{prefix}{s}");
        prop_assert_eq!(classify(&combined), classify(&s));
    }
}

// Property: the role is decided by the first qualifying character alone
proptest! {
    #[test]
    fn prop_first_qualifying_char_decides(s in "\\PC*", tail in "\\PC*") {
        let classifier = ScriptClassifier::new();
        let expected = s
            .chars()
            .find_map(|ch| classifier.role_for_char(ch));
        if let Some(role) = expected {
            let combined = format!("{s}{tail}");
            prop_assert_eq!(classify(&combined), role);
        }
    }
}

// Property: pure ideograph strings are always CJK
proptest! {
    #[test]
    fn prop_ideographs_are_cjk(s in "[\u{4E00}-\u{9FFF}]{1,20}") {
        prop_assert_eq!(classify(&s), FontRole::Cjk);
    }
}
