//! Property-based tests for the text helpers

use arbor_text::{banner, pad_around, tokenize_with_positions, wrap, DEFAULT_WHITESPACE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wrapped_lines_fit_width(text in "[a-z \n]{0,200}", width in 1usize..40) {
        let wrapped = wrap(&text, width);
        for line in wrapped.lines() {
            prop_assert!(line.chars().count() <= width);
            prop_assert!(!line.trim().is_empty());
        }
    }

    #[test]
    fn wrap_keeps_every_word_character(text in "[a-z ]{0,120}", width in 1usize..20) {
        let wrapped = wrap(&text, width);
        let before: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let after: String = wrapped.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn tokens_slice_back_to_source(text in "[a-c ,;]{0,64}") {
        let chars: Vec<char> = text.chars().collect();
        let tokens = tokenize_with_positions(&text, " ,;");
        let mut last_end = 0;
        for token in &tokens {
            prop_assert!(token.start < token.end);
            prop_assert!(token.start >= last_end);
            let slice: String = chars[token.start..token.end].iter().collect();
            prop_assert_eq!(&slice, &token.text);
            last_end = token.end;
        }
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        let kept: String = text.chars().filter(|c| !" ,;".contains(*c)).collect();
        prop_assert_eq!(joined, kept);
    }

    #[test]
    fn pad_around_only_adds_pad_chars(text in "[a-c=]{0,32}") {
        let padded = pad_around(&text, "=", DEFAULT_WHITESPACE, ' ');
        let stripped: String = padded.chars().filter(|c| *c != ' ').collect();
        prop_assert_eq!(stripped, text.clone());
        prop_assert_eq!(pad_around(&padded, "=", DEFAULT_WHITESPACE, ' '), padded);
    }

    #[test]
    fn banner_reaches_width(text in "[a-z]{0,10}", width in 0usize..40, pad in any::<bool>()) {
        let b = banner(&text, width, '*', pad);
        let core_len = text.chars().count() + if pad { 2 } else { 0 };
        prop_assert_eq!(b.chars().count(), width.max(core_len));
        prop_assert!(b.contains(text.as_str()));
    }
}
