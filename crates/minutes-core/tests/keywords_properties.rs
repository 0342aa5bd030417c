use minutes_core::keywords::{extract_topics, normalize_text, TOPIC_VOCABULARY};
use proptest::prelude::*;

proptest! {
    #[test]
    fn topics_are_always_distinct_vocabulary_words(text in "[a-zA-Z ,.]{0,200}") {
        let topics = extract_topics(&text);
        let mut seen = std::collections::HashSet::new();
        for t in &topics {
            prop_assert!(TOPIC_VOCABULARY.contains(&t.as_str()));
            prop_assert!(seen.insert(t.clone()));
        }
    }

    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z .,!?\t]{0,120}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }
}
