use std::sync::Arc;

use minutes_context::ContextStore;
use minutes_core::config::SessionConfig;
use minutes_core::models::TranscriptChunk;
use proptest::prelude::*;
use test_fixtures::ManualClock;

proptest! {
    #[test]
    fn retained_chunks_never_exceed_bound_after_trim(
        max in 1usize..40,
        appends in 0usize..120,
    ) {
        let config = SessionConfig { max_recent_chunks: max, ..SessionConfig::default() };
        let store = ContextStore::new(config, Arc::new(ManualClock::new(0)));
        store.start_session("Alice");
        for i in 0..appends {
            store.append_chunk(TranscriptChunk::new(format!("chunk {i}"), i as i64, None));
            store.trim_recent();
            let stats = store.stats();
            prop_assert!(stats.chunk_count <= max);
            prop_assert_eq!(stats.transcript_count, i + 1);
        }
    }

    #[test]
    fn condensed_context_is_stable(texts in proptest::collection::vec("[a-z ]{0,30}", 0..25)) {
        let store = ContextStore::new(SessionConfig::default(), Arc::new(ManualClock::new(0)));
        store.start_session("Alice");
        for (i, text) in texts.iter().enumerate() {
            store.append_chunk(TranscriptChunk::new(text.clone(), i as i64, None));
        }
        prop_assert_eq!(store.condensed_context(), store.condensed_context());
    }
}
