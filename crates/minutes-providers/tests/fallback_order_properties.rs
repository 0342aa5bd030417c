use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use minutes_core::models::ProviderKind;
use minutes_providers::ProviderOrchestrator;
use proptest::prelude::*;
use test_fixtures::ScriptedProvider;

fn kind_strategy() -> impl Strategy<Value = ProviderKind> {
    prop::sample::select(ProviderKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn preferred_first_and_each_provider_once(
        kinds in prop::collection::vec(kind_strategy(), 0..10),
        preferred in prop::option::of(kind_strategy()),
    ) {
        let mut orch = ProviderOrchestrator::new(Duration::from_secs(1));
        for kind in &kinds {
            orch.register(Arc::new(ScriptedProvider::replying(*kind, "ok")));
        }
        orch.set_preferred(preferred);

        let order = orch.fallback_order();
        let configured: BTreeSet<ProviderKind> = kinds.iter().copied().collect();
        let unique: BTreeSet<ProviderKind> = order.iter().copied().collect();

        prop_assert_eq!(order.len(), configured.len());
        prop_assert_eq!(&unique, &configured);
        if let Some(p) = preferred.filter(|p| configured.contains(p)) {
            prop_assert_eq!(order[0], p);
        }
        // Non-preferred providers keep declaration order.
        let rest: Vec<ProviderKind> = order.iter().copied().filter(|k| Some(*k) != preferred).collect();
        let mut sorted = rest.clone();
        sorted.sort();
        prop_assert_eq!(rest, sorted);
    }
}
