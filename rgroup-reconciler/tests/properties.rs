//! Property tests: any valid configuration survives a create/read cycle.

mod common;

use common::TestBackend;
use proptest::prelude::*;
use rgroup_reconciler::mapper::trim_accounts;
use rgroup_reconciler::{Lifecycle, ResourceGroupConfig};

fn arb_config() -> impl Strategy<Value = ResourceGroupConfig> {
    (
        "[A-Za-z][A-Za-z0-9 _-]{0,23}",
        any::<bool>(),
        proptest::option::of("[ -~]{0,40}"),
        proptest::collection::vec("[ \t]{0,2}[a-z0-9-]{1,16}[ \t]{0,2}", 1..5),
    )
        .prop_map(|(name, enabled, description, accounts)| ResourceGroupConfig {
            name,
            enabled,
            description,
            accounts,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_create_then_read_restores_config(config in arb_config()) {
        let backend = TestBackend::new();
        let mut rg = backend.reconciler();

        let read = tokio_test::block_on(async {
            let created = rg.create(&config).await.unwrap();
            rg.read(&created.resource_guid).await.unwrap()
        });

        let expected = ResourceGroupConfig {
            accounts: trim_accounts(&config.accounts),
            ..config.clone()
        };
        prop_assert_eq!(read.to_config(), expected);
    }

    #[test]
    fn prop_update_then_read_agree(first in arb_config(), second in arb_config()) {
        let backend = TestBackend::new();
        let mut rg = backend.reconciler();

        let (updated, read) = tokio_test::block_on(async {
            let created = rg.create(&first).await.unwrap();
            let updated = rg.update(&created.resource_guid, &second).await.unwrap();
            let read = rg.read(&created.resource_guid).await.unwrap();
            (updated, read)
        });

        prop_assert_eq!(&updated.resource_guid, &read.resource_guid);
        prop_assert_eq!(updated, read);
    }
}
