//! Integration tests for the Items domain
//!
//! Every PostgreSQL-backed variant runs the same contract against a fresh
//! testcontainers database, and the in-memory variant runs it without one:
//! - Saved items get new ascending ids
//! - Updates replace all mutable fields or fail with NotFound
//! - Filtering by name substring and maximum price, alone and combined
//! - LIKE wildcards in the name filter are matched literally

use domain_items::*;
use test_utils::{TestDatabase, assertions::*};

async fn save_test_items(service: &dyn ItemOperations) -> Vec<Item> {
    let mut saved = Vec::new();
    for (name, price, quantity) in [
        ("itemA-1", 10000, 10),
        ("itemA-2", 20000, 20),
        ("itemB-1", 30000, 30),
    ] {
        saved.push(service.save(NewItem::new(name, price, quantity)).await.unwrap());
    }
    saved
}

async fn names_matching(service: &dyn ItemOperations, filter: ItemFilter) -> Vec<String> {
    let items = service.find_items(filter).await.unwrap();
    assert_ids_ascending(items.iter().map(|item| item.id));
    items.into_iter().map(|item| item.name).collect()
}

async fn check_save_and_find(service: &dyn ItemOperations) {
    let saved = save_test_items(service).await;

    assert_ids_ascending(saved.iter().map(|item| item.id));
    assert_eq!(saved[0].name, "itemA-1");
    assert_eq!(saved[2].price, 30000);

    for item in &saved {
        let found = service.find_by_id(item.id).await.unwrap();
        let found = assert_some(found, "saved item should be found");
        assert_eq!(&found, item);
    }

    let missing = service.find_by_id(saved[2].id + 100).await.unwrap();
    assert!(missing.is_none());
}

async fn check_update(service: &dyn ItemOperations) {
    let saved = save_test_items(service).await;
    let target = &saved[0];

    service
        .update(target.id, UpdateItem::new("item2", 20000, 30))
        .await
        .unwrap();

    let updated = assert_some(
        service.find_by_id(target.id).await.unwrap(),
        "updated item should be found",
    );
    assert_eq!(updated.id, target.id);
    assert_eq!(updated.name, "item2");
    assert_eq!(updated.price, 20000);
    assert_eq!(updated.quantity, 30);

    // Other rows are untouched
    let other = assert_some(
        service.find_by_id(saved[1].id).await.unwrap(),
        "other item should be found",
    );
    assert_eq!(other, saved[1]);
}

async fn check_update_unknown_id(service: &dyn ItemOperations) {
    let saved = save_test_items(service).await;
    let unknown = saved[2].id + 100;

    let result = service.update(unknown, UpdateItem::new("ghost", 1, 1)).await;
    assert!(matches!(result, Err(ItemError::NotFound(id)) if id == unknown));

    assert!(service.find_by_id(unknown).await.unwrap().is_none());
    assert_eq!(names_matching(service, ItemFilter::any()).await.len(), 3);
}

async fn check_find_all(service: &dyn ItemOperations) {
    save_test_items(service).await;

    assert_eq!(
        names_matching(service, ItemFilter::any()).await,
        ["itemA-1", "itemA-2", "itemB-1"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("")).await,
        ["itemA-1", "itemA-2", "itemB-1"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("itemA")).await,
        ["itemA-1", "itemA-2"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("temA")).await,
        ["itemA-1", "itemA-2"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("itemB")).await,
        ["itemB-1"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().max_price(10000)).await,
        ["itemA-1"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().max_price(9999)).await,
        Vec::<String>::new()
    );
    assert_eq!(
        names_matching(
            service,
            ItemFilter::any().name_contains("itemA").max_price(10000)
        )
        .await,
        ["itemA-1"]
    );
    assert_eq!(
        names_matching(
            service,
            ItemFilter::any().name_contains("itemB").max_price(10000)
        )
        .await,
        Vec::<String>::new()
    );
    // Name matching is case-sensitive
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("ITEMA")).await,
        Vec::<String>::new()
    );
}

async fn check_wildcards_are_literal(service: &dyn ItemOperations) {
    save_test_items(service).await;
    service.save(NewItem::new("50%_off", 500, 1)).await.unwrap();

    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("%")).await,
        ["50%_off"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("_")).await,
        ["50%_off"]
    );
    assert_eq!(
        names_matching(service, ItemFilter::any().name_contains("item_")).await,
        Vec::<String>::new()
    );
}

/// Runs one contract check against a fresh database for every SQL variant
macro_rules! postgres_contract {
    ($($test:ident => $check:ident),* $(,)?) => {
        mod postgres_variants {
            use super::*;

            async fn each_variant<F>(check: F)
            where
                F: for<'a> Fn(&'a dyn ItemOperations) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + 'a>>,
            {
                let db = TestDatabase::new().await;
                check(&ItemService::new(SqlItemRepository::new(db.connection()))).await;

                let db = TestDatabase::new().await;
                check(&ItemService::new(NamedSqlItemRepository::new(db.connection()))).await;

                let db = TestDatabase::new().await;
                check(&ItemService::new(OrmItemRepository::new(db.connection()))).await;

                let db = TestDatabase::new().await;
                check(&ItemService::new(QueryBuilderItemRepository::new(db.connection()))).await;

                let db = TestDatabase::new().await;
                check(&CqrsItemService::new(
                    ItemCommandRepository::new(db.connection()),
                    ItemQueryRepository::new(db.connection()),
                ))
                .await;
            }

            $(
                #[tokio::test]
                async fn $test() {
                    each_variant(|service| Box::pin($check(service))).await;
                }
            )*
        }

        mod memory_variant {
            use super::*;

            $(
                #[tokio::test]
                async fn $test() {
                    $check(&ItemService::new(MemoryItemRepository::default())).await;
                }
            )*
        }
    };
}

postgres_contract! {
    test_save_and_find_by_id => check_save_and_find,
    test_update_replaces_fields => check_update,
    test_update_unknown_id_is_not_found => check_update_unknown_id,
    test_find_all_filters => check_find_all,
    test_name_filter_wildcards_are_literal => check_wildcards_are_literal,
}

#[tokio::test]
async fn test_cqrs_reads_see_command_writes() {
    let db = TestDatabase::new().await;
    let commands = ItemCommandRepository::new(db.connection());
    let queries = ItemQueryRepository::new(db.connection());

    let saved = commands.save(NewItem::new("itemA", 10000, 10)).await.unwrap();
    commands
        .update(saved.id, UpdateItem::new("itemA", 9000, 5))
        .await
        .unwrap();

    let listed = queries
        .find_all(ItemFilter::any().max_price(9000))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].quantity, 5);
}

#[tokio::test]
async fn test_seed_sample_items_on_postgres() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(OrmItemRepository::new(db.connection()));

    let seeded = seed_sample_items(&service).await.unwrap();
    assert_eq!(seeded.len(), 2);

    assert_eq!(
        names_matching(&service, ItemFilter::any().max_price(20000)).await,
        ["itemA", "itemB"]
    );
}
