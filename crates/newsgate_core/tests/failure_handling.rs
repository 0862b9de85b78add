use chrono::Utc;
use newsgate_core::{
    open_pool, open_pool_in_memory, DbPool, GatewayConfig, GatewayOutcome, NewsDraft, Operation,
    RecordGateway,
};
use tempfile::TempDir;

fn single_connection_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GatewayConfig::new(dir.path().join("news.db"));
    config.max_connections = 1;
    config.connection_timeout_secs = 1;
    let pool = open_pool(&config).unwrap();
    (dir, pool)
}

#[test]
fn every_exit_path_returns_the_connection() {
    let (_dir, pool) = single_connection_pool();
    let gateway = RecordGateway::new(pool);

    for round in 0..25 {
        let agency = format!("Agency {round}");
        let link = format!("http://x/{round}");
        let item = NewsDraft::new(Utc::now(), "Title", "Body", link.as_str(), agency.as_str());
        let orphan = NewsDraft::new(Utc::now(), "Title", "Body", "http://x/orphan", "Nobody");

        let outcomes = [
            gateway.register_agency(&agency),
            gateway.register_agency(&agency),
            gateway.record_news_item(&item),
            gateway.record_news_item(&item),
            gateway.record_news_item(&orphan),
        ];
        let kinds: Vec<_> = outcomes.iter().map(GatewayOutcome::kind).collect();
        assert_eq!(
            kinds,
            [
                "created",
                "already_exists",
                "recorded",
                "duplicate_link",
                "unknown_agency"
            ],
            "round {round}"
        );
    }
}

#[test]
fn exhausted_pool_reports_storage_failure() {
    let (_dir, pool) = single_connection_pool();
    let gateway = RecordGateway::new(pool.clone());

    let held = pool.get().unwrap();
    let outcome = gateway.register_agency("Reuters");
    assert!(
        matches!(
            outcome,
            GatewayOutcome::StorageFailure {
                operation: Operation::RegisterAgency,
                ..
            }
        ),
        "{outcome:?}"
    );
    drop(held);

    assert!(gateway.register_agency("Reuters").is_success());
}

#[test]
fn broken_news_table_is_not_reported_as_success() {
    let pool = open_pool_in_memory().unwrap();
    let gateway = RecordGateway::new(pool.clone());
    assert!(gateway.register_agency("Reuters").is_success());
    pool.get()
        .unwrap()
        .execute_batch("DROP TABLE news_items;")
        .unwrap();

    let outcome =
        gateway.record_news_item(&NewsDraft::new(Utc::now(), "T", "B", "http://x/1", "Reuters"));

    match &outcome {
        GatewayOutcome::StorageFailure { operation, message } => {
            assert_eq!(*operation, Operation::RecordNewsItem);
            assert!(message.contains("news_items"), "{message}");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!outcome.is_success());
    assert!(outcome
        .to_string()
        .starts_with("Storage failure during news recording"));
}

#[test]
fn broken_agency_table_is_not_reported_as_success() {
    let pool = open_pool_in_memory().unwrap();
    let gateway = RecordGateway::new(pool.clone());
    pool.get()
        .unwrap()
        .execute_batch("DROP TABLE news_items; DROP TABLE agencies;")
        .unwrap();

    let outcome = gateway.register_agency("Reuters");

    assert_eq!(outcome.kind(), "storage_failure");
}

#[test]
fn failed_call_leaves_no_open_transaction() {
    let pool = open_pool_in_memory().unwrap();
    let gateway = RecordGateway::new(pool.clone());
    gateway.register_agency("Reuters");
    gateway.record_news_item(&NewsDraft::new(Utc::now(), "T", "B", "http://x/1", "Reuters"));
    gateway.record_news_item(&NewsDraft::new(Utc::now(), "T", "B", "http://x/1", "Reuters"));

    let conn = pool.get().unwrap();
    assert!(conn.is_autocommit());
}
