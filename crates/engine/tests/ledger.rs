use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    ChickenTransactionCmd, Engine, EngineError, FeedCmd, FeedKind, Ingredient, TransactionKind,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn feed_cmd(coop_id: Option<String>, total_cost: i64) -> FeedCmd {
    FeedCmd {
        name: "Cám tổng hợp".to_string(),
        kind: FeedKind::Compound,
        coop_id,
        ingredients: vec![Ingredient {
            name: "Ngô".to_string(),
            quantity: 50.0,
            unit_price: 4_000,
            total_price: total_cost,
        }],
        total_cost,
    }
}

#[tokio::test]
async fn import_updates_count_and_cost() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 100)
        .chick_price(15_000)
        .breed("Gà ri");
    let (coop, tx) = engine.new_chicken_transaction(&cmd).await.unwrap();

    assert_eq!(coop.chickens, 100);
    assert_eq!(coop.total_chicken_cost, 1_500_000);
    assert_eq!(coop.total_revenue, 0);
    assert_eq!(tx.quantity, 100);
}

#[tokio::test]
async fn export_updates_count_and_revenue() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 100);
    engine.new_chicken_transaction(&import).await.unwrap();

    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 30)
        .sale_price(60_000);
    let (coop, _) = engine.new_chicken_transaction(&export).await.unwrap();

    assert_eq!(coop.chickens, 70);
    assert_eq!(coop.total_revenue, 1_800_000);
}

#[tokio::test]
async fn free_import_leaves_cost_untouched() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 40);
    let (coop, _) = engine.new_chicken_transaction(&cmd).await.unwrap();

    assert_eq!(coop.chickens, 40);
    assert_eq!(coop.total_chicken_cost, 0);
}

#[tokio::test]
async fn over_export_rejected_without_side_effects() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 10);
    engine.new_chicken_transaction(&import).await.unwrap();

    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 11)
        .sale_price(60_000);
    let err = engine.new_chicken_transaction(&export).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidOperation(_)));

    // Neither the log nor the counters moved.
    let coop = engine.coop(&coop.id).await.unwrap();
    assert_eq!(coop.chickens, 10);
    assert_eq!(coop.total_revenue, 0);
    let txs = engine
        .list_chicken_transactions_for_coop(&coop.id, None)
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);
}

#[tokio::test]
async fn export_of_exact_count_is_allowed() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 10);
    engine.new_chicken_transaction(&import).await.unwrap();
    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 10);
    let (coop, _) = engine.new_chicken_transaction(&export).await.unwrap();

    assert_eq!(coop.chickens, 0);
}

#[tokio::test]
async fn zero_quantity_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 0);
    let err = engine.new_chicken_transaction(&cmd).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));
}

#[tokio::test]
async fn transaction_for_unknown_coop_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let cmd = ChickenTransactionCmd::new("no-such-coop".to_string(), TransactionKind::In, 5);
    let err = engine.new_chicken_transaction(&cmd).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("coop".to_string()));
}

#[tokio::test]
async fn delete_transaction_reverses_counters() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 100)
        .chick_price(15_000);
    let (_, tx) = engine.new_chicken_transaction(&cmd).await.unwrap();

    let reverted = engine
        .delete_chicken_transaction(&tx.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reverted.chickens, 0);
    assert_eq!(reverted.total_chicken_cost, 0);

    let err = engine.chicken_transaction(&tx.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("transaction".to_string()));
}

#[tokio::test]
async fn delete_export_restores_birds_and_removes_revenue() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 100);
    engine.new_chicken_transaction(&import).await.unwrap();
    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 30)
        .sale_price(60_000);
    let (_, tx) = engine.new_chicken_transaction(&export).await.unwrap();

    let coop = engine
        .delete_chicken_transaction(&tx.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(coop.chickens, 100);
    assert_eq!(coop.total_revenue, 0);
}

#[tokio::test]
async fn reversal_clamps_counters_at_zero() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 50)
        .chick_price(10_000);
    let (_, import_tx) = engine.new_chicken_transaction(&import).await.unwrap();
    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 20);
    engine.new_chicken_transaction(&export).await.unwrap();

    // Removing the import leaves only 30 birds to subtract 50 from; the
    // counter clamps instead of going negative.
    let coop = engine
        .delete_chicken_transaction(&import_tx.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(coop.chickens, 0);
    assert_eq!(coop.total_chicken_cost, 0);
}

#[tokio::test]
async fn orphan_transaction_delete_skips_reversal() {
    let (engine, db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 10);
    let (_, tx) = engine.new_chicken_transaction(&cmd).await.unwrap();

    // Remove the coop row out from under the transaction.
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "DELETE FROM coops WHERE id = ?",
        vec![coop.id.clone().into()],
    ))
    .await
    .unwrap();

    let reverted = engine.delete_chicken_transaction(&tx.id).await.unwrap();
    assert!(reverted.is_none());
    let err = engine.chicken_transaction(&tx.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("transaction".to_string()));
}

#[tokio::test]
async fn coop_names_must_be_unique_and_well_formed() {
    let (engine, _db) = engine_with_db().await;

    engine.new_coop("Chuồng 1", None, None).await.unwrap();
    let err = engine.new_coop("chuồng 1", None, None).await.unwrap_err();
    assert!(matches!(err, EngineError::DuplicateName(_)));

    let err = engine.new_coop("Barn 5", None, None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine.new_coop("  ", None, None).await.unwrap_err();
    assert_eq!(err, EngineError::MissingField("name".to_string()));
}

#[tokio::test]
async fn delete_coop_returns_snapshot_and_leaves_logs_behind() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let cmd = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 10)
        .chick_price(15_000);
    let (_, tx) = engine.new_chicken_transaction(&cmd).await.unwrap();

    let snapshot = engine.delete_coop(&coop.id).await.unwrap();
    assert_eq!(snapshot.chickens, 10);
    assert_eq!(snapshot.total_chicken_cost, 150_000);

    let err = engine.coop(&coop.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("coop".to_string()));

    // The log outlives the coop; deleting it now skips the reversal.
    let orphan = engine.chicken_transaction(&tx.id).await.unwrap();
    assert_eq!(orphan.quantity, 10);
    let reverted = engine.delete_chicken_transaction(&tx.id).await.unwrap();
    assert!(reverted.is_none());

    let err = engine.delete_coop(&coop.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("coop".to_string()));
}

#[tokio::test]
async fn feed_cost_is_attributed_and_reversed() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let feed = engine
        .new_feed(feed_cmd(Some(coop.id.clone()), 200_000))
        .await
        .unwrap();
    let updated = engine.coop(&coop.id).await.unwrap();
    assert_eq!(updated.total_feed_cost, 200_000);

    engine.delete_feed(&feed.id).await.unwrap();
    let updated = engine.coop(&coop.id).await.unwrap();
    assert_eq!(updated.total_feed_cost, 0);
}

#[tokio::test]
async fn feed_without_coop_touches_no_counters() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    engine.new_feed(feed_cmd(None, 100_000)).await.unwrap();

    let coop = engine.coop(&coop.id).await.unwrap();
    assert_eq!(coop.total_feed_cost, 0);
}

#[tokio::test]
async fn feed_with_dangling_coop_id_is_still_recorded() {
    let (engine, _db) = engine_with_db().await;

    let feed = engine
        .new_feed(feed_cmd(Some("no-such-coop".to_string()), 50_000))
        .await
        .unwrap();
    let found = engine.feed(&feed.id).await.unwrap();
    assert_eq!(found.total_cost, 50_000);
}

#[tokio::test]
async fn feed_is_not_recorded_when_the_coop_lookup_fails() {
    let (engine, db) = engine_with_db().await;

    // Break the store so the coop lookup errors instead of missing.
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(
        backend,
        "DROP TABLE coops".to_string(),
    ))
    .await
    .unwrap();

    let err = engine
        .new_feed(feed_cmd(Some("some-coop".to_string()), 50_000))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));
    assert!(engine.list_feeds(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn negative_feed_cost_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.new_feed(feed_cmd(None, -1)).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));
}

#[tokio::test]
async fn recompute_restores_counters_from_logs() {
    let (engine, db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 100)
        .chick_price(15_000);
    engine.new_chicken_transaction(&import).await.unwrap();
    let export = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::Out, 30)
        .sale_price(60_000);
    engine.new_chicken_transaction(&export).await.unwrap();
    engine
        .new_feed(feed_cmd(Some(coop.id.clone()), 200_000))
        .await
        .unwrap();

    // Corrupt the denormalized counters directly.
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE coops SET chickens = 999, total_chicken_cost = 1, total_feed_cost = 2, \
         total_revenue = 3 WHERE id = ?",
        vec![coop.id.clone().into()],
    ))
    .await
    .unwrap();

    let repaired = engine.recompute_coop_totals(&coop.id).await.unwrap();
    assert_eq!(repaired.chickens, 70);
    assert_eq!(repaired.total_chicken_cost, 1_500_000);
    assert_eq!(repaired.total_feed_cost, 200_000);
    assert_eq!(repaired.total_revenue, 1_800_000);
}

#[tokio::test]
async fn coop_update_cannot_touch_counters() {
    let (engine, _db) = engine_with_db().await;
    let coop = engine.new_coop("Chuồng 1", None, None).await.unwrap();

    let import = ChickenTransactionCmd::new(coop.id.clone(), TransactionKind::In, 10);
    engine.new_chicken_transaction(&import).await.unwrap();

    let update = engine::CoopUpdate {
        name: Some("Chuồng 2".to_string()),
        location: Some("Khu B".to_string()),
        notes: None,
    };
    let updated = engine.update_coop(&coop.id, update).await.unwrap();
    assert_eq!(updated.name, "Chuồng 2");
    assert_eq!(updated.location, "Khu B");
    assert_eq!(updated.chickens, 10);
}
