// tests/score_store_test.rs

mod test_helpers;

use campuslink::recs::store::SqliteScoreStore;
use campuslink::recs::traits::ScoreStore;
use campuslink::recs::types::{EntityKind, ScoreRecord};

fn record(user_id: i64, kind: EntityKind, entity_id: &str, score: f64) -> ScoreRecord {
    ScoreRecord {
        user_id,
        entity_type: kind,
        entity_id: entity_id.to_string(),
        score,
    }
}

#[tokio::test]
async fn upsert_replaces_instead_of_duplicating() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool.clone());

    let first = record(42, EntityKind::Group, "7", 0.9);
    let mut second = first.clone();
    second.score = 0.2;

    store.upsert_scores(&[first]).await.unwrap();
    store.upsert_scores(&[second]).await.unwrap();

    assert_eq!(test_helpers::count_score_rows(&pool).await, 1);

    let top = store.top_scores(42, EntityKind::Group, 10).await.unwrap();
    assert_eq!(top, vec![("7".to_string(), 0.2)]);
}

#[tokio::test]
async fn upsert_applies_whole_batch() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool.clone());

    store
        .upsert_scores(&[
            record(1, EntityKind::Group, "10", 0.5),
            record(1, EntityKind::Event, "10", 0.6),
            record(2, EntityKind::Group, "10", 0.7),
        ])
        .await
        .unwrap();

    // Same entity id under different users or kinds stays distinct.
    assert_eq!(test_helpers::count_score_rows(&pool).await, 3);
}

#[tokio::test]
async fn top_scores_orders_descending_and_truncates() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool);

    store
        .upsert_scores(&[
            record(42, EntityKind::Group, "1", 0.3),
            record(42, EntityKind::Group, "2", 0.9),
            record(42, EntityKind::Group, "3", 0.1),
            record(42, EntityKind::Group, "4", 0.7),
            record(42, EntityKind::Group, "5", 0.5),
        ])
        .await
        .unwrap();

    let top = store.top_scores(42, EntityKind::Group, 3).await.unwrap();

    assert_eq!(top.len(), 3);
    assert_eq!(
        top,
        vec![
            ("2".to_string(), 0.9),
            ("4".to_string(), 0.7),
            ("5".to_string(), 0.5),
        ]
    );
}

#[tokio::test]
async fn equal_scores_break_ties_by_entity_id() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool);

    store
        .upsert_scores(&[
            record(42, EntityKind::Group, "b", 0.5),
            record(42, EntityKind::Group, "a", 0.5),
            record(42, EntityKind::Group, "c", 0.5),
        ])
        .await
        .unwrap();

    let top = store.top_scores(42, EntityKind::Group, 10).await.unwrap();
    let ids: Vec<&str> = top.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn kinds_are_isolated_and_missing_user_is_empty() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool);

    store
        .upsert_scores(&[record(42, EntityKind::Group, "7", 0.9)])
        .await
        .unwrap();

    // No event scores for this user, and no scores at all for another.
    assert!(store.top_scores(42, EntityKind::Event, 10).await.unwrap().is_empty());
    assert!(store.top_scores(99, EntityKind::Group, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn scores_for_user_returns_full_records_in_rank_order() {
    let pool = test_helpers::test_pool().await;
    let store = SqliteScoreStore::new(pool);

    store
        .upsert_scores(&[
            record(42, EntityKind::Group, "3", 0.4),
            record(42, EntityKind::Group, "7", 0.9),
            record(42, EntityKind::Event, "5", 0.8),
        ])
        .await
        .unwrap();

    let rows = store.scores_for_user(42, EntityKind::Group, 20).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], record(42, EntityKind::Group, "7", 0.9));
    assert_eq!(rows[1], record(42, EntityKind::Group, "3", 0.4));
}
