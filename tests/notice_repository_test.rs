use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use studyhub::{
    domain::{NoticeCandidate, NoticeCategory, NoticePriority},
    repository::{
        HeartbeatRepository, NoticeRepository, SqliteHeartbeatRepository, SqliteNoticeRepository,
    },
};

async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

fn candidate(title: &str, days_old: i64) -> NoticeCandidate {
    NoticeCandidate {
        title: title.to_string(),
        content: format!("Body of {}", title),
        category: NoticeCategory::General,
        published_at: Utc::now() - Duration::days(days_old),
    }
}

#[tokio::test]
async fn test_notice_insert_and_lookup() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteNoticeRepository::new(pool);

    assert!(!repo.exists_by_title("Exam Routine Published").await?);

    let inserted = repo
        .insert_candidate(&candidate("Exam Routine Published", 1))
        .await?
        .expect("first insert should succeed");

    // Ingestion defaults
    assert_eq!(inserted.title, "Exam Routine Published");
    assert_eq!(inserted.priority, NoticePriority::Normal);
    assert!(inserted.is_active);
    assert!(inserted.expires_at.is_none());

    assert!(repo.exists_by_title("Exam Routine Published").await?);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_title_reports_conflict_not_error() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteNoticeRepository::new(pool);

    let first = repo
        .insert_candidate(&candidate("Scholarship Deadline Extended", 2))
        .await?;
    assert!(first.is_some());

    // Same title again: the unique index absorbs it.
    let second = repo
        .insert_candidate(&candidate("Scholarship Deadline Extended", 1))
        .await?;
    assert!(second.is_none());

    let stored = repo.list_active().await?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_list_active_orders_newest_first() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteNoticeRepository::new(pool);

    repo.insert_candidate(&candidate("Older notice about the library", 5))
        .await?;
    repo.insert_candidate(&candidate("Newer notice about exams", 1))
        .await?;

    let notices = repo.list_active().await?;
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].title, "Newer notice about exams");
    assert_eq!(notices[1].title, "Older notice about the library");

    Ok(())
}

#[tokio::test]
async fn test_heartbeat_sweep() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteHeartbeatRepository::new(pool);

    let heartbeat = repo.insert("auto-activity").await?;
    assert_eq!(heartbeat.message, "auto-activity");

    // Nothing is older than a 30-day cutoff yet.
    let deleted = repo.delete_older_than(Utc::now() - Duration::days(30)).await?;
    assert_eq!(deleted, 0);

    // A cutoff in the future sweeps the row we just wrote.
    let deleted = repo.delete_older_than(Utc::now() + Duration::days(1)).await?;
    assert_eq!(deleted, 1);

    Ok(())
}
