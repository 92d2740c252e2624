//! Record store: append-only emission results and the leaderboard query

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use crate::models::{LeaderboardEntry, Record};

/// Record repository
#[derive(Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Create a new record repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a calculation total stamped with the current time.
    ///
    /// Fails with [`DatabaseError::ForeignKeyViolation`] when `user_id` does
    /// not reference an existing user.
    pub async fn append(&self, user_id: i64, total_co2: f64) -> DatabaseResult<Record> {
        info!(user_id, total_co2, "Appending emission record");

        sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO records (user_id, total_co2)
            VALUES ($1, $2)
            RETURNING id, user_id, total_co2, date
            "#,
        )
        .bind(user_id)
        .bind(total_co2)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    /// Users ranked by their lowest recorded total, ascending.
    ///
    /// Users without records never appear. Equal minimums are ordered by user id.
    pub async fn top_minimums(&self, limit: i64) -> DatabaseResult<Vec<LeaderboardEntry>> {
        sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.id AS user_id, u.username, best.min_total_co2
            FROM users u
            JOIN (
                SELECT user_id, MIN(total_co2) AS min_total_co2
                FROM records
                GROUP BY user_id
            ) best ON best.user_id = u.id
            ORDER BY best.min_total_co2 ASC, u.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    /// A user's most recent records, newest first
    pub async fn history(&self, user_id: i64, limit: i64) -> DatabaseResult<Vec<Record>> {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, user_id, total_co2, date
            FROM records
            WHERE user_id = $1
            ORDER BY date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::repositories::UserRepository;
    use common::database::{DatabaseConfig, init_pool, run_migrations};
    use serial_test::serial;

    async fn repositories() -> (UserRepository, RecordRepository) {
        let pool = init_pool(&DatabaseConfig::from_env().unwrap()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // Isolate from rows other tests left behind
        sqlx::query("TRUNCATE records, users RESTART IDENTITY")
            .execute(&pool)
            .await
            .unwrap();
        (UserRepository::new(pool.clone()), RecordRepository::new(pool))
    }

    async fn user(users: &UserRepository, username: &str) -> i64 {
        users
            .create(&NewUser {
                username: username.to_string(),
                password_hash: "unused".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    #[ignore = "requires a dedicated PostgreSQL database; truncates tables"]
    #[serial(postgres)]
    async fn test_record_store_queries() {
        let (users, records) = repositories().await;

        let alice = user(&users, "alice").await;
        let bob = user(&users, "bob").await;
        let carol = user(&users, "carol").await;
        let _idle = user(&users, "idle").await;

        for (owner, total) in [
            (alice, 40.0),
            (alice, 12.5),
            (bob, 30.0),
            (carol, 12.5),
            (carol, 99.0),
        ] {
            let record = records.append(owner, total).await.unwrap();
            assert_eq!(record.user_id, owner);
            assert_eq!(record.total_co2, total);
        }

        let board = records.top_minimums(5).await.unwrap();
        let ranked: Vec<(&str, f64)> = board
            .iter()
            .map(|entry| (entry.username.as_str(), entry.min_total_co2))
            .collect();
        // Users without records are excluded; ties fall back to user id
        assert_eq!(ranked, vec![("alice", 12.5), ("carol", 12.5), ("bob", 30.0)]);

        let top_one = records.top_minimums(1).await.unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].user_id, alice);

        let history = records.history(alice, 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].total_co2, 12.5);
        assert!(history[0].date >= history[1].date);
    }

    #[tokio::test]
    #[ignore = "requires a dedicated PostgreSQL database; truncates tables"]
    #[serial(postgres)]
    async fn test_append_for_missing_user_fails() {
        let (_, records) = repositories().await;

        let err = records.append(424_242, 1.0).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ForeignKeyViolation(_)));
    }
}
