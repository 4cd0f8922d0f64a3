//! SQLite implementation of the fingerprint store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::domain::entities::{Stored, UrlRecord};
use crate::domain::fingerprint::{CollisionPolicy, fingerprint};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct UrlRow {
    id: i64,
    original: String,
    fingerprint: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(row.id, row.original, row.fingerprint, row.created_at)
    }
}

/// SQLite repository for URL records.
///
/// Deduplication relies on the unique index `urls_fingerprint_key`: the insert
/// is `ON CONFLICT DO NOTHING`, so racing writers cannot both create a row.
/// Every call acquires its own pooled connection and returns it on drop.
#[derive(Clone)]
pub struct SqliteUrlRepository {
    pool: SqlitePool,
    collision_policy: CollisionPolicy,
}

impl SqliteUrlRepository {
    /// Creates a new repository with the default (`merge`) collision policy.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_collision_policy(pool, CollisionPolicy::default())
    }

    pub fn with_collision_policy(pool: SqlitePool, collision_policy: CollisionPolicy) -> Self {
        Self {
            pool,
            collision_policy,
        }
    }

    /// Applies the collision policy to a row found under `original`'s fingerprint.
    fn reconcile(&self, original: &str, existing: UrlRecord) -> Result<Stored, AppError> {
        if existing.original == original {
            debug!("Fingerprint {} already stored, reusing", existing.fingerprint);
            return Ok(Stored::Existing(existing));
        }

        match self.collision_policy {
            CollisionPolicy::Merge => {
                warn!(
                    fingerprint = %existing.fingerprint,
                    stored = %existing.original,
                    submitted = %original,
                    "Fingerprint collision, returning the stored URL"
                );
                Ok(Stored::Existing(existing))
            }
            CollisionPolicy::Reject => {
                warn!(
                    fingerprint = %existing.fingerprint,
                    "Fingerprint collision rejected"
                );
                Err(AppError::FingerprintCollision {
                    fingerprint: existing.fingerprint,
                })
            }
        }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn insert_if_absent(&self, original: &str) -> Result<Stored, AppError> {
        if original.is_empty() {
            return Err(AppError::invalid_input("URL must not be empty"));
        }

        let fp = fingerprint(original);
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original, fingerprint, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (fingerprint) DO NOTHING
            RETURNING id, original, fingerprint, created_at
            "#,
        )
        .bind(original)
        .bind(&fp)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        let stored = match inserted {
            Some(row) => Stored::Created(row.into()),
            None => {
                let existing = sqlx::query_as::<_, UrlRow>(
                    "SELECT id, original, fingerprint, created_at FROM urls WHERE fingerprint = ?1",
                )
                .bind(&fp)
                .fetch_one(&mut *tx)
                .await?;

                self.reconcile(original, existing.into())?
            }
        };

        tx.commit().await?;

        Ok(stored)
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT id, original, fingerprint, created_at FROM urls WHERE fingerprint = ?1",
        )
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT id, original, fingerprint, created_at FROM urls WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
