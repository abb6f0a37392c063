use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    PendingRecord, RecordId, Result, StoreError, StoredRecord, Version,
    store::{CounterStore, RecordStore, SaveOptions},
};

/// PostgreSQL-backed record store.
///
/// Records live in a single `records` table keyed by `(kind, id)` with the
/// entity body in a JSONB column. Counters live in `sequence_counters`.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgreSQL record store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("record store migrations applied");
        Ok(())
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_record(row: PgRow) -> Result<StoredRecord> {
        Ok(StoredRecord {
            kind: row.try_get("kind")?,
            id: RecordId::from_uuid(row.try_get::<Uuid, _>("id")?),
            version: Version::new(row.try_get("version")?),
            stored_at: row.try_get("stored_at")?,
            payload: row.try_get("payload")?,
        })
    }

    async fn current_version(&self, kind: &str, id: RecordId) -> Result<Version> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT version FROM records WHERE kind = $1 AND id = $2")
                .bind(kind)
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        Ok(Version::new(version.unwrap_or(0)))
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn save(&self, record: PendingRecord, options: SaveOptions) -> Result<StoredRecord> {
        let row = match options.expected_version {
            Some(expected) if expected == Version::initial() => sqlx::query(
                r#"
                INSERT INTO records (kind, id, version, stored_at, payload)
                VALUES ($1, $2, 1, NOW(), $3)
                RETURNING kind, id, version, stored_at, payload
                "#,
            )
            .bind(&record.kind)
            .bind(record.id.as_uuid())
            .bind(&record.payload)
            .fetch_one(&self.pool)
            .await
            .map(Some)
            .or_else(|e| match e {
                // A primary key violation means someone else created it first.
                sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("records_pkey") => {
                    Ok(None)
                }
                other => Err(StoreError::Database(other)),
            })?,
            Some(expected) => sqlx::query(
                r#"
                UPDATE records
                SET version = version + 1, stored_at = NOW(), payload = $3
                WHERE kind = $1 AND id = $2 AND version = $4
                RETURNING kind, id, version, stored_at, payload
                "#,
            )
            .bind(&record.kind)
            .bind(record.id.as_uuid())
            .bind(&record.payload)
            .bind(expected.as_i64())
            .fetch_optional(&self.pool)
            .await?,
            None => Some(
                sqlx::query(
                    r#"
                    INSERT INTO records (kind, id, version, stored_at, payload)
                    VALUES ($1, $2, 1, NOW(), $3)
                    ON CONFLICT (kind, id) DO UPDATE
                    SET version = records.version + 1,
                        stored_at = NOW(),
                        payload = EXCLUDED.payload
                    RETURNING kind, id, version, stored_at, payload
                    "#,
                )
                .bind(&record.kind)
                .bind(record.id.as_uuid())
                .bind(&record.payload)
                .fetch_one(&self.pool)
                .await?,
            ),
        };

        match row {
            Some(row) => Self::row_to_record(row),
            None => {
                let actual = self.current_version(&record.kind, record.id).await?;
                tracing::debug!(kind = %record.kind, id = %record.id, %actual, "stale save rejected");
                Err(StoreError::ConcurrencyConflict {
                    kind: record.kind,
                    id: record.id,
                    expected: options.expected_version.unwrap_or(Version::initial()),
                    actual,
                })
            }
        }
    }

    async fn load(&self, kind: &str, id: RecordId) -> Result<Option<StoredRecord>> {
        let row = sqlx::query(
            r#"
            SELECT kind, id, version, stored_at, payload
            FROM records
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(kind)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn load_all(&self, kind: &str) -> Result<Vec<StoredRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT kind, id, version, stored_at, payload
            FROM records
            WHERE kind = $1
            ORDER BY position ASC
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn delete(&self, kind: &str, id: RecordId) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
            .bind(kind)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for PostgresRecordStore {
    async fn next_value(&self, kind: &str, start: u64) -> Result<u64> {
        let out_of_range = || StoreError::CounterOutOfRange {
            kind: kind.to_string(),
        };
        let start = i64::try_from(start).map_err(|_| out_of_range())?;

        // Single statement: the row lock makes read-increment-write atomic.
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sequence_counters (kind, value)
            VALUES ($1, $2)
            ON CONFLICT (kind) DO UPDATE SET value = sequence_counters.value + 1
            RETURNING value
            "#,
        )
        .bind(kind)
        .bind(start)
        .fetch_one(&self.pool)
        .await?;

        u64::try_from(value).map_err(|_| out_of_range())
    }
}
