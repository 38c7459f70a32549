use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, postgres::PgPoolOptions};
use time::OffsetDateTime;

use crate::domain::UserId;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CourseRecord {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub instructor: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
}

/// The relational layer behind the portal. One implementation talks to
/// Postgres, tests swap in an in-memory one.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Returns None when the email is already registered.
    async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>>;

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn courses_for_user(&self, user_id: UserId) -> Result<Vec<CourseRecord>>;

    /// Events with `from <= starts_at < to`, soonest first.
    async fn events_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<EventRecord>>;

    async fn next_event_after(
        &self,
        user_id: UserId,
        after: OffsetDateTime,
    ) -> Result<Option<EventRecord>>;

    /// When the user finished onboarding, if they have.
    async fn onboarding_completed_at(&self, user_id: UserId) -> Result<Option<OffsetDateTime>>;

    async fn complete_onboarding(&self, user_id: UserId) -> Result<()>;
}

pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>> {
        let rec = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, display_name, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, display_name, password_hash
            "#,
        )
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .context("DB insert user query failed")?;

        Ok(rec)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let rec = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, display_name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("DB select user query failed")?;

        Ok(rec)
    }

    async fn courses_for_user(&self, user_id: UserId) -> Result<Vec<CourseRecord>> {
        let courses = sqlx::query_as::<_, CourseRecord>(
            r#"
            SELECT c.id, c.code, c.title, c.instructor
            FROM courses c
            JOIN enrollments e ON e.course_id = c.id
            WHERE e.user_id = $1
            ORDER BY c.code
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("DB select courses query failed")?;

        Ok(courses)
    }

    async fn events_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<EventRecord>> {
        let events = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, title, location, starts_at, ends_at
            FROM events
            WHERE user_id = $1 AND starts_at >= $2 AND starts_at < $3
            ORDER BY starts_at
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .context("DB select events query failed")?;

        Ok(events)
    }

    async fn next_event_after(
        &self,
        user_id: UserId,
        after: OffsetDateTime,
    ) -> Result<Option<EventRecord>> {
        let event = sqlx::query_as::<_, EventRecord>(
            r#"
            SELECT id, title, location, starts_at, ends_at
            FROM events
            WHERE user_id = $1 AND starts_at >= $2
            ORDER BY starts_at
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(after)
        .fetch_optional(&self.pool)
        .await
        .context("DB select next event query failed")?;

        Ok(event)
    }

    async fn onboarding_completed_at(&self, user_id: UserId) -> Result<Option<OffsetDateTime>> {
        let completed_at = sqlx::query_scalar::<_, Option<OffsetDateTime>>(
            r#"
            SELECT completed_at
            FROM onboarding
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("DB select onboarding query failed")?;

        Ok(completed_at.flatten())
    }

    async fn complete_onboarding(&self, user_id: UserId) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO onboarding (user_id, completed_at)
            VALUES ($1, now())
            ON CONFLICT (user_id) DO UPDATE
            SET completed_at = COALESCE(onboarding.completed_at, now())
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("DB upsert onboarding query failed")?;

        Ok(())
    }
}

pub async fn connect_to_db(database_url: &str) -> Result<PgPool> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    // Run SQL migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("SQL migrations failed")?;

    Ok(pool)
}
