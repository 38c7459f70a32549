use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use time::OffsetDateTime;

use campus_portal::{
    db::{CourseRecord, Directory, EventRecord, UserRecord},
    domain::UserId,
};

/// In-memory stand-in for the Postgres directory.
#[derive(Default)]
pub struct MockDirectory {
    users: Mutex<Vec<UserRecord>>,
    courses: Mutex<Vec<(UserId, CourseRecord)>>,
    events: Mutex<Vec<(UserId, EventRecord)>>,
    onboarding: Mutex<Vec<(UserId, OffsetDateTime)>>,
}

impl MockDirectory {
    pub fn add_course(&self, user_id: UserId, code: &str, title: &str, instructor: &str) {
        let mut courses = self.courses.lock().unwrap();
        let id = courses.len() as i64 + 1;
        courses.push((
            user_id,
            CourseRecord {
                id,
                code: code.to_string(),
                title: title.to_string(),
                instructor: instructor.to_string(),
            },
        ));
    }

    pub fn add_event(
        &self,
        user_id: UserId,
        title: &str,
        starts_at: OffsetDateTime,
        ends_at: OffsetDateTime,
    ) {
        let mut events = self.events.lock().unwrap();
        let id = events.len() as i64 + 1;
        events.push((
            user_id,
            EventRecord {
                id,
                title: title.to_string(),
                location: None,
                starts_at,
                ends_at,
            },
        ));
    }
}

#[async_trait]
impl Directory for MockDirectory {
    async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == email) {
            return Ok(None);
        }

        let rec = UserRecord {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            display_name: display_name.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(rec.clone());

        Ok(Some(rec))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn courses_for_user(&self, user_id: UserId) -> Result<Vec<CourseRecord>> {
        let courses = self.courses.lock().unwrap();
        Ok(courses
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn events_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Vec<EventRecord>> {
        let events = self.events.lock().unwrap();
        let mut found: Vec<EventRecord> = events
            .iter()
            .filter(|(owner, e)| *owner == user_id && e.starts_at >= from && e.starts_at < to)
            .map(|(_, e)| e.clone())
            .collect();
        found.sort_by_key(|e| e.starts_at);
        Ok(found)
    }

    async fn next_event_after(
        &self,
        user_id: UserId,
        after: OffsetDateTime,
    ) -> Result<Option<EventRecord>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|(owner, e)| *owner == user_id && e.starts_at >= after)
            .map(|(_, e)| e.clone())
            .min_by_key(|e| e.starts_at))
    }

    async fn onboarding_completed_at(&self, user_id: UserId) -> Result<Option<OffsetDateTime>> {
        let onboarding = self.onboarding.lock().unwrap();
        Ok(onboarding
            .iter()
            .find(|(owner, _)| *owner == user_id)
            .map(|(_, at)| *at))
    }

    async fn complete_onboarding(&self, user_id: UserId) -> Result<()> {
        let mut onboarding = self.onboarding.lock().unwrap();

        if !onboarding.iter().any(|(owner, _)| *owner == user_id) {
            onboarding.push((user_id, OffsetDateTime::now_utc()));
        }

        Ok(())
    }
}
