/// In-process store
///
/// Mirrors the PostgreSQL schema rules: unique member emails, the
/// `workout_session.member_id` foreign key, the positive-duration check and
/// cascading deletes. Error messages use the same constraint names as the
/// migrations so callers see identical text from either backend.

use super::{Store, StoreError, StoreResult};
use crate::models::{Member, NewMember, NewWorkoutSession, WorkoutSession};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

const MEMBER_EMAIL_KEY: &str = "member_email_key";
const SESSION_MEMBER_FKEY: &str = "workout_session_member_id_fkey";
const SESSION_DURATION_CHECK: &str = "workout_session_duration_minutes_check";

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<i64, Member>,
    sessions: BTreeMap<i64, WorkoutSession>,
    next_member_id: i64,
    next_session_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.members
            .values()
            .any(|m| m.email == email && Some(m.id) != except)
    }
}

/// [`Store`] implementation backed by ordered maps behind one lock
///
/// Ids start at 1 and are never reused, like a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call fail with [`StoreError::Unavailable`], the way
    /// a closed connection pool would
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("store is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

fn duplicate_email() -> StoreError {
    StoreError::UniqueViolation {
        constraint: Some(MEMBER_EMAIL_KEY.to_string()),
        message: format!("duplicate key value violates unique constraint \"{MEMBER_EMAIL_KEY}\""),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn create_member(&self, input: NewMember) -> StoreResult<Member> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        if tables.email_taken(&input.email, None) {
            return Err(duplicate_email());
        }

        tables.next_member_id += 1;
        let member = input.into_member(tables.next_member_id);
        tables.members.insert(member.id, member.clone());

        Ok(member)
    }

    async fn list_members(&self) -> StoreResult<Vec<Member>> {
        self.ensure_open()?;
        let tables = self.tables.read().await;
        Ok(tables.members.values().cloned().collect())
    }

    async fn find_member(&self, id: i64) -> StoreResult<Option<Member>> {
        self.ensure_open()?;
        let tables = self.tables.read().await;
        Ok(tables.members.get(&id).cloned())
    }

    async fn update_member(&self, id: i64, input: NewMember) -> StoreResult<Option<Member>> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        if !tables.members.contains_key(&id) {
            return Ok(None);
        }
        if tables.email_taken(&input.email, Some(id)) {
            return Err(duplicate_email());
        }

        let member = input.into_member(id);
        tables.members.insert(id, member.clone());

        Ok(Some(member))
    }

    async fn delete_member(&self, id: i64) -> StoreResult<bool> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        if tables.members.remove(&id).is_none() {
            return Ok(false);
        }
        tables.sessions.retain(|_, session| session.member_id != id);

        Ok(true)
    }

    async fn create_workout(&self, input: NewWorkoutSession) -> StoreResult<WorkoutSession> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        if !tables.members.contains_key(&input.member_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: Some(SESSION_MEMBER_FKEY.to_string()),
                message: format!(
                    "insert or update on table \"workout_session\" violates foreign key constraint \"{SESSION_MEMBER_FKEY}\""
                ),
            });
        }
        if input.duration_minutes <= 0 {
            return Err(StoreError::CheckViolation {
                constraint: Some(SESSION_DURATION_CHECK.to_string()),
                message: format!(
                    "new row for relation \"workout_session\" violates check constraint \"{SESSION_DURATION_CHECK}\""
                ),
            });
        }

        tables.next_session_id += 1;
        let session = input.into_session(tables.next_session_id);
        tables.sessions.insert(session.id, session.clone());

        Ok(session)
    }

    async fn list_workouts(&self) -> StoreResult<Vec<WorkoutSession>> {
        self.ensure_open()?;
        let tables = self.tables.read().await;
        Ok(tables.sessions.values().cloned().collect())
    }

    async fn list_workouts_for_member(&self, member_id: i64) -> StoreResult<Vec<WorkoutSession>> {
        self.ensure_open()?;
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .values()
            .filter(|session| session.member_id == member_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_date;

    fn new_member(name: &str, email: &str) -> NewMember {
        NewMember {
            name: name.to_string(),
            email: email.to_string(),
            phone: "5551234567".to_string(),
        }
    }

    fn new_session(member_id: i64, activity: &str) -> NewWorkoutSession {
        NewWorkoutSession {
            member_id,
            date: validate_date("2024-06-01 09:00:00").unwrap(),
            duration_minutes: 45,
            activity_type: activity.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        let a = store.create_member(new_member("A", "a@x.com")).await.unwrap();
        let b = store.create_member(new_member("B", "b@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete_member(b.id).await.unwrap());
        let c = store.create_member(new_member("C", "c@x.com")).await.unwrap();
        assert_eq!(c.id, 3);

        let ids: Vec<i64> = store.list_members().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        store.create_member(new_member("A", "a@x.com")).await.unwrap();

        let err = store
            .create_member(new_member("A2", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(store.list_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_email_but_rejects_others() {
        let store = MemoryStore::new();
        let a = store.create_member(new_member("A", "a@x.com")).await.unwrap();
        store.create_member(new_member("B", "b@x.com")).await.unwrap();

        let updated = store
            .update_member(a.id, new_member("Alice", "a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Alice");

        let err = store
            .update_member(a.id, new_member("Alice", "b@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        assert_eq!(
            store.update_member(99, new_member("Z", "z@x.com")).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_workout_requires_existing_member() {
        let store = MemoryStore::new();
        let err = store.create_workout(new_session(1, "running")).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
        assert!(store.list_workouts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workout_rejects_non_positive_duration() {
        let store = MemoryStore::new();
        let member = store.create_member(new_member("A", "a@x.com")).await.unwrap();

        let input = NewWorkoutSession {
            duration_minutes: 0,
            ..new_session(member.id, "running")
        };
        let err = store.create_workout(input).await.unwrap_err();
        assert!(matches!(err, StoreError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_member_cascades_to_sessions() {
        let store = MemoryStore::new();
        let a = store.create_member(new_member("A", "a@x.com")).await.unwrap();
        let b = store.create_member(new_member("B", "b@x.com")).await.unwrap();
        store.create_workout(new_session(a.id, "running")).await.unwrap();
        store.create_workout(new_session(b.id, "rowing")).await.unwrap();
        store.create_workout(new_session(a.id, "cycling")).await.unwrap();

        let for_a = store.list_workouts_for_member(a.id).await.unwrap();
        assert_eq!(
            for_a.iter().map(|s| s.activity_type.as_str()).collect::<Vec<_>>(),
            vec!["running", "cycling"]
        );

        assert!(store.delete_member(a.id).await.unwrap());
        assert!(!store.delete_member(a.id).await.unwrap());

        let remaining = store.list_workouts().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].member_id, b.id);
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = MemoryStore::new();
        assert!(store.ping().await.is_ok());

        store.close();
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.list_members().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
