//! Course CRUD repository
//!
//! The repository owns mutation rights over the shared [`ScheduleStore`]
//! behind a coarse tokio mutex. Every mutating operation refreshes the
//! caller's delivery context and persists the full store before returning,
//! so a crash loses at most the in-flight mutation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use log::info;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::core::errors::ScheduleError;
use crate::core::weekday::parse_weekday;

use super::course::{validate_time, Course};
use super::store::ScheduleStore;

/// Cheaply cloneable handle over the shared schedule store.
#[derive(Clone)]
pub struct CourseRepository {
    store: Arc<Mutex<ScheduleStore>>,
}

impl CourseRepository {
    pub fn new(store: ScheduleStore) -> Self {
        CourseRepository {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Shared store handle for the reminder scheduler's read-only scans.
    pub fn store(&self) -> Arc<Mutex<ScheduleStore>> {
        Arc::clone(&self.store)
    }

    /// Validate and add one course for a user, creating the user record on
    /// first use. Returns the created course for confirmation messaging.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_course(
        &self,
        user_id: &str,
        provider_id: &str,
        conversation_id: &str,
        weekday: &str,
        time: &str,
        name: &str,
        location: &str,
    ) -> Result<Course, ScheduleError> {
        let day = parse_weekday(weekday)?;
        validate_time(time)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::EmptyName);
        }

        let course = Course {
            day,
            time: time.to_string(),
            name: name.to_string(),
            location: location.trim().to_string(),
        };

        let mut store = self.store.lock().await;
        let record = store.touch_user(user_id, provider_id, conversation_id);
        record.courses.push(course.clone());
        record.sort_courses();
        store.save()?;

        info!("Added course '{}' for user {user_id}", course.name);
        Ok(course)
    }

    /// Current course list in stored (sorted) order. Empty when the user
    /// has no record — never an error.
    pub async fn list_courses(&self, user_id: &str) -> Vec<Course> {
        let store = self.store.lock().await;
        store
            .user(user_id)
            .map(|record| record.courses.clone())
            .unwrap_or_default()
    }

    /// Remove the course at a 1-based position in the sorted list,
    /// returning it for confirmation messaging.
    pub async fn delete_course(&self, user_id: &str, index: i64) -> Result<Course, ScheduleError> {
        let mut store = self.store.lock().await;

        let record = store
            .user_mut(user_id)
            .ok_or(ScheduleError::IndexOutOfRange { index, len: 0 })?;

        let len = record.courses.len();
        if index < 1 || index as usize > len {
            return Err(ScheduleError::IndexOutOfRange { index, len });
        }

        let removed = record.courses.remove(index as usize - 1);
        store.save()?;

        info!("Removed course '{}' for user {user_id}", removed.name);
        Ok(removed)
    }

    /// Bulk-import courses from a user-supplied JSON payload.
    ///
    /// The payload may be wrapped in a Markdown code fence; after stripping
    /// it must parse as a JSON array or the whole import fails with
    /// [`ScheduleError::MalformedPayload`]. Individual items that are not
    /// objects, are missing any of the four required fields, or carry an
    /// unparseable weekday or time are skipped without failing the batch.
    /// Returns the number of courses actually imported.
    pub async fn import_courses(
        &self,
        user_id: &str,
        provider_id: &str,
        conversation_id: &str,
        payload: &str,
    ) -> Result<usize, ScheduleError> {
        let cleaned = strip_code_fence(payload);
        let items: Vec<Value> = serde_json::from_str(cleaned)
            .map_err(|e| ScheduleError::MalformedPayload(e.to_string()))?;

        let accepted: Vec<Course> = items.iter().filter_map(parse_import_item).collect();
        let count = accepted.len();

        let mut store = self.store.lock().await;
        let record = store.touch_user(user_id, provider_id, conversation_id);
        record.courses.extend(accepted);
        record.sort_courses();
        store.save()?;

        info!(
            "Imported {count} of {} submitted course(s) for user {user_id}",
            items.len()
        );
        Ok(count)
    }
}

/// Strip an optional Markdown code fence (with or without a language tag)
/// around a pasted payload.
fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop a language tag like `json` on the opening fence line
    let rest = match rest.find('\n') {
        Some(i) if !rest[..i].trim().contains(|c: char| !c.is_alphanumeric()) => &rest[i + 1..],
        _ => rest,
    };
    rest.trim()
}

/// Parse one untrusted import item into a course.
///
/// `day` may be an in-range number or a weekday-name token; unrecognized
/// tokens skip the item rather than defaulting to Monday. An empty `name`
/// also skips the item.
fn parse_import_item(value: &Value) -> Option<Course> {
    let obj = value.as_object()?;

    let day = match obj.get("day")? {
        Value::Number(n) => {
            let d = n.as_u64()?;
            if (1..=7).contains(&d) {
                d as u8
            } else {
                return None;
            }
        }
        Value::String(s) => parse_weekday(s).ok()?,
        _ => return None,
    };

    let time = obj.get("time")?.as_str()?;
    validate_time(time).ok()?;

    let name = obj.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let location = obj.get("location")?.as_str()?;

    Some(Course {
        day,
        time: time.to_string(),
        name: name.to_string(),
        location: location.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_repository(dir: &tempfile::TempDir) -> CourseRepository {
        let store = ScheduleStore::load(dir.path().join("course_data.json")).unwrap();
        CourseRepository::new(store)
    }

    async fn names(repo: &CourseRepository, user: &str) -> Vec<String> {
        repo.list_courses(user)
            .await
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[tokio::test]
    async fn test_add_then_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        repo.add_course("u1", "discord", "42", "wednesday", "09:00", "Physics", "B2")
            .await
            .unwrap();
        repo.add_course("u1", "discord", "42", "1", "14:30", "Math", "Room1")
            .await
            .unwrap();
        repo.add_course("u1", "discord", "42", "Monday", "08:00", "English", "A101")
            .await
            .unwrap();

        assert_eq!(names(&repo, "u1").await, vec!["English", "Math", "Physics"]);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_weekday_and_time() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let err = repo
            .add_course("u1", "discord", "42", "blursday", "08:00", "X", "Y")
            .await
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidWeekday(_)));

        let err = repo
            .add_course("u1", "discord", "42", "monday", "8am", "X", "Y")
            .await
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeFormat(_)));

        assert!(repo.list_courses("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        for name in ["", "   ", "\t"] {
            let err = repo
                .add_course("u1", "discord", "42", "monday", "08:00", name, "Room1")
                .await
                .unwrap_err();
            assert!(matches!(err, ScheduleError::EmptyName));
        }
        assert!(repo.list_courses("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_inverse_of_add() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let added = repo
            .add_course("u1", "discord", "42", "monday", "14:30", "Math", "Room1")
            .await
            .unwrap();
        let removed = repo.delete_course("u1", 1).await.unwrap();

        assert_eq!(added, removed);
        assert!(repo.list_courses("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_out_of_range_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        repo.add_course("u1", "discord", "42", "1", "08:00", "A", "x")
            .await
            .unwrap();
        repo.add_course("u1", "discord", "42", "1", "09:00", "B", "x")
            .await
            .unwrap();

        for index in [0, 99, -3] {
            let err = repo.delete_course("u1", index).await.unwrap_err();
            assert!(matches!(
                err,
                ScheduleError::IndexOutOfRange { len: 2, .. }
            ));
        }
        assert_eq!(names(&repo, "u1").await, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_delete_for_unknown_user_is_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let err = repo.delete_course("nobody", 1).await.unwrap_err();
        assert!(matches!(err, ScheduleError::IndexOutOfRange { len: 0, .. }));
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        repo.add_course("u1", "discord", "42", "fri", "10:00", "Chemistry", "Lab")
            .await
            .unwrap();

        let first = repo.list_courses("u1").await;
        let second = repo.list_courses("u1").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_import_skips_items_missing_required_fields() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let payload = r#"[
            {"day": 1, "time": "08:00", "name": "English", "location": "A101"},
            {"day": 2, "time": "bad"}
        ]"#;

        let count = repo
            .import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(names(&repo, "u1").await, vec!["English"]);
    }

    #[tokio::test]
    async fn test_import_skips_unrecognized_weekday_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let payload = r#"[
            {"day": "blursday", "time": "08:00", "name": "Nope", "location": "A"},
            {"day": "tuesday", "time": "09:00", "name": "History", "location": "B"},
            {"day": 9, "time": "10:00", "name": "OutOfRange", "location": "C"}
        ]"#;

        let count = repo
            .import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(names(&repo, "u1").await, vec!["History"]);
    }

    #[tokio::test]
    async fn test_import_skips_blank_names() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let payload = r#"[
            {"day": 1, "time": "08:00", "name": "", "location": "A"},
            {"day": 2, "time": "09:00", "name": "  ", "location": "B"},
            {"day": 3, "time": "10:00", "name": "Biology", "location": "C"}
        ]"#;

        let count = repo
            .import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(names(&repo, "u1").await, vec!["Biology"]);
    }

    #[tokio::test]
    async fn test_import_accepts_fenced_payload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let payload = "```json\n[{\"day\": 4, \"time\": \"16:00\", \"name\": \"Art\", \"location\": \"Studio\"}]\n```";
        let count = repo
            .import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_import_rejects_non_array_payload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        for payload in ["not json at all", r#"{"day": 1}"#, "42"] {
            let err = repo
                .import_courses("u1", "discord", "42", payload)
                .await
                .unwrap_err();
            assert!(matches!(err, ScheduleError::MalformedPayload(_)));
        }
    }

    #[tokio::test]
    async fn test_import_sorts_once_at_the_end() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        repo.add_course("u1", "discord", "42", "2", "12:00", "Existing", "x")
            .await
            .unwrap();

        let payload = r#"[
            {"day": 3, "time": "09:00", "name": "Later", "location": "x"},
            {"day": 1, "time": "09:00", "name": "Earlier", "location": "x"}
        ]"#;
        repo.import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();

        assert_eq!(
            names(&repo, "u1").await,
            vec!["Earlier", "Existing", "Later"]
        );
    }

    #[tokio::test]
    async fn test_mutations_refresh_delivery_context() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        repo.add_course("u1", "discord", "old", "1", "08:00", "A", "x")
            .await
            .unwrap();
        repo.import_courses("u1", "discord", "new", "[]").await.unwrap();

        let store = repo.store();
        let store = store.lock().await;
        assert_eq!(store.user("u1").unwrap().conversation_id, "new");
    }

    #[tokio::test]
    async fn test_every_mutation_reaches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_data.json");
        let repo = CourseRepository::new(ScheduleStore::load(&path).unwrap());

        repo.add_course("u1", "discord", "42", "1", "08:00", "English", "A101")
            .await
            .unwrap();
        repo.add_course("u1", "discord", "42", "2", "09:00", "Math", "Room1")
            .await
            .unwrap();
        let on_disk = ScheduleStore::load(&path).unwrap();
        assert_eq!(on_disk.user("u1").unwrap().courses.len(), 2);

        repo.delete_course("u1", 1).await.unwrap();
        let on_disk = ScheduleStore::load(&path).unwrap();
        let courses: Vec<_> = on_disk
            .user("u1")
            .unwrap()
            .courses
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(courses, vec!["Math"]);

        let payload = r#"[{"day": 5, "time": "10:00", "name": "Chemistry", "location": "Lab"}]"#;
        repo.import_courses("u1", "discord", "42", payload)
            .await
            .unwrap();
        let on_disk = ScheduleStore::load(&path).unwrap();
        assert_eq!(on_disk.user("u1").unwrap().courses.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_adds_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = empty_repository(&dir);

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.add_course("u1", "discord", "42", "1", "08:00", "First", "x")
                    .await
                    .unwrap();
            })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.add_course("u1", "discord", "42", "2", "09:00", "Second", "x")
                    .await
                    .unwrap();
            })
        };
        a.await.unwrap();
        b.await.unwrap();

        assert_eq!(repo.list_courses("u1").await.len(), 2);
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("[1]"), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  ```json\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("```[1]```"), "[1]");
    }
}
