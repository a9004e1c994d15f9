//! Draft store for incident report submissions that failed validation.
//!
//! When a submission is rejected (for instance an unreadable date) its field values
//! are kept per user for a bounded retention window, so the next form opens
//! pre-filled. Drafts expire lazily on read and are also swept by a scheduled job.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::model::incident::IncidentReportFields;

/// Stored draft with expiration timestamp.
#[derive(Clone)]
struct Draft {
    fields: IncidentReportFields,
    expires_at: Instant,
}

impl Draft {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory drafts keyed by the submitting user's ID.
#[derive(Clone)]
pub struct DraftStore {
    drafts: Arc<RwLock<HashMap<u64, Draft>>>,
    retention: Duration,
}

impl DraftStore {
    /// Creates an empty store whose drafts live for `retention`.
    pub fn new(retention: Duration) -> Self {
        Self {
            drafts: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }

    /// Keeps `fields` for `user_id`, replacing any earlier draft and restarting the window.
    pub async fn save(&self, user_id: u64, fields: IncidentReportFields) {
        let draft = Draft {
            fields,
            expires_at: Instant::now() + self.retention,
        };
        self.drafts.write().await.insert(user_id, draft);
    }

    /// Returns the user's draft if it is still inside its retention window.
    ///
    /// An expired draft is removed as a side effect.
    ///
    /// # Returns
    /// - `Some(IncidentReportFields)` - Draft to pre-fill the form with
    /// - `None` - No draft, or it has expired
    pub async fn get(&self, user_id: u64) -> Option<IncidentReportFields> {
        let mut drafts = self.drafts.write().await;

        match drafts.get(&user_id) {
            Some(draft) if draft.is_expired(Instant::now()) => {
                drafts.remove(&user_id);
                None
            }
            Some(draft) => Some(draft.fields.clone()),
            None => None,
        }
    }

    /// Discards the user's draft, e.g. after a successful submission.
    pub async fn discard(&self, user_id: u64) {
        self.drafts.write().await.remove(&user_id);
    }

    /// Removes every expired draft and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut drafts = self.drafts.write().await;
        let before = drafts.len();

        drafts.retain(|_, draft| !draft.is_expired(now));

        before - drafts.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const RETENTION: Duration = Duration::from_secs(900);

    fn fields(subject: &str) -> IncidentReportFields {
        IncidentReportFields {
            subject: subject.to_string(),
            date_text: "the other day".to_string(),
            details: "details".to_string(),
            evidence: None,
            outcome: "Written Warning".to_string(),
        }
    }

    /// Tests retrieving a draft inside the retention window.
    ///
    /// Expected: Some(fields) identical to what was saved
    #[tokio::test(start_paused = true)]
    async fn returns_draft_within_window() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("Alice 123")).await;

        advance(Duration::from_secs(899)).await;

        assert_eq!(store.get(1).await, Some(fields("Alice 123")));
    }

    /// Tests that a draft is gone once the retention window elapses.
    ///
    /// Expected: None, and the entry is removed
    #[tokio::test(start_paused = true)]
    async fn expires_after_window() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("Alice 123")).await;

        advance(RETENTION).await;

        assert_eq!(store.get(1).await, None);
        assert_eq!(store.len().await, 0);
    }

    /// Tests that drafts are isolated per user.
    ///
    /// Expected: each user sees only their own draft
    #[tokio::test(start_paused = true)]
    async fn keyed_by_user() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("Alice")).await;
        store.save(2, fields("Bob")).await;

        assert_eq!(store.get(1).await.map(|f| f.subject), Some("Alice".to_string()));
        assert_eq!(store.get(2).await.map(|f| f.subject), Some("Bob".to_string()));
        assert_eq!(store.get(3).await, None);
    }

    /// Tests that saving again restarts the retention window.
    ///
    /// Expected: draft survives past the first window
    #[tokio::test(start_paused = true)]
    async fn resave_restarts_window() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("first")).await;

        advance(Duration::from_secs(600)).await;
        store.save(1, fields("second")).await;
        advance(Duration::from_secs(600)).await;

        assert_eq!(store.get(1).await.map(|f| f.subject), Some("second".to_string()));
    }

    /// Tests the periodic sweep.
    ///
    /// Expected: only the expired draft is removed
    #[tokio::test(start_paused = true)]
    async fn purge_removes_only_expired() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("old")).await;
        advance(Duration::from_secs(800)).await;
        store.save(2, fields("new")).await;
        advance(Duration::from_secs(200)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.get(1).await, None);
        assert!(store.get(2).await.is_some());
    }

    /// Tests discarding a draft after a successful submission.
    ///
    /// Expected: None afterwards
    #[tokio::test(start_paused = true)]
    async fn discard_removes_draft() {
        let store = DraftStore::new(RETENTION);
        store.save(1, fields("Alice")).await;

        store.discard(1).await;

        assert_eq!(store.get(1).await, None);
    }
}
