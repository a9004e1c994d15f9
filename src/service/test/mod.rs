//! Workflow tests against an in-memory database and a recording fake of Discord.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use sea_orm::ConnectionTrait;
use serenity::async_trait;
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{
    config::{self, Config},
    error::notification::NotificationError,
    model::{
        candidate::HistoryMessage,
        invoker::Invoker,
        notification::{Destination, MessageRef, Notification},
    },
    service::{
        draft::DraftStore,
        notify::{GuildModerator, MessageHistory, Notifier},
        store::RecordStore,
    },
};

mod ban;
mod bonus;
mod candidate;

/// A message the fake accepted.
#[derive(Debug, Clone)]
pub struct Sent {
    pub destination: Destination,
    pub notification: Notification,
    pub message: MessageRef,
}

/// How the fake answers a delete request.
#[derive(Debug, Clone, Copy)]
pub enum DeleteBehavior {
    Succeed,
    NotFound,
    Forbidden,
}

/// Records everything the workflows ask Discord to do.
///
/// Every send yields to the scheduler first so concurrent workflows interleave at the
/// same points they would against the real API.
pub struct FakeDiscord {
    next_message_id: AtomicU64,
    pub sent: Mutex<Vec<Sent>>,
    pub deleted: Mutex<Vec<(Destination, u64)>>,
    pub directs: Mutex<Vec<(u64, Notification)>>,
    pub bans: Mutex<Vec<(u64, String)>>,
    pub history: Mutex<Vec<HistoryMessage>>,
    failing: Mutex<Vec<Destination>>,
    dm_blocked: AtomicBool,
    delete_behavior: Mutex<DeleteBehavior>,
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(5000),
            sent: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            directs: Mutex::new(Vec::new()),
            bans: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            failing: Mutex::new(Vec::new()),
            dm_blocked: AtomicBool::new(false),
            delete_behavior: Mutex::new(DeleteBehavior::Succeed),
        }
    }

    /// Makes every send to `destination` fail with `Forbidden`.
    pub fn fail_sends_to(&self, destination: Destination) {
        self.failing.lock().unwrap().push(destination);
    }

    pub fn block_dms(&self) {
        self.dm_blocked.store(true, Ordering::SeqCst);
    }

    pub fn on_delete(&self, behavior: DeleteBehavior) {
        *self.delete_behavior.lock().unwrap() = behavior;
    }

    pub fn set_history(&self, history: Vec<HistoryMessage>) {
        *self.history.lock().unwrap() = history;
    }

    pub fn sent_to(&self, destination: Destination) -> Vec<Sent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.destination == destination)
            .cloned()
            .collect()
    }

    pub fn total_sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn channel_for(destination: Destination) -> u64 {
        match destination {
            Destination::ReportLog => 101,
            Destination::StaffAlert => 102,
            Destination::Commendations => 103,
            Destination::ZeusFeedback => 104,
        }
    }
}

#[async_trait]
impl Notifier for FakeDiscord {
    async fn send(
        &self,
        destination: Destination,
        notification: Notification,
    ) -> Result<MessageRef, NotificationError> {
        tokio::task::yield_now().await;

        if self.failing.lock().unwrap().contains(&destination) {
            return Err(NotificationError::Forbidden);
        }

        let message = MessageRef {
            channel_id: Self::channel_for(destination),
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
        };
        self.sent.lock().unwrap().push(Sent {
            destination,
            notification,
            message,
        });

        Ok(message)
    }

    async fn delete(
        &self,
        destination: Destination,
        message_id: u64,
    ) -> Result<(), NotificationError> {
        tokio::task::yield_now().await;

        let behavior = *self.delete_behavior.lock().unwrap();
        match behavior {
            DeleteBehavior::Succeed => {
                self.deleted.lock().unwrap().push((destination, message_id));
                Ok(())
            }
            DeleteBehavior::NotFound => Err(NotificationError::NotFound),
            DeleteBehavior::Forbidden => Err(NotificationError::Forbidden),
        }
    }

    async fn direct(
        &self,
        user_id: u64,
        notification: Notification,
    ) -> Result<(), NotificationError> {
        if self.dm_blocked.load(Ordering::SeqCst) {
            return Err(NotificationError::Forbidden);
        }

        self.directs.lock().unwrap().push((user_id, notification));
        Ok(())
    }
}

#[async_trait]
impl MessageHistory for FakeDiscord {
    async fn recent(
        &self,
        _destination: Destination,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>, NotificationError> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GuildModerator for FakeDiscord {
    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), NotificationError> {
        self.bans.lock().unwrap().push((user_id, reason.to_string()));
        Ok(())
    }
}

/// Everything a workflow needs, wired to fakes.
pub struct Harness {
    pub config: Config,
    pub store: RecordStore,
    pub drafts: DraftStore,
    pub discord: FakeDiscord,
    _test: TestContext,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_config(config::test::config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let test = TestBuilder::new().with_document_table().build().await.unwrap();
        let db = test.db.clone().unwrap();

        Self {
            drafts: DraftStore::new(config.draft_retention),
            config,
            store: RecordStore::new(db),
            discord: FakeDiscord::new(),
            _test: test,
        }
    }

    /// Makes every later insert or update of a stored document fail.
    ///
    /// Reads keep working, so a collection loaded beforehand can still be locked and
    /// mutated; only its commit fails.
    pub async fn reject_document_writes(&self) {
        let db = self._test.db.as_ref().unwrap();
        for event in ["INSERT", "UPDATE"] {
            db.execute_unprepared(&format!(
                "CREATE TRIGGER reject_document_{0} BEFORE {0} ON document \
                 BEGIN SELECT RAISE(ABORT, 'disk is read-only'); END",
                event.to_lowercase()
            ))
            .await
            .unwrap();
        }
    }
}

/// Invoker holding `roles`, calling from `channel_id`.
pub fn invoker(user_id: u64, roles: &[u64], channel_id: u64) -> Invoker {
    Invoker {
        user_id,
        display_name: format!("Member {}", user_id),
        role_ids: roles.to_vec(),
        channel_id,
    }
}

/// Unit staff member in the staff channel.
pub fn staff() -> Invoker {
    invoker(10, &[201], 102)
}
