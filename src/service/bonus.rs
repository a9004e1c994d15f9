//! Performance bonus ledger: rate-limited random awards and running totals.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::{
    config::Config,
    error::workflow::WorkflowError,
    model::bonus::{BonusLedgers, Cents},
    service::store::RecordStore,
};

/// Rolling window the daily award limit applies to.
const AWARD_WINDOW_HOURS: i64 = 24;

pub struct BonusService<'a> {
    config: &'a Config,
    store: &'a RecordStore,
}

impl<'a> BonusService<'a> {
    pub fn new(config: &'a Config, store: &'a RecordStore) -> Self {
        Self { config, store }
    }

    /// Awards a bonus to `recipient` now.
    ///
    /// See [`BonusService::award_bonus_at`].
    pub async fn award_bonus(&self, recipient: u64) -> Result<Cents, WorkflowError> {
        self.award_bonus_at(recipient, Utc::now()).await
    }

    /// Awards a bonus to `recipient` as of `now`.
    ///
    /// Recipients receive at most the configured number of awards in any rolling
    /// 24 hours. Under the limit the amount is drawn uniformly from the configured
    /// range; at the limit the award is zero and the ledger is left unchanged.
    ///
    /// # Arguments
    /// - `recipient` - Member receiving the bonus
    /// - `now` - Award time, used for the rate limit window
    ///
    /// # Returns
    /// - `Ok(Cents)` - Amount awarded, zero when rate limited
    /// - `Err(WorkflowError::StorageUnavailable)` - Ledger could not be read or written
    pub async fn award_bonus_at(
        &self,
        recipient: u64,
        now: DateTime<Utc>,
    ) -> Result<Cents, WorkflowError> {
        let window = Duration::hours(AWARD_WINDOW_HOURS);
        let limit = self.config.thresholds.bonus_daily_limit;

        let mut ledgers = self.store.lock::<BonusLedgers>().await?;
        let ledger = ledgers.ledger_mut(recipient);

        if ledger.recent(now, window) >= limit {
            tracing::debug!(
                "Bonus limit of {} reached for {}, awarding nothing",
                limit,
                recipient
            );
            return Ok(Cents::ZERO);
        }

        let settings = &self.config.bonus;
        let amount = Cents(rand::rng().random_range(settings.min_cents..=settings.max_cents));

        ledger.prune(now, window);
        ledger.record(amount, now);
        ledgers.commit().await?;

        tracing::info!("Awarded bonus of {} to {}", amount, recipient);

        Ok(amount)
    }

    /// Accumulated bonus total for `member_id`, zero if they never received one.
    pub async fn total_for(&self, member_id: u64) -> Result<Cents, WorkflowError> {
        Ok(self.store.load::<BonusLedgers>().await?.total_for(member_id))
    }

    /// Recipients with the highest totals, highest first.
    pub async fn leaderboard(&self, limit: usize) -> Result<Vec<(u64, Cents)>, WorkflowError> {
        let ledgers = self.store.load::<BonusLedgers>().await?;

        Ok(ledgers.leaderboard().into_iter().take(limit).collect())
    }
}
