use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::draft::DraftStore};

/// Starts the draft sweep scheduler.
///
/// Runs every minute and drops incident report drafts whose retention window has
/// elapsed. Drafts are also expired lazily on read, so the sweep only bounds memory
/// held for users who never come back.
///
/// # Arguments
/// - `drafts` - Draft store shared with the bot
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for the life of the process
/// - `Err(AppError::SchedulerErr)` - Job could not be created or the scheduler failed to start
pub async fn start_scheduler(drafts: DraftStore) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let drafts = drafts.clone();

        Box::pin(async move {
            let purged = drafts.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired incident report drafts", purged);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Draft sweep scheduler started");

    Ok(scheduler)
}
