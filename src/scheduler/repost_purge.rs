use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::repost::RepostDetector};

/// Every ten minutes.
const PURGE_SCHEDULE: &str = "0 */10 * * * *";

/// Adds the job dropping expired repost records.
///
/// Lookups already ignore expired records; this only keeps the store from growing.
///
/// # Arguments
/// - `scheduler` - Job scheduler owned by startup
/// - `detector` - Active repost detector backend
pub async fn add_purge_job(
    scheduler: &JobScheduler,
    detector: Arc<dyn RepostDetector>,
) -> Result<(), AppError> {
    let job = Job::new_async(PURGE_SCHEDULE, move |_uuid, _lock| {
        let detector = detector.clone();

        Box::pin(async move {
            match detector.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Purged {} expired repost records", removed),
                Err(e) => tracing::error!("Error purging expired reposts: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;

    tracing::info!("Repost purge job scheduled");

    Ok(())
}
