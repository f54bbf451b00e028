//! Delayed deletion of transient bot messages such as repost notices.

use std::{sync::Arc, time::Duration};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::chat::ChatPlatform};

/// Deletes messages after a delay using one-shot scheduler jobs.
///
/// Owned by startup; pending deletions are dropped when the scheduler shuts down.
#[derive(Clone)]
pub struct MessageCleanupScheduler {
    scheduler: JobScheduler,
    chat: Arc<dyn ChatPlatform>,
}

impl MessageCleanupScheduler {
    /// Creates a new MessageCleanupScheduler on a started job scheduler.
    ///
    /// # Arguments
    /// - `scheduler` - Job scheduler shared with the other bot jobs
    /// - `chat` - Chat platform used to delete the messages
    pub fn new(scheduler: JobScheduler, chat: Arc<dyn ChatPlatform>) -> Self {
        Self { scheduler, chat }
    }

    /// Schedules a message for deletion.
    ///
    /// # Arguments
    /// - `channel_id` - Channel holding the message
    /// - `message_id` - Message to delete
    /// - `after` - Delay before deleting
    ///
    /// # Returns
    /// - `Ok(())` - Deletion scheduled
    /// - `Err(AppError::SchedulerErr)` - Job could not be added
    pub async fn schedule_delete(
        &self,
        channel_id: u64,
        message_id: u64,
        after: Duration,
    ) -> Result<(), AppError> {
        let chat = self.chat.clone();

        let job = Job::new_one_shot_async(after, move |_uuid, _lock| {
            let chat = chat.clone();

            Box::pin(async move {
                if let Err(e) = chat.delete_message(channel_id, message_id).await {
                    tracing::warn!(
                        "Failed to delete scheduled message {} in channel {}: {}",
                        message_id,
                        channel_id,
                        e
                    );
                } else {
                    tracing::debug!(
                        "Deleted scheduled message {} in channel {}",
                        message_id,
                        channel_id
                    );
                }
            })
        })?;

        self.scheduler.add(job).await?;

        Ok(())
    }
}
