/// Daily reminder service
///
/// Runs in-process alongside the API server and sends one SMS for every task
/// due tomorrow. The service sleeps until the configured local fire time
/// (23:00 by default), runs the batch once, then sleeps until the next day's
/// fire time.
///
/// # Batch Semantics
///
/// One run selects every task whose due date equals tomorrow's local date,
/// completed tasks included, and sends one message per task:
///
/// - A task whose owner row is missing is logged and skipped; it counts as
///   neither sent nor failed.
/// - A send failure is logged and counted; the batch always continues to the
///   next task.
/// - There is no retry and no record of what was sent, so a task due
///   tomorrow is reminded exactly once per run.
///
/// # Shutdown
///
/// The service owns a `CancellationToken`. Cancelling it wakes the sleep and
/// stops the loop; an in-flight batch finishes its current task list first.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use duetask_reminder::service::{ReminderConfig, ReminderService};
/// use duetask_reminder::sms::MockSmsSender;
///
/// # async fn example(pool: sqlx::PgPool) {
/// let sender = Arc::new(MockSmsSender::new());
/// let service = ReminderService::new(pool, sender, ReminderConfig::default());
///
/// let shutdown = service.shutdown_token();
/// let handle = service.spawn();
///
/// // ... serve traffic ...
///
/// shutdown.cancel();
/// let _ = handle.await;
/// # }
/// ```

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use duetask_shared::models::task::Task;
use duetask_shared::models::user::User;

use crate::schedule::next_occurrence;
use crate::sms::SmsSender;

/// Reminder service configuration
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// Local hour of day at which the batch fires (0-23)
    pub hour: u32,

    /// Local minute of the hour at which the batch fires (0-59)
    pub minute: u32,

    /// Dialing prefix prepended to every stored mobile number
    pub country_prefix: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            hour: 23,
            minute: 0,
            country_prefix: "+61".to_string(),
        }
    }
}

/// Outcome counts for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderRunSummary {
    /// Tasks selected for the run
    pub due_tasks: usize,

    /// Messages accepted by the gateway
    pub sent: usize,

    /// Messages the gateway rejected or that failed in transport
    pub failed: usize,
}

/// The reminder service
///
/// Cheap to clone; clones share the pool, the sender, and the shutdown
/// token.
#[derive(Clone)]
pub struct ReminderService {
    pool: PgPool,
    sender: Arc<dyn SmsSender>,
    config: ReminderConfig,
    shutdown_token: CancellationToken,
}

/// Builds the message text for one due task
fn reminder_message(title: &str, due: NaiveDate) -> String {
    format!("Reminder: Your task '{}' is due tomorrow ({}).", title, due)
}

impl ReminderService {
    /// Creates a new reminder service
    pub fn new(pool: PgPool, sender: Arc<dyn SmsSender>, config: ReminderConfig) -> Self {
        ReminderService {
            pool,
            sender,
            config,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Returns a handle to the shutdown token
    ///
    /// Cancel it to stop the loop started by `spawn` or `run`.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Spawns the daily loop on the current runtime
    pub fn spawn(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move { service.run().await })
    }

    /// Runs the daily loop until the shutdown token is cancelled
    pub async fn run(&self) {
        tracing::info!(
            hour = self.config.hour,
            minute = self.config.minute,
            sender = self.sender.name(),
            "Reminder service started"
        );

        loop {
            let now = Local::now();
            let fire_at = next_occurrence(now, self.config.hour, self.config.minute);
            let wait = (fire_at - now).to_std().unwrap_or(std::time::Duration::ZERO);

            tracing::debug!(fire_at = %fire_at, "Sleeping until next reminder run");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Reminder run failed");
                    }
                }
                _ = self.shutdown_token.cancelled() => {
                    tracing::info!("Reminder service shut down");
                    break;
                }
            }
        }
    }

    /// Runs one batch for tomorrow's local date
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the task or user queries fail. Send failures
    /// do not error; they are counted in the summary.
    pub async fn run_once(&self) -> Result<ReminderRunSummary, sqlx::Error> {
        let today = Local::now().date_naive();
        let tomorrow = match today.succ_opt() {
            Some(date) => date,
            None => return Ok(ReminderRunSummary::default()),
        };

        self.remind_for_date(tomorrow).await
    }

    /// Runs one batch for an explicit due date
    pub async fn remind_for_date(&self, due: NaiveDate) -> Result<ReminderRunSummary, sqlx::Error> {
        let tasks = Task::list_due_on(&self.pool, due).await?;
        let mut summary = ReminderRunSummary {
            due_tasks: tasks.len(),
            ..Default::default()
        };

        if tasks.is_empty() {
            tracing::info!(due = %due, "No tasks due, nothing to send");
            return Ok(summary);
        }

        tracing::info!(
            due = %due,
            count = tasks.len(),
            sender = self.sender.name(),
            "Sending due-task reminders"
        );

        for task in &tasks {
            let user = match User::find_by_id(&self.pool, task.user_id).await? {
                Some(user) => user,
                None => {
                    tracing::warn!(
                        task_id = task.id,
                        user_id = task.user_id,
                        "Task owner not found, skipping reminder"
                    );
                    continue;
                }
            };

            let to = format!("{}{}", self.config.country_prefix, user.mobile);
            let body = reminder_message(&task.title, due);

            match self.sender.send(&to, &body).await {
                Ok(()) => {
                    tracing::debug!(task_id = task.id, "Reminder sent");
                    summary.sent += 1;
                }
                Err(e) => {
                    tracing::error!(task_id = task.id, error = %e, "Failed to send reminder");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            due = %due,
            due_tasks = summary.due_tasks,
            sent = summary.sent,
            failed = summary.failed,
            "Reminder run finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_config_default() {
        let config = ReminderConfig::default();
        assert_eq!(config.hour, 23);
        assert_eq!(config.minute, 0);
        assert_eq!(config.country_prefix, "+61");
    }

    #[test]
    fn test_run_summary_default_is_zeroed() {
        let summary = ReminderRunSummary::default();
        assert_eq!(summary.due_tasks, 0);
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_reminder_message_format() {
        let due = NaiveDate::from_ymd_opt(2025, 7, 19).unwrap();
        let body = reminder_message("Buy groceries", due);
        assert_eq!(
            body,
            "Reminder: Your task 'Buy groceries' is due tomorrow (2025-07-19)."
        );
    }

    // Integration tests that run batches against a real database are in
    // tests/service_tests.rs
}
