//! Reminder scheduler
//!
//! Polls the shared schedule store once a minute. Each tick computes the
//! thirty-minute lookahead target and matches it against every user's
//! courses by exact `(weekday, HH:MM)` equality, so at a one-minute poll
//! interval each occurrence fires once. There is no cross-tick state: a
//! tick that never runs (process down, clock skipped past the minute)
//! silently misses that occurrence.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use chrono::{Datelike, Duration, Local};
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::delivery::{DeliveryError, DeliveryGateway};
use crate::features::schedule::{Course, ScheduleStore};

/// Minutes between the notification and the course start.
pub const LOOKAHEAD_MINUTES: i64 = 30;

/// Seconds between store scans.
const POLL_INTERVAL_SECS: u64 = 60;

/// One matched course occurrence, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub user_id: String,
    pub provider_id: String,
    pub conversation_id: String,
    pub course: Course,
}

/// Background poller that owns the tick loop.
pub struct ReminderScheduler {
    store: Arc<Mutex<ScheduleStore>>,
    gateway: Arc<dyn DeliveryGateway>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<Mutex<ScheduleStore>>, gateway: Arc<dyn DeliveryGateway>) -> Self {
        ReminderScheduler { store, gateway }
    }

    /// Run the poll loop forever.
    pub async fn run(self) {
        info!(
            "Reminder scheduler started ({POLL_INTERVAL_SECS}s poll, {LOOKAHEAD_MINUTES}-minute lookahead)"
        );
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// One scan: snapshot the due reminders under the store lock, then
    /// deliver them with the lock released.
    async fn tick(&self) {
        let now = Local::now();
        let target = now + Duration::minutes(LOOKAHEAD_MINUTES);
        let weekday = now.weekday().number_from_monday() as u8;
        let target_label = target.format("%H:%M").to_string();

        let due = {
            let store = self.store.lock().await;
            due_reminders(&store, weekday, &target_label)
        };

        if due.is_empty() {
            debug!("Tick: no courses due at {target_label} (weekday {weekday})");
            return;
        }

        info!("Tick: {} reminder(s) due at {target_label}", due.len());
        self.deliver_all(&due).await;
    }

    /// Deliver every due reminder, isolating failures per course so one
    /// broken channel never aborts the rest of the scan.
    async fn deliver_all(&self, due: &[DueReminder]) {
        for reminder in due {
            if let Err(e) = self.deliver(reminder).await {
                warn!(
                    "Failed to deliver reminder for user {} (course '{}'): {e}",
                    reminder.user_id, reminder.course.name
                );
            }
        }
    }

    async fn deliver(&self, reminder: &DueReminder) -> Result<(), DeliveryError> {
        let channel = self
            .gateway
            .resolve_channel(&reminder.provider_id)
            .await
            .ok_or_else(|| DeliveryError::UnknownProvider(reminder.provider_id.clone()))?;

        channel
            .send_message(&reminder.conversation_id, &format_reminder(&reminder.course))
            .await
    }
}

/// Scan the store for courses starting exactly `LOOKAHEAD_MINUTES` from
/// now, i.e. whose `(day, time)` equals the given weekday and target label.
///
/// Records missing either delivery field are skipped — they cannot be
/// notified until the user runs another mutating command.
pub fn due_reminders(store: &ScheduleStore, weekday: u8, target_label: &str) -> Vec<DueReminder> {
    let mut due = Vec::new();
    for (user_id, record) in store.iter() {
        if !record.can_notify() {
            continue;
        }
        for course in &record.courses {
            if course.day == weekday && course.time == target_label {
                due.push(DueReminder {
                    user_id: user_id.clone(),
                    provider_id: record.provider_id.clone(),
                    conversation_id: record.conversation_id.clone(),
                    course: course.clone(),
                });
            }
        }
    }
    due
}

/// Notification text for one course occurrence.
fn format_reminder(course: &Course) -> String {
    format!(
        "🔔 **Class starts in {LOOKAHEAD_MINUTES} minutes!**\n\
         ────────────────\n\
         📚 Course: {}\n\
         📍 Location: {}\n\
         🕐 Time: {}\n\
         ────────────────\n\
         Time to get ready!",
        course.name, course.location, course.time
    )
}
