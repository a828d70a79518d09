//! Reminder scheduling.
//!
//! A reminder is a one-shot local notification asking the user to get in
//! touch with a prospect after a delay. Once handed to a
//! [`ReminderScheduler`] the store keeps no record of it: there is no
//! cancellation and no acknowledgement.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::prospect::Prospect;

/// Delay used when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Capacity of the delivery channel of a [`LocalScheduler`].
const DELIVERY_CAPACITY: usize = 16;

/// A pending notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Request identifier, unique per reminder.
    pub id: Uuid,
    /// The prospect this reminder is about.
    pub prospect_id: Uuid,
    /// Headline, e.g. "Contact Paul Hudson".
    pub title: String,
    /// The prospect's email.
    pub subtitle: String,
    /// How long after scheduling the notification fires.
    pub delay: Duration,
}

impl Reminder {
    /// Build the reminder for `prospect`.
    #[must_use]
    pub fn for_prospect(prospect: &Prospect, delay: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            prospect_id: prospect.id(),
            title: format!("Contact {}", prospect.name),
            subtitle: prospect.email_address.clone(),
            delay,
        }
    }
}

/// Whether the user allows notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user hasn't been asked yet.
    #[default]
    NotDetermined,
    /// Notifications are allowed.
    Authorized,
    /// Notifications were refused.
    Denied,
}

/// The host's notification center.
#[async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Current permission state.
    async fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for permission.
    ///
    /// Returns `true` if permission is now granted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself could not be made.
    async fn request_authorization(&self) -> Result<bool>;

    /// Register a reminder.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler refuses the reminder.
    async fn add(&self, reminder: Reminder) -> Result<()>;
}

/// Schedule a reminder for `prospect`, asking for permission first if needed.
///
/// Returns `true` if the reminder was handed to the scheduler. Denials and
/// scheduler errors are logged, never returned.
pub async fn schedule_reminder(
    scheduler: &dyn ReminderScheduler,
    prospect: &Prospect,
    delay: Duration,
) -> bool {
    let authorized = match scheduler.authorization_status().await {
        AuthorizationStatus::Authorized => true,
        _ => match scheduler.request_authorization().await {
            Ok(granted) => granted,
            Err(err) => {
                warn!("Notification permission request failed: {}", err);
                false
            }
        },
    };

    if !authorized {
        warn!(
            "Not reminding about {}: {}",
            prospect.id(),
            Error::ReminderPermissionDenied
        );
        return false;
    }

    let reminder = Reminder::for_prospect(prospect, delay);
    debug!("Scheduling reminder {} in {:?}", reminder.id, delay);
    match scheduler.add(reminder).await {
        Ok(()) => true,
        Err(err) => {
            warn!("Unable to schedule reminder: {}", err);
            false
        }
    }
}

/// An in-process scheduler backed by tokio timers.
///
/// Each reminder sleeps on its own task and is then delivered on the channel
/// returned by [`LocalScheduler::new`]. Permission is granted or refused on
/// first request according to `grant_on_request`.
///
/// The scheduler owns its timer tasks. Dropping it cancels every reminder
/// that hasn't fired yet, and once those are gone the delivery channel
/// closes, so a receiver sees `None` rather than waiting forever.
#[derive(Debug)]
pub struct LocalScheduler {
    status: Mutex<AuthorizationStatus>,
    grant_on_request: bool,
    delivered: mpsc::Sender<Reminder>,
    timers: Mutex<JoinSet<()>>,
}

impl LocalScheduler {
    /// Create a scheduler and the receiver its reminders are delivered on.
    #[must_use]
    pub fn new(grant_on_request: bool) -> (Self, mpsc::Receiver<Reminder>) {
        let (delivered, rx) = mpsc::channel(DELIVERY_CAPACITY);
        let scheduler = Self {
            status: Mutex::new(AuthorizationStatus::NotDetermined),
            grant_on_request,
            delivered,
            timers: Mutex::new(JoinSet::new()),
        };
        (scheduler, rx)
    }

    /// Number of reminders scheduled but not yet delivered.
    pub async fn pending(&self) -> usize {
        let mut timers = self.timers.lock().await;
        while timers.try_join_next().is_some() {}
        timers.len()
    }
}

#[async_trait]
impl ReminderScheduler for LocalScheduler {
    async fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().await
    }

    async fn request_authorization(&self) -> Result<bool> {
        let mut status = self.status.lock().await;
        if *status == AuthorizationStatus::NotDetermined {
            *status = if self.grant_on_request {
                AuthorizationStatus::Authorized
            } else {
                AuthorizationStatus::Denied
            };
            debug!("Notification permission decided: {:?}", *status);
        }
        Ok(*status == AuthorizationStatus::Authorized)
    }

    async fn add(&self, reminder: Reminder) -> Result<()> {
        if *self.status.lock().await != AuthorizationStatus::Authorized {
            return Err(Error::ReminderPermissionDenied);
        }
        if self.delivered.is_closed() {
            return Err(Error::reminder_schedule("delivery channel closed"));
        }

        let tx = self.delivered.clone();
        self.timers.lock().await.spawn(async move {
            tokio::time::sleep(reminder.delay).await;
            info!("Reminder: {} ({})", reminder.title, reminder.subtitle);
            // The host may have stopped listening; the reminder just lapses.
            let _ = tx.send(reminder).await;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Records reminders instead of firing them.
    #[derive(Debug, Default)]
    struct RecordingScheduler {
        status: AuthorizationStatus,
        grant: bool,
        fail_request: bool,
        requests: StdMutex<u32>,
        added: StdMutex<Vec<Reminder>>,
    }

    #[async_trait]
    impl ReminderScheduler for RecordingScheduler {
        async fn authorization_status(&self) -> AuthorizationStatus {
            self.status
        }

        async fn request_authorization(&self) -> Result<bool> {
            *self.requests.lock().unwrap() += 1;
            if self.fail_request {
                return Err(Error::reminder_schedule("request failed"));
            }
            Ok(self.grant)
        }

        async fn add(&self, reminder: Reminder) -> Result<()> {
            self.added.lock().unwrap().push(reminder);
            Ok(())
        }
    }

    #[test]
    fn test_reminder_for_prospect() {
        let prospect = Prospect::new("Paul Hudson", "paul@hackingwithswift.com");
        let reminder = Reminder::for_prospect(&prospect, DEFAULT_DELAY);

        assert_eq!(reminder.title, "Contact Paul Hudson");
        assert_eq!(reminder.subtitle, "paul@hackingwithswift.com");
        assert_eq!(reminder.prospect_id, prospect.id());
        assert_eq!(reminder.delay, Duration::from_secs(5));
    }

    #[test]
    fn test_reminder_ids_are_unique() {
        let prospect = Prospect::default();
        let a = Reminder::for_prospect(&prospect, DEFAULT_DELAY);
        let b = Reminder::for_prospect(&prospect, DEFAULT_DELAY);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_authorized_schedules_without_asking() {
        let scheduler = RecordingScheduler {
            status: AuthorizationStatus::Authorized,
            ..Default::default()
        };

        assert!(schedule_reminder(&scheduler, &Prospect::default(), DEFAULT_DELAY).await);
        assert_eq!(*scheduler.requests.lock().unwrap(), 0);
        assert_eq!(scheduler.added.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_asks_then_schedules_when_granted() {
        let scheduler = RecordingScheduler {
            grant: true,
            ..Default::default()
        };

        assert!(schedule_reminder(&scheduler, &Prospect::default(), DEFAULT_DELAY).await);
        assert_eq!(*scheduler.requests.lock().unwrap(), 1);
        assert_eq!(scheduler.added.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_denied_schedules_nothing() {
        let scheduler = RecordingScheduler {
            status: AuthorizationStatus::Denied,
            grant: false,
            ..Default::default()
        };

        assert!(!schedule_reminder(&scheduler, &Prospect::default(), DEFAULT_DELAY).await);
        assert!(scheduler.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_request_schedules_nothing() {
        let scheduler = RecordingScheduler {
            fail_request: true,
            ..Default::default()
        };

        assert!(!schedule_reminder(&scheduler, &Prospect::default(), DEFAULT_DELAY).await);
        assert!(scheduler.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_local_scheduler_delivers_after_delay() {
        let (scheduler, mut rx) = LocalScheduler::new(true);
        let prospect = Prospect::new("Bill Burns", "bill.burns@gmail.com");

        assert!(schedule_reminder(&scheduler, &prospect, Duration::from_millis(10)).await);
        assert_eq!(
            scheduler.authorization_status().await,
            AuthorizationStatus::Authorized
        );

        let reminder = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("reminder should arrive")
            .expect("channel open");
        assert_eq!(reminder.title, "Contact Bill Burns");
        assert_eq!(reminder.prospect_id, prospect.id());
    }

    #[tokio::test]
    async fn test_local_scheduler_counts_pending_until_delivery() {
        let (scheduler, mut rx) = LocalScheduler::new(true);
        let prospect = Prospect::new("Paul Hudson", "paul@hackingwithswift.com");

        assert!(schedule_reminder(&scheduler, &prospect, Duration::from_millis(10)).await);
        assert_eq!(scheduler.pending().await, 1);

        let reminder = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("reminder should arrive")
            .expect("channel open");
        assert_eq!(reminder.prospect_id, prospect.id());

        tokio::time::timeout(Duration::from_secs(5), async {
            while scheduler.pending().await > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timer task should finish after delivery");
    }

    #[tokio::test]
    async fn test_dropped_scheduler_reports_undelivered() {
        let (scheduler, mut rx) = LocalScheduler::new(true);
        let prospect = Prospect::new("Paul Hudson", "paul@hackingwithswift.com");

        assert!(schedule_reminder(&scheduler, &prospect, Duration::from_secs(3600)).await);
        assert_eq!(scheduler.pending().await, 1);
        drop(scheduler);

        let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("channel should close once the timer is cancelled");
        assert!(received.is_none());
    }

    #[tokio::test]
    async fn test_local_scheduler_denied() {
        let (scheduler, mut rx) = LocalScheduler::new(false);

        assert!(!schedule_reminder(&scheduler, &Prospect::default(), Duration::from_millis(1)).await);
        assert_eq!(
            scheduler.authorization_status().await,
            AuthorizationStatus::Denied
        );

        let waited = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_local_scheduler_rejects_add_before_permission() {
        let (scheduler, _rx) = LocalScheduler::new(true);
        let reminder = Reminder::for_prospect(&Prospect::default(), DEFAULT_DELAY);

        let err = scheduler.add(reminder).await.unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[tokio::test]
    async fn test_local_scheduler_does_not_reprompt_after_denial() {
        let (scheduler, _rx) = LocalScheduler::new(false);

        assert!(!scheduler.request_authorization().await.unwrap());
        assert!(!scheduler.request_authorization().await.unwrap());
        assert_eq!(
            scheduler.authorization_status().await,
            AuthorizationStatus::Denied
        );
    }
}
