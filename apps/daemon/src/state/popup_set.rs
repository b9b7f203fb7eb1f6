use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use notifier_model::Notification;
use tracing::instrument;

/// Maximum number of popups visible at once; the oldest is evicted to make
/// room for a new one beyond this cap.
pub const MAX_VISIBLE: usize = 4;

pub struct Popup {
    pub local_id: u64,
    pub notification: Notification,
    pub shown_at: Instant,
    /// `None` means persistent: the popup never expires on its own.
    pub duration: Option<Duration>,
    /// Name of the server connection this notification arrived on, needed
    /// to route an action click's uplink back to the right broker.
    pub origin_server: String,
}

impl Popup {
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.duration {
            Some(duration) => now.duration_since(self.shown_at) >= duration,
            None => false,
        }
    }
}

/// The set of currently-visible popups, capped at `MAX_VISIBLE`.
pub struct PopupSet {
    next_local_id: AtomicU64,
    popups: Mutex<Vec<Popup>>,
}

impl PopupSet {
    pub fn new() -> Self {
        Self {
            next_local_id: AtomicU64::new(1),
            popups: Mutex::new(Vec::new()),
        }
    }

    pub fn allocate_local_id(&self) -> u64 {
        self.next_local_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Shows a popup, evicting the oldest if the set is already full.
    #[instrument(skip(self, notification))]
    pub fn show(&self, local_id: u64, notification: Notification, origin_server: String) {
        let seconds = notification.duration.max(0) as u64;
        let duration = if seconds == 0 { None } else { Some(Duration::from_secs(seconds)) };
        let mut guard = self.popups.lock().expect("popup set lock poisoned");
        if guard.len() >= MAX_VISIBLE {
            guard.remove(0);
        }
        guard.push(Popup {
            local_id,
            notification,
            shown_at: Instant::now(),
            duration,
            origin_server,
        });
    }

    /// Returns a clone of the popup for `local_id`, if shown.
    pub fn get(&self, local_id: u64) -> Option<(Notification, String)> {
        self.popups
            .lock()
            .expect("popup set lock poisoned")
            .iter()
            .find(|p| p.local_id == local_id)
            .map(|p| (p.notification.clone(), p.origin_server.clone()))
    }

    pub fn remove(&self, local_id: u64) -> Option<Popup> {
        let mut guard = self.popups.lock().expect("popup set lock poisoned");
        let index = guard.iter().position(|p| p.local_id == local_id)?;
        Some(guard.remove(index))
    }

    pub fn contains(&self, local_id: u64) -> bool {
        self.popups
            .lock()
            .expect("popup set lock poisoned")
            .iter()
            .any(|p| p.local_id == local_id)
    }

    /// Removes and returns every popup that has expired as of `now`.
    pub fn sweep_expired(&self, now: Instant) -> Vec<Popup> {
        let mut guard = self.popups.lock().expect("popup set lock poisoned");
        let (expired, remaining): (Vec<_>, Vec<_>) = guard.drain(..).partition(|p| p.is_expired(now));
        *guard = remaining;
        expired
    }

    pub fn len(&self) -> usize {
        self.popups.lock().expect("popup set lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PopupSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notification {
        Notification {
            id: None,
            source: "s".into(),
            title: "t".into(),
            message: "m".into(),
            icon_data: None,
            icon_href: None,
            icon_path: None,
            duration: 0,
            actions: vec![],
            exclusive: false,
        }
    }

    #[test]
    fn evicts_oldest_beyond_max_visible() {
        let set = PopupSet::new();
        for i in 0..MAX_VISIBLE + 1 {
            set.show(i as u64, sample(), "broker-a".into());
        }
        assert_eq!(set.len(), MAX_VISIBLE);
        assert!(!set.contains(0));
    }

    #[test]
    fn sweep_removes_expired_popups() {
        let set = PopupSet::new();
        let mut notification = sample();
        notification.duration = 1;
        set.show(1, notification, "broker-a".into());
        let expired = set.sweep_expired(Instant::now() + Duration::from_secs(2));
        assert_eq!(expired.len(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn zero_duration_popup_never_expires() {
        let set = PopupSet::new();
        set.show(1, sample(), "broker-a".into());
        let expired = set.sweep_expired(Instant::now() + Duration::from_secs(3600));
        assert!(expired.is_empty());
        assert_eq!(set.len(), 1);
    }
}
