//! Bell menu notifications.

use std::collections::HashSet;

use squadfeed_core::types::NotificationId;
use squadfeed_entity::notification::Notification;

/// Notifications, newest first, unique by `_id`.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    /// The list backing the bell menu.
    pub items: Vec<Notification>,
}

impl NotificationState {
    fn contains(&self, id: &NotificationId) -> bool {
        self.items.iter().any(|n| &n.id == id)
    }

    /// Prepend a live notification with its banner showing.
    ///
    /// Returns `false` when a notification with the same id is already held.
    pub fn add(&mut self, mut notification: Notification) -> bool {
        if self.contains(&notification.id) {
            return false;
        }
        notification.show_banner = true;
        self.items.insert(0, notification);
        true
    }

    /// Prepend every notification not already held, keeping their order.
    pub fn receive(&mut self, incoming: Vec<Notification>) {
        let mut seen: HashSet<NotificationId> = self.items.iter().map(|n| n.id.clone()).collect();
        let unique: Vec<Notification> = incoming
            .into_iter()
            .filter(|n| seen.insert(n.id.clone()))
            .collect();
        self.items.splice(0..0, unique);
    }

    /// Mark one notification viewed and hide its banner. Unknown ids are ignored.
    pub fn view(&mut self, id: &NotificationId) {
        if let Some(n) = self.items.iter_mut().find(|n| &n.id == id) {
            n.viewed = true;
            n.show_banner = false;
        }
    }

    /// Mark everything viewed.
    pub fn view_all(&mut self) {
        for n in &mut self.items {
            n.viewed = true;
        }
    }

    /// Clear the banner flag of one notification.
    pub fn hide_banner(&mut self, id: &NotificationId) {
        if let Some(n) = self.items.iter_mut().find(|n| &n.id == id) {
            n.show_banner = false;
        }
    }

    /// Whether anything is unread.
    pub fn has_unread(&self) -> bool {
        self.items.iter().any(Notification::is_unread)
    }

    /// Unread notifications, in list order.
    pub fn notify(&self) -> Vec<Notification> {
        self.items.iter().filter(|n| n.is_unread()).cloned().collect()
    }
}
