use std::time::{Duration, Instant};

use crate::internal::news_list::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Error,
}

impl NotificationType {
    fn timeout(&self) -> Duration {
        match self {
            NotificationType::Info => Duration::from_secs(3),
            NotificationType::Error => Duration::from_secs(10),
        }
    }
}

/// Popup message that dismisses itself after a type-dependent timeout.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub timestamp: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            timestamp: Instant::now(),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        self.timestamp.elapsed() > self.notification_type.timeout()
    }
}

impl From<Effect> for Notification {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::ShowSnackbar(text) => Notification::error(text.as_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ui_text::UiText;

    #[test]
    fn test_fresh_notification_is_not_dismissed() {
        assert!(!Notification::info("hi").should_dismiss());
        assert!(!Notification::error("oops").should_dismiss());
    }

    #[test]
    fn test_expired_notification_is_dismissed() {
        let mut n = Notification::info("hi");
        n.timestamp = Instant::now() - Duration::from_secs(4);
        assert!(n.should_dismiss());

        let mut e = Notification::error("oops");
        e.timestamp = Instant::now() - Duration::from_secs(4);
        assert!(!e.should_dismiss());
    }

    #[test]
    fn test_from_snackbar_effect() {
        let n = Notification::from(Effect::ShowSnackbar(UiText::Dynamic("failed".into())));
        assert_eq!(n.message, "failed");
        assert_eq!(n.notification_type, NotificationType::Error);
    }
}
