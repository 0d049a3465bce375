use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Signup outcomes stay up longer than the unregister confirmation blip.
pub const SIGNUP_NOTICE_TTL: Duration = Duration::from_millis(5000);
pub const UNREGISTER_NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// The style class the banner element carries.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageBanner {
    pub text: String,
    pub kind: Option<MessageKind>,
    pub visible: bool,
    generation: u64,
}

/// Transient status banner. Each `notify` replaces the text, the style, and
/// the pending hide timer; at most one timer is pending and only the latest
/// one may hide the banner.
#[derive(Debug, Default)]
pub struct Notifier {
    banner: Arc<Mutex<MessageBanner>>,
    pending_hide: Mutex<Option<JoinHandle<()>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MessageBanner {
        self.banner.lock().unwrap().clone()
    }

    pub fn notify(&self, text: impl Into<String>, kind: MessageKind, after: Duration) {
        let generation = {
            let mut banner = self.banner.lock().unwrap();
            banner.text = text.into();
            banner.kind = Some(kind);
            banner.visible = true;
            banner.generation += 1;
            banner.generation
        };

        let banner = Arc::clone(&self.banner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let mut banner = banner.lock().unwrap();
            // A stale timer that already woke must not hide a newer message.
            if banner.generation == generation {
                banner.visible = false;
            }
        });
        if let Some(previous) = self.pending_hide.lock().unwrap().replace(handle) {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn banner_hides_after_the_ttl() {
        let notifier = Notifier::new();
        notifier.notify("Signed up", MessageKind::Success, Duration::from_millis(100));
        assert!(notifier.snapshot().visible);

        tokio::time::sleep(Duration::from_millis(101)).await;
        let banner = notifier.snapshot();
        assert!(!banner.visible);
        assert_eq!(banner.text, "Signed up");
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_replaces_message_and_timer() {
        let notifier = Notifier::new();
        notifier.notify("first", MessageKind::Error, Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(50)).await;
        notifier.notify("second", MessageKind::Success, Duration::from_millis(100));

        // The first timer's deadline passes; the banner must stay up.
        tokio::time::sleep(Duration::from_millis(60)).await;
        let banner = notifier.snapshot();
        assert!(banner.visible);
        assert_eq!(banner.text, "second");
        assert_eq!(banner.kind, Some(MessageKind::Success));

        // The second timer's deadline passes; now it hides.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!notifier.snapshot().visible);
    }
}
