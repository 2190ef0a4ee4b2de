use crate::telegram::Transport;
use crate::util::{is_animation_url, is_valid_image_url};

/// Media attached to a successful rich send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Animation,
    /// The configured fallback animation.
    DefaultAnimation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The rich (media + caption) send went through.
    Success(MediaKind),
    /// The rich send failed but the text-only fallback went through.
    Degraded,
    /// Both the rich send and the text-only fallback failed.
    Failed,
}

impl DeliveryOutcome {
    /// Whether the post reached the channel in some form and should be
    /// recorded as published.
    pub fn is_published(self) -> bool {
        !matches!(self, DeliveryOutcome::Failed)
    }
}

/// Send one post, downgrading to plain text once if the media send fails.
///
/// A valid `.gif` goes out as an animation, any other valid image as a
/// photo, and a missing or invalid image is replaced by
/// `default_animation`.
pub async fn deliver(
    transport: &dyn Transport,
    caption: &str,
    image_url: Option<&str>,
    default_animation: &str,
) -> DeliveryOutcome {
    let image_url = image_url.filter(|url| is_valid_image_url(url));

    let (kind, result) = match image_url {
        Some(url) if is_animation_url(url) => (
            MediaKind::Animation,
            transport.send_animation(url, caption).await,
        ),
        Some(url) => (MediaKind::Photo, transport.send_photo(url, caption).await),
        None => (
            MediaKind::DefaultAnimation,
            transport.send_animation(default_animation, caption).await,
        ),
    };

    let err = match result {
        Ok(()) => return DeliveryOutcome::Success(kind),
        Err(e) => e,
    };

    tracing::warn!(
        media = ?kind,
        image = image_url.unwrap_or(default_animation),
        error = %err,
        "Media send failed, falling back to text"
    );

    match transport.send_message(caption).await {
        Ok(()) => DeliveryOutcome::Degraded,
        Err(e) => {
            tracing::error!(error = %e, "Text fallback failed");
            DeliveryOutcome::Failed
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::telegram::TelegramError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// One recorded transport call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Sent {
        Message(String),
        Photo(String, String),
        Animation(String, String),
    }

    /// In-memory transport that records calls and can be told to fail.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub sent: Mutex<Vec<Sent>>,
        pub fail_media: bool,
        pub fail_text: bool,
    }

    impl RecordingTransport {
        pub fn calls(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }

        fn result(&self, fail: bool) -> Result<(), TelegramError> {
            if fail {
                Err(TelegramError::Api {
                    status: 400,
                    description: "simulated".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
            self.sent.lock().unwrap().push(Sent::Message(text.into()));
            self.result(self.fail_text)
        }

        async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<(), TelegramError> {
            self.sent
                .lock()
                .unwrap()
                .push(Sent::Photo(photo_url.into(), caption.into()));
            self.result(self.fail_media)
        }

        async fn send_animation(
            &self,
            animation_url: &str,
            caption: &str,
        ) -> Result<(), TelegramError> {
            self.sent
                .lock()
                .unwrap()
                .push(Sent::Animation(animation_url.into(), caption.into()));
            self.result(self.fail_media)
        }
    }

    const DEFAULT_GIF: &str = "https://media.test/default.gif";

    #[tokio::test]
    async fn test_photo_for_static_image() {
        let transport = RecordingTransport::default();
        let outcome = deliver(&transport, "cap", Some("https://a/1.png"), DEFAULT_GIF).await;

        assert_eq!(outcome, DeliveryOutcome::Success(MediaKind::Photo));
        assert_eq!(
            transport.calls(),
            vec![Sent::Photo("https://a/1.png".into(), "cap".into())]
        );
    }

    #[tokio::test]
    async fn test_animation_for_gif() {
        let transport = RecordingTransport::default();
        let outcome = deliver(&transport, "cap", Some("https://a/1.GIF"), DEFAULT_GIF).await;

        assert_eq!(outcome, DeliveryOutcome::Success(MediaKind::Animation));
        assert_eq!(
            transport.calls(),
            vec![Sent::Animation("https://a/1.GIF".into(), "cap".into())]
        );
    }

    #[tokio::test]
    async fn test_default_animation_when_no_image() {
        let transport = RecordingTransport::default();
        let outcome = deliver(&transport, "cap", None, DEFAULT_GIF).await;

        assert_eq!(outcome, DeliveryOutcome::Success(MediaKind::DefaultAnimation));
        assert_eq!(
            transport.calls(),
            vec![Sent::Animation(DEFAULT_GIF.into(), "cap".into())]
        );
    }

    #[tokio::test]
    async fn test_default_animation_when_image_invalid() {
        // Thumbnails and inline images reach delivery unvalidated.
        let transport = RecordingTransport::default();
        let outcome = deliver(
            &transport,
            "cap",
            Some("https://cdn.test/thumb?id=1"),
            DEFAULT_GIF,
        )
        .await;

        assert_eq!(outcome, DeliveryOutcome::Success(MediaKind::DefaultAnimation));
    }

    #[tokio::test]
    async fn test_media_failure_falls_back_to_text() {
        let transport = RecordingTransport {
            fail_media: true,
            ..Default::default()
        };
        let outcome = deliver(&transport, "cap", Some("https://a/1.jpg"), DEFAULT_GIF).await;

        assert_eq!(outcome, DeliveryOutcome::Degraded);
        assert!(outcome.is_published());
        assert_eq!(
            transport.calls(),
            vec![
                Sent::Photo("https://a/1.jpg".into(), "cap".into()),
                Sent::Message("cap".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_both_sends_failing_is_failure() {
        let transport = RecordingTransport {
            fail_media: true,
            fail_text: true,
            ..Default::default()
        };
        let outcome = deliver(&transport, "cap", None, DEFAULT_GIF).await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert!(!outcome.is_published());
        assert_eq!(transport.calls().len(), 2);
    }
}
