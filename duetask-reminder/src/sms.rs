/// SMS delivery via a generic HTTP gateway
///
/// This module defines the contract for sending a single SMS message and the
/// two implementations the reminder service uses: an HTTP client speaking a
/// simple bearer-token JSON protocol, and an in-memory mock for tests.
///
/// # Sender Contract
///
/// All senders must:
/// 1. Implement the `SmsSender` trait (async)
/// 2. Treat `send` as one message to one recipient
/// 3. Report delivery failure through `SmsError` rather than panicking
///
/// # Gateway Protocol
///
/// The HTTP sender POSTs to the configured URL with a bearer token:
///
/// ```json
/// {
///   "from": "+61400000000",
///   "to": "+61412345678",
///   "body": "Reminder: ..."
/// }
/// ```
///
/// Any 2xx response counts as accepted; everything else is a gateway error.
/// The service treats a failure as final for that task (no retries).
///
/// # Example
///
/// ```no_run
/// use duetask_reminder::sms::{HttpSmsSender, SmsConfig, SmsSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = HttpSmsSender::new(SmsConfig {
///     api_url: "https://sms.example.com/v1/messages".to_string(),
///     api_token: "secret".to_string(),
///     from_number: "+61400000000".to_string(),
/// })?;
///
/// sender.send("+61412345678", "Hello from DueTask").await?;
/// # Ok(())
/// # }
/// ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Request timeout for one gateway call
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// SMS sender error types
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The HTTP request itself failed (connect, timeout, TLS)
    #[error("SMS transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("SMS gateway rejected the message (HTTP {status})")]
    Gateway {
        /// HTTP status code returned by the gateway
        status: u16,
    },
}

/// Core sender trait
///
/// The reminder service holds a `dyn SmsSender`, so tests can swap in the
/// mock without touching the batch logic.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Returns the sender name
    ///
    /// Used for logging.
    fn name(&self) -> &str;

    /// Sends one message to one recipient
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient number including country prefix (e.g., "+61412345678")
    /// * `body` - Message text
    ///
    /// # Errors
    ///
    /// Returns `SmsError` if the message could not be handed to the gateway.
    /// Delivery beyond the gateway is not tracked.
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError>;
}

/// Configuration for the HTTP gateway sender
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway endpoint URL
    pub api_url: String,

    /// Bearer token for the gateway
    pub api_token: String,

    /// Sender number shown to recipients, including country prefix
    pub from_number: String,
}

/// Wire format of one outbound message
#[derive(Debug, Serialize)]
struct OutboundSms<'a> {
    from: &'a str,
    to: &'a str,
    body: &'a str,
}

/// HTTP gateway sender
pub struct HttpSmsSender {
    client: reqwest::Client,
    config: SmsConfig,
}

impl HttpSmsSender {
    /// Creates a new HTTP sender with a configured client
    ///
    /// # Errors
    ///
    /// Returns `SmsError::Transport` if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: SmsConfig) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .user_agent(concat!("duetask-reminder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpSmsSender { client, config })
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        let message = OutboundSms {
            from: &self.config.from_number,
            to,
            body,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(to = %to, status = status.as_u16(), "SMS gateway rejected message");
            return Err(SmsError::Gateway {
                status: status.as_u16(),
            });
        }

        tracing::debug!(to = %to, "SMS accepted by gateway");
        Ok(())
    }
}

/// One message recorded by the mock sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    /// Recipient number as passed to `send`
    pub to: String,

    /// Message text as passed to `send`
    pub body: String,
}

/// Mock sender for tests and demos
///
/// Records every accepted message in memory instead of talking to a gateway.
/// Construct with `failing()` to make every send fail, which exercises the
/// service's per-task error handling.
#[derive(Clone, Default)]
pub struct MockSmsSender {
    sent: Arc<Mutex<Vec<SentSms>>>,
    fail_sends: bool,
}

impl MockSmsSender {
    /// Creates a mock that accepts every message
    pub fn new() -> Self {
        MockSmsSender::default()
    }

    /// Creates a mock that rejects every message with a gateway error
    pub fn failing() -> Self {
        MockSmsSender {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: true,
        }
    }

    /// Returns a copy of every message accepted so far
    pub fn sent(&self) -> Vec<SentSms> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        if self.fail_sends {
            return Err(SmsError::Gateway { status: 502 });
        }

        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentSms {
                to: to.to_string(),
                body: body.to_string(),
            });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_messages() {
        let mock = MockSmsSender::new();

        mock.send("+61412345678", "first").await.unwrap();
        mock.send("+61498765432", "second").await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "+61412345678");
        assert_eq!(sent[0].body, "first");
        assert_eq!(sent[1].body, "second");
    }

    #[tokio::test]
    async fn test_failing_mock_rejects_without_recording() {
        let mock = MockSmsSender::failing();

        let err = mock.send("+61412345678", "doomed").await.unwrap_err();
        match err {
            SmsError::Gateway { status } => assert_eq!(status, 502),
            other => panic!("Expected gateway error, got {:?}", other),
        }

        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_mock_clones_share_the_record() {
        let mock = MockSmsSender::new();
        let clone = mock.clone();

        clone.send("+61412345678", "via clone").await.unwrap();

        // Both handles see the same underlying vec
        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "via clone");
    }

    #[test]
    fn test_sender_names() {
        assert_eq!(MockSmsSender::new().name(), "mock");

        let http = HttpSmsSender::new(SmsConfig {
            api_url: "https://sms.example.com/v1/messages".to_string(),
            api_token: "secret".to_string(),
            from_number: "+61400000000".to_string(),
        })
        .expect("client should build");
        assert_eq!(http.name(), "http");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = SmsError::Gateway { status: 429 };
        assert_eq!(
            err.to_string(),
            "SMS gateway rejected the message (HTTP 429)"
        );
    }
}
