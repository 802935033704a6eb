//! Boundary to the host application.
//!
//! The host stores one serialized string per field and supplies context such
//! as the content language. The core only sees it through
//! [`HostValueStore`]; the transport lives outside this crate.
//!
//! [`ClientHandle`] owns the lazily created transport client. It is passed
//! to whoever needs it instead of living in a global, and it keeps the retry
//! policy for initialization out of the editing state.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::config::RetryPolicy;
use crate::error::HostError;

/// Persistent storage for one serialized value.
pub trait HostValueStore {
    /// Read the stored value. `None` means the field was never saved.
    fn load(&mut self) -> Result<Option<String>, HostError>;

    /// Replace the stored value.
    fn save(&mut self, serialized: &str) -> Result<(), HostError>;
}

/// Lazily initialized, explicitly owned host client.
#[derive(Debug)]
pub struct ClientHandle<C> {
    client: Option<C>,
    policy: RetryPolicy,
}

impl<C> ClientHandle<C> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            client: None,
            policy,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    pub fn get(&self) -> Option<&C> {
        self.client.as_ref()
    }

    /// Return the client, creating it on first use.
    ///
    /// `connect` is retried per the handle's [`RetryPolicy`]; `wait` is called
    /// with the delay between attempts. After a failure the handle stays
    /// uninitialized and a later call starts over.
    pub fn get_or_connect<E, F, W>(&mut self, mut connect: F, mut wait: W) -> Result<&C, HostError>
    where
        E: fmt::Display,
        F: FnMut() -> Result<C, E>,
        W: FnMut(Duration),
    {
        let client = match self.client.take() {
            Some(client) => client,
            None => connect_with_retry(self.policy, &mut connect, &mut wait)?,
        };
        Ok(self.client.insert(client))
    }

    /// Drop the client so the next call reconnects.
    pub fn reset(&mut self) {
        self.client = None;
    }
}

/// Call `connect` until it succeeds or the policy's attempts run out.
pub fn connect_with_retry<C, E, F, W>(
    policy: RetryPolicy,
    connect: &mut F,
    wait: &mut W,
) -> Result<C, HostError>
where
    E: fmt::Display,
    F: FnMut() -> Result<C, E>,
    W: FnMut(Duration),
{
    let attempts = policy.attempts.max(1);
    let mut message = String::new();

    for attempt in 1..=attempts {
        match connect() {
            Ok(client) => {
                tracing::debug!(attempt, "host client initialized");
                return Ok(client);
            }
            Err(err) => {
                tracing::warn!(attempt, attempts, %err, "host client initialization failed");
                message = err.to_string();
                if attempt < attempts {
                    wait(policy.delay());
                }
            }
        }
    }

    Err(HostError::ConnectFailed { attempts, message })
}

/// Extract the stored string from a host `getValue` response.
///
/// Hosts answer either with the bare string or with an envelope carrying it
/// in `data` or `value`. Empty strings count as "never saved".
pub fn stored_value_from_response(response: &Value) -> Option<String> {
    let raw = match response {
        Value::String(s) => Some(s.as_str()),
        Value::Object(obj) => obj
            .get("data")
            .and_then(Value::as_str)
            .or_else(|| obj.get("value").and_then(Value::as_str)),
        _ => None,
    };
    raw.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Pick the content language out of a host application context.
///
/// The first of `language`, `languages.current`, `selection.language`,
/// `site.language` and `languageName` that is a non-empty string wins.
/// A context wrapped in a `data` envelope is unwrapped first.
pub fn language_from_context(context: &Value) -> Option<String> {
    let ctx = context.get("data").filter(|d| d.is_object()).unwrap_or(context);

    const CANDIDATES: [&str; 5] = [
        "/language",
        "/languages/current",
        "/selection/language",
        "/site/language",
        "/languageName",
    ];

    CANDIDATES
        .iter()
        .filter_map(|pointer| ctx.pointer(pointer).and_then(Value::as_str))
        .find(|lang| !lang.is_empty())
        .map(str::to_string)
}
