pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_WS_BASE: &str = "ws://localhost:8000";

pub const API_URL_VAR: &str = "CHAT_API_URL";
pub const WS_URL_VAR: &str = "CHAT_WS_URL";
pub const RECONNECT_VAR: &str = "CHAT_RECONNECT";

/// Top-level client configuration, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub ws_base: String,
    pub reconnect: ReconnectPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            ws_base: DEFAULT_WS_BASE.to_string(),
            reconnect: ReconnectPolicy::Never,
        }
    }
}

impl ClientConfig {
    /// Build a config from an environment-like lookup.
    /// Unset or blank values fall back to the localhost defaults.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base = value(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let ws_base = value(WS_URL_VAR).unwrap_or_else(|| DEFAULT_WS_BASE.to_string());
        let reconnect = match value(RECONNECT_VAR) {
            Some(raw) => ReconnectPolicy::parse(&raw)?,
            None => ReconnectPolicy::Never,
        };

        Ok(Self {
            api_base: normalize_base(&api_base),
            ws_base: normalize_base(&ws_base),
            reconnect,
        })
    }

    pub fn identity_url(&self) -> String {
        format!("{}/users/me", self.api_base)
    }

    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.api_base)
    }

    pub fn live_url(&self) -> String {
        format!("{}/ws", self.ws_base)
    }
}

fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// What the live channel does after the transport drops unexpectedly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Stay errored until the page is reloaded
    Never,
    /// Exponential backoff, capped at `max_ms`, giving up after `max_attempts`
    Backoff {
        initial_ms: u32,
        max_ms: u32,
        max_attempts: u32,
    },
}

impl ReconnectPolicy {
    pub fn backoff() -> Self {
        ReconnectPolicy::Backoff {
            initial_ms: 500,
            max_ms: 30_000,
            max_attempts: 10,
        }
    }

    pub fn parse(raw: &str) -> crate::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "never" | "off" => Ok(ReconnectPolicy::Never),
            "backoff" | "on" => Ok(Self::backoff()),
            other => Err(crate::ChatError::Config(format!(
                "unknown reconnect policy '{}'",
                other
            ))),
        }
    }

    /// Delay before reconnect attempt number `attempt` (0-based), or `None`
    /// once the policy gives up.
    pub fn delay_ms(&self, attempt: u32) -> Option<u32> {
        match self {
            ReconnectPolicy::Never => None,
            ReconnectPolicy::Backoff {
                initial_ms,
                max_ms,
                max_attempts,
            } => {
                if attempt >= *max_attempts {
                    return None;
                }
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                Some(initial_ms.saturating_mul(factor).min(*max_ms))
            }
        }
    }
}
