//! Build-time configuration.
//!
//! A browser bundle has no process environment at runtime, so the base
//! URLs are baked in when the crate is compiled:
//!
//! ```text
//! CHAT_API_URL=https://chat.example.com CHAT_WS_URL=wss://chat.example.com wasm-pack build
//! ```

use chat_types::{
    Result,
    config::{ClientConfig, API_URL_VAR, RECONNECT_VAR, WS_URL_VAR},
};

pub fn resolve_config() -> Result<ClientConfig> {
    ClientConfig::from_lookup(|key| build_env(key).map(str::to_string))
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        API_URL_VAR => option_env!("CHAT_API_URL"),
        WS_URL_VAR => option_env!("CHAT_WS_URL"),
        RECONNECT_VAR => option_env!("CHAT_RECONNECT"),
        _ => None,
    }
}
