//! Browser adapters for the chat core.

pub mod config;
pub mod http;
pub mod live;
pub mod timer;

pub use config::resolve_config;
pub use http::HttpChatApi;
pub use live::WsLiveChannel;
pub use timer::BrowserTimer;
