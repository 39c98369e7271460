pub mod bootstrap;
pub mod chat;

pub use bootstrap::{failed_panel, loading_panel, IDENTITY_FAILED_TEXT};
pub use chat::{chat_panel, ComposerAction};
