pub mod identity;
pub mod message;
pub mod event;
pub mod state;
pub mod config;
pub mod error;


pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;
