use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use chat_core::ports::TimerPort;

/// `setTimeout`-backed delays for reconnect backoff
pub struct BrowserTimer;

#[async_trait(?Send)]
impl TimerPort for BrowserTimer {
    async fn sleep_ms(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
