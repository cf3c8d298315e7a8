use rusty_pay_core::{ClockPort, PortError};

#[derive(Debug, Clone, Default)]
pub struct SystemClockAdapter;

impl ClockPort for SystemClockAdapter {
    fn now_ms(&self) -> Result<u64, PortError> {
        let now = web_time::SystemTime::now()
            .duration_since(web_time::UNIX_EPOCH)
            .map_err(|e| PortError::Transport(format!("time error: {e}")))?;
        u64::try_from(now.as_millis())
            .map_err(|e| PortError::Transport(format!("time out of range: {e}")))
    }

    async fn sleep_ms(&self, ms: u64) {
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;

        #[cfg(target_arch = "wasm32")]
        {
            let delay = i32::try_from(ms).unwrap_or(i32::MAX);
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                if let Some(window) = web_sys::window() {
                    let _ = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay);
                }
            });
            let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
        }
    }
}
