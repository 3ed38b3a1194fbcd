//! chromiumoxide-backed [`PageAccessor`]

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use super::accessor::{Located, PageAccessor, PageError, WaitMode};
use super::timeout::with_page_timeout;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Visible = attached, has a box, and is not hidden by CSS
const VISIBILITY_SCRIPT: &str = r"
    (selector) => {
        const el = document.querySelector(selector);
        if (!el) return false;
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        return rect.width > 0 && rect.height > 0
            && style.visibility !== 'hidden' && style.display !== 'none';
    }
";

const CLEAR_SCRIPT: &str = r"
    (selector) => {
        const el = document.querySelector(selector);
        if (!el) return false;
        el.focus();
        if ('value' in el) {
            el.value = '';
            el.dispatchEvent(new Event('input', { bubbles: true }));
        }
        return true;
    }
";

const LOAD_STATE_SCRIPT: &str = r"
    (() => ({
        readyState: document.readyState,
        resources: performance.getEntriesByType('resource').length
    }))()
";

/// Keystroke delay bounds: +/-40% around `base_ms`
fn jitter_bounds(base_ms: u64) -> (u64, u64) {
    (
        base_ms.saturating_mul(6) / 10,
        base_ms.saturating_mul(14) / 10,
    )
}

fn browser_err(e: impl std::fmt::Display) -> PageError {
    PageError::Browser(e.to_string())
}

/// Wraps a JS arrow function taking one string argument into an IIFE
fn call_with_selector(function: &str, selector: &str) -> Result<String, PageError> {
    let arg = serde_json::to_string(selector).map_err(browser_err)?;
    Ok(format!("({function})({arg})"))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadState {
    ready_state: String,
    resources: u64,
}

/// One browser tab driven over CDP
#[derive(Debug, Clone)]
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn is_visible(&self, selector: &str) -> Result<bool, PageError> {
        let script = call_with_selector(VISIBILITY_SCRIPT, selector)?;
        let result = self.page.evaluate(script).await.map_err(browser_err)?;
        Ok(result.into_value::<bool>().unwrap_or(false))
    }

    async fn load_state(&self) -> Result<LoadState, PageError> {
        let result = self
            .page
            .evaluate(LOAD_STATE_SCRIPT)
            .await
            .map_err(browser_err)?;
        result.into_value::<LoadState>().map_err(browser_err)
    }

    /// Poll until `mode` holds; callers bound this with a timeout
    async fn poll_ready(&self, mode: WaitMode) -> Result<(), PageError> {
        let mut last_resources: Option<(u64, Instant)> = None;

        loop {
            // A navigation in flight destroys the execution context; retry
            let state = match self.load_state().await {
                Ok(state) => state,
                Err(e) => {
                    trace!("readyState probe failed, retrying: {e}");
                    tokio::time::sleep(POLL_INTERVAL).await;
                    continue;
                }
            };

            let satisfied = match mode {
                WaitMode::DomContentLoaded => {
                    state.ready_state == "interactive" || state.ready_state == "complete"
                }
                WaitMode::Load => state.ready_state == "complete",
                WaitMode::NetworkIdle => {
                    if state.ready_state != "complete" {
                        last_resources = None;
                        false
                    } else {
                        match last_resources {
                            Some((count, since)) if count == state.resources => {
                                since.elapsed() >= NETWORK_QUIET_WINDOW
                            }
                            _ => {
                                last_resources = Some((state.resources, Instant::now()));
                                false
                            }
                        }
                    }
                }
            };

            if satisfied {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PageAccessor for ChromiumPage {
    async fn navigate(
        &self,
        url: &str,
        wait: WaitMode,
        timeout: Duration,
    ) -> Result<(), PageError> {
        debug!("Navigating to {url} (wait: {wait:?})");
        with_page_timeout(
            async {
                self.page.goto(url).await.map_err(browser_err)?;
                self.poll_ready(wait).await
            },
            timeout,
            "navigate",
        )
        .await
    }

    async fn locate(
        &self,
        candidates: &[String],
        timeout: Duration,
    ) -> Result<Option<Located>, PageError> {
        let deadline = Instant::now() + timeout;
        loop {
            for selector in candidates {
                if self.is_visible(selector).await? {
                    trace!("Located visible element via {selector}");
                    return Ok(Some(Located {
                        selector: selector.clone(),
                    }));
                }
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn click(&self, element: &Located) -> Result<(), PageError> {
        let handle = self
            .page
            .find_element(element.selector.as_str())
            .await
            .map_err(|_| PageError::ElementNotFound(element.selector.clone()))?;
        handle.click().await.map_err(browser_err)?;
        Ok(())
    }

    async fn clear(&self, element: &Located) -> Result<(), PageError> {
        let script = call_with_selector(CLEAR_SCRIPT, &element.selector)?;
        let cleared = self
            .page
            .evaluate(script)
            .await
            .map_err(browser_err)?
            .into_value::<bool>()
            .unwrap_or(false);
        if cleared {
            Ok(())
        } else {
            Err(PageError::ElementNotFound(element.selector.clone()))
        }
    }

    async fn type_text(
        &self,
        element: &Located,
        text: &str,
        key_delay: Duration,
    ) -> Result<(), PageError> {
        let handle = self
            .page
            .find_element(element.selector.as_str())
            .await
            .map_err(|_| PageError::ElementNotFound(element.selector.clone()))?;

        let base_ms = u64::try_from(key_delay.as_millis()).unwrap_or(u64::MAX);
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            handle
                .type_str(ch.encode_utf8(&mut buf))
                .await
                .map_err(browser_err)?;
            if base_ms > 0 {
                let (low, high) = jitter_bounds(base_ms);
                let jitter = rand::rng().random_range(low..=high);
                tokio::time::sleep(Duration::from_millis(jitter)).await;
            }
        }
        Ok(())
    }

    async fn submit(&self, element: &Located) -> Result<(), PageError> {
        let handle = self
            .page
            .find_element(element.selector.as_str())
            .await
            .map_err(|_| PageError::ElementNotFound(element.selector.clone()))?;
        handle.press_key("Enter").await.map_err(browser_err)?;
        Ok(())
    }

    async fn wait_load_state(&self, mode: WaitMode, timeout: Duration) -> Result<(), PageError> {
        with_page_timeout(self.poll_ready(mode), timeout, "wait_load_state").await
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        let params = CaptureScreenshotParams {
            format: Some(CaptureScreenshotFormat::Png),
            ..Default::default()
        };
        self.page.screenshot(params).await.map_err(browser_err)
    }

    async fn content(&self) -> Result<String, PageError> {
        self.page.content().await.map_err(browser_err)
    }

    async fn close(&self) -> Result<(), PageError> {
        self.page.clone().close().await.map_err(browser_err)
    }
}
