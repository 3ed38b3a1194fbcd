//! Shared browser lifecycle
//!
//! One Chromium process serves every provider attempt. It is launched on
//! the first `open_page`, health-checked on each reuse, and relaunched
//! after a crash.

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::accessor::{PageAccessor, PageError, PageSource};
use super::page::ChromiumPage;
use super::setup::{LaunchOptions, VIEWPORT, launch_browser};

/// Browser process plus its CDP handler task
///
/// The handler is aborted and the profile dir removed on drop.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the process, wait for exit, then remove the profile dir
    async fn shutdown(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        self.cleanup_temp_dir();
    }

    /// Must run after the process exits or Windows keeps the files locked
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take()
            && let Err(e) = std::fs::remove_dir_all(&path)
        {
            warn!("Failed to clean up profile dir {}: {e}", path.display());
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();
        self.cleanup_temp_dir();
    }
}

/// Lazily launched, self-healing shared browser
#[derive(Clone)]
pub struct BrowserManager {
    browser: Arc<Mutex<Option<BrowserWrapper>>>,
    options: LaunchOptions,
}

impl BrowserManager {
    /// The browser is not started until the first page is requested
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        Self {
            browser: Arc::new(Mutex::new(None)),
            options,
        }
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.options.headless
    }

    /// Ensure a healthy browser is held in `slot`
    async fn ensure_running(&self, slot: &mut Option<BrowserWrapper>) -> Result<()> {
        if let Some(wrapper) = slot.as_ref() {
            match wrapper.browser().version().await {
                Ok(_) => {
                    debug!("Browser health check passed, reusing existing browser");
                    return Ok(());
                }
                Err(e) => {
                    warn!("Browser health check failed: {e}. Relaunching");
                    if let Some(mut crashed) = slot.take() {
                        crashed.shutdown().await;
                    }
                }
            }
        }

        info!(
            "Launching browser (headless: {})",
            self.options.headless
        );
        let (browser, handler, user_data_dir) = launch_browser(&self.options).await?;
        *slot = Some(BrowserWrapper::new(browser, handler, user_data_dir));
        Ok(())
    }

    /// Close the browser if running; repeated calls are no-ops
    pub async fn shutdown(&self) {
        if let Some(mut wrapper) = self.browser.lock().await.take() {
            info!("Shutting down search browser");
            wrapper.shutdown().await;
        }
    }
}

impl Default for BrowserManager {
    fn default() -> Self {
        Self::new(LaunchOptions::default())
    }
}

#[async_trait]
impl PageSource for BrowserManager {
    async fn open_page(&self) -> Result<Box<dyn PageAccessor>, PageError> {
        let mut guard = self.browser.lock().await;
        self.ensure_running(&mut guard)
            .await
            .map_err(|e| PageError::Browser(format!("{e:#}")))?;

        let wrapper = guard
            .as_ref()
            .ok_or_else(|| PageError::Browser("browser not running".to_string()))?;
        let page = wrapper
            .browser()
            .new_page("about:blank")
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        drop(guard);

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(VIEWPORT.0))
            .height(i64::from(VIEWPORT.1))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(PageError::Browser)?;
        if let Err(e) = page.execute(metrics).await {
            warn!("Failed to set viewport: {e}");
        }

        Ok(Box::new(ChromiumPage::new(page)))
    }
}
