//! Shared in-process fakes for pipeline tests
#![allow(dead_code)]

use async_trait::async_trait;
use kodegen_tools_autosearch::browser::{Located, PageAccessor, PageError, PageSource, WaitMode};
use kodegen_tools_autosearch::config::SearchConfig;
use kodegen_tools_autosearch::fetcher::ContentSource;
use kodegen_tools_autosearch::provider::ProviderKind;
use kodegen_tools_autosearch::summarizer::{CompletionRequest, Summarizer, SummaryError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const GOOGLE_URL: &str = "https://www.google.com/";
pub const DDG_URL: &str = "https://duckduckgo.com/";

/// How a fake provider site behaves
#[derive(Debug, Clone)]
pub struct Scenario {
    pub landing_html: String,
    pub results_html: String,
    /// Selectors `locate` treats as visible
    pub visible: Vec<String>,
    /// Leading navigation attempts that time out
    pub navigation_timeouts: usize,
    pub navigation_error: Option<String>,
    pub load_state_times_out: bool,
    pub screenshot_fails: bool,
}

impl Scenario {
    pub fn google(results_html: impl Into<String>) -> Self {
        Self {
            landing_html: "<html><body><form><textarea name='q'></textarea></form></body></html>"
                .to_string(),
            results_html: results_html.into(),
            visible: vec!["textarea[name='q']".to_string(), "#L2AGLb".to_string()],
            navigation_timeouts: 0,
            navigation_error: None,
            load_state_times_out: false,
            screenshot_fails: false,
        }
    }

    pub fn duckduckgo(results_html: impl Into<String>) -> Self {
        Self {
            landing_html: "<html><body><input name='q'></body></html>".to_string(),
            results_html: results_html.into(),
            visible: vec!["input[name='q']".to_string()],
            navigation_timeouts: 0,
            navigation_error: None,
            load_state_times_out: false,
            screenshot_fails: false,
        }
    }

    pub fn blocked() -> Self {
        Self {
            landing_html: "<html><body>Our systems have detected unusual traffic</body></html>"
                .to_string(),
            results_html: String::new(),
            visible: Vec::new(),
            navigation_timeouts: 0,
            navigation_error: None,
            load_state_times_out: false,
            screenshot_fails: false,
        }
    }
}

/// Calls observed across every page handed out by a [`FakePages`]
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Mutex<Vec<String>>,
}

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.calls.lock().expect("call log poisoned").push(call.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.snapshot().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

pub struct FakePage {
    scenarios: Arc<HashMap<String, Scenario>>,
    log: Arc<CallLog>,
    current: Mutex<Option<String>>,
    submitted: Mutex<bool>,
    navigation_attempts: AtomicUsize,
}

impl FakePage {
    fn scenario(&self) -> Option<Scenario> {
        let current = self.current.lock().expect("poisoned").clone()?;
        self.scenarios.get(&current).cloned()
    }
}

#[async_trait]
impl PageAccessor for FakePage {
    async fn navigate(&self, url: &str, wait: WaitMode, timeout: Duration) -> Result<(), PageError> {
        self.log.push(format!("navigate {url} {wait:?}"));
        *self.current.lock().expect("poisoned") = Some(url.to_string());
        let scenario = self
            .scenario()
            .ok_or_else(|| PageError::Browser(format!("no scenario for {url}")))?;

        let attempt = self.navigation_attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < scenario.navigation_timeouts {
            return Err(PageError::Timeout {
                operation: "navigate".to_string(),
                after: timeout,
            });
        }
        if let Some(message) = scenario.navigation_error {
            return Err(PageError::Browser(message));
        }
        Ok(())
    }

    async fn locate(
        &self,
        candidates: &[String],
        _timeout: Duration,
    ) -> Result<Option<Located>, PageError> {
        let visible = self.scenario().map(|s| s.visible).unwrap_or_default();
        Ok(candidates
            .iter()
            .find(|candidate| visible.contains(candidate))
            .map(|selector| Located {
                selector: selector.clone(),
            }))
    }

    async fn click(&self, element: &Located) -> Result<(), PageError> {
        self.log.push(format!("click {}", element.selector));
        Ok(())
    }

    async fn clear(&self, element: &Located) -> Result<(), PageError> {
        self.log.push(format!("clear {}", element.selector));
        Ok(())
    }

    async fn type_text(
        &self,
        _element: &Located,
        text: &str,
        _key_delay: Duration,
    ) -> Result<(), PageError> {
        self.log.push(format!("type {text}"));
        Ok(())
    }

    async fn submit(&self, _element: &Located) -> Result<(), PageError> {
        self.log.push("submit");
        *self.submitted.lock().expect("poisoned") = true;
        Ok(())
    }

    async fn wait_load_state(&self, mode: WaitMode, timeout: Duration) -> Result<(), PageError> {
        self.log.push(format!("wait {mode:?}"));
        if self.scenario().is_some_and(|s| s.load_state_times_out) {
            return Err(PageError::Timeout {
                operation: "wait_load_state".to_string(),
                after: timeout,
            });
        }
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        self.log.push("screenshot");
        if self.scenario().is_some_and(|s| s.screenshot_fails) {
            return Err(PageError::Browser("capture failed".to_string()));
        }
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn content(&self) -> Result<String, PageError> {
        let scenario = self
            .scenario()
            .ok_or_else(|| PageError::Browser("no document".to_string()))?;
        if *self.submitted.lock().expect("poisoned") {
            Ok(scenario.results_html)
        } else {
            Ok(scenario.landing_html)
        }
    }

    async fn close(&self) -> Result<(), PageError> {
        self.log.push("close");
        Ok(())
    }
}

/// `PageSource` serving one fresh [`FakePage`] per attempt
pub struct FakePages {
    scenarios: Arc<HashMap<String, Scenario>>,
    pub log: Arc<CallLog>,
    pub opened: AtomicUsize,
    pub fail_open: bool,
}

impl FakePages {
    pub fn new(scenarios: impl IntoIterator<Item = (&'static str, Scenario)>) -> Self {
        Self {
            scenarios: Arc::new(
                scenarios
                    .into_iter()
                    .map(|(url, scenario)| (url.to_string(), scenario))
                    .collect(),
            ),
            log: Arc::new(CallLog::default()),
            opened: AtomicUsize::new(0),
            fail_open: false,
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakePages {
    async fn open_page(&self) -> Result<Box<dyn PageAccessor>, PageError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(PageError::Browser("browser failed to launch".to_string()));
        }
        Ok(Box::new(FakePage {
            scenarios: Arc::clone(&self.scenarios),
            log: Arc::clone(&self.log),
            current: Mutex::new(None),
            submitted: Mutex::new(false),
            navigation_attempts: AtomicUsize::new(0),
        }))
    }
}

/// Deterministic page bodies keyed by URL
#[derive(Default)]
pub struct FakeContent {
    pub fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl ContentSource for FakeContent {
    async fn fetch(&self, url: &str, max_chars: usize) -> String {
        self.fetched.lock().expect("poisoned").push(url.to_string());
        let body = format!("Body of {url}");
        body.chars().take(max_chars).collect()
    }
}

impl FakeContent {
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("poisoned").clone()
    }
}

type Responder = dyn Fn(&CompletionRequest) -> Result<String, SummaryError> + Send + Sync;

/// Summarizer driven by a closure, recording every request
pub struct FakeSummarizer {
    respond: Box<Responder>,
    pub requests: Mutex<Vec<CompletionRequest>>,
    delay: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeSummarizer {
    pub fn new(
        respond: impl Fn(&CompletionRequest) -> Result<String, SummaryError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &'static str) -> Self {
        Self::new(move |_| Ok(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(SummaryError::NotConfigured("quota exceeded".to_string())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, SummaryError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().expect("poisoned").push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(request)
    }
}

/// Config with every sleep removed so tests run instantly
pub fn fast_config(order: &[ProviderKind]) -> SearchConfig {
    SearchConfig::builder()
        .provider_order(order.iter().copied())
        .settle_delay_ms(0)
        .typing_delay_ms(0)
        .consent_timeout_secs(1)
        .element_timeout_secs(1)
        .navigation_timeout_secs(1)
        .load_state_timeout_secs(1)
        .build()
        .expect("valid test config")
}

/// Google results page with `n` organic results
pub fn google_results(n: usize) -> String {
    let mut html = String::from("<html><body><div id='search'>");
    for i in 1..=n {
        html.push_str(&format!(
            "<div class='g'><a href='/url?q=https://site{i}.example/page&amp;sa=U'><h3>Google result {i}</h3></a><div class='VwiC3b'>Snippet {i}</div></div>"
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// DuckDuckGo results page with `n` organic results
pub fn ddg_results(n: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 1..=n {
        html.push_str(&format!(
            "<article data-testid='result'><h2><a data-testid='result-title-a' href='https://ddg{i}.example/'>DDG result {i}</a></h2><div data-testid='result-snippet'>DDG snippet {i}</div></article>"
        ));
    }
    html.push_str("</body></html>");
    html
}
