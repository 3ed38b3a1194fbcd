//! SearchProvider state machine driven through fake pages

use kodegen_tools_autosearch::activity::{ActivityKind, activity_channel};
use kodegen_tools_autosearch::provider::{
    Observers, ProviderOutcome, ProviderProfile, ProviderTimings, SearchError, SearchProvider,
    SearchStage,
};
use kodegen_tools_autosearch::snapshot::SnapshotChannel;

mod common;
use common::*;

fn timings() -> ProviderTimings {
    ProviderTimings::from_config(&fast_config(&[]))
}

fn google() -> SearchProvider {
    SearchProvider::new(ProviderProfile::google(), timings())
}

async fn run_google(pages: &FakePages, snapshots: &SnapshotChannel) -> ProviderOutcome {
    let (reporter, _feed) = activity_channel();
    google()
        .search(
            pages,
            "rust async",
            Observers {
                activity: &reporter,
                snapshots,
            },
        )
        .await
}

#[tokio::test]
async fn test_google_happy_path_extracts_results_and_publishes_snapshot() {
    let pages = FakePages::new([(GOOGLE_URL, Scenario::google(google_results(3)))]);
    let snapshots = SnapshotChannel::new();

    let outcome = run_google(&pages, &snapshots).await;

    let ProviderOutcome::Results(results) = outcome else {
        panic!("expected results, got {outcome:?}");
    };
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].url, "https://site1.example/page");
    assert_eq!(results[2].title, "Google result 3");

    let snapshot = snapshots.take().expect("snapshot published");
    assert_eq!(snapshot.source, "Google");

    let calls = pages.log.snapshot();
    assert_eq!(calls.first().map(String::as_str), Some("navigate https://www.google.com/ DomContentLoaded"));
    assert!(calls.contains(&"click #L2AGLb".to_string()), "consent dismissed: {calls:?}");
    assert!(calls.contains(&"clear textarea[name='q']".to_string()));
    assert!(calls.contains(&"type rust async".to_string()));
    assert_eq!(calls.last().map(String::as_str), Some("close"));
}

#[tokio::test]
async fn test_interstitial_on_landing_page_blocks_before_typing() {
    let pages = FakePages::new([(GOOGLE_URL, Scenario::blocked())]);
    let outcome = run_google(&pages, &SnapshotChannel::new()).await;

    match outcome {
        ProviderOutcome::Failed { stage, error } => {
            assert_eq!(stage, SearchStage::InterstitialCheck);
            assert!(error.is_blocking());
        }
        other => panic!("expected blocked failure, got {other:?}"),
    }
    assert_eq!(pages.log.count_prefix("type"), 0);
    assert_eq!(pages.log.count_prefix("close"), 1);
}

#[tokio::test]
async fn test_interstitial_after_submit_is_caught_on_recheck() {
    let scenario = Scenario::google("<html><body>Please solve this CAPTCHA</body></html>");
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);
    let snapshots = SnapshotChannel::new();

    let outcome = run_google(&pages, &snapshots).await;

    assert!(matches!(
        outcome,
        ProviderOutcome::Failed {
            stage: SearchStage::InterstitialRecheck,
            error: SearchError::Blocked { .. }
        }
    ));
    assert!(!snapshots.has_pending(), "no capture of a challenge page");
}

#[tokio::test]
async fn test_missing_query_input_fails_with_not_found() {
    let mut scenario = Scenario::google(google_results(2));
    scenario.visible.clear();
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);

    let outcome = run_google(&pages, &SnapshotChannel::new()).await;

    match outcome {
        ProviderOutcome::Failed {
            stage: SearchStage::SubmitQuery,
            error: SearchError::NotFound { what, .. },
        } => assert_eq!(what, "search input"),
        other => panic!("expected missing input, got {other:?}"),
    }
}

#[tokio::test]
async fn test_navigation_timeout_retries_with_network_idle() {
    let mut scenario = Scenario::google(google_results(1));
    scenario.navigation_timeouts = 1;
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);

    let outcome = run_google(&pages, &SnapshotChannel::new()).await;

    assert_eq!(outcome.into_results().len(), 1);
    let navigations: Vec<_> = pages
        .log
        .snapshot()
        .into_iter()
        .filter(|c| c.starts_with("navigate"))
        .collect();
    assert_eq!(
        navigations,
        vec![
            "navigate https://www.google.com/ DomContentLoaded".to_string(),
            "navigate https://www.google.com/ NetworkIdle".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_repeated_navigation_timeout_fails_the_attempt() {
    let mut scenario = Scenario::google(google_results(1));
    scenario.navigation_timeouts = 2;
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);

    let outcome = run_google(&pages, &SnapshotChannel::new()).await;

    assert!(matches!(
        outcome,
        ProviderOutcome::Failed {
            stage: SearchStage::Navigate,
            error: SearchError::Timeout { .. }
        }
    ));
}

#[tokio::test]
async fn test_load_state_timeout_is_not_fatal() {
    let mut scenario = Scenario::google(google_results(2));
    scenario.load_state_times_out = true;
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);
    let (reporter, mut feed) = activity_channel();

    let outcome = google()
        .search(
            &pages,
            "q",
            Observers {
                activity: &reporter,
                snapshots: &SnapshotChannel::new(),
            },
        )
        .await;

    assert_eq!(outcome.into_results().len(), 2);
    let warning = feed
        .drain()
        .into_iter()
        .find(|e| e.kind == ActivityKind::Warning && e.description.contains("timeout"))
        .expect("load-state warning");
    assert!(
        warning
            .details
            .as_deref()
            .is_some_and(|d| d.ends_with("(during wait for results)"))
    );
}

#[tokio::test]
async fn test_screenshot_failure_is_not_fatal() {
    let mut scenario = Scenario::google(google_results(2));
    scenario.screenshot_fails = true;
    let pages = FakePages::new([(GOOGLE_URL, scenario)]);
    let snapshots = SnapshotChannel::new();
    let (reporter, mut feed) = activity_channel();

    let outcome = google()
        .search(
            &pages,
            "q",
            Observers {
                activity: &reporter,
                snapshots: &snapshots,
            },
        )
        .await;

    assert_eq!(outcome.into_results().len(), 2);
    assert!(snapshots.take().is_none());
    assert!(feed.drain().iter().any(|e| {
        e.description == "Could not capture screenshot"
            && e.details.as_deref().is_some_and(|d| d.ends_with("(during capture)"))
    }));
}

#[tokio::test]
async fn test_zero_results_is_not_a_failure() {
    let pages = FakePages::new([(GOOGLE_URL, Scenario::google("<html><body></body></html>"))]);
    let outcome = run_google(&pages, &SnapshotChannel::new()).await;
    assert_eq!(outcome, ProviderOutcome::Results(Vec::new()));
}

#[tokio::test]
async fn test_page_source_failure_fails_at_init() {
    let mut pages = FakePages::new([(GOOGLE_URL, Scenario::google(google_results(1)))]);
    pages.fail_open = true;

    let outcome = run_google(&pages, &SnapshotChannel::new()).await;

    assert!(matches!(
        outcome,
        ProviderOutcome::Failed {
            stage: SearchStage::Init,
            error: SearchError::Browser { .. }
        }
    ));
}

#[tokio::test]
async fn test_duckduckgo_profile_drives_same_state_machine() {
    let pages = FakePages::new([(DDG_URL, Scenario::duckduckgo(ddg_results(4)))]);
    let (reporter, _feed) = activity_channel();
    let provider = SearchProvider::new(ProviderProfile::duckduckgo(), timings());

    let outcome = provider
        .search(
            &pages,
            "tokio",
            Observers {
                activity: &reporter,
                snapshots: &SnapshotChannel::new(),
            },
        )
        .await;

    let results = outcome.into_results();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].url, "https://ddg1.example/");
    assert_eq!(results[0].snippet, "DDG snippet 1");
    assert_eq!(pages.log.count_prefix("click #L2AGLb"), 0);
}
