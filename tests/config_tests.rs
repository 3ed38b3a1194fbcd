//! Tests for the search configuration builder

use kodegen_tools_autosearch::config::{SearchConfig, SearchMode};
use kodegen_tools_autosearch::provider::{ProviderKind, ProviderProfile};
use std::time::Duration;

#[test]
fn test_defaults_match_documented_values() {
    let config = SearchConfig::builder().build().expect("defaults are valid");

    assert_eq!(config.mode(), SearchMode::WebWithFallback);
    assert_eq!(config.max_results(), 5);
    assert_eq!(config.extraction_cap(), 10);
    assert_eq!(config.max_content_chars(), 2000);
    assert_eq!(config.corpus_content_chars(), 800);
    assert!(config.headless());
    assert_eq!(config.navigation_timeout(), Duration::from_secs(30));
    assert_eq!(config.element_timeout(), Duration::from_secs(5));
    assert_eq!(config.consent_timeout(), Duration::from_secs(3));
    assert_eq!(config.settle_delay(), Duration::from_millis(3000));
    assert_eq!(config.activity_retention(), 25);
    assert_eq!(config.summary_model(), "gpt-4o-mini");
    assert_eq!(config.summary_max_tokens(), 1000);

    let kinds: Vec<_> = config.providers().iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [ProviderKind::Google, ProviderKind::DuckDuckGo]);
}

#[test]
fn test_default_impl_equals_default_builder() {
    let from_default = SearchConfig::default();
    let from_builder = SearchConfig::builder().build().expect("valid");
    assert_eq!(from_default.providers(), from_builder.providers());
    assert_eq!(from_default.max_results(), from_builder.max_results());
}

#[test]
fn test_max_results_range_is_enforced() {
    assert!(SearchConfig::builder().max_results(0).build().is_err());
    assert!(SearchConfig::builder().max_results(11).build().is_err());
    for n in 1..=10 {
        let config = SearchConfig::builder().max_results(n).build().expect("in range");
        assert_eq!(config.max_results(), n);
    }
}

#[test]
fn test_invalid_summary_settings_are_rejected() {
    assert!(SearchConfig::builder().summary_temperature(2.5).build().is_err());
    assert!(SearchConfig::builder().summary_temperature(-0.1).build().is_err());
    assert!(SearchConfig::builder().summary_model("  ").build().is_err());
    assert!(SearchConfig::builder().max_content_chars(0).build().is_err());
    assert!(SearchConfig::builder().extraction_cap(0).build().is_err());
}

#[test]
fn test_typing_delay_is_bounded() {
    assert!(SearchConfig::builder().typing_delay_ms(u64::MAX).build().is_err());
    assert!(SearchConfig::builder().typing_delay_ms(1001).build().is_err());
    let config = SearchConfig::builder()
        .typing_delay_ms(1000)
        .build()
        .expect("upper bound is accepted");
    assert_eq!(config.typing_delay(), Duration::from_millis(1000));
}

#[test]
fn test_provider_order_is_respected() {
    let config = SearchConfig::builder()
        .provider_order([ProviderKind::DuckDuckGo, ProviderKind::Google])
        .build()
        .expect("valid");
    let names: Vec<_> = config.providers().iter().map(ProviderProfile::name).collect();
    assert_eq!(names, ["DuckDuckGo", "Google"]);
}

#[test]
fn test_duplicate_providers_are_rejected() {
    let result = SearchConfig::builder()
        .provider_order([ProviderKind::Google, ProviderKind::Google])
        .build();
    assert!(result.is_err());
}

#[test]
fn test_profile_override_replaces_builtin() {
    let mut custom = ProviderProfile::duckduckgo();
    custom.entry_url = "https://html.duckduckgo.com/html/".to_string();

    let config = SearchConfig::builder()
        .provider_order([ProviderKind::DuckDuckGo])
        .provider_profile(custom.clone())
        .build()
        .expect("valid");

    assert_eq!(config.providers(), &[custom]);
}

#[test]
fn test_override_for_unlisted_provider_is_ignored() {
    let config = SearchConfig::builder()
        .provider_order([ProviderKind::Google])
        .provider_profile(ProviderProfile::duckduckgo())
        .build()
        .expect("valid");
    assert_eq!(config.providers().len(), 1);
    assert_eq!(config.providers()[0].kind, ProviderKind::Google);
}

#[test]
fn test_empty_provider_order_is_allowed() {
    let config = SearchConfig::builder()
        .provider_order(Vec::<ProviderKind>::new())
        .build()
        .expect("catalog-only configuration is valid");
    assert!(config.providers().is_empty());
}

#[test]
fn test_profile_json_round_trips_through_serde() {
    let json = serde_json::to_string(&ProviderProfile::google()).expect("serialize");
    let parsed = ProviderProfile::from_json(&json).expect("parse");
    assert_eq!(parsed, ProviderProfile::google());

    let future = json.replace("\"version\":1", "\"version\":99");
    assert!(ProviderProfile::from_json(&future).is_err());
}

#[test]
fn test_provider_kind_parses_aliases() {
    assert_eq!("google".parse::<ProviderKind>().ok(), Some(ProviderKind::Google));
    assert_eq!("ddg".parse::<ProviderKind>().ok(), Some(ProviderKind::DuckDuckGo));
    assert_eq!("DuckDuckGo".parse::<ProviderKind>().ok(), Some(ProviderKind::DuckDuckGo));
    assert!("bing".parse::<ProviderKind>().is_err());
}
