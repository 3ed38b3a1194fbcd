use kodegen_tools_autosearch::config::SearchConfig;
use kodegen_tools_autosearch::pipeline::RunStatus;
use kodegen_tools_autosearch::search;

#[tokio::test]
#[ignore] // Requires browser installation and OPENAI_API_KEY
async fn test_search_basic() {
    let config = SearchConfig::builder().max_results(2).build().unwrap();
    let run = search("rust programming", config).await.unwrap();
    assert_eq!(run.query, "rust programming");
    assert_eq!(run.status(), RunStatus::Complete);
    assert!(run.summary.is_some());
}
