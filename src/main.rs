// kodegen-autosearch: run one query through the fallback chain and print
// the run record as JSON on stdout.

use anyhow::Result;
use clap::Parser;
use kodegen_tools_autosearch::{
    ActivityHistory, BrowserManager, CancelToken, ContentFetcher, FallbackChain, LaunchOptions,
    OpenAiSummarizer, ProviderKind, RunStatus, SearchConfig, SearchMode, activity_channel,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kodegen-autosearch")]
#[command(about = "Search the web through a browser and summarize the results", long_about = None)]
struct Cli {
    /// Search query
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Results to fetch and summarize (1-10)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    max_results: u8,

    /// Providers in priority order, comma separated (google, duckduckgo)
    #[arg(long, value_delimiter = ',', default_value = "google,duckduckgo")]
    providers: Vec<ProviderKind>,

    /// Skip web search and answer from the model only
    #[arg(long)]
    knowledge_only: bool,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Print the activity log to stderr when the run finishes
    #[arg(long)]
    show_activity: bool,

    /// Chat model used for summaries
    #[arg(long, env = "AUTOSEARCH_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let query = cli.query.join(" ");

    let mut builder = SearchConfig::builder()
        .max_results(usize::from(cli.max_results))
        .provider_order(cli.providers)
        .headless(!cli.headed)
        .mode(if cli.knowledge_only {
            SearchMode::KnowledgeOnly
        } else {
            SearchMode::WebWithFallback
        });
    if let Some(model) = &cli.model {
        builder = builder.summary_model(model.clone());
    }
    let config = builder.build()?;

    let summarizer = OpenAiSummarizer::from_env(Some(config.summary_model().to_string()))?
        .with_timeout(config.summary_timeout());
    info!(
        "Summarizing with {} via {}",
        summarizer.model(),
        summarizer.base_url()
    );
    if let Err(e) = summarizer.verify().await {
        warn!("Could not verify summarizer credentials: {e}");
    }

    let browser = BrowserManager::new(LaunchOptions {
        headless: config.headless(),
        ..LaunchOptions::default()
    });
    let fetcher = ContentFetcher::new(config.fetch_timeout())?;
    let retention = config.activity_retention();
    let max_results = config.max_results();

    let (reporter, mut feed) = activity_channel();
    let observer = tokio::spawn(async move {
        let mut history = ActivityHistory::new(retention);
        while let Some(event) = feed.next().await {
            history.extend([event]);
        }
        history
    });

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling after the current stage");
            on_interrupt.cancel();
        }
    });

    let chain = FallbackChain::new(
        config,
        Arc::new(browser.clone()),
        Arc::new(fetcher),
        Arc::new(summarizer),
    )
    .with_activity(reporter);
    let snapshots = chain.snapshots();

    let run = chain.run_with_cancel(&query, max_results, &cancel).await;
    drop(chain);
    browser.shutdown().await;

    if let Some(snapshot) = snapshots.take() {
        info!(
            "Latest {} screenshot: {} bytes",
            snapshot.source,
            snapshot.bytes.len()
        );
    }

    let history = observer.await?;
    if cli.show_activity {
        eprintln!("{}", history.render());
    }

    println!("{}", serde_json::to_string_pretty(&run.to_record())?);

    Ok(if run.status() == RunStatus::Complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
