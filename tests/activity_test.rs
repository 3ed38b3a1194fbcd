//! Activity log ordering, retention and rendering

use kodegen_tools_autosearch::activity::{ActivityHistory, ActivityKind, activity_channel};
use std::time::Duration;

#[tokio::test]
async fn test_events_arrive_in_emission_order_across_clones() {
    let (reporter, mut feed) = activity_channel();
    let other = reporter.clone();

    reporter.emit(ActivityKind::Start, "one");
    other.emit(ActivityKind::Browser, "two");
    reporter.emit_with_details(ActivityKind::Error, "three", "boom");

    let events = feed.drain();
    let descriptions: Vec<_> = events.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, ["one", "two", "three"]);
    assert_eq!(events.iter().map(|e| e.seq).collect::<Vec<_>>(), [0, 1, 2]);
    assert_eq!(events[2].details.as_deref(), Some("boom"));
    assert_eq!(reporter.emitted(), 3);
}

#[tokio::test]
async fn test_events_from_spawned_tasks_are_ordered() {
    let (reporter, mut feed) = activity_channel();
    let mut handles = Vec::new();
    for task in 0..4 {
        let reporter = reporter.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..25 {
                reporter.emit(ActivityKind::Info, format!("{task}:{i}"));
            }
        }));
    }
    for handle in handles {
        handle.await.expect("join");
    }

    let events = feed.drain();
    assert_eq!(events.len(), 100);
    assert!(events.windows(2).all(|pair| pair[0].seq + 1 == pair[1].seq));
}

#[tokio::test]
async fn test_feed_ends_when_reporters_drop() {
    let (reporter, mut feed) = activity_channel();
    reporter.emit(ActivityKind::Info, "last words");
    drop(reporter);

    assert_eq!(
        feed.next().await.map(|e| e.description),
        Some("last words".to_string())
    );
    assert!(feed.next().await.is_none());
}

#[tokio::test]
async fn test_next_timeout_returns_none_when_idle() {
    let (_reporter, mut feed) = activity_channel();
    assert!(feed.next_timeout(Duration::from_millis(20)).await.is_none());
}

#[test]
fn test_history_keeps_most_recent_window() {
    let (reporter, mut feed) = activity_channel();
    let mut history = ActivityHistory::default();

    for i in 0..40 {
        reporter.emit(ActivityKind::Progress, format!("event {i}"));
    }
    assert_eq!(history.absorb(&mut feed), 40);

    assert_eq!(history.len(), 25);
    let first = history.iter().next().expect("retained");
    assert_eq!(first.description, "event 15");
    assert_eq!(history.iter().last().map(|e| e.seq), Some(39));
}

#[test]
fn test_render_includes_kind_and_details() {
    let (reporter, mut feed) = activity_channel();
    reporter.emit(ActivityKind::Success, "done");
    reporter.emit_with_details(ActivityKind::Error, "Google search failed", "Blocked");

    let mut history = ActivityHistory::new(5);
    history.absorb(&mut feed);
    let rendered = history.render();

    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("SUCCESS: done"), "{}", lines[0]);
    assert!(lines[1].ends_with("ERROR: Google search failed"));
    assert!(lines[2].trim_start().ends_with("Blocked"));
}

#[test]
fn test_detached_reporter_never_fails() {
    let reporter = kodegen_tools_autosearch::activity::ActivityReporter::detached();
    reporter.emit(ActivityKind::Info, "nobody listening");
    assert_eq!(reporter.emitted(), 1);
}
