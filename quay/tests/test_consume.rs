#![cfg(feature = "consume")]

mod common;
mod workloads;

use common::{Event, Journal, ScriptedQueue, Step};
use quay::core::{QuayError, Result, Shutdown, WindowReport};
use quay::prelude::*;
use std::time::Duration;
use tokio::sync::mpsc;
use workloads::ScriptedWorkload;

fn quick_config() -> ConsumerConfig {
    ConsumerConfig::new().error_backoff(Duration::ZERO)
}

/// Config that flushes the throughput window after every iteration
fn reporting_config() -> ConsumerConfig {
    quick_config().report_interval(Duration::ZERO)
}

fn drain_reports(receiver: &mut mpsc::UnboundedReceiver<WindowReport>) -> Vec<u64> {
    let mut counts = Vec::new();
    while let Ok(report) = receiver.try_recv() {
        counts.push(report.count);
    }
    counts
}

#[tokio::test]
async fn test_failed_message_is_left_in_the_queue() -> Result<()> {
    let journal = Journal::default();
    let queue = ScriptedQueue::new(journal.clone(), vec![Step::Batch(vec!["a", "b", "c"])]);
    let workload = ScriptedWorkload::new(journal.clone()).fail_on("b");
    let consumer = Consumer::with_client(queue, workload);

    let summary = consumer.run_next_batch().await?;
    assert_eq!(
        summary,
        BatchSummary {
            received: 3,
            succeeded: 2,
            failed: 1,
            delete_failed: 0,
        }
    );
    assert_eq!(journal.deleted(), vec!["a", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_delete_follows_its_own_processing() -> Result<()> {
    let journal = Journal::default();
    let queue = ScriptedQueue::new(journal.clone(), vec![Step::Batch(vec!["a", "b", "c"])]);
    let workload = ScriptedWorkload::new(journal.clone()).fail_on("b");
    let consumer = Consumer::with_client(queue, workload);

    consumer.run_next_batch().await?;

    let settled: Vec<Event> = journal
        .events()
        .into_iter()
        .filter(|e| !matches!(e, Event::Received(..)))
        .collect();
    assert_eq!(
        settled,
        vec![
            Event::Processed("a".to_string()),
            Event::Deleted("a".to_string()),
            Event::ProcessFailed("b".to_string()),
            Event::Processed("c".to_string()),
            Event::Deleted("c".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_stop_mid_batch_drains_the_batch() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![
            Step::Batch(vec!["m0", "m1", "m2", "m3", "m4"]),
            Step::Batch(vec!["never"]),
        ],
    );
    let workload = ScriptedWorkload::new(journal.clone())
        .fail_on("m3")
        .stop_at(2, shutdown.clone());
    let consumer = Consumer::with_client(queue, workload)
        .with_config(quick_config())
        .with_shutdown(shutdown);

    consumer.run().await?;

    assert_eq!(journal.receives().len(), 1);
    assert_eq!(journal.attempted(), vec!["m0", "m1", "m2", "m3", "m4"]);
    assert_eq!(journal.deleted(), vec!["m0", "m1", "m2", "m4"]);
    Ok(())
}

#[tokio::test]
async fn test_second_stop_request_changes_nothing() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Batch(vec!["m0", "m1", "m2", "m3", "m4"])],
    );
    let workload = ScriptedWorkload::new(journal.clone())
        .stop_at(1, shutdown.clone())
        .stop_at(3, shutdown.clone());
    let consumer = Consumer::with_client(queue, workload)
        .with_config(quick_config())
        .with_shutdown(shutdown.clone());

    consumer.run().await?;

    assert!(shutdown.is_stopping());
    assert_eq!(journal.receives().len(), 1);
    assert_eq!(journal.deleted(), vec!["m0", "m1", "m2", "m3", "m4"]);
    Ok(())
}

#[tokio::test]
async fn test_stopped_consumer_never_receives() -> Result<()> {
    let journal = Journal::default();
    let queue = ScriptedQueue::new(journal.clone(), vec![Step::Batch(vec!["a"])]);
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()));

    assert!(consumer.shutdown().trigger());
    consumer.run().await?;

    assert!(journal.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_batch_polls_again() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Batch(vec![]), Step::Batch(vec!["x"])],
    )
    .stop_when_drained(shutdown.clone());
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(quick_config())
        .with_shutdown(shutdown);

    consumer.run().await?;

    let events = journal.events();
    assert!(matches!(events[0], Event::Received(_, 0)));
    assert!(matches!(events[1], Event::Received(_, 1)));
    assert_eq!(journal.receives().len(), 3);
    assert_eq!(journal.deleted(), vec!["x"]);
    Ok(())
}

#[tokio::test]
async fn test_receive_requests_stay_bounded() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Batch(vec!["a", "b"]), Step::Batch(vec!["c"])],
    )
    .stop_when_drained(shutdown.clone());
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(quick_config().max_messages(64))
        .with_shutdown(shutdown);

    consumer.run().await?;

    let receives = journal.receives();
    assert_eq!(receives.len(), 3);
    for request in receives {
        assert!(request.max_messages <= 10);
        assert_eq!(request.wait_time, Duration::from_secs(1));
        assert_eq!(request.visibility_timeout, Duration::from_secs(60));
    }
    Ok(())
}

#[tokio::test]
async fn test_receive_errors_do_not_stop_the_loop() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Fail, Step::Fail, Step::Fail, Step::Batch(vec!["a"])],
    )
    .stop_when_drained(shutdown.clone());
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(quick_config())
        .with_shutdown(shutdown);

    consumer.run().await?;

    assert_eq!(journal.receives().len(), 5);
    assert_eq!(journal.deleted(), vec!["a"]);
    Ok(())
}

#[tokio::test]
async fn test_consecutive_error_limit_when_configured() {
    let journal = Journal::default();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Fail, Step::Batch(vec![]), Step::Fail, Step::Fail],
    );
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(quick_config().max_consecutive_errors(2));

    let result = consumer.run().await;

    assert!(matches!(result, Err(QuayError::TooManyErrors(2))));
    assert_eq!(journal.receives().len(), 4);
}

#[tokio::test]
async fn test_failed_delete_does_not_abort_the_batch() -> Result<()> {
    let journal = Journal::default();
    let queue = ScriptedQueue::new(journal.clone(), vec![Step::Batch(vec!["a", "b"])])
        .fail_delete_of("a");
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()));

    let summary = consumer.run_next_batch().await?;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.delete_failed, 1);
    assert_eq!(journal.attempted(), vec!["a", "b"]);
    assert_eq!(journal.deleted(), vec!["b"]);
    Ok(())
}

#[tokio::test]
async fn test_window_counts_delivered_not_succeeded() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(journal.clone(), vec![Step::Batch(vec!["a", "b", "c"])])
        .stop_when_drained(shutdown.clone());
    let workload = ScriptedWorkload::new(journal.clone()).fail_on("b");
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let consumer = Consumer::with_client(queue, workload)
        .with_config(reporting_config())
        .with_shutdown(shutdown)
        .with_report_sink(sender);

    consumer.run().await?;

    let counts = drain_reports(&mut receiver);
    assert_eq!(counts.first(), Some(&3));
    assert_eq!(journal.deleted(), vec!["a", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_window_starts_from_zero_after_each_report() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Batch(vec!["a", "b"]), Step::Batch(vec!["c"])],
    )
    .stop_when_drained(shutdown.clone());
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(reporting_config())
        .with_shutdown(shutdown)
        .with_report_sink(sender);

    consumer.run().await?;

    assert_eq!(drain_reports(&mut receiver), vec![2, 1, 0]);
    Ok(())
}

#[tokio::test]
async fn test_window_holds_counts_until_the_period_passes() -> Result<()> {
    let journal = Journal::default();
    let shutdown = Shutdown::new();
    let queue = ScriptedQueue::new(
        journal.clone(),
        vec![Step::Batch(vec!["a", "b"]), Step::Batch(vec!["c"])],
    )
    .stop_when_drained(shutdown.clone());
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let consumer = Consumer::with_client(queue, ScriptedWorkload::new(journal.clone()))
        .with_config(quick_config().report_interval(Duration::from_secs(3600)))
        .with_shutdown(shutdown)
        .with_report_sink(sender);

    consumer.run().await?;

    assert!(drain_reports(&mut receiver).is_empty());
    Ok(())
}
