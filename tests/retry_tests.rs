//! Tests for the retry/backoff engine.

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tycho::error::TychoError;
use tycho::util::retry::RetryPolicy;
use tycho::util::timeout::with_timeout;

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        multiplier: 1.0,
    }
}

/// A port nothing is listening on, so connecting is refused immediately.
fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Produce a genuine transport-level error.
async fn transport_error(port: u16) -> TychoError {
    let err = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{port}/"))
        .send()
        .await
        .unwrap_err();
    TychoError::Network(err)
}

#[tokio::test]
async fn transport_errors_are_retried_until_success() {
    let port = refused_port();
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_for_op = attempts.clone();

    let result = fast_policy(4)
        .execute(|| {
            let attempts = attempts_for_op.clone();
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(transport_error(port).await)
                } else {
                    Ok::<_, TychoError>("ok")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "ok");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn classified_http_errors_are_not_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_for_op = attempts.clone();

    let result = fast_policy(5)
        .execute(|| {
            let attempts = attempts_for_op.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TychoError::api(500, "internal error"))
            }
        })
        .await;

    match result {
        Err(TychoError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exhausted_attempts_yield_unreachable_with_every_attempt_error() {
    let port = refused_port();
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_for_op = attempts.clone();

    let result = fast_policy(3)
        .execute(|| {
            let attempts = attempts_for_op.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(transport_error(port).await)
            }
        })
        .await;

    match result {
        Err(TychoError::Unreachable {
            attempts: reported,
            attempt_errors,
        }) => {
            assert_eq!(reported, 3);
            assert_eq!(attempt_errors.len(), 3);
        }
        other => panic!("expected unreachable, got {other:?}"),
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn invalid_arguments_are_never_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_for_op = attempts.clone();

    let result = fast_policy(3)
        .execute(|| {
            let attempts = attempts_for_op.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TychoError::InvalidArgument("bad".to_string()))
            }
        })
        .await;

    assert!(matches!(result, Err(TychoError::InvalidArgument(_))));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn deadline_aborts_the_backoff_sleep() {
    let result = with_timeout(Duration::from_millis(50), async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok::<_, TychoError>(())
    })
    .await;

    match result {
        Err(TychoError::Timeout(ms)) => assert_eq!(ms, 50),
        other => panic!("expected timeout, got {other:?}"),
    }
}
