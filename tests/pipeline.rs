//! End-to-end pipeline behavior: the fixed application handler, access
//! logging, and concurrent invocations.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::{Method, StatusCode};
use portico::middleware::AccessLog;
use portico::{Pipeline, Request, Response, app};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

// ── Log capture ───────────────────────────────────────────────────────────────

/// Collects every emitted event as one `field=value` line.
#[derive(Clone, Default)]
struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut line = String::new();
        event.record(&mut LineVisitor(&mut line));
        self.lines.lock().unwrap().push(line);
    }
}

struct LineVisitor<'a>(&'a mut String);

impl Visit for LineVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

/// Runs `f` with a capturing subscriber installed, returning the lines it saw.
///
/// Uses a current-thread runtime so every task polls on the thread that holds
/// the scoped subscriber.
fn capture<F: Future>(f: F) -> (F::Output, Vec<String>) {
    let recorder = Recorder::default();
    let lines = Arc::clone(&recorder.lines);
    let subscriber = tracing_subscriber::registry().with(recorder);

    let out = tracing::subscriber::with_default(subscriber, || block_on(f));
    let lines = lines.lock().unwrap().clone();
    (out, lines)
}

fn block_on<F: Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

// ── The fixed application handler ─────────────────────────────────────────────

#[test]
fn handler_returns_fixed_banner_for_any_request() {
    let pipeline = Pipeline::new(app::handle);

    let requests = vec![
        Request::builder().build(),
        Request::builder()
            .method(Method::POST)
            .path("/anything")
            .body("ignored payload")
            .build(),
        Request::builder()
            .method(Method::DELETE)
            .path("/deep/nested/path")
            .query("verbose", "1")
            .header("x-ignored", "yes")
            .build(),
    ];

    block_on(async {
        for req in requests {
            let res = pipeline.handle(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(res.headers().get("content-type").unwrap(), "application/json");
            assert_eq!(res.body(), b"i'm an app");
        }
    });
}

// ── Access logging ────────────────────────────────────────────────────────────

#[test]
fn log_line_contains_source_address() {
    let pipeline = Pipeline::builder().wrap(AccessLog::new()).handler(app::handle);

    let (_, lines) = capture(async move {
        let req = Request::builder().remote_addr("203.0.113.5").build();
        pipeline.handle(req).await.unwrap()
    });

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("203.0.113.5"), "line was: {}", lines[0]);
}

#[test]
fn access_log_delegates_once_before_logging() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let terminal = move |_req: Request| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tracing::info!("terminal handler ran");
            Response::json("i'm an app")
        }
    };

    let pipeline = Pipeline::builder().wrap(AccessLog::new()).handler(terminal);

    let (_, lines) = capture(async move {
        let req = Request::builder().remote_addr("203.0.113.5").build();
        pipeline.handle(req).await.unwrap()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let terminal_at = lines.iter().position(|l| l.contains("terminal handler ran"));
    let logged_at = lines.iter().position(|l| l.contains("203.0.113.5"));
    assert!(
        terminal_at.unwrap() < logged_at.unwrap(),
        "the access line must come after delegation: {lines:?}",
    );
}

#[test]
fn missing_identity_logs_sentinel_and_still_succeeds() {
    let pipeline = Pipeline::builder().wrap(AccessLog::new()).handler(app::handle);

    let (res, lines) = capture(async move {
        pipeline.handle(Request::builder().build()).await.unwrap()
    });

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body(), b"i'm an app");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(r#"remote_addr="-""#), "line was: {}", lines[0]);
}

#[test]
fn logging_is_observationally_transparent() {
    let bare = Pipeline::new(app::handle);
    let wrapped = Pipeline::builder().wrap(AccessLog::new()).handler(app::handle);

    let (direct, logged) = block_on(async {
        let direct = bare.handle(Request::builder().build()).await.unwrap();
        let logged = wrapped
            .handle(Request::builder().remote_addr("203.0.113.5").build())
            .await
            .unwrap();
        (direct, logged)
    });

    assert_eq!(direct.status(), logged.status());
    assert_eq!(direct.headers(), logged.headers());
    assert_eq!(direct.body(), logged.body());
}

#[test]
fn failures_are_logged_and_propagated() {
    let failing = |_req: Request| async {
        Err::<Response, _>(portico::Error::handler("deliberate"))
    };
    let pipeline = Pipeline::builder().wrap(AccessLog::new()).handler(failing);

    let (outcome, lines) = capture(async move {
        let req = Request::builder().remote_addr("203.0.113.9").build();
        pipeline.handle(req).await
    });

    // Observed on the way out, then propagated untouched.
    assert!(outcome.is_err());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("203.0.113.9"), "line was: {}", lines[0]);
    assert!(lines[0].contains("request failed"), "line was: {}", lines[0]);
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[test]
fn concurrent_invocations_stay_independent() {
    let pipeline = Pipeline::builder().wrap(AccessLog::new()).handler(app::handle);

    let (_, lines) = capture(async move {
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..100 {
            let pipeline = pipeline.clone();
            tasks.spawn(async move {
                let addr = format!("203.0.113.{i}");
                let req = Request::builder().remote_addr(addr.clone()).build();
                let res = pipeline.handle(req).await.unwrap();
                assert_eq!(res.status(), StatusCode::OK);
                assert_eq!(res.body(), b"i'm an app");
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }
    });

    assert_eq!(lines.len(), 100);
    for i in 0..100 {
        let needle = format!(r#"remote_addr="203.0.113.{i}""#);
        assert!(
            lines.iter().any(|l| l.contains(&needle)),
            "no line for caller 203.0.113.{i}",
        );
    }
}
