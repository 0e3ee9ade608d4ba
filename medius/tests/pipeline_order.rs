//! Ordering and composition guarantees of the behavior chain.

use medius::testing::{
    ConstHandler, CountingFactory, CountingHandler, PassthroughBehavior, RecordingBehavior,
    ReplaceResponseBehavior, ShortCircuitBehavior,
};
use medius::{
    BoxError, BoxFuture, Context, DispatchError, DispatchResult, Mediator, Next, Request, Response,
    SharedHandler,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;
use common::{ContextProbeHandler, Probe};

#[tokio::test]
async fn test_behaviors_nest_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let handler = CountingHandler::new();

    let mediator = Mediator::builder()
        .with_behavior(RecordingBehavior::new("outer", log.clone()))
        .with_behavior(RecordingBehavior::new("middle", log.clone()))
        .with_behavior(RecordingBehavior::new("inner", log.clone()))
        .with_handler(&Probe, handler.clone())
        .build()
        .unwrap();

    mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        [
            "outer:before",
            "middle:before",
            "inner:before",
            "inner:after",
            "middle:after",
            "outer:after",
        ],
        "first registered behavior is outermost, the handler runs in the middle"
    );
    assert_eq!(handler.count(), 1);
}

#[tokio::test]
async fn test_unregistered_key_reports_handler_not_found() {
    let mediator = Mediator::builder().build().unwrap();

    let err = mediator
        .send(&Context::background(), &Probe)
        .await
        .expect_err("nothing is registered");

    assert!(matches!(err, DispatchError::HandlerNotFound(_)));
    assert_eq!(err.missing_key(), Some("Probe"));
}

#[tokio::test]
async fn test_missing_handler_error_flows_back_through_behaviors() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mediator = Mediator::builder()
        .with_behavior(RecordingBehavior::new("audit", log.clone()))
        .build()
        .unwrap();

    let err = mediator
        .send(&Context::background(), &Probe)
        .await
        .expect_err("nothing is registered");

    assert_eq!(err.missing_key(), Some("Probe"));
    assert_eq!(
        *log.lock().unwrap(),
        ["audit:before", "audit:after"],
        "the lookup failure travels back through the chain"
    );
}

#[tokio::test]
async fn test_last_registration_wins_for_a_key() {
    let mediator = Mediator::builder()
        .with_handler(&Probe, ConstHandler::new("first"))
        .with_handler(&Probe, ConstHandler::new("second"))
        .build()
        .unwrap();

    let response = mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(response.downcast_ref::<&str>(), Some(&"second"));
    assert_eq!(mediator.registry().len(), 1);
}

#[tokio::test]
async fn test_short_circuit_skips_downstream() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let handler = CountingHandler::new();

    let mediator = Mediator::builder()
        .with_behavior(RecordingBehavior::new("outer", log.clone()))
        .with_behavior(ShortCircuitBehavior::new("stopped"))
        .with_behavior(RecordingBehavior::new("inner", log.clone()))
        .with_handler(&Probe, handler.clone())
        .build()
        .unwrap();

    let response = mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(response.downcast_ref::<&str>(), Some(&"stopped"));
    assert_eq!(handler.count(), 0, "handler must not run past a short-circuit");
    assert_eq!(
        *log.lock().unwrap(),
        ["outer:before", "outer:after"],
        "behaviors behind the short-circuit never run"
    );
}

#[tokio::test]
async fn test_replacing_a_response_still_runs_the_handler() {
    let handler = CountingHandler::new();

    let mediator = Mediator::builder()
        .with_behavior(ReplaceResponseBehavior::new(7u64))
        .with_handler(&Probe, handler.clone())
        .build()
        .unwrap();

    let response = mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(response.downcast_ref::<u64>(), Some(&7));
    assert_eq!(handler.count(), 1, "replacement happens after the handler ran");
}

#[tokio::test]
async fn test_factory_failure_surfaces_through_the_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let factory = || -> Result<SharedHandler, BoxError> { Err("boom".into()) };

    let mediator = Mediator::builder()
        .with_behavior(RecordingBehavior::new("audit", log.clone()))
        .with_handler_factory(&Probe, factory)
        .build()
        .unwrap();

    let err = mediator
        .send(&Context::background(), &Probe)
        .await
        .expect_err("factory failure should fail the dispatch");

    assert_eq!(err.to_string(), "boom");
    assert_eq!(*log.lock().unwrap(), ["audit:before", "audit:after"]);
}

#[tokio::test]
async fn test_empty_chain_equals_passthrough_chain() {
    let bare_handler = CountingHandler::new();
    let wrapped_handler = CountingHandler::new();

    let bare = Mediator::builder()
        .with_handler(&Probe, bare_handler.clone())
        .build()
        .unwrap();
    let wrapped = Mediator::builder()
        .with_behavior(PassthroughBehavior::new())
        .with_handler(&Probe, wrapped_handler.clone())
        .build()
        .unwrap();

    let bare_response = bare.send(&Context::background(), &Probe).await.unwrap();
    let wrapped_response = wrapped.send(&Context::background(), &Probe).await.unwrap();

    assert!(bare_response.is_empty());
    assert!(wrapped_response.is_empty());
    assert_eq!(bare_handler.count(), wrapped_handler.count());
}

#[tokio::test]
async fn test_factory_runs_once_per_dispatch() {
    let factory = CountingFactory::new(CountingHandler::new());

    let mediator = Mediator::builder()
        .with_handler_factory(&Probe, factory.clone())
        .build()
        .unwrap();

    for _ in 0..3 {
        mediator.send(&Context::background(), &Probe).await.unwrap();
    }

    assert_eq!(factory.created(), 3);
}

#[tokio::test]
async fn test_derived_deadline_is_visible_downstream() {
    let saw_deadline = Arc::new(Mutex::new(None));
    let saw_cancelled = Arc::new(Mutex::new(None));

    let mediator = Mediator::builder()
        .with_behavior_fn(tighten_deadline)
        .with_handler(
            &Probe,
            ContextProbeHandler {
                saw_deadline: saw_deadline.clone(),
                saw_cancelled: saw_cancelled.clone(),
            },
        )
        .build()
        .unwrap();

    mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(
        *saw_deadline.lock().unwrap(),
        Some(true),
        "handler should run under the deadline the behavior derived"
    );
}

#[tokio::test]
async fn test_cancellation_is_observable_in_the_handler() {
    let saw_deadline = Arc::new(Mutex::new(None));
    let saw_cancelled = Arc::new(Mutex::new(None));

    let mediator = Mediator::builder()
        .with_handler(
            &Probe,
            ContextProbeHandler {
                saw_deadline: saw_deadline.clone(),
                saw_cancelled: saw_cancelled.clone(),
            },
        )
        .build()
        .unwrap();

    let (ctx, handle) = Context::background().with_cancel();
    handle.cancel();

    // Cancellation is cooperative: the dispatch still runs, the flag is
    // what the handler decides to honor.
    mediator.send(&ctx, &Probe).await.unwrap();

    assert_eq!(*saw_cancelled.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_behavior_can_substitute_for_a_missing_handler() {
    let mediator = Mediator::builder()
        .with_behavior_fn(fallback_on_missing)
        .build()
        .unwrap();

    let response = mediator.send(&Context::background(), &Probe).await.unwrap();

    assert_eq!(response.downcast_ref::<&str>(), Some(&"fallback"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_share_one_mediator() {
    let handler = CountingHandler::new();
    let mediator = Arc::new(
        Mediator::builder()
            .with_handler(&Probe, handler.clone())
            .build()
            .unwrap(),
    );

    let mut joins = Vec::new();
    for _ in 0..8 {
        let mediator = mediator.clone();
        joins.push(tokio::spawn(async move {
            mediator.send(&Context::background(), &Probe).await
        }));
    }
    for join in joins {
        join.await.unwrap().unwrap();
    }

    assert_eq!(handler.count(), 8);
}

fn tighten_deadline<'a>(
    ctx: &'a Context,
    _request: &'a dyn Request,
    next: Next<'a>,
) -> BoxFuture<'a, DispatchResult> {
    Box::pin(async move {
        let bounded = ctx.with_timeout(Duration::from_secs(30));
        next.run(&bounded).await
    })
}

fn fallback_on_missing<'a>(
    ctx: &'a Context,
    _request: &'a dyn Request,
    next: Next<'a>,
) -> BoxFuture<'a, DispatchResult> {
    Box::pin(async move {
        match next.run(ctx).await {
            Err(err) if err.missing_key().is_some() => Ok(Response::new("fallback")),
            other => other,
        }
    })
}
