use nsbus::decorators::ObserveOutcome;
use nsbus::testing::{AbortDecorator, RejectHandler, UnreachableHandler, order_log};
use nsbus::{Bus, DispatchError, Signal, decorator_fn, handler_fn};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Payload {
    decorated: bool,
}

#[tokio::test]
async fn decorator_mutations_are_visible_to_handlers() {
    let mut bus: Bus<Payload, bool> = Bus::new();
    bus.add_decorator(
        "ns",
        decorator_fn(|_ns, payload: &mut Payload, _completion| {
            payload.decorated = true;
            Ok(())
        }),
    );
    bus.add_handler(
        "ns",
        handler_fn(|_ns, payload: &mut Payload| Signal::Resolve(payload.decorated)),
    );

    assert!(bus.process("ns", Payload::default()).await.unwrap());
}

#[tokio::test]
async fn decorator_abort_fails_the_call_before_any_handler() {
    let mut bus: Bus<(), ()> = Bus::new();
    bus.add_decorator("ns", AbortDecorator::new("nope"));
    bus.add_handler("ns", UnreachableHandler);
    bus.add_root_handler(UnreachableHandler);

    let error = bus.process("ns.deep", ()).await.unwrap_err();
    assert!(matches!(error, DispatchError::Decorator(_)));
    assert_eq!(error.to_string(), "nope");
}

#[tokio::test]
async fn decorators_run_root_first_then_ancestors() {
    let log = order_log();
    let push = |label: &'static str, log: nsbus::testing::OrderLog| {
        decorator_fn(move |_ns, _m: &mut (), _c| {
            log.lock().unwrap().push(label.to_string());
            Ok(())
        })
    };

    let mut bus: Bus<(), ()> = Bus::new();
    bus.add_decorator("a.b", push("a.b", log.clone()));
    bus.add_root_decorator(push("root", log.clone()));
    bus.add_decorator("a", push("a", log.clone()));
    bus.add_handler("a", handler_fn(|_ns, _m: &mut ()| Signal::Resolve(())));

    bus.process("a.b.c", ()).await.unwrap();
    assert_eq!(*log.lock().unwrap(), ["root", "a", "a.b"]);
}

#[tokio::test]
async fn an_aborting_decorator_stops_later_decorators() {
    let log = order_log();
    let mut bus: Bus<(), ()> = Bus::new();
    bus.add_decorator("a", AbortDecorator::new("stop"));
    bus.add_decorator("a.b", {
        let log = log.clone();
        decorator_fn(move |_ns, _m: &mut (), _c| {
            log.lock().unwrap().push("a.b".to_string());
            Ok(())
        })
    });

    let _ = bus.process("a.b", ()).await.unwrap_err();
    assert!(log.lock().unwrap().is_empty());
}

type Observed = Arc<Mutex<Vec<(String, String)>>>;

fn observer(observed: Observed) -> ObserveOutcome<impl Fn(&str, &nsbus::Outcome<String>) + Clone> {
    ObserveOutcome::new(move |namespace: &str, outcome: &nsbus::Outcome<String>| {
        let summary = match outcome {
            Ok(value) => format!("ok:{value}"),
            Err(error) => format!("err:{error}"),
        };
        observed.lock().unwrap().push((namespace.to_string(), summary));
    })
}

#[tokio::test]
async fn completion_override_sees_the_resolved_outcome() {
    let observed: Observed = Arc::new(Mutex::new(Vec::new()));
    let mut bus: Bus<(), String> = Bus::new();
    bus.add_root_decorator(observer(observed.clone()));
    bus.add_handler(
        "ns",
        handler_fn(|_ns, _m: &mut ()| Signal::Resolve("done".to_string())),
    );

    bus.process("ns", ()).await.unwrap();
    assert_eq!(
        *observed.lock().unwrap(),
        [("ns".to_string(), "ok:done".to_string())]
    );
}

#[tokio::test]
async fn completion_override_sees_rejections_and_exhaustion() {
    let observed: Observed = Arc::new(Mutex::new(Vec::new()));
    let mut bus: Bus<(), String> = Bus::new();
    bus.add_root_decorator(observer(observed.clone()));
    bus.add_handler("boom", RejectHandler::new("oops"));

    let _ = bus.process("boom", ()).await.unwrap_err();
    let _ = bus.process("silent", ()).await.unwrap_err();

    assert_eq!(
        *observed.lock().unwrap(),
        [
            ("boom".to_string(), "err:oops".to_string()),
            ("silent".to_string(), "err:no handlers".to_string()),
        ]
    );
}

#[tokio::test]
async fn the_last_installed_override_wins() {
    let log = order_log();
    let install = |label: &'static str, log: nsbus::testing::OrderLog, expect_armed: bool| {
        decorator_fn(move |_ns, _m: &mut (), completion: &mut nsbus::Completion<(), ()>| {
            assert_eq!(completion.is_armed(), expect_armed);
            let log = log.clone();
            completion.on_settled(move |_settled| {
                log.lock().unwrap().push(label.to_string());
            });
            Ok(())
        })
    };

    let mut bus: Bus<(), ()> = Bus::new();
    bus.add_root_decorator(install("first", log.clone(), false));
    bus.add_decorator("ns", install("second", log.clone(), true));
    bus.add_handler("ns", handler_fn(|_ns, _m: &mut ()| Signal::Resolve(())));

    bus.process("ns", ()).await.unwrap();
    assert_eq!(*log.lock().unwrap(), ["second"]);
}
