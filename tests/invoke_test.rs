mod helpers;

use std::cell::Cell;
use std::rc::Rc;

use agentaction::action::{handler_fn, Action, InvokeOutcome};
use agentaction::ActionError;
use helpers::{args, test_action, test_registry};
use serde_json::json;

#[test]
fn add_and_invoke_action() {
    let mut reg = test_registry();
    reg.add("test", test_action("test", "A test action")).unwrap();
    assert!(reg.get("test").is_some());

    let outcome = reg.invoke("test", &args(json!({"input": "test"}))).unwrap();
    assert!(outcome.is_success());
    let result = outcome.result().unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["output"], "test");

    let entry = &reg.history(1).unwrap()[0];
    assert_eq!(entry.action, "test");
    assert_eq!(entry.success, "True");
    assert_eq!(entry.arguments["input"], "test");
}

#[test]
fn unknown_action_is_not_found_and_recorded_as_failure() {
    let reg = test_registry();

    let outcome = reg.invoke("missing", &args(json!({"input": "x"}))).unwrap();
    assert_eq!(
        outcome,
        InvokeOutcome::NotFound {
            response: "Action not found".into()
        }
    );

    let entry = &reg.history(1).unwrap()[0];
    assert_eq!(entry.action, "missing");
    assert_eq!(entry.success, "False");
}

#[test]
fn handler_is_not_called_for_other_names() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut reg = test_registry();
    reg.register(Action::new(
        "count",
        "Count calls",
        handler_fn(move |_| {
            counter.set(counter.get() + 1);
            Ok(json!(counter.get()))
        }),
    ))
    .unwrap();

    reg.invoke("not_count", &args(json!({}))).unwrap();
    assert_eq!(calls.get(), 0);

    let outcome = reg.invoke("count", &args(json!({}))).unwrap();
    assert_eq!(outcome.result(), Some(&json!(1)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn handler_failure_propagates_after_success_was_recorded() {
    let mut reg = test_registry();
    reg.register(Action::new(
        "explode",
        "Always fails",
        handler_fn(|_| anyhow::bail!("boom")),
    ))
    .unwrap();

    let err = reg.invoke("explode", &args(json!({}))).unwrap_err();
    match err {
        ActionError::Handler { name, source } => {
            assert_eq!(name, "explode");
            assert!(source.to_string().contains("boom"));
        }
        other => panic!("expected handler error, got {other:?}"),
    }

    // The attempt was logged before the handler ran
    let entry = &reg.history(1).unwrap()[0];
    assert_eq!(entry.action, "explode");
    assert_eq!(entry.success, "True");
}
