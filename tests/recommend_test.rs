mod helpers;

use agentaction::action::Action;
use helpers::{args, candidate_ids, echo, test_action, test_registry};
use serde_json::json;

fn chained_registry() -> agentaction::action::ActionRegistry<agentaction::store::SqliteStore> {
    let mut reg = test_registry();
    reg.register(
        Action::new("fetch_page", "Fetch a web page", echo)
            .suggest_after(["summarize"])
            .never_after(["delete_cache"]),
    )
    .unwrap();
    reg.register(Action::new("summarize", "Summarize text", echo))
        .unwrap();
    reg.register(Action::new("delete_cache", "Delete the page cache", echo))
        .unwrap();
    reg
}

#[test]
fn without_history_the_search_result_is_returned() {
    let reg = chained_registry();
    let candidates = reg.available("page", 5, true).unwrap();
    let ids = candidate_ids(&candidates);

    assert!(ids.contains(&"fetch_page"));
    assert!(ids.contains(&"delete_cache"));
    assert!(!ids.contains(&"summarize"));
    assert!(candidates.iter().all(|c| !c.recommended));
}

#[test]
fn chaining_adds_suggestions_and_drops_forbidden() {
    let reg = chained_registry();
    reg.invoke("fetch_page", &args(json!({"input": "https://example.com"})))
        .unwrap();

    let candidates = reg.available("page", 5, true).unwrap();
    let ids = candidate_ids(&candidates);

    assert!(!ids.contains(&"delete_cache"), "never_after must be removed");
    assert!(ids.contains(&"fetch_page"));

    let summarize = candidates
        .iter()
        .find(|c| c.id == "summarize")
        .expect("suggested action must be added even without a search match");
    assert!(summarize.recommended);
    assert_eq!(summarize.document, "summarize - Summarize text");
    assert_eq!(summarize.name(), "summarize");
    assert_eq!(summarize.function().unwrap().description, "Summarize text");
}

#[test]
fn chain_disabled_returns_seed_unchanged() {
    let reg = chained_registry();
    reg.invoke("fetch_page", &args(json!({}))).unwrap();

    let seeded = reg.search("page", 5).unwrap();
    let candidates = reg.available("page", 5, false).unwrap();

    let seeded_ids: Vec<&str> = seeded.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(candidate_ids(&candidates), seeded_ids);
    assert!(candidates.iter().all(|c| !c.recommended));
}

#[test]
fn suggestion_already_present_is_not_duplicated() {
    let mut reg = test_registry();
    reg.register(
        Action::new("write_note", "Write a note", echo).suggest_after(["read_note", "read_note"]),
    )
    .unwrap();
    reg.register(Action::new("read_note", "Read a note", echo))
        .unwrap();
    reg.invoke("write_note", &args(json!({}))).unwrap();

    let candidates = reg.available("note", 5, true).unwrap();
    let reads: Vec<_> = candidates.iter().filter(|c| c.id == "read_note").collect();
    assert_eq!(reads.len(), 1);
    // It came from the search, so it is not flagged
    assert!(!reads[0].recommended);
}

#[test]
fn duplicate_suggestions_are_added_once() {
    let mut reg = test_registry();
    reg.register(
        Action::new("plan", "Plan the work", echo).suggest_after(["execute", "execute"]),
    )
    .unwrap();
    reg.register(Action::new("execute", "Run the plan", echo))
        .unwrap();
    reg.invoke("plan", &args(json!({}))).unwrap();

    let candidates = reg.available("nothing matches this", 5, true).unwrap();
    assert_eq!(candidate_ids(&candidates), vec!["execute"]);
    assert!(candidates[0].recommended);
}

#[test]
fn unregistered_suggestions_are_skipped() {
    let mut reg = test_registry();
    reg.register(
        Action::new("start", "Start a task", echo)
            .suggest_after(["ghost", "finish"])
            .never_after(["phantom"]),
    )
    .unwrap();
    reg.register(Action::new("finish", "Finish a task", echo))
        .unwrap();
    reg.invoke("start", &args(json!({}))).unwrap();

    let candidates = reg.available("zzz", 5, true).unwrap();
    assert_eq!(candidate_ids(&candidates), vec!["finish"]);
}

#[test]
fn removed_suggestion_is_skipped() {
    let mut reg = chained_registry();
    reg.invoke("fetch_page", &args(json!({}))).unwrap();
    reg.remove("summarize").unwrap();

    let candidates = reg.available("page", 5, true).unwrap();
    assert!(!candidate_ids(&candidates).contains(&"summarize"));
}

#[test]
fn unknown_last_action_leaves_seed_alone() {
    let reg = chained_registry();
    reg.invoke("not_registered", &args(json!({}))).unwrap();

    let candidates = reg.available("page", 5, true).unwrap();
    let ids = candidate_ids(&candidates);
    assert!(ids.contains(&"delete_cache"));
    assert!(!ids.contains(&"summarize"));
}

#[test]
fn available_with_history_returns_matches() {
    let mut reg = test_registry();
    reg.add("test", test_action("test", "A test action")).unwrap();
    reg.record_history("test", &args(json!({"input": "test"})), true)
        .unwrap();

    let candidates = reg.available("test", 5, true).unwrap();
    assert!(!candidates.is_empty());
}

#[test]
fn stale_mirror_named_in_never_after_is_kept() {
    use agentaction::action::{ActionRegistry, ACTIONS_CATEGORY};
    use agentaction::store::{MemoryStore, Metadata, SqliteStore};

    // Mirror left behind by an earlier process that never re-registers the action
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .create(
            ACTIONS_CATEGORY,
            "old_cache - Clear the old page cache",
            &Metadata::new(),
            Some("old_cache"),
        )
        .unwrap();

    let mut reg = ActionRegistry::new(store);
    reg.register(Action::new("fetch_page", "Fetch a web page", echo).never_after(["old_cache"]))
        .unwrap();
    reg.invoke("fetch_page", &args(json!({}))).unwrap();

    let candidates = reg.available("cache", 5, true).unwrap();
    assert_eq!(candidate_ids(&candidates), vec!["old_cache"]);
}
