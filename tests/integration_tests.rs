// Integration tests - testing how modules work together

mod common;

use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::tracing::init_tracing_from_env;
use tweaks::view::tweaks::{
    load_catalog, DetailEditorState, DetailRequest, DetailValue, SearchScope, SelectionError,
    SelectionOutcome, TweakBrowserState, TweakPresenter, TweakValue,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json")
}

/// Host stand-in that records what the browser asked it to do
#[derive(Default)]
struct RecordingPresenter {
    refreshed: Vec<String>,
    presented: Vec<DetailRequest>,
}

impl TweakPresenter for RecordingPresenter {
    fn refresh_row(&mut self, identifier: &str) {
        self.refreshed.push(identifier.to_string());
    }

    fn present_detail(&mut self, request: DetailRequest) {
        self.presented.push(request);
    }
}

fn browser(scope: SearchScope) -> TweakBrowserState {
    init_tracing_from_env();
    let catalog = load_catalog(fixture_path()).unwrap();
    TweakBrowserState::new(catalog, scope)
}

/// Typing a query narrows the rows, then tapping a row toggles the tweak behind it
#[test]
fn test_search_then_toggle() {
    let mut state = browser(SearchScope::Tweak);
    let mut presenter = RecordingPresenter::default();

    state.set_search_query("TIME");
    let filtered = state.filtered();
    let rows: Vec<_> = filtered
        .iter()
        .map(|c| (c.name(), c.tweak_names()))
        .collect();
    assert_eq!(
        rows,
        vec![("Network", vec!["Timeout"]), ("Experiments", vec!["Timeout"])]
    );

    let outcome = state.select_row(1, 0, &mut presenter).unwrap();
    assert_eq!(outcome, SelectionOutcome::Toggled(true));
    assert_eq!(presenter.refreshed, vec!["lab.timeout".to_string()]);
    assert!(presenter.presented.is_empty());

    // The other Timeout (a number) was not touched
    assert_eq!(
        state.tweak_by_identifier("net.timeout").unwrap().value.display_value(),
        "30"
    );
}

/// Collection scope keeps whole collections
#[test]
fn test_collection_scope() {
    let mut state = browser(SearchScope::Collection);

    state.set_search_query("cach");
    let filtered = state.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].tweak_names(), vec!["Clear Cache", "Eviction Policy"]);

    // Tweak names are not searched in this scope
    state.set_search_query("timeout");
    assert!(state.results().is_empty());
}

/// Picking a choice tweak opens a detail screen whose result is written back
#[test]
fn test_choice_detail_flow() {
    let mut state = browser(SearchScope::Tweak);
    let mut presenter = RecordingPresenter::default();

    state.set_search_query("policy");
    state.select_row(0, 0, &mut presenter).unwrap();
    assert!(presenter.refreshed.is_empty());
    let request = presenter.presented.pop().unwrap();
    assert_eq!(request.current, DetailValue::Text("lru".into()));
    assert_eq!(
        request.choices,
        Some(vec!["lru".to_string(), "lfu".to_string(), "fifo".to_string()])
    );

    let mut editor = DetailEditorState::from_request(request);
    editor.select_next();
    editor.select_next();
    state.apply_detail(&editor).unwrap();

    let policy = state.tweak_by_identifier("cache.policy").unwrap();
    assert_eq!(policy.value.display_value(), "fifo");
    assert_eq!(state.modified_tweaks().len(), 1);
}

/// Declared actions can be bound after loading and run on selection
#[test]
fn test_bound_action_runs() {
    let mut catalog = load_catalog(fixture_path()).unwrap();
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    catalog
        .bind_action("cache.clear", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let mut state = TweakBrowserState::new(catalog, SearchScope::Tweak);
    let mut presenter = RecordingPresenter::default();
    state.set_search_query("clear");
    let outcome = state.select_row(0, 0, &mut presenter).unwrap();

    assert_eq!(outcome, SelectionOutcome::ActionInvoked);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(presenter.refreshed, vec!["cache.clear".to_string()]);
}

/// A tweak of an unknown kind is reported and left alone
#[test]
fn test_unrecognized_kind_selection() {
    let mut state = browser(SearchScope::Tweak);
    let mut presenter = RecordingPresenter::default();

    state.set_search_query("tint");
    let err = state.select_row(0, 0, &mut presenter).unwrap_err();

    assert!(matches!(err, SelectionError::UnrecognizedKind { ref kind, .. } if kind == "color"));
    assert!(presenter.refreshed.is_empty());
    assert!(presenter.presented.is_empty());
    assert_eq!(
        state.tweak_by_identifier("lab.tint").unwrap().value,
        TweakValue::Unrecognized {
            kind: "color".into()
        }
    );
}

/// The command-line front end prints the filtered catalog
#[test]
fn test_cli_filters_and_selects() {
    let output = Command::new(env!("CARGO_BIN_EXE_tweaks"))
        .arg("--catalog")
        .arg(fixture_path())
        .arg("--select")
        .arg("net.retry")
        .arg("retry")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("refresh net.retry"));
    assert!(stdout.contains("Network"));
    assert!(stdout.contains("Retry* = false"));
    assert!(!stdout.contains("Experiments"));
}
