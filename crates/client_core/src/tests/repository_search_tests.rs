use super::*;
use crate::{
    classifier::NETWORK_ERROR_MESSAGE,
    error::TransportError,
    test_support::{fake_results, ScriptedCall},
};

fn search_page(
    call: ScriptedCall<SearchQuery, SearchResult>,
) -> RepositorySearch<ScriptedCall<SearchQuery, SearchResult>> {
    RepositorySearch::new(call, &StatusCodes::default())
}

fn body(results: &SearchResult) -> String {
    serde_json::to_string(results).expect("serialize fixture")
}

#[test]
fn mounted_page_shows_initial_state() {
    let page = search_page(ScriptedCall::searches());
    assert_eq!(page.view(), SearchView::Initial);
    assert!(page.search_enabled());
}

#[test]
fn search_expects_ok() {
    let page = search_page(ScriptedCall::searches());
    assert_eq!(page.controller().name(), "search_repositories");
    assert_eq!(page.controller().success_status(), 200);
}

#[tokio::test]
async fn single_result_renders_first_page() {
    let results = fake_results(1);
    let mut page = search_page(ScriptedCall::searches().reply(200, &body(&results)));

    page.search().await.expect("dispatched");

    let SearchView::Results(view) = page.view() else {
        panic!("expected results");
    };
    assert_eq!(view.range_label, "1–1 of 1");
    assert_eq!(view.visible_items, results.items.as_slice());
    assert!(!view.has_previous_page);
    assert_eq!(page.state(), OperationState::Succeeded);
}

#[tokio::test]
async fn search_without_results_shows_empty_state() {
    let mut page = search_page(
        ScriptedCall::searches().reply(200, r#"{"total_count":0,"items":[]}"#),
    );

    page.search().await.expect("dispatched");

    assert_eq!(page.view(), SearchView::Empty);
}

#[tokio::test]
async fn filter_is_sent_as_query() {
    let call = ScriptedCall::searches().reply(200, r#"{"total_count":0,"items":[]}"#);
    let submissions = call.submissions();
    let mut page = search_page(call);
    page.set_filter("react");

    page.search().await.expect("dispatched");

    assert_eq!(
        submissions.lock().expect("lock")[0].q.as_deref(),
        Some("react")
    );
}

#[tokio::test]
async fn paging_moves_through_results() {
    let results = fake_results(75);
    let mut page = search_page(ScriptedCall::searches().reply(200, &body(&results)));
    page.search().await.expect("dispatched");

    assert!(!page.previous_page());
    assert!(page.next_page());
    assert!(page.next_page());
    assert!(!page.next_page());

    let SearchView::Results(view) = page.view() else {
        panic!("expected results");
    };
    assert_eq!(view.page_index, 2);
    assert_eq!(view.range_label, "61–75 of 75");
    assert_eq!(view.visible_items.len(), 15);

    assert!(page.previous_page());
    assert_eq!(page.page_request().page_index, 1);
}

#[tokio::test]
async fn page_size_change_returns_to_first_page() {
    let results = fake_results(120);
    let mut page = search_page(ScriptedCall::searches().reply(200, &body(&results)));
    page.search().await.expect("dispatched");
    page.set_page_index(3);

    page.set_page_size(PageSize::Fifty);

    let SearchView::Results(view) = page.view() else {
        panic!("expected results");
    };
    assert_eq!(view.page_index, 0);
    assert_eq!(view.range_label, "1–50 of 120");
}

#[tokio::test]
async fn new_search_starts_from_first_page() {
    let results = fake_results(75);
    let mut page = search_page(
        ScriptedCall::searches()
            .reply(200, &body(&results))
            .reply(200, &body(&results)),
    );
    page.search().await.expect("dispatched");
    page.next_page();

    page.search().await.expect("dispatched");

    assert_eq!(page.page_request().page_index, 0);
}

#[tokio::test]
async fn failed_search_keeps_previous_results() {
    let results = fake_results(2);
    let mut page = search_page(
        ScriptedCall::searches()
            .reply(200, &body(&results))
            .fail(TransportError::Connection("offline".into())),
    );
    page.search().await.expect("dispatched");

    let settlement = page.search().await.expect("dispatched");

    assert!(!settlement.is_success());
    assert_eq!(
        page.state().failure().map(|failure| failure.message.as_str()),
        Some(NETWORK_ERROR_MESSAGE)
    );
    assert!(matches!(page.view(), SearchView::Results(_)));
}
