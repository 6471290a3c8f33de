//! Text rendering of the screen snapshots.

use std::fmt::Write as _;

use client_core::{FormView, OperationState, PageView, SearchView, NAME_FIELD, SIZE_FIELD};

pub const PRODUCT_STORED: &str = "Product stored";
pub const SEARCH_PROMPT: &str = "Please provide a search option and click in the search button";
pub const NO_RESULTS: &str = "Your search has no results";
pub const TABLE_HEADERS: [&str; 5] = ["Repository", "Stars", "Forks", "Open issues", "Updated at"];

fn status_line(state: &OperationState, success: Option<&str>) -> Option<String> {
    match state {
        OperationState::Succeeded => success.map(str::to_string),
        OperationState::Failed(failure) => Some(failure.message.clone()),
        OperationState::Idle | OperationState::Busy => None,
    }
}

pub fn render_form(view: &FormView) -> String {
    let mut out = String::from("Create product\n");
    if let Some(line) = status_line(&view.state, Some(PRODUCT_STORED)) {
        let _ = writeln!(out, "{line}");
    }
    for (field, value) in [(NAME_FIELD, &view.name), (SIZE_FIELD, &view.size)] {
        let _ = writeln!(out, "  {field}: {value}");
        let error = view.field_error(field);
        if !error.is_empty() {
            let _ = writeln!(out, "    ! {error}");
        }
    }
    let _ = writeln!(out, "  type: {}", view.product_type);
    out
}

pub fn render_search(view: &SearchView<'_>, state: &OperationState) -> String {
    let mut out = String::from("Github repositories list\n");
    if let Some(line) = status_line(state, None) {
        let _ = writeln!(out, "{line}");
    }
    match view {
        SearchView::Initial => {
            let _ = writeln!(out, "{SEARCH_PROMPT}");
        }
        SearchView::Empty => {
            let _ = writeln!(out, "{NO_RESULTS}");
        }
        SearchView::Results(page) => render_table(&mut out, page),
    }
    out
}

fn render_table(out: &mut String, page: &PageView<'_>) {
    let _ = writeln!(out, "{}", TABLE_HEADERS.join(" | "));
    for repo in page.visible_items {
        let _ = writeln!(
            out,
            "{} <{}> [{}] | {} | {} | {} | {}",
            repo.name,
            repo.html_url,
            repo.owner.avatar_url,
            repo.stargazers_count,
            repo.forks_count,
            repo.open_issues_count,
            repo.updated_at,
        );
    }
    let _ = writeln!(
        out,
        "Rows per page: {}  {}{}{}",
        page.page_size.get(),
        page.range_label,
        if page.has_previous_page { "  < previous" } else { "" },
        if page.has_next_page { "  next >" } else { "" },
    );
}

#[cfg(test)]
mod tests {
    use client_core::{page, ErrorKind, PageSize, RemoteFailure, SearchResult, ValidationGate};
    use shared::{
        domain::{ProductType, RepositoryId},
        protocol::{Repository, RepositoryOwner},
    };

    use super::*;

    fn form_view(state: OperationState) -> FormView {
        FormView {
            name: String::new(),
            size: String::new(),
            product_type: ProductType::Electronic,
            field_errors: ValidationGate::required([NAME_FIELD, SIZE_FIELD]).validate_all(&[]),
            state,
        }
    }

    fn qt5reactor() -> Repository {
        Repository {
            id: RepositoryId(33397954),
            name: "qt5reactor".into(),
            owner: RepositoryOwner {
                avatar_url: "https://avatars.githubusercontent.com/u/716546?v=4".into(),
            },
            html_url: "https://github.com/twisted/qt5reactor".into(),
            updated_at: "2022-04-11".into(),
            stargazers_count: 43,
            forks_count: 18,
            open_issues_count: 18,
        }
    }

    #[test]
    fn form_shows_field_messages() {
        let text = render_form(&form_view(OperationState::Idle));
        assert!(text.contains("  name: \n    ! The name is required\n"));
        assert!(text.contains("  size: \n    ! The size is required\n"));
        assert!(text.contains("type: electronic"));
    }

    #[test]
    fn form_shows_success_or_failure_line() {
        assert!(render_form(&form_view(OperationState::Succeeded)).contains(PRODUCT_STORED));

        let failed = OperationState::Failed(RemoteFailure::new(
            ErrorKind::ServerError,
            "Unexpected error, please try again",
        ));
        let text = render_form(&form_view(failed));
        assert!(text.contains("Unexpected error, please try again"));
        assert!(!text.contains(PRODUCT_STORED));
    }

    #[test]
    fn search_states_render_their_messages() {
        let idle = OperationState::Idle;
        assert!(render_search(&SearchView::Initial, &idle).contains(SEARCH_PROMPT));
        assert!(render_search(&SearchView::Empty, &idle).contains(NO_RESULTS));
    }

    #[test]
    fn search_results_render_table_and_range() {
        let results = SearchResult {
            total_count: 1,
            items: vec![qt5reactor()],
        };
        let view = SearchView::Results(page(&results, 0, PageSize::Thirty));
        let text = render_search(&view, &OperationState::Succeeded);

        assert!(text.contains("Repository | Stars | Forks | Open issues | Updated at"));
        assert!(text.contains("qt5reactor <https://github.com/twisted/qt5reactor>"));
        assert!(text.contains("1–1 of 1"));
        assert!(!text.contains("< previous"));
    }

    #[test]
    fn later_page_shows_range_and_paging_controls() {
        let results = SearchResult {
            total_count: 60,
            items: vec![qt5reactor(); 60],
        };
        let view = SearchView::Results(page(&results, 1, PageSize::Thirty));
        let text = render_search(&view, &OperationState::Succeeded);

        assert!(text.ends_with("Rows per page: 30  31–60 of 60  < previous\n"));
        assert!(!text.contains(NO_RESULTS));
        assert!(!text.contains(SEARCH_PROMPT));
    }

    #[test]
    fn failed_search_shows_message_above_previous_view() {
        let failed = OperationState::Failed(RemoteFailure::new(
            ErrorKind::NetworkError,
            "Connection error, please try later",
        ));
        let text = render_search(&SearchView::Empty, &failed);

        assert_eq!(
            text,
            format!("Github repositories list\nConnection error, please try later\n{NO_RESULTS}\n")
        );
    }
}
