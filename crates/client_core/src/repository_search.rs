//! Repository search page: filter, search operation and paginated results.

use shared::protocol::SearchQuery;

use crate::{
    classifier::{ErrorClassifier, StatusCodes},
    controller::{OperationController, OperationState, Settlement},
    error::RunRejected,
    pager::{page, PageRequest, PageSize, PageView, SearchResult},
    transport::RemoteCall,
    validation::FieldSource,
};

impl FieldSource for SearchQuery {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView<'a> {
    /// No search has been applied yet.
    Initial,
    /// A search was applied and returned no items.
    Empty,
    Results(PageView<'a>),
}

pub struct RepositorySearch<C> {
    filter: String,
    results: Option<SearchResult>,
    pages: PageRequest,
    controller: OperationController<C>,
}

impl<C> RepositorySearch<C>
where
    C: RemoteCall<Payload = SearchQuery, Output = SearchResult>,
{
    pub fn new(api: C, codes: &StatusCodes) -> Self {
        Self {
            filter: String::new(),
            results: None,
            pages: PageRequest::default(),
            controller: OperationController::new(
                "search_repositories",
                api,
                ErrorClassifier::new(codes),
                codes.ok,
            ),
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Runs the search. A successful result replaces the previous one and
    /// starts again from the first page; a failure keeps it.
    pub async fn search(&mut self) -> Result<Settlement<()>, RunRejected> {
        let settlement = self.controller.run(SearchQuery::new(&self.filter)).await?;
        Ok(settlement.map(|results| {
            self.results = Some(results);
            self.pages = self.pages.with_page_index(0);
        }))
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pages = self.pages.with_page_size(page_size);
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.pages = self.pages.with_page_index(page_index);
    }

    pub fn page_request(&self) -> PageRequest {
        self.pages
    }

    pub fn next_page(&mut self) -> bool {
        let has_next = matches!(self.view(), SearchView::Results(view) if view.has_next_page);
        if has_next {
            self.pages = self.pages.with_page_index(self.pages.page_index + 1);
        }
        has_next
    }

    pub fn previous_page(&mut self) -> bool {
        let Some(previous) = self.pages.page_index.checked_sub(1) else {
            return false;
        };
        self.pages = self.pages.with_page_index(previous);
        true
    }

    pub fn view(&self) -> SearchView<'_> {
        match &self.results {
            None => SearchView::Initial,
            Some(results) if results.items.is_empty() => SearchView::Empty,
            Some(results) => SearchView::Results(page(
                results,
                self.pages.page_index,
                self.pages.page_size,
            )),
        }
    }

    pub fn state(&self) -> OperationState {
        self.controller.state()
    }

    pub fn search_enabled(&self) -> bool {
        !self.controller.is_busy()
    }

    pub fn controller(&self) -> &OperationController<C> {
        &self.controller
    }
}

#[cfg(test)]
#[path = "tests/repository_search_tests.rs"]
mod tests;
