//! List orchestrator: ties the filter, the page window and a fetch
//! collaborator into one list view.
//!
//! A [`ListView`] owns the authoritative item collection. Committed filter
//! changes reset the window to page 1 and start a fetch; page navigation only
//! moves the window over the collection already loaded.
//!
//! Every fetch carries a ticket. Fetches are never cancelled, but a result
//! whose ticket is older than the last one issued is dropped on arrival, so
//! a slow response to an old filter can never replace newer data.

use crate::fetch::FetchList;
use crate::filter::{self, Filter, FilterCriteria, DEFAULT_DEBOUNCE};
use crate::locale::Messages;
use crate::pagination::{self, PageInfo, Pagination, DEFAULT_PER_PAGE};
use crate::query::QueryParams;
use crate::session::Session;
use folio_core::command::Command;
use folio_core::component::Component;
use folio_core::subscription::Subscription;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Options for a [`ListView`].
///
/// ```rust,ignore
/// let options = ListOptions {
///     per_page: 10,
///     ..ListOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Quiet interval before typed search text is committed (default: 500ms).
    pub debounce: Duration,
    /// Items per page (default: 4, minimum 1).
    pub per_page: usize,
    /// Width of the page-number window (default: 5).
    pub max_visible_pages: usize,
    /// Name of the search debounce timer. Give every view in one program its
    /// own name.
    pub timer_name: &'static str,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            per_page: DEFAULT_PER_PAGE,
            max_visible_pages: 5,
            timer_name: "list-filter",
        }
    }
}

/// Where the view is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Messages for a list view.
pub enum Message<T, E> {
    Filter(filter::Message),
    Page(pagination::Message),
    /// Fetch again with the current criteria.
    Refresh,
    /// A fetch finished.
    Loaded {
        ticket: u64,
        result: Result<Vec<T>, E>,
    },
}

/// Message type of a [`ListView`] over collaborator `F`.
pub type ListMessage<F> = Message<<F as FetchList>::Item, <F as FetchList>::Error>;

impl<T, E: fmt::Debug> fmt::Debug for Message<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Filter(msg) => f.debug_tuple("Filter").field(msg).finish(),
            Message::Page(msg) => f.debug_tuple("Page").field(msg).finish(),
            Message::Refresh => f.write_str("Refresh"),
            Message::Loaded { ticket, result } => f
                .debug_struct("Loaded")
                .field("ticket", ticket)
                .field("result", &result.as_ref().map(Vec::len))
                .finish(),
        }
    }
}

/// One filtered, paginated list backed by a fetch collaborator.
pub struct ListView<F: FetchList> {
    fetcher: Arc<F>,
    session: Session,
    messages: Arc<dyn Messages>,
    filter: Filter,
    pagination: Pagination,
    max_visible_pages: usize,
    items: Vec<F::Item>,
    state: LoadState,
    error: Option<String>,
    issued: u64,
}

impl<F: FetchList> ListView<F> {
    pub fn new(fetcher: Arc<F>, session: Session, messages: Arc<dyn Messages>) -> Self {
        Self::with_options(fetcher, session, messages, ListOptions::default())
    }

    pub fn with_options(
        fetcher: Arc<F>,
        session: Session,
        messages: Arc<dyn Messages>,
        options: ListOptions,
    ) -> Self {
        let filter = Filter::new()
            .with_debounce(options.debounce)
            .with_timer_name(options.timer_name);
        Self {
            fetcher,
            session,
            messages,
            filter,
            pagination: Pagination::new(options.per_page),
            max_visible_pages: options.max_visible_pages,
            items: Vec::new(),
            state: LoadState::Idle,
            error: None,
            issued: 0,
        }
    }

    /// Start a fetch with the committed criteria.
    ///
    /// The page window returns to page 1 before the request is issued and
    /// again when the result is applied. Items from the previous fetch stay
    /// in place until then.
    pub fn load(&mut self) -> Command<ListMessage<F>> {
        self.state = LoadState::Loading;
        self.error = None;
        self.pagination.reset_to_first_page();
        self.issued += 1;
        let ticket = self.issued;
        let query = self.filter.build_query();
        tracing::debug!(ticket, ?query, "loading list");
        let fut = self.fetcher.fetch_list(&self.session, query);
        Command::perform(fut, move |result| Message::Loaded { ticket, result })
    }

    /// Disarm the search debounce. Call when the view is discarded.
    pub fn teardown(&mut self) {
        self.filter.dispose();
    }

    fn apply(&mut self, ticket: u64, result: Result<Vec<F::Item>, F::Error>) {
        if ticket != self.issued {
            tracing::debug!(ticket, latest = self.issued, "discarding stale list response");
            return;
        }
        // Paging may have moved the window while the fetch was in flight.
        self.pagination.reset_to_first_page();
        match result {
            Ok(items) => {
                tracing::debug!(ticket, count = items.len(), "list loaded");
                self.items = items;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                tracing::warn!(ticket, error = %err, "failed to load list");
                self.items.clear();
                self.error = Some(self.messages.list_failed());
                self.state = LoadState::Failed;
            }
        }
    }

    /// The full collection from the last successful fetch.
    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    /// The items on the current page.
    pub fn visible_items(&self) -> &[F::Item] {
        self.pagination.visible_slice(&self.items)
    }

    pub fn page_info(&self) -> PageInfo {
        self.pagination.page_info(self.items.len())
    }

    /// Page numbers for a pager control, at most `max_visible_pages` wide.
    pub fn visible_page_numbers(&self) -> Vec<usize> {
        self.pagination
            .visible_page_numbers(self.max_visible_pages, self.items.len())
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next_page(self.items.len())
    }

    pub fn has_prev_page(&self) -> bool {
        self.pagination.has_prev_page()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Localized text for the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filter.criteria()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The query the next fetch would send.
    pub fn query(&self) -> QueryParams {
        self.filter.build_query()
    }

    pub fn filter_summary(&self) -> Vec<String> {
        self.filter.summary(self.messages.as_ref())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn messages(&self) -> &Arc<dyn Messages> {
        &self.messages
    }
}

impl<F: FetchList> Component for ListView<F> {
    type Message = ListMessage<F>;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            Message::Filter(filter::Message::Changed(criteria)) => {
                tracing::debug!(?criteria, "filter changed");
                self.load()
            }
            Message::Filter(msg) => self.filter.update(msg).map(Message::Filter),
            Message::Page(msg) => {
                self.pagination.apply(msg, self.items.len());
                Command::none()
            }
            Message::Refresh => self.load(),
            Message::Loaded { ticket, result } => {
                self.apply(ticket, result);
                Command::none()
            }
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        self.filter
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::Filter))
            .collect()
    }
}
