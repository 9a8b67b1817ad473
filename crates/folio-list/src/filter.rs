//! Search text and category filter with a debounced search commit.
//!
//! The filter keeps two copies of the search text. The *raw* text follows
//! every keystroke and is what an input field echoes. The *committed* text
//! only changes once input has been quiet for the debounce interval, and is
//! what drives fetches. Category selection commits immediately.
//!
//! Whenever a committed value changes the filter emits
//! [`Message::Changed`]; raw-only edits never do.
//!
//! # Example
//!
//! ```ignore
//! use folio_list::filter::{Filter, Message};
//!
//! let mut filter = Filter::new();
//! // Arms the quiet-period timer declared by `subscriptions()`.
//! filter.update(Message::SearchInput("cats".into()));
//! // ...500ms later the timer delivers Message::Quiet(_), which commits
//! // "cats" and returns Command::message(Message::Changed(criteria)).
//! ```

use crate::locale::Messages;
use crate::query::{QueryParams, CATEGORY_KEY, SEARCH_KEY};
use folio_core::command::Command;
use folio_core::component::Component;
use folio_core::subscription::{subscribe, Subscription};
use folio_core::subscriptions::After;
use std::fmt;
use std::time::Duration;

/// Quiet interval before typed search text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A non-empty category identifier, kept in its stringified wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(String);

impl CategoryId {
    /// Parse a selection value; the empty string means "no category".
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(CategoryId(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! category_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for CategoryId {
            fn from(id: $ty) -> Self {
                CategoryId(id.to_string())
            }
        })*
    };
}

category_from_int!(u32, u64, i32, i64, usize);

/// The committed filter values that fetches are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Trimmed search text; empty when no search is active.
    pub search: String,
    pub category: Option<CategoryId>,
}

impl FilterCriteria {
    /// Whether any filter narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category.is_some()
    }

    /// Build `{search?, category_id?}`, omitting empty values.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new().with(SEARCH_KEY, self.search.as_str());
        if let Some(category) = &self.category {
            params.push(CATEGORY_KEY, category.as_str());
        }
        params
    }
}

/// Messages for the filter component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keystroke changed the search field to the given text.
    SearchInput(String),
    /// A category was picked (`None` selects all categories).
    CategorySelected(Option<CategoryId>),
    /// Clear the search text only.
    ClearSearch,
    /// Clear the category only.
    ClearCategory,
    /// Clear everything.
    ClearAll,
    /// The quiet interval armed with the given generation elapsed.
    Quiet(u64),
    /// Emitted when the committed criteria changed.
    Changed(FilterCriteria),
}

/// Debounced search plus category filter.
pub struct Filter {
    raw: String,
    committed: FilterCriteria,
    generation: u64,
    pending: Option<u64>,
    debounce: Duration,
    timer_name: &'static str,
    disposed: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter {
    /// Create an empty filter with the default 500ms debounce.
    pub fn new() -> Self {
        Self {
            raw: String::new(),
            committed: FilterCriteria::default(),
            generation: 0,
            pending: None,
            debounce: DEFAULT_DEBOUNCE,
            timer_name: "list-filter",
            disposed: false,
        }
    }

    /// Set the quiet interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the timer name. Filters living in the same program need distinct
    /// names so their timers do not replace each other.
    pub fn with_timer_name(mut self, name: &'static str) -> Self {
        self.timer_name = name;
        self
    }

    /// The search text as typed, for echoing in an input field.
    pub fn raw_search(&self) -> &str {
        &self.raw
    }

    /// The committed, trimmed search text.
    pub fn search(&self) -> &str {
        &self.committed.search
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.committed.category.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.committed
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Whether a search commit is waiting for the quiet interval.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the committed search or the category is non-empty.
    pub fn has_active_filters(&self) -> bool {
        self.committed.is_active()
    }

    /// Query parameters for the committed criteria.
    pub fn build_query(&self) -> QueryParams {
        self.committed.to_query()
    }

    /// Human-readable descriptions of the active filters, search first.
    pub fn summary(&self, messages: &dyn Messages) -> Vec<String> {
        let mut parts = Vec::new();
        if !self.committed.search.is_empty() {
            parts.push(messages.search_summary(&self.committed.search));
        }
        if let Some(category) = &self.committed.category {
            parts.push(messages.category_summary(category));
        }
        parts
    }

    /// Set the raw text and (re)arm the quiet-interval commit.
    ///
    /// Each call supersedes the commit armed by the previous one.
    pub fn update_search_text(&mut self, value: impl Into<String>) {
        self.raw = value.into();
        if self.disposed {
            return;
        }
        self.generation += 1;
        self.pending = Some(self.generation);
    }

    /// Commit the raw text if `generation` is the pending arming.
    ///
    /// Returns the new criteria when the committed search changed.
    pub fn commit(&mut self, generation: u64) -> Option<FilterCriteria> {
        if self.pending != Some(generation) {
            tracing::trace!(generation, "ignoring superseded search timer");
            return None;
        }
        self.pending = None;
        let trimmed = self.raw.trim();
        if trimmed == self.committed.search {
            return None;
        }
        self.committed.search = trimmed.to_string();
        tracing::debug!(search = %self.committed.search, "search committed");
        Some(self.committed.clone())
    }

    /// Select a category. Returns the new criteria when it changed.
    pub fn update_category(&mut self, category: Option<CategoryId>) -> Option<FilterCriteria> {
        if self.disposed || self.committed.category == category {
            return None;
        }
        self.committed.category = category;
        Some(self.committed.clone())
    }

    /// Clear the search text and cancel a pending commit.
    pub fn clear_search(&mut self) -> Option<FilterCriteria> {
        self.raw.clear();
        self.pending = None;
        if self.disposed || self.committed.search.is_empty() {
            return None;
        }
        self.committed.search.clear();
        Some(self.committed.clone())
    }

    pub fn clear_category(&mut self) -> Option<FilterCriteria> {
        self.update_category(None)
    }

    /// Clear search and category. Notifies at most once.
    pub fn clear(&mut self) -> Option<FilterCriteria> {
        let search = self.clear_search();
        let category = self.clear_category();
        category.or(search)
    }

    /// Cancel any pending commit for good. Called when the owning view goes
    /// away; later keystrokes still echo but never arm a timer, and no later
    /// edit reports a change.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.disposed = true;
    }

    fn notify(change: Option<FilterCriteria>) -> Command<Message> {
        match change {
            Some(criteria) => Command::message(Message::Changed(criteria)),
            None => Command::none(),
        }
    }
}

impl Component for Filter {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::SearchInput(value) => {
                self.update_search_text(value);
                Command::none()
            }
            Message::CategorySelected(category) => Self::notify(self.update_category(category)),
            Message::ClearSearch => Self::notify(self.clear_search()),
            Message::ClearCategory => Self::notify(self.clear_category()),
            Message::ClearAll => Self::notify(self.clear()),
            Message::Quiet(generation) => Self::notify(self.commit(generation)),
            // Emitted for the parent; nothing to do when routed back here.
            Message::Changed(_) => Command::none(),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        match self.pending {
            Some(generation) if !self.disposed => vec![subscribe(
                After::new(self.debounce, self.timer_name).with_key(generation),
            )
            .map(move |_| Message::Quiet(generation))],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use folio_core::model::Model;
    use folio_core::testing::TestProgram;

    // Collects every change notification the filter emits.
    struct Harness {
        filter: Filter,
        changes: Vec<FilterCriteria>,
    }

    impl Model for Harness {
        type Message = Message;
        type Flags = Duration;

        fn init(debounce: Duration) -> (Self, Command<Message>) {
            let harness = Harness {
                filter: Filter::new().with_debounce(debounce),
                changes: vec![],
            };
            (harness, Command::none())
        }

        fn update(&mut self, msg: Message) -> Command<Message> {
            if let Message::Changed(criteria) = &msg {
                self.changes.push(criteria.clone());
            }
            self.filter.update(msg)
        }

        fn subscriptions(&self) -> Vec<Subscription<Message>> {
            self.filter.subscriptions()
        }
    }

    fn type_text(prog: &mut TestProgram<Harness>, text: &str) {
        prog.send(Message::SearchInput(text.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_commit_once_with_last_value() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        for text in ["c", "ca", "cat", "cats", " cats  "] {
            type_text(&mut prog, text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(prog.model().filter.raw_search(), " cats  ");
        assert_eq!(prog.model().filter.search(), "");

        prog.settle().await;
        assert_eq!(prog.model().filter.search(), "cats");
        assert_eq!(prog.model().changes.len(), 1);
        assert_eq!(prog.model().changes[0].search, "cats");
        assert!(!prog.model().filter.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn commit_waits_for_full_quiet_interval() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        type_text(&mut prog, "dogs");
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(prog.model().filter.search(), "");
        assert!(prog.model().filter.is_pending());

        let start = tokio::time::Instant::now();
        prog.settle().await;
        assert!(start.elapsed() >= Duration::from_millis(1));
        assert_eq!(prog.model().filter.search(), "dogs");
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_only_commits_empty() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        type_text(&mut prog, "cats");
        prog.settle().await;

        type_text(&mut prog, "   ");
        prog.settle().await;
        assert_eq!(prog.model().filter.search(), "");
        assert_eq!(prog.model().changes.len(), 2);
        assert!(!prog.model().filter.has_active_filters());
    }

    #[tokio::test(start_paused = true)]
    async fn retyping_the_committed_term_does_not_notify() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        type_text(&mut prog, "cats");
        prog.settle().await;
        type_text(&mut prog, "cats ");
        prog.settle().await;
        assert_eq!(prog.model().changes.len(), 1);
    }

    #[test]
    fn category_commits_immediately() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        prog.send(Message::CategorySelected(Some(CategoryId::from(3u64))));
        prog.drain_messages();
        assert_eq!(prog.model().changes.len(), 1);
        assert_eq!(prog.model().filter.category().map(CategoryId::as_str), Some("3"));

        // Re-selecting the same category is not a change.
        prog.send(Message::CategorySelected(Some(CategoryId::from(3u64))));
        prog.drain_messages();
        assert_eq!(prog.model().changes.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_commit() {
        let mut prog = TestProgram::<Harness>::new(DEFAULT_DEBOUNCE);
        type_text(&mut prog, "cats");
        assert_eq!(prog.active_subscriptions(), 1);

        prog.send(Message::ClearAll);
        prog.drain_messages();
        assert_eq!(prog.active_subscriptions(), 0);
        assert_eq!(prog.model().filter.raw_search(), "");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!prog.step().await);
        assert!(prog.model().changes.is_empty());
    }

    #[test]
    fn clear_all_notifies_once() {
        let mut filter = Filter::new();
        filter.update_category(CategoryId::parse("news"));
        filter.update_search_text("rust");
        let generation = 1;
        assert!(filter.commit(generation).is_some());

        let change = filter.clear().expect("clearing active filters is a change");
        assert_eq!(change, FilterCriteria::default());
        assert!(filter.clear().is_none());
    }

    #[test]
    fn superseded_generation_is_ignored() {
        let mut filter = Filter::new();
        filter.update_search_text("a");
        filter.update_search_text("ab");
        assert!(filter.commit(1).is_none());
        assert_eq!(filter.search(), "");
        assert_eq!(filter.commit(2).map(|c| c.search).as_deref(), Some("ab"));
    }

    #[test]
    fn dispose_disarms_timer() {
        let mut filter = Filter::new();
        filter.update_search_text("late");
        filter.dispose();
        assert!(filter.subscriptions().is_empty());
        filter.update_search_text("later");
        assert!(!filter.is_pending());
        assert!(filter.commit(2).is_none());
        assert_eq!(filter.raw_search(), "later");
    }

    #[test]
    fn disposed_filter_reports_no_changes() {
        let mut filter = Filter::new();
        filter.update_search_text("cats");
        filter.commit(1);
        filter.update_category(Some(CategoryId::from(2u64)));
        filter.dispose();

        assert!(filter.update_category(Some(CategoryId::from(5u64))).is_none());
        assert!(filter.clear_category().is_none());
        assert!(filter.clear_search().is_none());
        assert!(filter.clear().is_none());
        assert_eq!(filter.category().map(CategoryId::as_str), Some("2"));
        assert_eq!(filter.raw_search(), "");
    }

    #[test]
    fn build_query_omits_empty_values() {
        let mut filter = Filter::new();
        assert!(filter.build_query().is_empty());

        filter.update_search_text("cats");
        filter.commit(1);
        filter.update_category(Some(CategoryId::from(3u64)));
        let query = filter.build_query();
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            vec![("search", "cats"), ("category_id", "3")]
        );
    }

    #[test]
    fn active_filters_follow_committed_text_not_raw() {
        let mut filter = Filter::new();
        filter.update_search_text("pending");
        assert!(!filter.has_active_filters());
        assert_eq!(CategoryId::parse(""), None);
    }

    #[test]
    fn summary_lists_search_then_category() {
        let mut filter = Filter::new();
        filter.update_search_text("cats");
        filter.commit(1);
        filter.update_category(Some(CategoryId::from(2u64)));
        assert_eq!(
            filter.summary(&Locale::English),
            vec!["Search: \"cats\"".to_string(), "Category: 2".to_string()]
        );
    }
}
