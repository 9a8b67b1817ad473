//! Collaborator traits the list engine fetches through.
//!
//! The engine never knows how records are fetched. It hands a
//! [`Session`] and a [`QueryParams`] to the collaborator and gets back a
//! future it can start from a [`Command`](folio_core::Command).

use crate::query::QueryParams;
use crate::session::Session;
use futures::future::BoxFuture;

/// Future returned by collaborators: the whole collection, or an error.
pub type FetchFuture<T, E> = BoxFuture<'static, Result<Vec<T>, E>>;

/// Fetches one filtered collection of items.
pub trait FetchList: Send + Sync + 'static {
    /// The listed record.
    type Item: Send + 'static;
    /// Raw failure. Logged for operators, never shown to users.
    type Error: std::error::Error + Send + 'static;

    /// Start a fetch for `query`. The future must not borrow `self`.
    fn fetch_list(&self, session: &Session, query: QueryParams)
        -> FetchFuture<Self::Item, Self::Error>;
}

/// Fetches the category options shown next to a list.
pub trait FetchCategories: Send + Sync + 'static {
    type Category: Send + 'static;
    type Error: std::error::Error + Send + 'static;

    fn fetch_categories(&self, session: &Session) -> FetchFuture<Self::Category, Self::Error>;
}
