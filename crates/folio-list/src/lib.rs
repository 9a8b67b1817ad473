//! List-state engine for **folio**.
//!
//! Keeps a filtered, paginated list consistent while the user types,
//! picks categories and pages through results, and while fetches race each
//! other. Every stateful piece implements [`folio_core::Component`], so it
//! embeds in any [`folio_core::Model`] and runs on the same single-threaded
//! loop as the rest of the program.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`filter`] | Search text with a debounced commit, plus category selection |
//! | [`pagination`] | Current page and page size over a borrowed collection |
//! | [`orchestrator`] | [`ListView`]: filter + pagination + fetch with stale-response discard |
//! | [`catalog`] | Category options loaded next to a list |
//! | [`browser`] | [`Browser`]: a list view together with its catalog |
//!
//! # Collaborators
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`fetch`] | [`FetchList`] and [`FetchCategories`] traits implemented by data sources |
//! | [`query`] | [`QueryParams`], the `search` / `category_id` parameter set |
//! | [`session`] | [`Session`] context handed to every fetch |
//! | [`locale`] | [`Messages`] trait and the built-in [`Locale`] strings |

pub mod browser;
pub mod catalog;
pub mod fetch;
pub mod filter;
pub mod locale;
pub mod orchestrator;
pub mod pagination;
pub mod query;
pub mod session;

pub use browser::{Browser, BrowserMessage};
pub use catalog::{Catalog, CatalogMessage};
pub use fetch::{FetchCategories, FetchFuture, FetchList};
pub use filter::{CategoryId, Filter, FilterCriteria};
pub use locale::{Locale, Messages};
pub use orchestrator::{ListMessage, ListOptions, ListView, LoadState};
pub use pagination::{PageInfo, Pagination};
pub use query::QueryParams;
pub use session::Session;
