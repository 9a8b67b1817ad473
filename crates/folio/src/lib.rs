//! **folio** -- list front end for a content-management API.
//!
//! Umbrella crate re-exporting everything needed to build a list screen from
//! a single dependency:
//!
//! * All public items from [`folio_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * [`list`] re-exports [`folio_list`]: filters, pagination, list views.
//! * [`api`] re-exports [`folio_api`]: the HTTP client and its records.
//! * [`tokio`] and [`tracing`] are re-exported so downstream crates do not
//!   need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use folio::api::{ApiClient, ClientConfig};
//! use folio::list::{Browser, BrowserMessage, ListOptions, Locale, Session};
//! use folio::{Command, Component, Model};
//! use std::sync::Arc;
//!
//! struct Articles {
//!     browser: Browser<ApiClient>,
//! }
//!
//! impl Model for Articles {
//!     type Message = BrowserMessage<ApiClient>;
//!     type Flags = ApiClient;
//!
//!     fn init(client: ApiClient) -> (Self, Command<Self::Message>) {
//!         let mut browser = Browser::new(
//!             Arc::new(client),
//!             Session::anonymous(),
//!             Arc::new(Locale::default()),
//!             ListOptions::default(),
//!         );
//!         let cmd = browser.start();
//!         (Articles { browser }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         self.browser.update(msg)
//!     }
//! }
//! ```

pub use folio_core::*;

pub mod list {
    pub use folio_list::*;
}

pub mod api {
    pub use folio_api::*;
}

// Downstream crates can skip their own tokio and tracing entries.
pub use tokio;
pub use tracing;
