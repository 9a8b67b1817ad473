//! HTTP data source for **folio** list views.
//!
//! [`ApiClient`] talks to the article API and implements the
//! [`folio_list`] fetch traits, so a [`folio_list::Browser`] can be pointed
//! at a live server:
//!
//! ```rust,ignore
//! use folio_api::{ApiClient, ClientConfig};
//! use folio_list::{Browser, ListOptions, Locale, Session};
//! use std::sync::Arc;
//!
//! let client = Arc::new(ApiClient::new(ClientConfig::default())?);
//! let browser = Browser::new(client, Session::anonymous(), Arc::new(Locale::Thai), ListOptions::default());
//! ```
//!
//! Every request carries `Authorization: Bearer <token>` when the session
//! has a token.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{ApiClient, CommentFeed};
pub use config::ClientConfig;
pub use error::ApiError;
pub use model::{Article, Author, Category, Comment, Tag};
