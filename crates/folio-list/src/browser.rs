//! A list view paired with its category catalog.

use crate::catalog::{Catalog, CatalogMessage};
use crate::fetch::{FetchCategories, FetchList};
use crate::locale::Messages;
use crate::orchestrator::{ListMessage, ListOptions, ListView};
use crate::session::Session;
use folio_core::command::Command;
use folio_core::component::Component;
use folio_core::subscription::Subscription;
use std::fmt;
use std::sync::Arc;

/// Messages for a [`Browser`].
pub enum Message<L, C> {
    List(L),
    Catalog(C),
}

/// Message type of a [`Browser`] over collaborator `F`.
pub type BrowserMessage<F> = Message<ListMessage<F>, CatalogMessage<F>>;

impl<L: fmt::Debug, C: fmt::Debug> fmt::Debug for Message<L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::List(msg) => f.debug_tuple("List").field(msg).finish(),
            Message::Catalog(msg) => f.debug_tuple("Catalog").field(msg).finish(),
        }
    }
}

/// An article list and the categories it can be filtered by, both served by
/// one collaborator.
pub struct Browser<F: FetchList + FetchCategories> {
    list: ListView<F>,
    catalog: Catalog<F>,
}

impl<F: FetchList + FetchCategories> Browser<F> {
    pub fn new(
        fetcher: Arc<F>,
        session: Session,
        messages: Arc<dyn Messages>,
        options: ListOptions,
    ) -> Self {
        let catalog = Catalog::new(fetcher.clone(), session.clone(), messages.clone());
        let list = ListView::with_options(fetcher, session, messages, options);
        Self { list, catalog }
    }

    /// Load the first page of the list and the category options together.
    pub fn start(&mut self) -> Command<BrowserMessage<F>> {
        Command::batch([
            self.list.load().map(Message::List),
            self.catalog.load().map(Message::Catalog),
        ])
    }

    pub fn list(&self) -> &ListView<F> {
        &self.list
    }

    pub fn catalog(&self) -> &Catalog<F> {
        &self.catalog
    }

    pub fn teardown(&mut self) {
        self.list.teardown();
    }
}

impl<F: FetchList + FetchCategories> Component for Browser<F> {
    type Message = BrowserMessage<F>;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            Message::List(msg) => self.list.update(msg).map(Message::List),
            Message::Catalog(msg) => self.catalog.update(msg).map(Message::Catalog),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        self.list
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::List))
            .collect()
    }
}
