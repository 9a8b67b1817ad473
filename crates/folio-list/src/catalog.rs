//! Category options shown next to a list.

use crate::fetch::FetchCategories;
use crate::locale::Messages;
use crate::session::Session;
use folio_core::command::Command;
use folio_core::component::Component;
use std::fmt;
use std::sync::Arc;

/// Messages for the category catalog.
pub enum Message<C, E> {
    /// Fetch the category list.
    Load,
    /// A fetch finished. Only the latest ticket is applied.
    Loaded {
        ticket: u64,
        result: Result<Vec<C>, E>,
    },
}

/// Message type of a [`Catalog`] over collaborator `F`.
pub type CatalogMessage<F> =
    Message<<F as FetchCategories>::Category, <F as FetchCategories>::Error>;

impl<C, E: fmt::Debug> fmt::Debug for Message<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Load => f.write_str("Load"),
            Message::Loaded { ticket, result } => f
                .debug_struct("Loaded")
                .field("ticket", ticket)
                .field("result", &result.as_ref().map(Vec::len))
                .finish(),
        }
    }
}

/// Loaded category list with its own loading and error flags.
///
/// A failed load leaves the list empty and records the localized
/// "categories failed" text; the raw error only goes to the log.
pub struct Catalog<F: FetchCategories> {
    fetcher: Arc<F>,
    session: Session,
    messages: Arc<dyn Messages>,
    categories: Vec<F::Category>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<F: FetchCategories> Catalog<F> {
    pub fn new(fetcher: Arc<F>, session: Session, messages: Arc<dyn Messages>) -> Self {
        Self {
            fetcher,
            session,
            messages,
            categories: Vec::new(),
            loading: false,
            error: None,
            issued: 0,
        }
    }

    pub fn categories(&self) -> &[F::Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a fetch of the category list.
    pub fn load(&mut self) -> Command<CatalogMessage<F>> {
        self.loading = true;
        self.error = None;
        self.issued += 1;
        let ticket = self.issued;
        tracing::debug!(ticket, "loading categories");
        let fut = self.fetcher.fetch_categories(&self.session);
        Command::perform(fut, move |result| Message::Loaded { ticket, result })
    }

    fn apply(&mut self, ticket: u64, result: Result<Vec<F::Category>, F::Error>) {
        if ticket != self.issued {
            tracing::debug!(ticket, latest = self.issued, "discarding stale categories");
            return;
        }
        self.loading = false;
        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                self.categories = categories;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                self.categories.clear();
                self.error = Some(self.messages.categories_failed());
            }
        }
    }
}

impl<F: FetchCategories> Component for Catalog<F> {
    type Message = CatalogMessage<F>;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            Message::Load => self.load(),
            Message::Loaded { ticket, result } => {
                self.apply(ticket, result);
                Command::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchFuture;
    use crate::locale::Locale;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("categories endpoint returned 503")]
    struct Unavailable;

    // Serves the queued replies in order.
    struct Scripted {
        replies: Mutex<Vec<Result<Vec<&'static str>, Unavailable>>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<Vec<&'static str>, Unavailable>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
            })
        }
    }

    impl FetchCategories for Scripted {
        type Category = &'static str;
        type Error = Unavailable;

        fn fetch_categories(&self, _: &Session) -> FetchFuture<&'static str, Unavailable> {
            let reply = self.replies.lock().unwrap().remove(0);
            Box::pin(async move { reply })
        }
    }

    fn catalog(fetcher: Arc<Scripted>) -> Catalog<Scripted> {
        Catalog::new(fetcher, Session::anonymous(), Arc::new(Locale::English))
    }

    async fn run(catalog: &mut Catalog<Scripted>) {
        let fut = catalog.load().into_future().expect("load performs a fetch");
        let msg = fut.await;
        catalog.update(msg);
    }

    #[tokio::test]
    async fn loads_categories() {
        let mut catalog = catalog(Scripted::new(vec![Ok(vec!["news", "tech"])]));
        run(&mut catalog).await;
        assert_eq!(catalog.categories(), &["news", "tech"]);
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), None);
    }

    #[tokio::test]
    async fn failure_empties_and_localizes() {
        let mut catalog = catalog(Scripted::new(vec![Ok(vec!["news"]), Err(Unavailable)]));
        run(&mut catalog).await;
        run(&mut catalog).await;
        assert!(catalog.categories().is_empty());
        assert_eq!(catalog.error(), Some("Unable to load categories"));
    }

    #[tokio::test]
    async fn stale_reply_is_ignored() {
        let mut catalog = catalog(Scripted::new(vec![Ok(vec!["old"]), Ok(vec!["new"])]));
        let first = catalog.load().into_future().expect("fetch");
        let second = catalog.load().into_future().expect("fetch");

        let newer = second.await;
        catalog.update(newer);
        let older = first.await;
        catalog.update(older);
        assert_eq!(catalog.categories(), &["new"]);
    }
}
