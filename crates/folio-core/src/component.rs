use crate::command::Command;
use crate::subscription::Subscription;

/// A piece of state that lives inside a [`Model`](crate::Model) or another
/// component.
///
/// The owner builds the component itself, forwards the component's messages
/// from one of its own message variants, and lifts whatever comes back with
/// [`Command::map`] and [`Subscription::map`]:
///
/// ```rust,ignore
/// enum PageMsg {
///     Filter(filter::Message),
/// }
///
/// fn update(&mut self, msg: PageMsg) -> Command<PageMsg> {
///     match msg {
///         PageMsg::Filter(msg) => self.filter.update(msg).map(PageMsg::Filter),
///     }
/// }
///
/// fn subscriptions(&self) -> Vec<Subscription<PageMsg>> {
///     self.filter
///         .subscriptions()
///         .into_iter()
///         .map(|sub| sub.map(PageMsg::Filter))
///         .collect()
/// }
/// ```
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Only reach the runtime if the owner includes them in its own
    /// subscriptions.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
