use crate::command::Command;
use crate::subscription::Subscription;

/// The state a [`Program`](crate::Program) owns and drives.
///
/// A program calls [`init`](Model::init) once, then loops: take the next
/// message, pass it to [`update`](Model::update), start the returned
/// [`Command`], and reconcile [`subscriptions`](Model::subscriptions).
/// Messages come from finished commands, from [`Command::message`], and
/// from running subscriptions.
///
/// ```rust,ignore
/// use folio_core::{Command, Model};
///
/// struct Headlines {
///     client: ApiClient,
///     titles: Vec<String>,
/// }
///
/// enum Msg {
///     Loaded(Result<Vec<Article>, ApiError>),
/// }
///
/// impl Model for Headlines {
///     type Message = Msg;
///     type Flags = ApiClient;
///
///     fn init(client: ApiClient) -> (Self, Command<Msg>) {
///         let fetch = client.clone();
///         let cmd = Command::perform(
///             async move { fetch.articles(&Session::anonymous(), &QueryParams::new()).await },
///             Msg::Loaded,
///         );
///         (Headlines { client, titles: vec![] }, cmd)
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         let Msg::Loaded(result) = msg;
///         self.titles = result.unwrap_or_default().into_iter().map(|a| a.title).collect();
///         Command::quit()
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    type Message: Send + 'static;

    /// Startup input for [`init`](Model::init): fetch clients, sessions, or
    /// `()` when nothing is needed.
    type Flags: Send + 'static;

    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Sources that should be running right now. Evaluated after every
    /// update; see [`Subscription`] for how the result is applied.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
