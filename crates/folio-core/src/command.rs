use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Work handed back to the runtime from
/// [`Model::init`](crate::Model::init) or [`Model::update`](crate::Model::update).
///
/// `update` never awaits. A fetch is described as a command, the runtime
/// runs it off the loop, and the outcome re-enters `update` as a message.
///
/// ```rust,ignore
/// // Start a fetch; its result arrives later as Msg::Loaded.
/// let fetch = Command::perform(client.articles(&session, &query), Msg::Loaded);
///
/// // Notify the parent right away, without any async hop.
/// let notify = Command::message(Msg::FilterChanged);
///
/// // Both at once.
/// let cmd = Command::batch([fetch, notify]);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    /// Delivered to `update` on the next turn of the loop.
    Emit(Msg),
    Quit,
    Task(BoxFuture<'static, Msg>),
    /// Run together; messages arrive in completion order.
    Batch(Vec<Command<Msg>>),
    /// Run one after another; messages arrive in list order.
    Sequence(Vec<Command<Msg>>),
}

type Lift<A, B> = Arc<dyn Fn(A) -> B + Send + Sync>;

impl<Msg: Send + 'static> Command<Msg> {
    fn from_inner(inner: CommandInner<Msg>) -> Self {
        Command { inner }
    }

    /// No-op command.
    pub fn none() -> Self {
        Self::from_inner(CommandInner::None)
    }

    /// Run `future` off the loop and turn its output into a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_inner(CommandInner::Task(Box::pin(async move { map(future.await) })))
    }

    /// Deliver `msg` to `update` without any async work.
    pub fn message(msg: Msg) -> Self {
        Self::from_inner(CommandInner::Emit(msg))
    }

    /// Ask the program to stop.
    pub fn quit() -> Self {
        Self::from_inner(CommandInner::Quit)
    }

    /// Deliver `msg` once `duration` has passed.
    ///
    /// A delay cannot be withdrawn. For delays a later event must be able to
    /// supersede, declare an [`After`](crate::subscriptions::After)
    /// subscription instead.
    pub fn delay(duration: Duration, msg: Msg) -> Self {
        Self::perform(tokio::time::sleep(duration), move |()| msg)
    }

    /// Run `cmds` concurrently.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        Self::group(cmds, CommandInner::Batch)
    }

    /// Run `cmds` in order: every message of one command is delivered
    /// before the next command starts.
    pub fn sequence(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        Self::group(cmds, CommandInner::Sequence)
    }

    // No-ops are dropped; a single survivor stands on its own.
    fn group(
        cmds: impl IntoIterator<Item = Command<Msg>>,
        wrap: fn(Vec<Command<Msg>>) -> CommandInner<Msg>,
    ) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        if cmds.len() > 1 {
            return Self::from_inner(wrap(cmds));
        }
        cmds.pop().unwrap_or_else(Command::none)
    }

    /// Lift a child component's command into the parent's message type.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.lift(&(Arc::new(f) as Lift<Msg, NewMsg>))
    }

    fn lift<NewMsg: Send + 'static>(self, f: &Lift<Msg, NewMsg>) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Quit => CommandInner::Quit,
            CommandInner::Emit(msg) => CommandInner::Emit(f(msg)),
            CommandInner::Task(fut) => {
                let f = f.clone();
                CommandInner::Task(Box::pin(async move { f(fut.await) }))
            }
            CommandInner::Batch(cmds) => {
                CommandInner::Batch(cmds.into_iter().map(|cmd| cmd.lift(f)).collect())
            }
            CommandInner::Sequence(cmds) => {
                CommandInner::Sequence(cmds.into_iter().map(|cmd| cmd.lift(f)).collect())
            }
        };
        Command::from_inner(inner)
    }

    // Inspection, mostly for tests.

    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// The message of a [`Command::message`], if that is what this is.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Emit(msg) => Some(msg),
            _ => None,
        }
    }

    /// The parts of a [`Command::batch`].
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// The future of a [`Command::perform`], so a test can await it directly.
    pub fn into_future(self) -> Option<BoxFuture<'static, Msg>> {
        match self.inner {
            CommandInner::Task(fut) => Some(fut),
            _ => None,
        }
    }
}
