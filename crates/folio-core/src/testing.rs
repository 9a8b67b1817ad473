use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionSet;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::mpsc;

/// Drives a [`Model`] by hand, without the event loop.
///
/// [`send`](TestProgram::send) runs one update. Messages from
/// [`Command::message`] wait in a queue until
/// [`drain_messages`](TestProgram::drain_messages). Futures from
/// [`Command::perform`] stay in flight until [`step`](TestProgram::step) picks
/// whichever one finishes first, so a test decides completion order by
/// choosing when each future may finish.
///
/// Subscriptions are reconciled after each update the way [`Program`](crate::Program)
/// reconciles them, so a model that declares one needs a tokio runtime.
/// Timer-driven tests read best under `#[tokio::test(start_paused = true)]`.
///
/// ```rust,ignore
/// use folio_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Page>::new(fetcher);
/// prog.send(Msg::Search("rust".into()));
/// assert_eq!(prog.active_subscriptions(), 1); // debounce armed
/// prog.settle().await;                        // timer, fetch, reply
/// assert_eq!(prog.model().items().len(), 2);
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    queued: Vec<M::Message>,
    in_flight: FuturesUnordered<BoxFuture<'static, M::Message>>,
    from_subscriptions: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionSet<M::Message>,
    quit: bool,
}

impl<M: Model> TestProgram<M> {
    /// Calls [`Model::init`]. Its command is collected but nothing runs until
    /// the test drains or steps.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init) = M::init(flags);
        let (sink, from_subscriptions) = mpsc::unbounded_channel();
        let mut program = Self {
            model,
            queued: Vec::new(),
            in_flight: FuturesUnordered::new(),
            from_subscriptions,
            subscriptions: SubscriptionSet::new(sink),
            quit: false,
        };
        program.collect(init);
        program.reconcile();
        program
    }

    /// Run one update.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
        self.reconcile();
    }

    /// Deliver queued [`Command::message`]s, including any they queue in turn.
    pub fn drain_messages(&mut self) {
        while !self.queued.is_empty() {
            for msg in std::mem::take(&mut self.queued) {
                self.send(msg);
            }
        }
    }

    /// Apply the next message from a finished future or a subscription.
    ///
    /// Returns `false` right away when there is nothing left that could
    /// produce one.
    pub async fn step(&mut self) -> bool {
        self.drain_messages();
        let msg = if self.in_flight.is_empty() {
            if self.subscriptions.active_count() == 0 {
                return false;
            }
            match self.from_subscriptions.recv().await {
                Some(msg) => msg,
                None => return false,
            }
        } else {
            tokio::select! {
                Some(msg) = self.in_flight.next() => msg,
                Some(msg) = self.from_subscriptions.recv() => msg,
            }
        };
        self.send(msg);
        self.drain_messages();
        true
    }

    /// Step until nothing is in flight and no subscription runs. Hangs if the
    /// model keeps an endless subscription declared.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.active_count()
    }

    /// Whether any update returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Abort every subscription.
    pub fn shutdown(&mut self) {
        self.subscriptions.shutdown();
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Direct access for setup. Subscriptions catch up on the next
    /// [`send`](TestProgram::send).
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    fn reconcile(&mut self) {
        self.subscriptions.reconcile(self.model.subscriptions());
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Emit(msg) => self.queued.push(msg),
            CommandInner::Quit => self.quit = true,
            CommandInner::Task(fut) => self.in_flight.push(fut),
            // Ordering inside a sequence is not modelled; its parts run like a batch.
            CommandInner::Batch(cmds) | CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}
