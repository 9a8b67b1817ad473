use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionSet;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Errors that end [`Program::run`] early.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Installing or awaiting the Ctrl+C handler failed.
    #[error("signal handling failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Knobs for a [`Program`]. Start from the default and override fields:
///
/// ```rust,ignore
/// let options = ProgramOptions {
///     handle_signals: false,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Stop on Ctrl+C (default: true).
    pub handle_signals: bool,
    /// Most queued messages handled in one go before the loop checks for
    /// signals and kills again (default: 100, minimum 1).
    pub batch_limit: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            handle_signals: true,
            batch_limit: 100,
        }
    }
}

/// Controls a [`Program`] from outside its loop. Clone freely.
#[derive(Clone)]
pub struct ProgramHandle<Msg: Send + 'static> {
    inbox: mpsc::UnboundedSender<Msg>,
    kill: Arc<watch::Sender<bool>>,
}

impl<Msg: Send + 'static> ProgramHandle<Msg> {
    /// Queue `msg` for `update`. Dropped if the program has already exited.
    pub fn send(&self, msg: Msg) {
        let _ = self.inbox.send(msg);
    }

    /// Stop the program without handling the messages still queued.
    pub fn kill(&self) {
        self.kill.send_replace(true);
    }
}

type MessageFilter<Msg> = Box<dyn Fn(Msg) -> Option<Msg> + Send>;

/// Owns a [`Model`] and drives it until it quits.
///
/// `update` only ever runs on the task awaiting [`run`](Program::run), one
/// message at a time. Futures from [`Command::perform`] run on spawned tasks
/// and report back through the inbox, so their results interleave with
/// other messages in the order they finish.
///
/// ```rust,ignore
/// let model = Program::<ArticleList>::new(client).run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    inbox_tx: mpsc::UnboundedSender<M::Message>,
    inbox: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionSet<M::Message>,
    options: ProgramOptions,
    quitting: bool,
    kill_tx: Arc<watch::Sender<bool>>,
    kill_rx: watch::Receiver<bool>,
    filter: Option<MessageFilter<M::Message>>,
    pending_init: Option<Command<M::Message>>,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Self {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Calls [`Model::init`] right away. Its command is started by
    /// [`run`](Program::run).
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Self {
        let (model, init) = M::init(flags);
        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        Self {
            model,
            subscriptions: SubscriptionSet::new(inbox_tx.clone()),
            inbox_tx,
            inbox,
            options,
            quitting: false,
            kill_tx: Arc::new(kill_tx),
            kill_rx,
            filter: None,
            pending_init: Some(init),
        }
    }

    /// Pass every message through `filter` before `update`. Returning `None`
    /// drops the message.
    pub fn with_filter(
        mut self,
        filter: impl Fn(M::Message) -> Option<M::Message> + Send + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn handle(&self) -> ProgramHandle<M::Message> {
        ProgramHandle {
            inbox: self.inbox_tx.clone(),
            kill: self.kill_tx.clone(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run until the model quits, the program is killed, or Ctrl+C arrives,
    /// then return the final model.
    ///
    /// Subscriptions are aborted before this returns, so no timer fires
    /// against the returned model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        tracing::info!("program started");
        if let Some(init) = self.pending_init.take() {
            self.dispatch(init);
        }
        self.subscriptions.reconcile(self.model.subscriptions());

        let outcome = self.event_loop().await;
        tracing::info!("program shutting down");
        self.subscriptions.shutdown();
        outcome.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        let batch_limit = self.options.batch_limit.max(1);
        while !self.quitting {
            if *self.kill_rx.borrow_and_update() {
                tracing::debug!("program killed");
                break;
            }
            tokio::select! {
                biased;

                _ = self.kill_rx.changed() => {}

                signal = tokio::signal::ctrl_c(), if self.options.handle_signals => {
                    signal?;
                    tracing::debug!("received ctrl+c");
                    break;
                }

                Some(msg) = self.inbox.recv() => {
                    self.handle_message(msg);
                    for _ in 1..batch_limit {
                        if self.quitting {
                            break;
                        }
                        let Ok(msg) = self.inbox.try_recv() else { break };
                        self.handle_message(msg);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_message(&mut self, msg: M::Message) {
        let msg = match &self.filter {
            Some(filter) => match filter(msg) {
                Some(msg) => msg,
                None => return,
            },
            None => msg,
        };
        let cmd = self.model.update(msg);
        self.dispatch(cmd);
        self.subscriptions.reconcile(self.model.subscriptions());
    }

    fn dispatch(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Emit(msg) => {
                let _ = self.inbox_tx.send(msg);
            }
            CommandInner::Quit => self.quitting = true,
            CommandInner::Task(fut) => {
                let inbox = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let _ = inbox.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => cmds.into_iter().for_each(|cmd| self.dispatch(cmd)),
            CommandInner::Sequence(cmds) => {
                let inbox = self.inbox_tx.clone();
                tokio::spawn(async move {
                    for cmd in cmds {
                        run_in_order(cmd, &inbox).await;
                    }
                });
            }
        }
    }
}

/// Drive one part of a [`Command::sequence`] to completion.
fn run_in_order<'a, Msg: Send + 'static>(
    cmd: Command<Msg>,
    inbox: &'a mpsc::UnboundedSender<Msg>,
) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Emit(msg) => {
                let _ = inbox.send(msg);
            }
            CommandInner::Quit => tracing::warn!("quit inside a command sequence is ignored"),
            CommandInner::Task(fut) => {
                let _ = inbox.send(fut.await);
            }
            // The parts of a nested batch still run concurrently with each other.
            CommandInner::Batch(cmds) => {
                futures::future::join_all(cmds.into_iter().map(|cmd| run_in_order(cmd, inbox)))
                    .await;
            }
            CommandInner::Sequence(cmds) => {
                for cmd in cmds {
                    run_in_order(cmd, inbox).await;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Chain {
        seen: Vec<u32>,
    }

    #[derive(Debug)]
    enum ChainMsg {
        Step(u32),
        Done,
    }

    impl Model for Chain {
        type Message = ChainMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<ChainMsg>) {
            let slow = Command::perform(
                async {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    1
                },
                ChainMsg::Step,
            );
            let fast = Command::perform(async { 2 }, ChainMsg::Step);
            let cmd = Command::sequence([slow, fast, Command::message(ChainMsg::Done)]);
            (Chain { seen: vec![] }, cmd)
        }

        fn update(&mut self, msg: ChainMsg) -> Command<ChainMsg> {
            match msg {
                ChainMsg::Step(n) => {
                    self.seen.push(n);
                    Command::none()
                }
                ChainMsg::Done => Command::quit(),
            }
        }
    }

    fn without_signals() -> ProgramOptions {
        ProgramOptions {
            handle_signals: false,
            ..ProgramOptions::default()
        }
    }

    #[tokio::test]
    async fn sequence_delivers_in_order_then_quits() {
        let model = Program::<Chain>::with_options((), without_signals())
            .run()
            .await
            .expect("program runs");
        assert_eq!(model.seen, vec![1, 2]);
    }

    struct Inbox {
        received: Vec<u32>,
    }

    impl Model for Inbox {
        type Message = u32;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<u32>) {
            (Inbox { received: vec![] }, Command::none())
        }

        fn update(&mut self, msg: u32) -> Command<u32> {
            self.received.push(msg);
            if msg == 0 {
                Command::quit()
            } else {
                Command::none()
            }
        }
    }

    #[tokio::test]
    async fn handle_injects_messages_and_filter_drops() {
        let program = Program::<Inbox>::with_options((), without_signals())
            .with_filter(|n| (n != 7).then_some(n));
        let handle = program.handle();
        handle.send(3);
        handle.send(7);
        handle.send(0);
        handle.send(4);
        let model = program.run().await.expect("program runs");
        assert_eq!(model.received, vec![3, 0]);
    }

    #[tokio::test]
    async fn kill_stops_idle_program() {
        let program = Program::<Inbox>::with_options((), without_signals());
        let handle = program.handle();
        let task = tokio::spawn(program.run());
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.kill();
        let model = task.await.expect("join").expect("program runs");
        assert!(model.received.is_empty());
    }

    #[tokio::test]
    async fn kill_before_run_skips_queued_messages() {
        let program = Program::<Inbox>::with_options((), without_signals());
        let handle = program.handle();
        handle.send(5);
        handle.kill();
        let model = program.run().await.expect("program runs");
        assert!(model.received.is_empty());
    }
}
