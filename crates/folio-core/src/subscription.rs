use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type StreamFactory<Msg> = Box<dyn FnOnce() -> BoxStream<'static, Msg> + Send>;

/// An event source the runtime keeps running while a model declares it.
///
/// [`Model::subscriptions`](crate::Model::subscriptions) is evaluated after
/// every update and the result is compared by [`SubscriptionId`]: new ids are
/// started, missing ids are aborted, and ids seen before are left alone.
/// A model re-arms a timer by declaring it under a new id.
///
/// The underlying stream is only built when the subscription actually
/// starts, so declaring an already running subscription again costs nothing.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    make: StreamFactory<Msg>,
}

/// What the runtime compares when reconciling subscriptions.
///
/// The source type plus a hashed key, so two sources of the same type only
/// collide when their keys match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    source: TypeId,
    key: u64,
}

impl SubscriptionId {
    /// The one instance of source type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            source: TypeId::of::<T>(),
            key: 0,
        }
    }

    /// A named instance of source type `T`.
    pub fn named<T: 'static>(name: &str) -> Self {
        Self {
            source: TypeId::of::<T>(),
            key: hash_of(&name),
        }
    }

    /// Instance `key` of the source `name`. Bumping the key replaces the
    /// running instance.
    pub fn keyed<T: 'static>(name: &str, key: u64) -> Self {
        Self {
            source: TypeId::of::<T>(),
            key: hash_of(&(name, key)),
        }
    }
}

fn hash_of(value: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// A value that knows its identity and can be turned into a stream.
pub trait SubscriptionSource: Send + 'static {
    type Output: Send + 'static;

    fn id(&self) -> SubscriptionId;

    /// Called once, when the subscription starts.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Turn a [`SubscriptionSource`] into a [`Subscription`].
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    Subscription {
        id: source.id(),
        make: Box::new(move || source.stream()),
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Wrap a ready-made stream.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            make: Box::new(move || stream),
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Lift a child component's subscription into the parent's message type.
    /// The id is unchanged.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let make = self.make;
        Subscription {
            id: self.id,
            make: Box::new(move || make().map(f).boxed()),
        }
    }

    /// Map each item, dropping those for which `f` returns `None`.
    pub fn filter_map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> Option<NewMsg> + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let make = self.make;
        Subscription {
            id: self.id,
            make: Box::new(move || {
                make()
                    .filter_map(move |msg| futures::future::ready(f(msg)))
                    .boxed()
            }),
        }
    }

    // Pumps the stream into the runtime channel until either side ends.
    fn start(self, sink: mpsc::UnboundedSender<Msg>) -> AbortHandle {
        let make = self.make;
        let task = tokio::spawn(async move {
            let mut stream = make();
            while let Some(msg) = stream.next().await {
                if sink.send(msg).is_err() {
                    break;
                }
            }
        });
        task.abort_handle()
    }
}

/// The running subscriptions of one program.
pub(crate) struct SubscriptionSet<Msg: Send + 'static> {
    running: HashMap<SubscriptionId, AbortHandle>,
    sink: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionSet<Msg> {
    pub fn new(sink: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            running: HashMap::new(),
            sink,
        }
    }

    /// Make the running set match `declared`.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<_, _> = declared
            .into_iter()
            .map(|sub| (sub.id.clone(), sub))
            .collect();

        self.running.retain(|id, task| {
            // Still declared: keep it running and forget the new copy.
            if declared.remove(id).is_some() {
                return true;
            }
            tracing::trace!(?id, "stopping subscription");
            task.abort();
            false
        });

        for (id, sub) in declared {
            tracing::trace!(?id, "starting subscription");
            let task = sub.start(self.sink.clone());
            self.running.insert(id, task);
        }
    }

    pub fn shutdown(&mut self) {
        for task in self.running.values() {
            task.abort();
        }
        self.running.clear();
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }
}

impl<Msg: Send + 'static> Drop for SubscriptionSet<Msg> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
