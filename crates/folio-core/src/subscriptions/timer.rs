use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::Duration;
use tokio::time::Instant;

/// Yields its deadline once `duration` has passed, then ends.
///
/// Identified by `(name, key)`. Declaring it again with a new key drops the
/// pending instance and starts a fresh wait; no longer declaring it cancels
/// the wait. Debounced search is built on this:
///
/// ```rust,ignore
/// // generation goes up on every keystroke
/// subscribe(After::new(Duration::from_millis(500), "search").with_key(generation))
///     .map(move |_| Msg::Quiet(generation))
/// ```
#[derive(Debug, Clone)]
pub struct After {
    pub duration: Duration,
    /// Shared by every arming of one logical timer.
    pub name: &'static str,
    pub key: u64,
}

impl After {
    pub fn new(duration: Duration, name: &'static str) -> Self {
        Self {
            duration,
            name,
            key: 0,
        }
    }

    pub fn with_key(self, key: u64) -> Self {
        Self { key, ..self }
    }
}

impl SubscriptionSource for After {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::keyed::<Self>(self.name, self.key)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        // The wait starts when the subscription starts, not when it is declared.
        futures::stream::once(async move {
            let deadline = Instant::now() + self.duration;
            tokio::time::sleep_until(deadline).await;
            deadline
        })
        .boxed()
    }
}
