use crate::subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;

/// Newline-delimited text on stdin, without the trailing newline.
///
/// End of input or a read error ends the stream.
pub struct InputLines;

impl SubscriptionSource for InputLines {
    type Output = String;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::of::<Self>()
    }

    fn stream(self) -> BoxStream<'static, String> {
        LinesStream::new(BufReader::new(tokio::io::stdin()).lines())
            .take_while(|line| futures::future::ready(line.is_ok()))
            .filter_map(|line| futures::future::ready(line.ok()))
            .boxed()
    }
}

/// Stdin lines turned into messages by `map`. Lines mapped to `None` are
/// skipped.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![input_lines(|line| match line.as_str() {
///         ":q" => Some(Msg::Quit),
///         text => Some(Msg::Search(text.to_string())),
///     })]
/// }
/// ```
pub fn input_lines<Msg: Send + 'static>(
    map: impl Fn(String) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    subscribe(InputLines).filter_map(map)
}
