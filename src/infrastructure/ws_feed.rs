// Realtime metric feed over WebSocket
use crate::application::realtime_feed::{RealtimeFeed, SampleStream};
use crate::domain::telemetry::MetricSample;
use crate::infrastructure::error::FeedError;
use crate::infrastructure::wire;
use async_trait::async_trait;
use futures::stream::Stream;
use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

#[derive(Debug, Clone)]
pub struct WebSocketFeed {
    url: String,
}

impl WebSocketFeed {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl RealtimeFeed for WebSocketFeed {
    async fn subscribe(&self) -> Result<SampleStream, FeedError> {
        let (socket, response) =
            connect_async(self.url.as_str())
                .await
                .map_err(|source| FeedError::Connect {
                    url: self.url.clone(),
                    source,
                })?;
        tracing::debug!(
            "Realtime feed {} upgraded with status {}",
            self.url,
            response.status()
        );

        // The client never writes; the socket goes away with the stream.
        Ok(decode_frames(socket).boxed())
    }
}

/// Turn raw WebSocket frames into samples. Control frames are skipped, a
/// close frame or transport error ends the stream.
fn decode_frames<S>(
    mut frames: S,
) -> impl Stream<Item = Result<MetricSample, FeedError>> + Send + 'static
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin + Send + 'static,
{
    async_stream::stream! {
        while let Some(frame) = frames.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    yield wire::decode_sample(text.as_bytes()).map_err(FeedError::from);
                }
                Ok(Message::Binary(data)) => {
                    yield wire::decode_sample(&data).map_err(FeedError::from);
                }
                Ok(Message::Close(frame)) => {
                    tracing::debug!("Realtime feed closed: {:?}", frame);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    yield Err(FeedError::Transport(e));
                    break;
                }
            }
        }
    }
}
