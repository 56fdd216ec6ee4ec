// Trait for the realtime metrics push channel
use crate::domain::telemetry::MetricSample;
use crate::infrastructure::error::FeedError;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Decoded messages of one push-channel connection, in arrival order.
///
/// An `Err` item is a single bad message; the stream keeps going after it.
/// The stream ends when the connection closes, and dropping it closes the
/// connection.
pub type SampleStream = BoxStream<'static, Result<MetricSample, FeedError>>;

#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    async fn subscribe(&self) -> Result<SampleStream, FeedError>;
}
