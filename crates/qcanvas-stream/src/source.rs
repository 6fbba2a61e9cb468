//! Byte sources for the stream consumer.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use crate::error::{StreamError, StreamResult};
use crate::request::RunRequest;

/// Raw body chunks as they come off the wire.
pub type ByteStream = Pin<Box<dyn Stream<Item = StreamResult<Vec<u8>>> + Send>>;

/// Something that can start a run and hand back its event stream.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> &str;

    /// Start a run and return the response body as a byte stream.
    async fn open(&self, request: &RunRequest) -> StreamResult<ByteStream>;
}

/// Streams frames from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
}

impl HttpSource {
    /// Build a source for `endpoint`.
    ///
    /// Only the connect phase is bounded; a run may stream for as long as the
    /// server keeps sending.
    pub fn new(endpoint: impl Into<String>) -> StreamResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("qcanvas/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FrameSource for HttpSource {
    fn describe(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn open(&self, request: &RunRequest) -> StreamResult<ByteStream> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%status, "stream opened");
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(StreamError::from));
        Ok(Box::pin(stream))
    }
}

/// A source that replays fixed chunks.
///
/// Useful for driving a consumer without a server.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    chunks: Vec<Vec<u8>>,
}

impl ReplaySource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl FrameSource for ReplaySource {
    fn describe(&self) -> &str {
        "replay"
    }

    async fn open(&self, _request: &RunRequest) -> StreamResult<ByteStream> {
        let chunks: Vec<StreamResult<Vec<u8>>> = self.chunks.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_keeps_endpoint() {
        let source = HttpSource::new("http://127.0.0.1:5000/api/run-algorithm").unwrap();
        assert_eq!(source.endpoint(), "http://127.0.0.1:5000/api/run-algorithm");
        assert_eq!(source.describe(), source.endpoint());
    }

    #[tokio::test]
    async fn test_replay_source_yields_chunks() {
        let source = ReplaySource::new(["data: 1\n", "data: 2\n"]);
        let chunks: Vec<_> = source
            .open(&RunRequest::default())
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap(), b"data: 1\n");
    }
}
