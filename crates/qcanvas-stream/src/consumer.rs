//! The stream consumer state machine.
//!
//! ```text
//! Idle ──run──▶ Connecting ──body opened──▶ Streaming ──end of body──▶ Completed
//!                   │                           │
//!                   └──────── transport error ──┴──────────────────▶ Failed
//! ```
//!
//! Each well-formed frame goes to the sink in arrival order. A frame that does
//! not parse is logged and skipped; the stream keeps going.

use std::fmt;

use futures::{Stream, StreamExt};
use qcanvas_render::{CircuitFrame, QuantumCanvas};
use tracing::{debug, info, warn};

use crate::decoder::EventDecoder;
use crate::error::{StreamError, StreamResult};
use crate::request::RunRequest;
use crate::source::FrameSource;

/// Overlay text while waiting for the first bytes.
pub const CONNECTING_MESSAGE: &str = "Connecting...";

/// Overlay text for a frame.
pub fn epoch_message(frame: &CircuitFrame) -> String {
    format!("Iterating epoch {} / {}", frame.epoch, frame.total_epochs)
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Completed,
    Failed,
}

impl StreamState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamState::Completed | StreamState::Failed)
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamState::Idle => "idle",
            StreamState::Connecting => "connecting",
            StreamState::Streaming => "streaming",
            StreamState::Completed => "completed",
            StreamState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamSummary {
    pub frames_rendered: usize,
    pub lines_skipped: usize,
    pub last_frame: Option<CircuitFrame>,
}

/// Receiver of stream events.
pub trait FrameSink {
    /// The consumer moved to `state`.
    fn state_changed(&mut self, _state: StreamState) {}

    /// The request is being sent.
    fn connecting(&mut self);

    /// A frame arrived. Progress is reported before the circuit is drawn.
    fn frame(&mut self, frame: &CircuitFrame);

    /// The body ended normally.
    fn completed(&mut self, summary: &StreamSummary);

    /// The run failed.
    fn failed(&mut self, error: &StreamError);
}

impl<K: FrameSink + ?Sized> FrameSink for &mut K {
    fn state_changed(&mut self, state: StreamState) {
        (**self).state_changed(state);
    }

    fn connecting(&mut self) {
        (**self).connecting();
    }

    fn frame(&mut self, frame: &CircuitFrame) {
        (**self).frame(frame);
    }

    fn completed(&mut self, summary: &StreamSummary) {
        (**self).completed(summary);
    }

    fn failed(&mut self, error: &StreamError) {
        (**self).failed(error);
    }
}

impl FrameSink for QuantumCanvas {
    fn connecting(&mut self) {
        self.show_overlay(CONNECTING_MESSAGE);
    }

    fn frame(&mut self, frame: &CircuitFrame) {
        self.show_overlay(&epoch_message(frame));
        self.set_progress(frame.epoch, frame.total_epochs);
        self.draw_frame(frame);
    }

    fn completed(&mut self, _summary: &StreamSummary) {
        self.hide_overlay();
    }

    fn failed(&mut self, _error: &StreamError) {
        self.hide_overlay();
    }
}

/// Drives one sink through a run.
#[derive(Debug)]
pub struct StreamConsumer<K> {
    sink: K,
    state: StreamState,
    decoder: EventDecoder,
    summary: StreamSummary,
}

impl<K: FrameSink> StreamConsumer<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            state: StreamState::Idle,
            decoder: EventDecoder::new(),
            summary: StreamSummary::default(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Open `source` with `request` and consume the whole run.
    pub async fn run<S>(
        &mut self,
        source: &S,
        request: &RunRequest,
    ) -> StreamResult<StreamSummary>
    where
        S: FrameSource + ?Sized,
    {
        self.begin();
        info!(source = source.describe(), "starting run");
        match source.open(request).await {
            Ok(stream) => self.drain(stream).await,
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Consume an already-open byte stream. The run enters `Streaming` at once.
    pub async fn consume<S, B>(&mut self, stream: S) -> StreamResult<StreamSummary>
    where
        S: Stream<Item = StreamResult<B>>,
        B: AsRef<[u8]>,
    {
        self.begin();
        self.drain(stream).await
    }

    fn begin(&mut self) {
        self.decoder = EventDecoder::new();
        self.summary = StreamSummary::default();
        self.transition(StreamState::Connecting);
        self.sink.connecting();
    }

    async fn drain<S, B>(&mut self, stream: S) -> StreamResult<StreamSummary>
    where
        S: Stream<Item = StreamResult<B>>,
        B: AsRef<[u8]>,
    {
        self.transition(StreamState::Streaming);
        futures::pin_mut!(stream);
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return Err(self.fail(e)),
            };
            for payload in self.decoder.push(chunk.as_ref()) {
                self.dispatch(&payload);
            }
        }
        if let Some(payload) = self.decoder.finish() {
            self.dispatch(&payload);
        }
        self.summary.lines_skipped += self.decoder.oversized();

        self.transition(StreamState::Completed);
        let summary = std::mem::take(&mut self.summary);
        info!(
            frames = summary.frames_rendered,
            skipped = summary.lines_skipped,
            "run completed"
        );
        self.sink.completed(&summary);
        Ok(summary)
    }

    fn dispatch(&mut self, payload: &str) {
        match CircuitFrame::from_json(payload) {
            Ok(frame) => {
                debug!(epoch = frame.epoch, total = frame.total_epochs, "frame");
                self.sink.frame(&frame);
                self.summary.frames_rendered += 1;
                self.summary.last_frame = Some(frame);
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed frame");
                self.summary.lines_skipped += 1;
            }
        }
    }

    fn fail(&mut self, error: StreamError) -> StreamError {
        warn!(%error, "run failed");
        self.transition(StreamState::Failed);
        self.sink.failed(&error);
        error
    }

    fn transition(&mut self, next: StreamState) {
        debug!(from = %self.state, to = %next, "stream state");
        self.state = next;
        self.sink.state_changed(next);
    }
}
