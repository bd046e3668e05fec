//! Streaming session orchestration.
//!
//! A `Session` owns the running transcript, the segment history, the dedup
//! ledger, and the extracted items for one stream. It consumes chunks from
//! a `ChunkSource`, lets the aggregator and scheduler decide segment and
//! pass boundaries, and guarantees one final extraction pass at stop.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use traction_core::config::{ExtractionConfig, SessionConfig};
use traction_core::types::{ActionItem, SessionId, StreamChunk, Timestamp, TranscriptSegment};
use traction_extract::{DedupLedger, Extractor};

use crate::aggregator::ChunkAggregator;
use crate::error::SessionError;
use crate::scheduler::PassScheduler;
use crate::source::ChunkSource;
use crate::state::{SessionState, StateMachine};

/// Mutable per-stream context: everything that resets when a new stream
/// starts.
#[derive(Debug, Default)]
pub struct SessionContext {
    /// Full running transcript, including text not yet flushed to a segment.
    pub transcript: String,
    /// Ordered, append-only flushed segments.
    pub history: Vec<TranscriptSegment>,
    /// Texts already emitted this stream.
    pub ledger: DedupLedger,
    /// Items extracted so far, in emission order.
    pub items: Vec<ActionItem>,
}

impl SessionContext {
    fn clear(&mut self) {
        self.transcript.clear();
        self.history.clear();
        self.ledger.clear();
        self.items.clear();
    }
}

/// Drives one transcript stream through its lifecycle.
///
/// All interior state sits behind mutexes so a `Session` can be shared
/// between the stream loop and observers via `Arc`.
pub struct Session {
    id: SessionId,
    state: StateMachine,
    ctx: Mutex<SessionContext>,
    aggregator: Mutex<ChunkAggregator>,
    extractor: Extractor,
    scheduler: PassScheduler,
    stop_notify: Notify,
    stop_timeout: Duration,
}

impl Session {
    pub fn new(session_cfg: &SessionConfig, extraction_cfg: &ExtractionConfig) -> Self {
        Self {
            id: SessionId::new(),
            state: StateMachine::new(),
            ctx: Mutex::new(SessionContext::default()),
            aggregator: Mutex::new(ChunkAggregator::new(
                session_cfg.flush_gap_ms,
                session_cfg.flush_max_chars,
            )),
            extractor: Extractor::new(),
            scheduler: PassScheduler::new(
                extraction_cfg.min_transcript_chars,
                extraction_cfg.trigger_modulus,
                extraction_cfg.trigger_window,
            ),
            stop_notify: Notify::new(),
            stop_timeout: Duration::from_secs(session_cfg.stop_timeout_secs),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    /// Consume chunks from `source` until it ends or a stop is requested,
    /// then run the final extraction pass and return to Idle.
    ///
    /// A source error abandons the stream: the state is forced back to Idle
    /// without a final pass, and the error is returned.
    pub async fn run(&self, mut source: impl ChunkSource) -> Result<(), SessionError> {
        self.begin()?;
        info!(session = %self.id, "Session streaming");

        loop {
            tokio::select! {
                _ = self.stop_notify.notified() => {
                    self.state.transition(SessionState::Stopping)?;
                    let drained = tokio::time::timeout(self.stop_timeout, async {
                        source.close().await?;
                        while let Some(chunk) = source.next_chunk().await? {
                            self.ingest(&chunk, Timestamp::now())?;
                        }
                        Ok::<(), SessionError>(())
                    })
                    .await;
                    match drained {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => warn!(%err, "Error draining source at stop"),
                        Err(_) => {
                            warn!(
                                timeout_secs = self.stop_timeout.as_secs(),
                                "Source did not drain in time; forcing session to Idle"
                            );
                            self.state.reset();
                            return Ok(());
                        }
                    }
                    break;
                }
                chunk = source.next_chunk() => {
                    match chunk {
                        Ok(Some(chunk)) => {
                            self.ingest(&chunk, Timestamp::now())?;
                        }
                        Ok(None) => break,
                        Err(err) => {
                            error!(%err, "Stream error; abandoning session");
                            self.state.reset();
                            return Err(err);
                        }
                    }
                }
            }
        }

        self.finish(Timestamp::now())
    }

    /// Request an orderly stop of a running stream. No-op unless streaming.
    pub fn stop(&self) {
        if self.state.current() == SessionState::Streaming {
            self.stop_notify.notify_one();
        }
    }

    /// Abandon the stream immediately, skipping the drain and final pass.
    pub fn force_stop(&self) {
        self.state.reset();
    }

    /// Discard the transcript, history, ledger, and extracted items.
    pub fn clear(&self) {
        self.ctx.lock().expect("Session context mutex poisoned").clear();
        info!(session = %self.id, "Session cleared");
    }

    /// Snapshot of all items extracted so far.
    pub fn items(&self) -> Vec<ActionItem> {
        self.ctx
            .lock()
            .expect("Session context mutex poisoned")
            .items
            .clone()
    }

    /// Drain the extracted items, leaving the session's list empty.
    pub fn take_items(&self) -> Vec<ActionItem> {
        std::mem::take(
            &mut self
                .ctx
                .lock()
                .expect("Session context mutex poisoned")
                .items,
        )
    }

    /// Snapshot of the flushed segment history.
    pub fn history(&self) -> Vec<TranscriptSegment> {
        self.ctx
            .lock()
            .expect("Session context mutex poisoned")
            .history
            .clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.ctx
            .lock()
            .expect("Session context mutex poisoned")
            .transcript
            .len()
    }

    /// Move to Streaming, discarding any results from the previous stream.
    fn begin(&self) -> Result<(), SessionError> {
        if self.state.current() != SessionState::Idle {
            warn!(state = %self.state.current(), "Starting over a live session");
            self.state.reset();
        }
        self.state.transition(SessionState::Streaming)?;
        self.ctx.lock().expect("Session context mutex poisoned").clear();
        Ok(())
    }

    /// Feed one chunk: extend the transcript, let the aggregator flush, and
    /// run an extraction pass when the scheduler says so.
    ///
    /// Returns the items this chunk's pass emitted, which is usually empty.
    fn ingest(
        &self,
        chunk: &StreamChunk,
        now: Timestamp,
    ) -> Result<Vec<ActionItem>, SessionError> {
        if self.state.current() == SessionState::Idle {
            return Err(SessionError::NotStreaming);
        }

        let mut ctx = self.ctx.lock().expect("Session context mutex poisoned");
        ctx.transcript.push_str(&chunk.text);

        let flushed = self
            .aggregator
            .lock()
            .expect("Aggregator mutex poisoned")
            .push(chunk, now);
        ctx.history.extend(flushed);

        if self.scheduler.should_trigger(ctx.transcript.len()) {
            let emitted = self.run_pass(&mut ctx, now);
            return Ok(emitted);
        }
        Ok(Vec::new())
    }

    /// Flush the buffered remainder, run the final pass, and return to Idle.
    fn finish(&self, now: Timestamp) -> Result<(), SessionError> {
        if self.state.current() == SessionState::Streaming {
            self.state.transition(SessionState::Stopping)?;
        }

        let mut ctx = self.ctx.lock().expect("Session context mutex poisoned");
        let remainder = self
            .aggregator
            .lock()
            .expect("Aggregator mutex poisoned")
            .force_flush(now);
        if let Some(segment) = remainder {
            ctx.history.push(segment);
        }

        let emitted = self.run_pass(&mut ctx, now);
        info!(
            session = %self.id,
            new_items = emitted.len(),
            total_items = ctx.items.len(),
            "Final extraction pass complete"
        );
        drop(ctx);

        self.state.transition(SessionState::Idle)
    }

    /// Run one extraction pass over the current transcript and record the
    /// emitted items.
    fn run_pass(&self, ctx: &mut SessionContext, now: Timestamp) -> Vec<ActionItem> {
        let today = now.to_datetime().date_naive();
        let SessionContext {
            transcript,
            ledger,
            items,
            ..
        } = ctx;
        let emitted = self.extractor.extract(transcript, today, ledger);
        if !emitted.is_empty() {
            debug!(count = emitted.len(), "Extraction pass emitted items");
        }
        items.extend(emitted.iter().cloned());
        emitted
    }
}
