//! Chunk buffering and segment flushing.

use tracing::debug;

use traction_core::types::{SegmentId, StreamChunk, Timestamp, TranscriptSegment};

/// Buffers raw stream fragments into transcript segments.
///
/// A segment flushes when a fragment arrives after a silence gap longer
/// than `flush_gap_ms` (the late fragment starts the next buffer), or
/// immediately once the buffer grows past `flush_max_chars` (the
/// triggering fragment is included). Speaker metadata is resolved from the
/// first fragment of each buffer.
#[derive(Debug)]
pub struct ChunkAggregator {
    flush_gap_ms: i64,
    flush_max_chars: usize,
    buffer: String,
    started_at: Option<Timestamp>,
    is_input: bool,
    device: String,
}

impl ChunkAggregator {
    pub fn new(flush_gap_ms: u64, flush_max_chars: usize) -> Self {
        Self {
            flush_gap_ms: flush_gap_ms as i64,
            flush_max_chars,
            buffer: String::new(),
            started_at: None,
            is_input: false,
            device: String::new(),
        }
    }

    /// Feed one fragment into the buffer, returning any segments it caused
    /// to flush.
    pub fn push(&mut self, chunk: &StreamChunk, now: Timestamp) -> Vec<TranscriptSegment> {
        let mut flushed = Vec::new();

        if let Some(started) = self.started_at {
            if now.0 - started.0 > self.flush_gap_ms {
                if let Some(segment) = self.flush() {
                    flushed.push(segment);
                }
            }
        }

        if !chunk.text.is_empty() {
            if self.buffer.is_empty() {
                self.started_at = Some(now);
                self.is_input = chunk.is_input.unwrap_or(false);
                self.device = chunk
                    .device
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
            }
            self.buffer.push_str(&chunk.text);
        }

        if self.buffer.len() > self.flush_max_chars {
            if let Some(segment) = self.flush() {
                flushed.push(segment);
            }
        }

        flushed
    }

    /// Drain whatever remains in the buffer as a stop-time segment.
    ///
    /// The stop path has no fragment context left, so the segment is
    /// stamped with `now` and default speaker metadata.
    pub fn force_flush(&mut self, now: Timestamp) -> Option<TranscriptSegment> {
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        self.started_at = None;
        if text.is_empty() {
            return None;
        }
        debug!(chars = text.len(), "Flushing remainder at stop");
        Some(TranscriptSegment {
            id: SegmentId::new(),
            text,
            captured_at: now,
            is_local_speaker: false,
            device_label: "unknown".to_string(),
        })
    }

    /// Number of characters currently buffered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Flush the buffer as a segment stamped with the buffer's start time.
    ///
    /// A buffer holding only whitespace is kept intact rather than emitted,
    /// so later fragments can still join it.
    fn flush(&mut self) -> Option<TranscriptSegment> {
        let text = self.buffer.trim();
        if text.is_empty() {
            return None;
        }
        let captured_at = self.started_at.take()?;
        let segment = TranscriptSegment {
            id: SegmentId::new(),
            text: text.to_string(),
            captured_at,
            is_local_speaker: self.is_input,
            device_label: self.device.clone(),
        };
        debug!(chars = segment.text.len(), "Flushed segment");
        self.buffer.clear();
        Some(segment)
    }
}
