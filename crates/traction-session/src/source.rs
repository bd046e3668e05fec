//! Chunk sources feeding a session.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::SessionError;
use traction_core::types::StreamChunk;

/// Asynchronous supplier of transcription chunks.
#[async_trait]
pub trait ChunkSource: Send {
    /// Next chunk, or `None` once the stream has ended.
    async fn next_chunk(&mut self) -> Result<Option<StreamChunk>, SessionError>;

    /// Ask the source to stop producing and release its resources.
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// Source backed by a tokio mpsc channel.
///
/// Producers hold the sender half; dropping every sender ends the stream
/// naturally.
pub struct ChannelSource {
    rx: mpsc::Receiver<StreamChunk>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<StreamChunk>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl ChunkSource for ChannelSource {
    async fn next_chunk(&mut self) -> Result<Option<StreamChunk>, SessionError> {
        Ok(self.rx.recv().await)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.rx.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_source_yields_sent_chunks() {
        let (tx, rx) = mpsc::channel(8);
        let mut source = ChannelSource::new(rx);
        tx.send(StreamChunk::new("hello")).await.unwrap();

        let chunk = source.next_chunk().await.unwrap().unwrap();
        assert_eq!(chunk.text, "hello");
    }

    #[tokio::test]
    async fn test_channel_source_ends_when_senders_drop() {
        let (tx, rx) = mpsc::channel::<StreamChunk>(8);
        let mut source = ChannelSource::new(rx);
        drop(tx);
        assert!(source.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let (tx, rx) = mpsc::channel(8);
        let mut source = ChannelSource::new(rx);
        tx.send(StreamChunk::new("buffered")).await.unwrap();
        source.close().await.unwrap();

        // Already-buffered chunks still come through after close
        assert!(source.next_chunk().await.unwrap().is_some());
        assert!(source.next_chunk().await.unwrap().is_none());
    }
}
