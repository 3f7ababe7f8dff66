use std::io::Write;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use crate::foundation::error::{CountdownError, CountdownResult};

/// Destination for encoded container bytes.
///
/// Backpressure contract: `accept` returns only once the bytes have been taken by the consumer
/// (written, queued within a bounded buffer, ...). Callers do not produce the next frame until
/// then. An error means the consumer is gone; the stream must be abandoned.
pub trait ByteSink: Send {
    /// Hand over one chunk of bytes, blocking while the consumer is saturated.
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()>;
    /// Signal end of stream. Further `accept` calls fail.
    fn close(&mut self) -> CountdownResult<()>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()> {
        (**self).accept(bytes)
    }

    fn close(&mut self) -> CountdownResult<()> {
        (**self).close()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for Box<S> {
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()> {
        (**self).accept(bytes)
    }

    fn close(&mut self) -> CountdownResult<()> {
        (**self).close()
    }
}

/// In-memory sink for tests and callers that want the whole file.
#[derive(Debug, Default)]
pub struct InMemorySink {
    bytes: Vec<u8>,
    chunks: usize,
    closed: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of non-empty chunks received.
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Return `true` once `close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take the received bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl ByteSink for InMemorySink {
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()> {
        if self.closed {
            return Err(CountdownError::sink("in-memory sink is closed"));
        }
        if !bytes.is_empty() {
            self.bytes.extend_from_slice(bytes);
            self.chunks += 1;
        }
        Ok(())
    }

    fn close(&mut self) -> CountdownResult<()> {
        self.closed = true;
        Ok(())
    }
}

/// Sink over any blocking [`Write`] (files, stdout, sockets).
pub struct WriterSink<W> {
    writer: W,
    closed: bool,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            closed: false,
        }
    }

    /// Return `true` once `close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Recover the writer (flushed, if `close` was called).
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ByteSink for WriterSink<W> {
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()> {
        if self.closed {
            return Err(CountdownError::sink("writer sink is closed"));
        }
        self.writer
            .write_all(bytes)
            .map_err(|e| CountdownError::sink(format!("failed to write output: {e}")))
    }

    fn close(&mut self) -> CountdownResult<()> {
        if self.closed {
            return Ok(());
        }
        self.writer
            .flush()
            .map_err(|e| CountdownError::sink(format!("failed to flush output: {e}")))?;
        self.closed = true;
        Ok(())
    }
}

/// Sink feeding a bounded channel of byte chunks, e.g. a streaming HTTP response body.
///
/// A full channel blocks the producer; a dropped receiver fails the next `accept`.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Option<SyncSender<Vec<u8>>>,
}

impl ChannelSink {
    /// Create a sink and its receiving end holding at most `capacity` chunks in flight.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = sync_channel(capacity);
        (Self { tx: Some(tx) }, rx)
    }
}

impl ByteSink for ChannelSink {
    fn accept(&mut self, bytes: &[u8]) -> CountdownResult<()> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(CountdownError::sink("channel sink is closed"));
        };
        if bytes.is_empty() {
            return Ok(());
        }
        tx.send(bytes.to_vec())
            .map_err(|_| CountdownError::sink("receiver disconnected"))
    }

    fn close(&mut self) -> CountdownResult<()> {
        drop(self.tx.take());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
