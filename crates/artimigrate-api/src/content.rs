//! Streamed node content

use std::fmt;
use std::pin::Pin;
use std::task::{
    Context,
    Poll,
};
use std::time::Duration;

use bytes::{
    Bytes,
    BytesMut,
};
use futures::stream::{
    self,
    BoxStream,
};
use futures::{
    Stream,
    StreamExt,
};

use crate::error::{
    MigrationError,
    MigrationResult,
};

/// Chunk size used when the configuration does not override it
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

pub type ByteStream = BoxStream<'static, MigrationResult<Bytes>>;

/// Owned read handle over a node's binary content.
///
/// The underlying connection is released when the handle is dropped, which
/// happens exactly once whether the upload consumed it or failed early.
pub struct ContentStream {
    inner: ByteStream,
}

impl ContentStream {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = MigrationResult<Bytes>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// Fails the stream when no chunk arrives within `idle`. The timer
    /// restarts after every chunk, so a slow transfer that keeps making
    /// progress is never cut off.
    pub fn with_idle_timeout(self, idle: Duration) -> Self {
        let stream = stream::unfold(Some(self.inner), move |state| async move {
            let mut inner = state?;
            match tokio::time::timeout(idle, inner.next()).await {
                Ok(Some(item)) => Some((item, Some(inner))),
                Ok(None) => None,
                Err(_) => Some((
                    Err(MigrationError::Network(format!(
                        "no data received for {idle:?}"
                    ))),
                    None,
                )),
            }
        });
        Self::new(stream)
    }

    /// Re-slices the content into chunks of exactly `chunk_size` bytes (the
    /// last chunk may be shorter)
    pub fn chunked(self, chunk_size: usize) -> ByteStream {
        let chunk_size = chunk_size.max(1);
        let state = Rechunk {
            inner: self.inner,
            buffer: BytesMut::with_capacity(chunk_size),
            chunk_size,
            exhausted: false,
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if state.buffer.len() >= state.chunk_size {
                    let chunk = state.buffer.split_to(state.chunk_size).freeze();
                    return Some((Ok(chunk), state));
                }
                if state.exhausted {
                    if state.buffer.is_empty() {
                        return None;
                    }
                    let rest = state.buffer.split().freeze();
                    return Some((Ok(rest), state));
                }
                match state.inner.next().await {
                    Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        state.exhausted = true;
                        state.buffer.clear();
                        return Some((Err(e), state));
                    }
                    None => state.exhausted = true,
                }
            }
        })
        .boxed()
    }
}

struct Rechunk {
    inner: ByteStream,
    buffer: BytesMut,
    chunk_size: usize,
    exhausted: bool,
}

impl Stream for ContentStream {
    type Item = MigrationResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream").finish_non_exhaustive()
    }
}
