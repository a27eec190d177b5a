// ── Reactive query streams ──
//
// Subscription types for consuming cached query results from the DataStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to one cached query.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via [`changed()`](Self::changed) or by converting to a
/// `Stream`. The value is `None` until the query has been fetched once.
pub struct QueryStream<T: Send + Sync + 'static> {
    current: Option<Arc<T>>,
    receiver: watch::Receiver<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> QueryStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Option<Arc<T>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> Option<&Arc<T>> {
        self.current.as_ref()
    }

    /// Latest stored value (may have changed since creation).
    pub fn latest(&self) -> Option<Arc<T>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next stored value.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<T>> {
        loop {
            self.receiver.changed().await.ok()?;
            let snap = self.receiver.borrow_and_update().clone();
            if let Some(value) = snap {
                self.current = Some(Arc::clone(&value));
                return Some(value);
            }
        }
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> QueryWatchStream<T> {
        QueryWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields every stored value, starting with the current one if present.
pub struct QueryWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> Stream for QueryWatchStream<T> {
    type Item = Arc<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Some(value))) => return Poll::Ready(Some(value)),
                Poll::Ready(Some(None)) => {}
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn changed_yields_stored_values() {
        let (tx, rx) = watch::channel::<Option<Arc<u32>>>(None);
        let mut stream = QueryStream::new(rx);
        assert!(stream.current().is_none());

        tx.send_replace(Some(Arc::new(3)));
        assert_eq!(stream.changed().await.as_deref(), Some(&3));
        assert_eq!(stream.current().map(|v| **v), Some(3));
    }

    #[tokio::test]
    async fn stream_skips_empty_values() {
        let (tx, rx) = watch::channel::<Option<Arc<&str>>>(None);
        let mut stream = QueryStream::new(rx).into_stream();

        tx.send_replace(Some(Arc::new("jugadores")));
        let first = stream.next().await.expect("value");
        assert_eq!(*first, "jugadores");

        drop(tx);
        assert!(stream.next().await.is_none());
    }
}
