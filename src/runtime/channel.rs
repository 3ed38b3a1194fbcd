//! Unbounded, never-blocking channel wrappers for side-channel delivery
//!
//! The pipeline is the single writer; an observer is the reader. Writers must
//! never wait on a slow reader, so only the unbounded tokio mpsc flavour is
//! exposed. Ordering is FIFO per sender, which is what the activity log relies on.

use std::time::Duration;
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender,
    error::{SendError, TryRecvError},
};

/// Sender half. Cheap to clone; every clone feeds the same receiver.
pub struct Tx<T>(UnboundedSender<T>);

impl<T: Send + 'static> Tx<T> {
    /// Sends a message without ever waiting.
    /// Fails only when the receiver has been dropped.
    #[inline]
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        self.0.send(value)
    }

    /// Returns true if the receiver has been dropped.
    #[inline]
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.0.is_closed()
    }
}

impl<T> Clone for Tx<T> {
    #[inline]
    fn clone(&self) -> Self {
        Tx(self.0.clone())
    }
}

/// Receiver half.
pub struct Rx<T>(UnboundedReceiver<T>);

impl<T: Send + 'static> Rx<T> {
    /// Receives a message asynchronously.
    /// Returns None when every sender is gone and the buffer is empty.
    #[inline]
    pub async fn recv(&mut self) -> Option<T> {
        self.0.recv().await
    }

    /// Attempts to receive a message immediately without waiting.
    #[inline]
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.0.try_recv()
    }

    /// Receives a message with a timeout.
    /// Returns None if the timeout expires or the channel is closed.
    #[inline]
    pub async fn recv_timeout(&mut self, duration: Duration) -> Option<T> {
        tokio::time::timeout(duration, self.recv()).await.ok().flatten()
    }

    /// Takes everything currently buffered, in send order, without waiting.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(value) = self.0.try_recv() {
            out.push(value);
        }
        out
    }
}

/// Creates an unbounded channel.
///
/// The channel can hold an unlimited number of messages (subject to available memory).
#[inline]
#[must_use]
pub fn unbounded<T>() -> (Tx<T>, Rx<T>) {
    let (s, r) = tokio::sync::mpsc::unbounded_channel();
    (Tx(s), Rx(r))
}

impl<T> std::fmt::Debug for Tx<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tx")
            .field("is_closed", &self.0.is_closed())
            .finish()
    }
}

impl<T> std::fmt::Debug for Rx<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rx").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drain_preserves_send_order() {
        let (tx, mut rx) = unbounded();
        for i in 0..5 {
            tx.send(i).unwrap();
        }
        assert_eq!(rx.drain(), vec![0, 1, 2, 3, 4]);
        assert!(rx.drain().is_empty());
    }

    #[tokio::test]
    async fn send_fails_after_receiver_dropped() {
        let (tx, rx) = unbounded::<u8>();
        drop(rx);
        assert!(tx.is_disconnected());
        assert!(tx.send(1).is_err());
    }
}
