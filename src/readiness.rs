//! One-shot readiness signal.
//!
//! The navigation container mounts asynchronously. [`ReadinessGate`] is
//! resolved exactly once when it does; any number of [`ReadinessSignal`]s
//! handed out before or after can be awaited and complete from then on.
//! Later resolution attempts are no-ops.
//!
//! ```
//! use futures::FutureExt;
//! use stack_navigation::readiness::ReadinessGate;
//!
//! let mut gate = ReadinessGate::new();
//! let signal = gate.signal();
//! assert!(signal.clone().now_or_never().is_none());
//!
//! assert!(gate.resolve());
//! assert!(!gate.resolve());
//! assert!(signal.now_or_never().is_some());
//! ```

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Single-resolution synchronization point.
pub struct ReadinessGate {
    sender: Option<oneshot::Sender<()>>,
    signal: ReadinessSignal,
}

impl ReadinessGate {
    /// Create an unresolved gate.
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            sender: Some(sender),
            signal: ReadinessSignal {
                inner: receiver.shared(),
            },
        }
    }

    /// A future completing once the gate is resolved.
    pub fn signal(&self) -> ReadinessSignal {
        self.signal.clone()
    }

    /// Resolve the gate. Returns `false` if it was already resolved.
    pub fn resolve(&mut self) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // Nobody listening is fine, the signal keeps its own receiver.
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    /// Whether [`resolve`](Self::resolve) has been called.
    pub fn is_resolved(&self) -> bool {
        self.sender.is_none()
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Awaitable side of a [`ReadinessGate`]. Cheap to clone.
///
/// A gate dropped without being resolved (e.g. by a coordinator reset)
/// leaves its signals pending forever.
#[derive(Clone)]
pub struct ReadinessSignal {
    inner: Shared<oneshot::Receiver<()>>,
}

impl ReadinessSignal {
    /// Whether the signal has already completed.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner.peek(), Some(Ok(())))
    }
}

impl Future for ReadinessSignal {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.get_mut().inner.poll_unpin(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(()),
            // Gate dropped unresolved.
            Poll::Ready(Err(oneshot::Canceled)) | Poll::Pending => Poll::Pending,
        }
    }
}

impl fmt::Debug for ReadinessSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessSignal")
            .field("ready", &self.is_ready())
            .finish()
    }
}
