//! Single-owner background task with cooperative cancellation
//!
//! An [`AsyncTask`] holds at most one outstanding worker thread. Dropping it
//! requests cancellation and blocks until the worker has returned, so no
//! worker ever outlives its owner.

use crate::error::TaskError;
use log::{debug, error};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Cooperative cancellation signal. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Slot for one background computation producing a `T`.
///
/// Not `Clone`: exactly one owner can join a given worker.
#[derive(Debug)]
pub struct AsyncTask<T> {
    name: &'static str,
    handle: Option<JoinHandle<T>>,
    cancel: CancelToken,
}

impl<T: Send + 'static> AsyncTask<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handle: None,
            cancel: CancelToken::new(),
        }
    }

    /// Spawn `work` on its own thread. Fails with
    /// [`TaskError::AlreadyRunning`] while a previous worker has not been
    /// joined, even if it already returned.
    pub fn start<F>(&mut self, work: F) -> Result<(), TaskError>
    where
        F: FnOnce(CancelToken) -> T + Send + 'static,
    {
        if self.handle.is_some() {
            return Err(TaskError::AlreadyRunning);
        }

        let cancel = CancelToken::new();
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name(self.name.to_string())
            .spawn(move || work(token))?;

        debug!("started background task '{}'", self.name);
        self.cancel = cancel;
        self.handle = Some(handle);
        Ok(())
    }
}

impl<T> AsyncTask<T> {
    /// Ask the worker to stop at its next check. Does not interrupt it.
    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether a worker was started and not yet joined.
    pub fn is_outstanding(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether the outstanding worker has returned (joining will not block).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Block until the worker returns and hand back its result.
    ///
    /// `Ok(None)` when nothing was outstanding. A worker panic is reported as
    /// [`TaskError::Panicked`].
    pub fn join(&mut self) -> Result<Option<T>, TaskError> {
        let Some(handle) = self.handle.take() else {
            return Ok(None);
        };
        match handle.join() {
            Ok(value) => {
                debug!("joined background task '{}'", self.name);
                Ok(Some(value))
            }
            Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl<T> Drop for AsyncTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel.cancel();
            if let Err(payload) = handle.join() {
                error!(
                    "background task '{}' panicked: {}",
                    self.name,
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
