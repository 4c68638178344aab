//! Cancellable streaming consumption.
//!
//! A [`StreamHandle`] is the consumer side of a streamed reply: chunks
//! arrive on a channel while a worker thread drives the model call.
//! The consumer can signal "stop" at any time and the producer is
//! obligated to release its connection at the next chunk boundary;
//! dropping the handle cancels implicitly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;

use super::GatewayError;

pub struct StreamHandle {
    rx: mpsc::Receiver<String>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<Result<String, GatewayError>>>,
}

impl StreamHandle {
    /// Spawn a producer and hand back the consumer side.
    ///
    /// The closure receives the chunk sender and the shared cancel flag
    /// and must return the full accumulated text.
    pub(crate) fn spawn<F>(producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<String>, Arc<AtomicBool>) -> Result<String, GatewayError>
            + Send
            + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let worker = std::thread::spawn(move || producer(tx, flag));
        Self {
            rx,
            cancel,
            worker: Some(worker),
        }
    }

    /// Blocking iterator over incoming chunks; ends when the producer
    /// finishes or the stream is cancelled.
    pub fn chunks(&self) -> mpsc::Iter<'_, String> {
        self.rx.iter()
    }

    /// Non-blocking drain of chunks received so far.
    pub fn try_chunks(&self) -> mpsc::TryIter<'_, String> {
        self.rx.try_iter()
    }

    /// Signal the producer to stop at the next chunk boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Wait for the producer and return the full accumulated text.
    pub fn finish(mut self) -> Result<String, GatewayError> {
        let worker = match self.worker.take() {
            Some(worker) => worker,
            None => return Err(GatewayError::InvalidResponse("stream already finished".into())),
        };
        match worker.join() {
            Ok(result) => result,
            Err(_) => Err(GatewayError::InvalidResponse(
                "stream worker panicked".into(),
            )),
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        // An abandoned consumer must not leave the producer running.
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
