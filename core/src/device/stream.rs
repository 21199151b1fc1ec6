//! device/stream.rs
//! Ordered execution queues.
//!
//! A `Stream` runs enqueued work on its own worker thread in submission
//! order. Work on different streams runs concurrently; `Event` orders work
//! across streams.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;
use crossbeam::channel::{self, Sender};

use crate::types::CompressionError;

type Task = Box<dyn FnOnce() -> Result<(), CompressionError> + Send + 'static>;

enum Command {
    Launch { name: &'static str, task: Task },
    Fence(Sender<Option<CompressionError>>),
}

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(1);

pub struct Stream {
    id: u64,
    tx: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl Stream {
    pub fn new() -> Result<Self, CompressionError> {
        let id = NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = channel::unbounded::<Command>();

        let worker = std::thread::Builder::new()
            .name(format!("gpucomp-stream-{id}"))
            .spawn(move || {
                // First execution error since the last fence.
                let mut pending: Option<CompressionError> = None;
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        Command::Launch { name, task } => {
                            log::trace!("stream {id}: running {name}");
                            if let Err(e) = task() {
                                log::error!("stream {id}: {name} failed: {e}");
                                pending.get_or_insert(e);
                            }
                        }
                        Command::Fence(reply) => {
                            let _ = reply.send(pending.take());
                        }
                    }
                }
            })
            .map_err(|e| CompressionError::device(format!("failed to start stream worker: {e}")))?;

        Ok(Self { id, tx: Some(tx), worker: Some(worker) })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Queue `task` behind everything already submitted. Returns once queued.
    pub fn enqueue<F>(&self, name: &'static str, task: F) -> Result<(), CompressionError>
    where
        F: FnOnce() -> Result<(), CompressionError> + Send + 'static,
    {
        log::trace!("stream {}: launch {name}", self.id);
        self.send(Command::Launch { name, task: Box::new(task) })
    }

    /// Block until all submitted work has run.
    ///
    /// Returns the first error raised by queued work since the previous
    /// synchronization and clears it.
    pub fn synchronize(&self) -> Result<(), CompressionError> {
        let (reply_tx, reply_rx) = channel::bounded(1);
        self.send(Command::Fence(reply_tx))?;
        match reply_rx.recv() {
            Ok(None) => Ok(()),
            Ok(Some(e)) => Err(e),
            Err(_) => Err(CompressionError::device(format!("stream {} worker terminated", self.id))),
        }
    }

    /// Mark the current tail of this stream.
    pub fn record_event(&self) -> Result<Event, CompressionError> {
        let event = Event::new();
        let signal = event.clone();
        self.enqueue("record_event", move || {
            signal.fire();
            Ok(())
        })?;
        Ok(event)
    }

    /// Hold back work submitted after this call until `event` has fired.
    pub fn wait_event(&self, event: &Event) -> Result<(), CompressionError> {
        let event = event.clone();
        self.enqueue("wait_event", move || {
            event.synchronize();
            Ok(())
        })
    }

    fn send(&self, cmd: Command) -> Result<(), CompressionError> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| CompressionError::device(format!("stream {} is closed", self.id)))?;
        tx.send(cmd)
            .map_err(|_| CompressionError::device(format!("stream {} worker terminated", self.id)))
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain queued work and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// A point in a stream's execution order.
#[derive(Clone, Debug, Default)]
pub struct Event {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Event {
    fn new() -> Self {
        Self::default()
    }

    fn fire(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// True once the stream has reached this event.
    pub fn query(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block the calling thread until the event fires.
    pub fn synchronize(&self) {
        let (lock, cvar) = &*self.inner;
        let mut done = lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !*done {
            done = cvar.wait(done).unwrap_or_else(PoisonError::into_inner);
        }
    }
}
