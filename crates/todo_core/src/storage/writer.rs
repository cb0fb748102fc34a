//! Single-flight write-behind for task list snapshots.
//!
//! # Responsibility
//! - Own the `KeyValueStore` on one background thread.
//! - Persist snapshots in submission order without blocking the caller.
//!
//! # Invariants
//! - At most one write is in flight at any time.
//! - When several snapshots are queued, only the newest is written.
//! - `flush` returns only after every snapshot submitted before it was attempted.
//! - Write failures are logged by `save_tasks` and otherwise dropped.

use crate::model::task::Task;
use crate::storage::kv::KeyValueStore;
use crate::storage::task_store::save_tasks;
use crate::storage::StorageResult;
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

const WRITER_THREAD_NAME: &str = "todo-writer";

enum WriteCommand {
    Save(Vec<Task>),
    Flush(Sender<()>),
}

/// Handle to the background writer. Dropping it drains pending writes.
pub struct TaskWriter {
    sender: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl TaskWriter {
    /// Moves `store` onto a new writer thread.
    ///
    /// # Errors
    /// - `Io` when the OS refuses to spawn the thread.
    pub fn spawn<S: KeyValueStore + 'static>(store: S) -> StorageResult<Self> {
        let (sender, receiver) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(store, receiver))?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Writer that drops every submission. Used when no thread could be spawned.
    pub fn disabled() -> Self {
        Self {
            sender: None,
            worker: None,
        }
    }

    /// Queues `tasks` for persistence and returns immediately.
    pub fn submit(&self, tasks: Vec<Task>) {
        let delivered = self
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(WriteCommand::Save(tasks)).is_ok());
        if !delivered {
            warn!("event=tasks_submit module=writer status=error error=writer_stopped");
        }
    }

    /// Blocks until every earlier submission has been attempted.
    ///
    /// Returns `false` when the writer thread is gone.
    pub fn flush(&self) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        let (ack_sender, ack_receiver) = mpsc::channel();
        if sender.send(WriteCommand::Flush(ack_sender)).is_err() {
            return false;
        }
        ack_receiver.recv().is_ok()
    }
}

impl Drop for TaskWriter {
    fn drop(&mut self) {
        // Closing the channel lets the worker finish its queue and exit.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=writer_join module=writer status=error error=worker_panicked");
            }
        }
    }
}

fn run_writer<S: KeyValueStore>(store: S, receiver: Receiver<WriteCommand>) {
    debug!("event=writer_start module=writer status=ok");
    while let Ok(first) = receiver.recv() {
        let mut latest: Option<Vec<Task>> = None;
        let mut waiters = Vec::new();
        let mut superseded = 0usize;

        let mut next = Some(first);
        while let Some(command) = next {
            match command {
                WriteCommand::Save(tasks) => {
                    if latest.replace(tasks).is_some() {
                        superseded += 1;
                    }
                }
                WriteCommand::Flush(ack) => waiters.push(ack),
            }
            next = receiver.try_recv().ok();
        }

        if superseded > 0 {
            debug!("event=tasks_coalesce module=writer status=ok superseded={superseded}");
        }
        if let Some(tasks) = latest {
            let _ = save_tasks(&store, &tasks);
        }
        for ack in waiters {
            let _ = ack.send(());
        }
    }
    debug!("event=writer_stop module=writer status=ok");
}
