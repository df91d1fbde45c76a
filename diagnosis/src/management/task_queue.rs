use crate::management::utils::task::Task;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, mpsc};

struct QueueState {
    unfinished: AtomicUsize,
    all_done: Notify,
}

/// Sending half of the pending-task channel. Enqueueing never waits.
#[derive(Clone)]
pub struct TaskQueue {
    sender: mpsc::UnboundedSender<Task>,
    state: Arc<QueueState>,
}

/// Receiving half, owned by the worker.
pub struct TaskReceiver {
    receiver: mpsc::UnboundedReceiver<Task>,
    state: Arc<QueueState>,
}

/// Marks a dequeued task as finished when dropped, whichever way processing ends.
pub struct TaskGuard {
    state: Arc<QueueState>,
}

impl TaskQueue {
    pub fn channel() -> (TaskQueue, TaskReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let state = Arc::new(QueueState {
            unfinished: AtomicUsize::new(0),
            all_done: Notify::new(),
        });
        (TaskQueue { sender, state: state.clone() }, TaskReceiver { receiver, state })
    }

    /// Hands the task back if the worker is gone.
    pub fn enqueue(&self, task: Task) -> Result<(), Task> {
        self.state.unfinished.fetch_add(1, Ordering::AcqRel);
        match self.sender.send(task) {
            Ok(()) => Ok(()),
            Err(mpsc::error::SendError(task)) => {
                TaskGuard::new(self.state.clone()).finish();
                Err(task)
            }
        }
    }

    pub fn unfinished(&self) -> usize {
        self.state.unfinished.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Waits until every task enqueued so far has been finished.
    pub async fn join(&self) {
        loop {
            let notified = self.state.all_done.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.unfinished() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl TaskReceiver {
    pub async fn dequeue(&mut self) -> Option<(Task, TaskGuard)> {
        let task = self.receiver.recv().await?;
        Some((task, TaskGuard::new(self.state.clone())))
    }

    pub fn try_dequeue(&mut self) -> Option<(Task, TaskGuard)> {
        let task = self.receiver.try_recv().ok()?;
        Some((task, TaskGuard::new(self.state.clone())))
    }

    /// Rejects further enqueues. Tasks already queued can still be dequeued.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl TaskGuard {
    fn new(state: Arc<QueueState>) -> Self {
        Self { state }
    }

    pub fn finish(self) {}
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.state.unfinished.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.state.all_done.notify_waiters();
        }
    }
}
