//! Shared one-shot task timer.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling failed because the worker thread is no longer running.
#[derive(Debug, Error)]
#[error("timer worker thread has stopped")]
pub struct TimerStopped;

/// One-shot task scheduler backed by a single long-lived worker thread.
///
/// Tasks run on the worker thread, fire-and-forget: there is no handle to an
/// outstanding task and no cancellation. A task that panics is caught and
/// logged; it cannot take the worker down. Dropping the timer lets the worker
/// fire whatever is still outstanding and then exit.
pub struct Timer {
    tx: Sender<(Instant, Task)>,
}

impl Timer {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        thread::spawn(move || run(rx));
        Self { tx }
    }

    /// Schedule `task` to run once after `delay` elapses.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> Result<(), TimerStopped>
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + delay;
        self.tx.send((deadline, Box::new(task))).map_err(|_| TimerStopped)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

struct Entry {
    deadline: Instant,
    seq: u64,
    task: Task,
}

// Min-heap on (deadline, seq): the earliest deadline pops first, insertion
// order breaks ties.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Entry {}

fn run(rx: Receiver<(Instant, Task)>) {
    let mut queue: BinaryHeap<Entry> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut disconnected = false;

    loop {
        fire_due(&mut queue);

        if disconnected {
            match queue.peek() {
                Some(entry) => {
                    thread::sleep(entry.deadline.saturating_duration_since(Instant::now()));
                }
                None => return,
            }
            continue;
        }

        let received = match queue.peek() {
            Some(entry) => {
                match rx.recv_timeout(entry.deadline.saturating_duration_since(Instant::now())) {
                    Ok(message) => Some(message),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => {
                        disconnected = true;
                        None
                    }
                }
            }
            None => match rx.recv() {
                Ok(message) => Some(message),
                Err(_) => return,
            },
        };

        if let Some((deadline, task)) = received {
            seq += 1;
            queue.push(Entry { deadline, seq, task });
        }
    }
}

fn fire_due(queue: &mut BinaryHeap<Entry>) {
    while queue.peek().is_some_and(|entry| entry.deadline <= Instant::now()) {
        if let Some(entry) = queue.pop()
            && catch_unwind(AssertUnwindSafe(entry.task)).is_err()
        {
            tracing::error!("scheduled task panicked");
        }
    }
}
