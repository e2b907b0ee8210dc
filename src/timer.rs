//! One-shot tasks counted in simulation ticks.
//!
//! Every task gets a handle that can cancel it, and `cancel_all` drops
//! everything still pending when the session resets.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    RelocateFood,
}

#[derive(Debug)]
struct Pending {
    handle: TaskHandle,
    remaining: u32,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self { Self::default() }

    /// Fires `task` on the `delay`-th call to `tick` from now (at least one).
    pub fn schedule(&mut self, delay: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { handle, remaining: delay.max(1), task });
        handle
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize { self.pending.len() }

    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Advances one tick and returns the tasks that came due, oldest first.
    pub fn tick(&mut self) -> Vec<(TaskHandle, Task)> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.remaining -= 1;
            if p.remaining == 0 {
                due.push((p.handle, p.task));
                false
            } else {
                true
            }
        });
        due
    }
}
