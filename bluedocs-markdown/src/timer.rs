//! Deferred callbacks with cancel-on-drop handles.
//!
//! A [`ScheduledTask`] is the only handle to a pending callback: dropping it
//! cancels the callback if it has not run yet. Owners store the handle next
//! to the state the callback touches, so tearing the owner down also tears
//! down the timer.
use std::{
  collections::BTreeMap,
  fmt,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use log::trace;

/// A callback to run once its delay has elapsed.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedules deferred callbacks.
pub trait Scheduler {
  /// Run `task` once `delay` has elapsed, unless the returned handle is
  /// dropped first.
  fn schedule(&self, delay: Duration, task: Task) -> ScheduledTask;
}

/// Handle to a pending callback. Dropping it cancels the callback.
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
  cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduledTask {
  /// Wrap the cancellation routine of a scheduler.
  pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
    Self {
      cancel: Some(Box::new(cancel)),
    }
  }

  /// Cancel the callback now.
  pub fn cancel(self) {
    drop(self);
  }
}

impl Drop for ScheduledTask {
  fn drop(&mut self) {
    if let Some(cancel) = self.cancel.take() {
      cancel();
    }
  }
}

impl fmt::Debug for ScheduledTask {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ScheduledTask")
      .field("armed", &self.cancel.is_some())
      .finish()
  }
}

/// Runs callbacks on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
  handle: tokio::runtime::Handle,
}

impl TokioScheduler {
  #[must_use]
  pub const fn new(handle: tokio::runtime::Handle) -> Self {
    Self { handle }
  }

  /// Scheduler for the runtime the caller is running in, if any.
  #[must_use]
  pub fn current() -> Option<Self> {
    tokio::runtime::Handle::try_current().ok().map(Self::new)
  }
}

impl Scheduler for TokioScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> ScheduledTask {
    let join = self.handle.spawn(async move {
      tokio::time::sleep(delay).await;
      task();
    });
    ScheduledTask::new(move || join.abort())
  }
}

/// A scheduler driven by a virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock past a
/// callback's deadline. Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  inner: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
  now:     Duration,
  next_id: u64,
  pending: BTreeMap<(Duration, u64), Task>,
}

impl ManualScheduler {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn clock(&self) -> MutexGuard<'_, ManualClock> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Time elapsed on the virtual clock.
  #[must_use]
  pub fn now(&self) -> Duration {
    self.clock().now
  }

  /// Number of callbacks that are scheduled and not yet run or cancelled.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.clock().pending.len()
  }

  /// Move the clock forward, running every callback whose deadline is
  /// reached, in deadline order.
  pub fn advance(&self, by: Duration) {
    let target = self.now() + by;
    loop {
      let due = {
        let mut clock = self.clock();
        let next = clock.pending.keys().next().map(|&(deadline, _)| deadline);
        match next {
          Some(deadline) if deadline <= target => {
            clock.now = deadline;
            clock.pending.pop_first()
          },
          _ => None,
        }
      };
      // The lock is released here so callbacks may schedule or cancel.
      match due {
        Some(((deadline, id), task)) => {
          trace!("Running manual task {id} at {deadline:?}");
          task();
        },
        None => break,
      }
    }
    self.clock().now = target;
  }
}

impl Scheduler for ManualScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> ScheduledTask {
    let key = {
      let mut clock = self.clock();
      let key = (clock.now + delay, clock.next_id);
      clock.next_id += 1;
      clock.pending.insert(key, task);
      key
    };

    let inner = Arc::clone(&self.inner);
    ScheduledTask::new(move || {
      let removed = inner
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pending
        .remove(&key);
      if removed.is_some() {
        trace!("Cancelled manual task {}", key.1);
      }
    })
  }
}

impl fmt::Debug for ManualScheduler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let clock = self.clock();
    f.debug_struct("ManualScheduler")
      .field("now", &clock.now)
      .field("pending", &clock.pending.len())
      .finish()
  }
}
