//! Transient "copied" notification state.
use std::{
  sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
  },
  time::Duration,
};

use log::debug;
use tokio::sync::Notify;

use crate::{
  clipboard::{self, ClipboardBackend},
  timer::{ScheduledTask, Scheduler},
};

/// How long the "copied" notification stays up after a successful copy.
pub const COPY_REVERT_DELAY: Duration = Duration::from_millis(3000);

/// Message shown while a heading link is on the clipboard.
pub const LINK_COPIED_MESSAGE: &str = "Link copied to clipboard.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CopyState {
  #[default]
  Idle,
  JustCopied,
}

/// Flag shared by an indicator, its watchers and its revert callback.
#[derive(Debug, Default)]
struct CopyFlag {
  /// Generation of the notification on display, `0` while idle.
  active:   AtomicU64,
  reverted: Notify,
}

impl CopyFlag {
  fn state(&self) -> CopyState {
    if self.active.load(Ordering::Acquire) == 0 {
      CopyState::Idle
    } else {
      CopyState::JustCopied
    }
  }

  /// Go idle, unless a newer copy has replaced `generation` in the meantime.
  fn revert(&self, generation: u64) {
    let swapped = self.active.compare_exchange(
      generation,
      0,
      Ordering::AcqRel,
      Ordering::Acquire,
    );
    if swapped.is_ok() {
      self.reverted.notify_waiters();
    }
  }

  fn clear(&self) {
    self.active.store(0, Ordering::Release);
    self.reverted.notify_waiters();
  }
}

/// Copy state owned by one copy affordance (a heading link, a color chip).
///
/// After [`CopyIndicator::mark_copied`] the state is
/// [`CopyState::JustCopied`] until [`COPY_REVERT_DELAY`] has elapsed. The
/// pending revert is cancelled when the indicator is dropped.
///
/// Every copy gets a new generation number. A revert callback only clears the
/// generation it was armed for, so a callback that is already running when a
/// newer copy lands cannot end the newer notification early.
#[derive(Debug)]
pub struct CopyIndicator<S: Scheduler> {
  flag:       Arc<CopyFlag>,
  generation: u64,
  revert:     Option<ScheduledTask>,
  scheduler:  S,
}

impl<S: Scheduler> CopyIndicator<S> {
  pub fn new(scheduler: S) -> Self {
    Self {
      flag: Arc::new(CopyFlag::default()),
      generation: 0,
      revert: None,
      scheduler,
    }
  }

  #[must_use]
  pub fn state(&self) -> CopyState {
    self.flag.state()
  }

  /// A read-only view of the state that outlives the indicator.
  #[must_use]
  pub fn watch(&self) -> CopyWatch {
    CopyWatch(Arc::clone(&self.flag))
  }

  /// Enter [`CopyState::JustCopied`] and (re)arm the revert timer.
  ///
  /// Copying again while the notification is up restarts the delay.
  pub fn mark_copied(&mut self) {
    self.generation += 1;
    let generation = self.generation;
    self.flag.active.store(generation, Ordering::Release);

    let flag = Arc::clone(&self.flag);
    // Replacing the handle cancels a previously armed revert.
    self.revert = Some(self.scheduler.schedule(
      COPY_REVERT_DELAY,
      Box::new(move || flag.revert(generation)),
    ));
  }

  /// Close the notification early.
  pub fn dismiss(&mut self) {
    self.revert = None;
    self.flag.clear();
  }

  /// Write `text` with `backend` and mark the state copied on success.
  ///
  /// Unavailable clipboards leave the state untouched.
  pub fn copy_with<B>(&mut self, backend: &mut B, text: &str)
  where
    B: ClipboardBackend + ?Sized,
  {
    clipboard::write_with(backend, text, || {
      debug!("Copied {text:?} to clipboard");
      self.mark_copied();
    });
  }
}

/// Shared read access to a [`CopyIndicator`]'s state.
#[derive(Debug, Clone)]
pub struct CopyWatch(Arc<CopyFlag>);

impl CopyWatch {
  #[must_use]
  pub fn get(&self) -> CopyState {
    self.0.state()
  }

  /// Wait until the state is [`CopyState::Idle`].
  ///
  /// Resolves immediately when idle. Never resolves if the indicator is
  /// dropped while the notification is up, since dropping cancels the revert.
  pub async fn reverted(&self) {
    loop {
      let notified = self.0.reverted.notified();
      if self.get() == CopyState::Idle {
        return;
      }
      notified.await;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Mutex, PoisonError};

  use super::*;
  use crate::{
    clipboard::{MemoryClipboard, UnavailableClipboard},
    timer::{ManualScheduler, Task, TokioScheduler},
  };

  /// Keeps every callback and never cancels one, like a revert that was
  /// already running when its handle was dropped.
  #[derive(Clone, Default)]
  struct DetachedScheduler {
    tasks: Arc<Mutex<Vec<Task>>>,
  }

  impl DetachedScheduler {
    fn take(&self) -> Vec<Task> {
      std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner))
    }
  }

  impl Scheduler for DetachedScheduler {
    fn schedule(&self, _delay: Duration, task: Task) -> ScheduledTask {
      self
        .tasks
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(task);
      ScheduledTask::new(|| {})
    }
  }

  #[test]
  fn test_stale_revert_keeps_newer_copy() {
    let scheduler = DetachedScheduler::default();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    indicator.mark_copied();
    indicator.mark_copied();

    let mut tasks = scheduler.take().into_iter();
    let stale = tasks.next();
    let current = tasks.next();

    if let Some(stale) = stale {
      stale();
    }
    assert_eq!(indicator.state(), CopyState::JustCopied);

    if let Some(current) = current {
      current();
    }
    assert_eq!(indicator.state(), CopyState::Idle);
  }

  #[tokio::test(start_paused = true)]
  async fn test_watch_resolves_when_reverted() {
    let scheduler = TokioScheduler::new(tokio::runtime::Handle::current());
    let mut indicator = CopyIndicator::new(scheduler);
    let watch = indicator.watch();
    watch.reverted().await;

    let start = tokio::time::Instant::now();
    indicator.mark_copied();
    watch.reverted().await;

    let elapsed = start.elapsed();
    assert!(elapsed >= COPY_REVERT_DELAY, "reverted early: {elapsed:?}");
    assert!(elapsed < COPY_REVERT_DELAY + Duration::from_millis(10));
    assert_eq!(indicator.state(), CopyState::Idle);
  }

  #[test]
  fn test_reverts_after_delay() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    assert_eq!(indicator.state(), CopyState::Idle);

    indicator.mark_copied();
    assert_eq!(indicator.state(), CopyState::JustCopied);

    scheduler.advance(COPY_REVERT_DELAY - Duration::from_millis(1));
    assert_eq!(indicator.state(), CopyState::JustCopied);
    scheduler.advance(Duration::from_millis(1));
    assert_eq!(indicator.state(), CopyState::Idle);
  }

  #[test]
  fn test_copy_again_restarts_delay() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());

    indicator.mark_copied();
    scheduler.advance(Duration::from_millis(2000));
    indicator.mark_copied();
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance(Duration::from_millis(2000));
    assert_eq!(indicator.state(), CopyState::JustCopied);
    scheduler.advance(Duration::from_millis(1000));
    assert_eq!(indicator.state(), CopyState::Idle);
  }

  #[test]
  fn test_dismiss_cancels_revert() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    indicator.mark_copied();
    indicator.dismiss();
    assert_eq!(indicator.state(), CopyState::Idle);
    assert_eq!(scheduler.pending(), 0);
  }

  #[test]
  fn test_copy_with_unavailable_stays_idle() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    indicator.copy_with(&mut UnavailableClipboard, "x");
    assert_eq!(indicator.state(), CopyState::Idle);
    assert_eq!(scheduler.pending(), 0);
  }

  #[test]
  fn test_copy_with_memory_marks_copied() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    let mut clipboard = MemoryClipboard::default();
    indicator.copy_with(&mut clipboard, "#00a");
    assert_eq!(clipboard.contents(), Some("#00a"));
    assert_eq!(indicator.state(), CopyState::JustCopied);
    assert_eq!(scheduler.pending(), 1);
  }

  #[test]
  fn test_drop_cancels_pending_revert() {
    let scheduler = ManualScheduler::new();
    let mut indicator = CopyIndicator::new(scheduler.clone());
    let watch = indicator.watch();
    indicator.mark_copied();

    scheduler.advance(Duration::from_millis(1000));
    drop(indicator);
    assert_eq!(scheduler.pending(), 0);

    scheduler.advance(Duration::from_secs(10));
    assert_eq!(watch.get(), CopyState::JustCopied);
  }
}
