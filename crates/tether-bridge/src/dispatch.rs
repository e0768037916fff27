//! Fire-and-forget task hand-off onto the designated thread.
//!
//! All UI-affecting mutation is owned by the host runtime's single
//! designated thread. Every other thread is a producer: it enqueues a
//! [`DispatchTask`] via [`Dispatcher::post`] and never blocks on the result.
//! The [`MainLoop`] is the single consumer, pinned to the thread that
//! drives it, draining tasks one at a time in FIFO order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, ThreadId};

use tracing::{debug, warn};

use crate::host::{RenderSurface, UiToolkit};

/// A unit of deferred work. Runs exactly once, on the designated thread,
/// then is dropped; never retried, never cancelled.
pub type DispatchTask = Box<dyn FnOnce(&mut MainContext) + Send + 'static>;

/// Queue depth at which `post` starts warning about a slow consumer.
pub const DEFAULT_QUEUE_WARN_DEPTH: usize = 64;

/// State owned exclusively by the designated thread. Tasks receive it
/// mutably; nothing outside the main loop can touch it.
pub struct MainContext {
    toolkit: Arc<dyn UiToolkit>,
    surface: Option<Box<dyn RenderSurface>>,
    shutdown: bool,
}

impl MainContext {
    fn new(toolkit: Arc<dyn UiToolkit>) -> Self {
        Self {
            toolkit,
            surface: None,
            shutdown: false,
        }
    }

    pub fn toolkit(&self) -> &dyn UiToolkit {
        self.toolkit.as_ref()
    }

    /// Whether the rendering surface has been created.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// The surface, if created. Every task acting on the surface must go
    /// through this presence check; operations while absent are no-ops.
    pub fn surface_mut(&mut self) -> Option<&mut (dyn RenderSurface + '_)> {
        self.surface.as_mut().map(|s| &mut **s as _)
    }

    /// Install the surface. Returns `false` (and drops `surface`) if one
    /// already exists — the Absent → Created transition is one-way.
    pub fn install_surface(&mut self, surface: Box<dyn RenderSurface>) -> bool {
        if self.surface.is_some() {
            return false;
        }
        self.surface = Some(surface);
        true
    }

    /// Ask the main loop to stop after the current task.
    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }
}

/// Producer half: clonable, any-thread, non-blocking.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<DispatchTask>,
    depth: Arc<AtomicUsize>,
    warn_depth: usize,
}

impl Dispatcher {
    /// Enqueue `task` for asynchronous execution on the designated thread.
    ///
    /// Returns immediately with no completion signal. Posting from the
    /// designated thread itself still defers: the task runs only after the
    /// current call stack unwinds, in FIFO order with everything else.
    pub fn post(&self, task: impl FnOnce(&mut MainContext) + Send + 'static) {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        if depth > self.warn_depth {
            warn!(depth, "dispatch queue is backing up");
        }
        if self.tx.send(Box::new(task)).is_err() {
            // Main loop is gone (process shutting down); the task is dropped.
            self.depth.fetch_sub(1, Ordering::SeqCst);
            warn!("dispatch queue closed; task dropped");
        }
    }

    /// Tasks currently queued but not yet executed.
    pub fn pending(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }
}

/// Consumer half: drains tasks on the designated thread.
pub struct MainLoop {
    rx: mpsc::Receiver<DispatchTask>,
    ctx: MainContext,
    depth: Arc<AtomicUsize>,
    owner: Option<ThreadId>,
}

impl std::fmt::Debug for MainLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainLoop").finish_non_exhaustive()
    }
}

impl MainLoop {
    pub(crate) fn new(toolkit: Arc<dyn UiToolkit>, warn_depth: usize) -> (Dispatcher, MainLoop) {
        let (tx, rx) = mpsc::channel();
        let depth = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher {
            tx,
            depth: Arc::clone(&depth),
            warn_depth,
        };
        let main_loop = MainLoop {
            rx,
            ctx: MainContext::new(toolkit),
            depth,
            owner: None,
        };
        (dispatcher, main_loop)
    }

    /// The first thread to drive the loop claims it; driving it from any
    /// other thread afterwards is a bug.
    fn claim_thread(&mut self) {
        let current = thread::current().id();
        match self.owner {
            None => self.owner = Some(current),
            Some(owner) => {
                debug_assert_eq!(owner, current, "main loop driven from a second thread")
            }
        }
    }

    fn run_task(&mut self, task: DispatchTask) {
        let ctx = &mut self.ctx;
        if catch_unwind(AssertUnwindSafe(|| task(ctx))).is_err() {
            // Deferred failures are swallowed at the bridge boundary; a
            // panicking task must not take the designated thread down.
            warn!("dispatch task panicked; continuing");
        }
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }

    /// Execute every task currently queued, including tasks posted while
    /// draining, then return the number executed. Never blocks.
    pub fn drain(&mut self) -> usize {
        self.claim_thread();
        let mut executed = 0;
        while let Ok(task) = self.rx.try_recv() {
            self.run_task(task);
            executed += 1;
            if self.ctx.shutdown {
                break;
            }
        }
        executed
    }

    /// Block on the queue, executing tasks in arrival order, until a task
    /// requests shutdown or every producer is gone.
    pub fn run(&mut self) {
        self.claim_thread();
        debug!("main loop running");
        while let Ok(task) = self.rx.recv() {
            self.run_task(task);
            if self.ctx.shutdown {
                break;
            }
        }
        debug!("main loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testhost::MockToolkit;
    use std::sync::Mutex;

    fn new_loop() -> (Dispatcher, MainLoop) {
        MainLoop::new(Arc::new(MockToolkit::new()), DEFAULT_QUEUE_WARN_DEPTH)
    }

    #[test]
    fn tasks_run_in_posted_order() {
        let (dispatcher, mut main_loop) = new_loop();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let seen = Arc::clone(&seen);
            dispatcher.post(move |_ctx| seen.lock().unwrap().push(i));
        }

        assert_eq!(main_loop.drain(), 5);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cross_thread_post_executes_on_the_draining_thread() {
        let (dispatcher, mut main_loop) = new_loop();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let producer = {
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                dispatcher.post(move |_ctx| {
                    seen.lock().unwrap().push(thread::current().id());
                });
            })
        };
        producer.join().unwrap();

        main_loop.drain();
        assert_eq!(*seen.lock().unwrap(), vec![thread::current().id()]);
    }

    #[test]
    fn posting_during_a_task_defers_until_the_stack_unwinds() {
        let (dispatcher, mut main_loop) = new_loop();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner_dispatcher = dispatcher.clone();
        let outer_seen = Arc::clone(&seen);
        dispatcher.post(move |_ctx| {
            outer_seen.lock().unwrap().push("outer-start");
            let inner_seen = Arc::clone(&outer_seen);
            inner_dispatcher.post(move |_ctx| inner_seen.lock().unwrap().push("inner"));
            outer_seen.lock().unwrap().push("outer-end");
        });

        main_loop.drain();
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["outer-start", "outer-end", "inner"]
        );
    }

    #[test]
    fn panicking_task_does_not_stop_the_loop() {
        let (dispatcher, mut main_loop) = new_loop();
        let seen = Arc::new(Mutex::new(Vec::new()));

        dispatcher.post(|_ctx| panic!("bad task"));
        let survivor = Arc::clone(&seen);
        dispatcher.post(move |_ctx| survivor.lock().unwrap().push("ran"));

        assert_eq!(main_loop.drain(), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["ran"]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn pending_counts_queued_tasks() {
        let (dispatcher, mut main_loop) = new_loop();
        dispatcher.post(|_ctx| {});
        dispatcher.post(|_ctx| {});
        assert_eq!(dispatcher.pending(), 2);
        main_loop.drain();
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn run_stops_on_shutdown_request() {
        let (dispatcher, mut main_loop) = new_loop();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let before = Arc::clone(&seen);
        dispatcher.post(move |_ctx| before.lock().unwrap().push("before"));
        dispatcher.post(|ctx| ctx.request_shutdown());

        let driver = std::thread::spawn(move || {
            main_loop.run();
            main_loop
        });
        driver.join().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn post_after_loop_dropped_is_a_silent_drop() {
        let (dispatcher, main_loop) = new_loop();
        drop(main_loop);
        dispatcher.post(|_ctx| {});
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn tasks_are_dropped_after_execution() {
        let (dispatcher, mut main_loop) = new_loop();
        let payload = Arc::new(());
        let captured = Arc::clone(&payload);
        dispatcher.post(move |_ctx| {
            let _ = &captured;
        });
        main_loop.drain();
        assert_eq!(Arc::strong_count(&payload), 1);
    }
}
