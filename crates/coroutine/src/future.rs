use std::cell::Cell;
use std::collections::VecDeque;
use std::future::Future as StdFuture;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

enum Observer<T, E> {
    Callback(Box<dyn FnOnce(Result<T, E>) + Send>),
    Waker(Waker),
}

struct Inner<T, E> {
    result: Option<Result<T, E>>,
    observers: VecDeque<Observer<T, E>>,
}

/// A write-once, multi-observer result cell.
///
/// This is the callback-style "Deferred" half of the bridge between linear
/// coroutine code and `.await`: [`Future::then`] registers a continuation
/// the way a callback API would, while the type also implements
/// [`std::future::Future`] directly so it can be awaited from inside an
/// `async` coroutine body. Cloning shares the same underlying cell, which
/// is what lets more than one coroutine await "the same" future — each
/// resumes once it resolves, in the order they registered.
pub struct Future<T, E> {
    inner: Arc<Mutex<Inner<T, E>>>,
    /// Set once this particular handle has deferred an already-resolved poll
    /// through one re-enqueue. Lives on the handle, not the shared `Inner`,
    /// so each `.await` site (and each clone) gets its own one-time defer —
    /// see `poll` below.
    deferred_once: Cell<bool>,
}

impl<T, E> Clone for Future<T, E> {
    fn clone(&self) -> Self {
        Future {
            inner: self.inner.clone(),
            deferred_once: Cell::new(false),
        }
    }
}

/// The write side of a [`Future`], handed out once by [`Future::pending`].
/// Consuming `self` on [`Resolver::resolve`]/[`Resolver::reject`] is what
/// makes "resolvable exactly once" a property the type system enforces,
/// not a runtime check. Safe to call from any thread: resolving only ever
/// invokes user code (callbacks, wakers) directly on the calling thread,
/// it never reaches back into a scheduler on its own.
pub struct Resolver<T, E> {
    inner: Arc<Mutex<Inner<T, E>>>,
}

impl<T, E> Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn pending() -> (Future<T, E>, Resolver<T, E>) {
        let inner = Arc::new(Mutex::new(Inner {
            result: None,
            observers: VecDeque::new(),
        }));
        (
            Future {
                inner: inner.clone(),
                deferred_once: Cell::new(false),
            },
            Resolver { inner },
        )
    }

    pub fn ready(value: T) -> Future<T, E> {
        let inner = Arc::new(Mutex::new(Inner {
            result: Some(Ok(value)),
            observers: VecDeque::new(),
        }));
        Future {
            inner,
            deferred_once: Cell::new(false),
        }
    }

    pub fn failed(err: E) -> Future<T, E> {
        let inner = Arc::new(Mutex::new(Inner {
            result: Some(Err(err)),
            observers: VecDeque::new(),
        }));
        Future {
            inner,
            deferred_once: Cell::new(false),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.lock().result.is_some()
    }

    /// Registers callback-style continuations, FIFO alongside any other
    /// observer (including `.await`ers polling the same cell). Fires
    /// immediately, inline, if the future is already resolved.
    pub fn then(
        &self,
        on_ok: impl FnOnce(T) + Send + 'static,
        on_err: impl FnOnce(E) + Send + 'static,
    ) {
        let mut guard = self.inner.lock();
        if let Some(result) = guard.result.clone() {
            drop(guard);
            match result {
                Ok(v) => on_ok(v),
                Err(e) => on_err(e),
            }
            return;
        }
        guard.observers.push_back(Observer::Callback(Box::new(
            move |result| match result {
                Ok(v) => on_ok(v),
                Err(e) => on_err(e),
            },
        )));
    }
}

impl<T, E> Resolver<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, err: E) {
        self.settle(Err(err));
    }

    fn settle(self, result: Result<T, E>) {
        let observers = {
            let mut guard = self.inner.lock();
            guard.result = Some(result.clone());
            std::mem::take(&mut guard.observers)
        };
        for observer in observers {
            match observer {
                Observer::Callback(cb) => cb(result.clone()),
                Observer::Waker(waker) => waker.wake(),
            }
        }
    }
}

impl<T, E> StdFuture for Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut guard = self.inner.lock();
        if let Some(result) = guard.result.clone() {
            drop(guard);
            // An already-resolved future is still re-enqueued once rather
            // than resumed by immediate re-entry, so a coroutine's progress
            // always goes through the scheduler's work queue and its stack
            // depth never grows with the number of already-ready awaits.
            if !self.deferred_once.get() {
                self.deferred_once.set(true);
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            return Poll::Ready(result);
        }
        guard.observers.push_back(Observer::Waker(cx.waker().clone()));
        Poll::Pending
    }
}
