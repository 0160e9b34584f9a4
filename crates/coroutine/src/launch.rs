use std::future::Future as StdFuture;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

use parking_lot::Mutex;
use tracing::trace;

use crate::future::{Future, Resolver};

type Enqueue = Arc<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;
type BoxedBody<T, E> = Pin<Box<dyn StdFuture<Output = Result<T, E>> + Send>>;

struct Task<T, E> {
    body: Mutex<Option<BoxedBody<T, E>>>,
    resolver: Mutex<Option<Resolver<T, E>>>,
    enqueue: Enqueue,
}

impl<T, E> Wake for Task<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        let task = self.clone();
        (self.enqueue)(Box::new(move || step(task)));
    }
}

fn step<T, E>(task: Arc<Task<T, E>>)
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    let waker: Waker = Waker::from(task.clone());
    let mut cx = Context::from_waker(&waker);

    let poll_result = {
        let mut slot = task.body.lock();
        match slot.as_mut() {
            Some(fut) => fut.as_mut().poll(&mut cx),
            // The body already finished (or this step was queued twice by a
            // spurious wake race); nothing left to drive.
            None => return,
        }
    };

    match poll_result {
        Poll::Pending => {}
        Poll::Ready(result) => {
            // Drop the boxed body (and, with it, any waker it registered on
            // futures it was awaiting) the moment the outcome is known, so
            // an already-resolved task never keeps its captures — and any
            // future it was waiting on — alive.
            *task.body.lock() = None;
            if let Some(resolver) = task.resolver.lock().take() {
                match result {
                    Ok(v) => resolver.resolve(v),
                    Err(e) => resolver.reject(e),
                }
            }
        }
    }
}

/// Starts a coroutine and returns a [`Future`] for its eventual result.
///
/// `body` is called once, synchronously, to construct the coroutine's
/// `async` value — constructing it runs none of its statements (an `async`
/// block's body doesn't execute anything until first polled), so this does
/// not need to special-case a body that "isn't really a generator": every
/// `async fn`/block already implements [`std::future::Future`], whether or
/// not it ever actually suspends.
///
/// The first poll is scheduled through `enqueue`, not run inline, so that a
/// caller who attaches continuations to the returned future only after
/// `launch_coroutine` returns still observes a failure raised in the very
/// first statements of `body`.
pub fn launch_coroutine<T, E, F>(
    enqueue: impl Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
    body: impl FnOnce() -> F + Send + 'static,
) -> Future<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
    F: StdFuture<Output = Result<T, E>> + Send + 'static,
{
    let enqueue: Enqueue = Arc::new(enqueue);
    let (result_future, resolver) = Future::pending();

    let task = Arc::new(Task {
        body: Mutex::new(Some(Box::pin(body()) as BoxedBody<T, E>)),
        resolver: Mutex::new(Some(resolver)),
        enqueue: enqueue.clone(),
    });

    trace!("coroutine launched, scheduling first step");
    let first = task.clone();
    enqueue(Box::new(move || step(first)));

    result_future
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    type Queue = Arc<Mutex<VecDeque<Box<dyn FnOnce() + Send>>>>;

    fn test_enqueue() -> (Queue, impl Fn(Box<dyn FnOnce() + Send>) + Send + Sync + Clone) {
        let queue: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let q = queue.clone();
        let enqueue = move |job: Box<dyn FnOnce() + Send>| q.lock().push_back(job);
        (queue, enqueue)
    }

    fn drain(queue: &Queue) {
        loop {
            let job = queue.lock().pop_front();
            match job {
                Some(job) => job(),
                None => break,
            }
        }
    }

    #[test]
    fn coroutine_with_no_awaits_resolves_on_first_step() {
        let (queue, enqueue) = test_enqueue();
        let result = launch_coroutine(enqueue, || async { Ok::<i32, String>(42) });
        assert!(!result.is_resolved()); // first step is scheduled, not inline
        drain(&queue);
        assert!(result.is_resolved());
    }

    #[test]
    fn yield_order_governs_progress_not_resolution_order() {
        let (queue, enqueue) = test_enqueue();

        let (f1, r1): (Future<i32, String>, _) = Future::pending();
        let (f2, r2): (Future<i32, String>, _) = Future::pending();

        let observed = Arc::new(Mutex::new(Vec::new()));
        let observed2 = observed.clone();
        let fut1 = f1.clone();
        let fut2 = f2.clone();

        let result = launch_coroutine(enqueue, move || async move {
            let a = fut1.await.unwrap();
            observed2.lock().push(a);
            let b = fut2.await.unwrap();
            observed2.lock().push(b);
            Ok::<i32, String>(a + b)
        });

        drain(&queue);
        assert!(observed.lock().is_empty());

        // Resolve f2 first: the coroutine is still parked awaiting f1, so
        // this must not unblock it.
        r2.resolve(20);
        drain(&queue);
        assert!(observed.lock().is_empty());

        r1.resolve(10);
        drain(&queue);
        assert_eq!(*observed.lock(), vec![10, 20]);
        assert!(result.is_resolved());
    }

    #[test]
    fn rejected_future_raises_at_the_yield_point() {
        let (queue, enqueue) = test_enqueue();
        let (f, r): (Future<i32, String>, _) = Future::pending();
        let fut = f.clone();

        let result = launch_coroutine(enqueue, move || async move {
            match fut.await {
                Ok(_) => Ok(0),
                Err(e) => Err(format!("caught: {e}")),
            }
        });

        drain(&queue);
        r.reject("boom".to_string());
        drain(&queue);

        let observed: Arc<Mutex<Option<Result<i32, String>>>> = Arc::new(Mutex::new(None));
        let o1 = observed.clone();
        let o2 = observed.clone();
        result.then(move |v| *o1.lock() = Some(Ok(v)), move |e| *o2.lock() = Some(Err(e)));
        assert_eq!(*observed.lock(), Some(Err("caught: boom".to_string())));
    }
}
