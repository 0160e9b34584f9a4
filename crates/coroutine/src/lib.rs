//! A single-threaded coroutine scheduler: linear `async` code that suspends
//! on [`Future`]s and resumes with either a value or an error, driven
//! entirely by a caller-supplied `enqueue` function rather than any
//! built-in executor or runtime.
//!
//! The scheduler never runs user code off the thread that calls `enqueue`;
//! the only cross-thread seam is resolving a [`Future`] (via its
//! [`Resolver`]) from a worker thread, which is safe by design.

mod future;
mod launch;

pub use future::{Future, Resolver};
pub use launch::launch_coroutine;
