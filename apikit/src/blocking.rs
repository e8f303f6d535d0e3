//! Synchronous wrappers over asynchronous operations.
//!
//! Every I/O-bound helper in this workspace is written as a future; the
//! blocking variants drive that same future to completion with [`block_on`],
//! so both forms produce identical results.
//!
//! Blocking from inside a current-thread tokio runtime is refused with an
//! error rather than allowed to hang.

use std::future::Future;
use std::io;
use std::thread;

use tokio::runtime::{Handle, RuntimeFlavor};

/// Runs a future to completion, blocking the calling thread.
///
/// How the future is driven depends on where the caller is:
///
/// - Outside any tokio runtime, the future runs on a dedicated worker thread
///   with its own single-threaded runtime (I/O and timer drivers enabled).
///   The worker is scoped to this call, so the future may borrow.
/// - On a multi-threaded runtime, the calling worker is handed over to
///   [`tokio::task::block_in_place`] and the future runs on the caller's
///   runtime. Tasks the future depends on (connection drivers, for example)
///   keep running on the other workers.
/// - On a current-thread runtime, the call is refused. Blocking the only
///   thread of that runtime would stall every task spawned on it, including
///   any that feed the future.
///
/// # Errors
///
/// Returns an [`io::Error`] of kind [`io::ErrorKind::WouldBlock`] when called
/// from a current-thread runtime, or any error raised while creating the
/// worker runtime.
///
/// # Panics
///
/// A panic inside the future is propagated to the caller.
pub fn block_on<F>(future: F) -> io::Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                "cannot block inside a current-thread tokio runtime",
            )),
            _ => Ok(tokio::task::block_in_place(|| handle.block_on(future))),
        },
        Err(_) => block_on_worker(future),
    }
}

fn block_on_worker<F>(future: F) -> io::Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("apikit-blocking".to_owned())
            .spawn_scoped(scope, move || -> io::Result<F::Output> {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                Ok(runtime.block_on(future))
            })?;
        match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
