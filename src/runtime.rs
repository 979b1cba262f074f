//! Executor used to run the async filesystem primitives to completion.
//!
//! The shim calls every primitive in blocking mode: it creates the future and
//! drives it on the calling thread until it resolves. No threads are spawned
//! and nothing runs in the background.

use std::future::Future;

/// Drives futures to completion on the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct Runtime {}

impl Runtime {
    /// Creates a new runtime.
    pub fn new() -> Self {
        Self {}
    }

    /// Blocks the current thread until `fut` completes and returns its output.
    ///
    /// # Example
    /// ```
    /// let rt = fs_shim::Runtime::new();
    /// assert_eq!(rt.block_on(async { 42 }), 42);
    /// ```
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        futures::executor::block_on(fut)
    }
}
