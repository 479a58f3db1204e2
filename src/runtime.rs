//! Runtime for the blocking CLI entry points.

use std::future::Future;
use tokio::runtime::Builder;

/// Crawls running at once never exceed two (summary + custom category).
const WORKER_THREADS: usize = 2;

/// Run `future` to completion on a fresh multi-thread runtime with timers,
/// IO and signal handling enabled.
pub fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(WORKER_THREADS)
        .thread_name("shelfscrape-worker")
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
