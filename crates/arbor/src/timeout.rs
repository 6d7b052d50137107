//! Deadline enforcement for extraction passes.

use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use log::{error, warn};

use crate::error::ArborError;

/// Runs `job` on a worker thread and waits at most `timeout` for its result.
///
/// On timeout the worker is left to finish in the background and its result
/// is discarded. Callers never see a partial result.
///
/// # Errors
///
/// Returns [`ArborError::OperationTimedOut`] if no result arrives in time,
/// [`ArborError::WorkerFailed`] if the worker stops without one, and
/// whatever `job` itself returns otherwise.
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use arbor::{ArborError, run_with_timeout};
/// let answer = run_with_timeout(Duration::from_secs(1), || Ok::<_, ArborError>(42)).unwrap();
/// assert_eq!(answer, 42);
/// ```
pub fn run_with_timeout<T, F>(timeout: Duration, job: F) -> Result<T, ArborError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ArborError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("arbor-extract".to_string())
        .spawn(move || {
            // The receiver is gone once the caller gave up.
            let _ = tx.send(job());
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(timeout:?; "Extraction timed out");
            Err(ArborError::OperationTimedOut(timeout))
        }
        Err(RecvTimeoutError::Disconnected) => {
            error!("Extraction worker stopped without a result");
            Err(ArborError::WorkerFailed)
        }
    }
}
