//! Time-bounded backend calls
//!
//! Backend work runs on a worker thread. If it does not answer within the
//! limit the caller gets a timeout error; the worker is left to finish on its
//! own and its result is dropped.

use super::{BackendError, SymbolicBackend};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Which backend operation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Calculus,
    LinearAlgebra,
}

pub fn call_with_timeout(
    backend: Arc<dyn SymbolicBackend>,
    call: BackendCall,
    input: &str,
    timeout_ms: u64,
) -> Result<String, BackendError> {
    let (sender, receiver) = mpsc::channel();
    let input = input.to_string();

    thread::Builder::new()
        .name("calcbot-backend".to_string())
        .spawn(move || {
            let result = match call {
                BackendCall::Calculus => backend.calculus(&input),
                BackendCall::LinearAlgebra => backend.linear_algebra(&input),
            };
            // The receiver is gone if the caller already timed out
            let _ = sender.send(result);
        })
        .map_err(|e| BackendError::Worker(e.to_string()))?;

    match receiver.recv_timeout(Duration::from_millis(timeout_ms)) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(BackendError::Timeout(timeout_ms)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(BackendError::Worker(
            "worker stopped before producing a result".to_string(),
        )),
    }
}
