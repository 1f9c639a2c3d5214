use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use futures::future::{AbortHandle, AbortRegistration};
use parking_lot::Mutex;
use tracing::debug;

use crate::distance_error::DistanceError;

static NEXT_OPERATION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    Requested,
    Completed,
    Failed,
    Cancelled,
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationState::Completed | OperationState::Failed | OperationState::Cancelled
        )
    }
}

type Callback<R> = Box<dyn FnOnce(Result<R, DistanceError>) + Send>;

struct CompletionSlot<R> {
    state: OperationState,
    callback: Option<Callback<R>>,
}

/// One in-flight async request.
///
/// The slot is single-assignment: whichever of completion or cancellation
/// takes the callback first delivers the only terminal outcome.
pub struct PendingOperation<R> {
    id: u64,
    slot: Mutex<CompletionSlot<R>>,
    abort_handle: AbortHandle,
}

impl<R> PendingOperation<R>
where
    R: Send + 'static,
{
    pub fn new<C>(callback: C) -> (Arc<Self>, AbortRegistration)
    where
        C: FnOnce(Result<R, DistanceError>) + Send + 'static,
    {
        let (abort_handle, registration) = AbortHandle::new_pair();
        let operation = Arc::new(Self {
            id: NEXT_OPERATION_ID.fetch_add(1, Ordering::Relaxed),
            slot: Mutex::new(CompletionSlot {
                state: OperationState::Idle,
                callback: Some(Box::new(callback)),
            }),
            abort_handle,
        });

        (operation, registration)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> OperationState {
        self.slot.lock().state
    }

    pub fn mark_requested(&self) {
        let mut slot = self.slot.lock();
        if slot.state == OperationState::Idle {
            slot.state = OperationState::Requested;
        }
    }

    /// Returns false when the operation already reached a terminal state.
    pub fn complete(&self, result: Result<R, DistanceError>) -> bool {
        let callback = {
            let mut slot = self.slot.lock();
            if slot.state.is_terminal() {
                return false;
            }
            slot.state = if result.is_ok() {
                OperationState::Completed
            } else {
                OperationState::Failed
            };
            slot.callback.take()
        };

        if let Some(callback) = callback {
            callback(result);
        }

        true
    }

    /// Returns false unless the operation was still `Requested`.
    pub fn cancel(&self) -> bool {
        let callback = {
            let mut slot = self.slot.lock();
            if slot.state != OperationState::Requested {
                return false;
            }
            slot.state = OperationState::Cancelled;
            slot.callback.take()
        };

        self.abort_handle.abort();
        debug!("PendingOperation {}: cancelled", self.id);

        if let Some(callback) = callback {
            callback(Err(DistanceError::Cancelled));
        }

        true
    }

    /// Guard that cancels the operation if it is dropped before completion.
    pub fn cancel_on_drop(self: &Arc<Self>) -> CancelOnDrop<R> {
        CancelOnDrop(Arc::clone(self))
    }
}

/// Held by the spawned task, a task dropped by runtime shutdown still
/// delivers `Cancelled`.
pub struct CancelOnDrop<R>(Arc<PendingOperation<R>>)
where
    R: Send + 'static;

impl<R> Drop for CancelOnDrop<R>
where
    R: Send + 'static,
{
    fn drop(&mut self) {
        self.0.cancel();
    }
}

trait Cancellable: Send + Sync {
    fn cancel(&self) -> bool;
    fn is_pending(&self) -> bool;
}

impl<R> Cancellable for PendingOperation<R>
where
    R: Send + 'static,
{
    fn cancel(&self) -> bool {
        PendingOperation::cancel(self)
    }

    fn is_pending(&self) -> bool {
        !self.state().is_terminal()
    }
}

/// Handle returned by every async call, cancels that call only.
#[derive(Clone)]
pub struct CancellationHandle {
    id: u64,
    operation: Arc<dyn Cancellable>,
}

impl CancellationHandle {
    pub fn new<R>(operation: Arc<PendingOperation<R>>) -> Self
    where
        R: Send + 'static,
    {
        Self {
            id: operation.id(),
            operation,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns true when this call delivered the cancellation.
    pub fn cancel(&self) -> bool {
        self.operation.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.operation.is_pending()
    }
}

impl std::fmt::Debug for CancellationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}
