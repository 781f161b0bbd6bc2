//! Causal-chain slots shared by every raisable value.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::fault::Fault;

/// The three causal-chain slots of a raisable value.
#[derive(Clone, Default)]
struct ChainSlots {
    cause: Option<Fault>,
    context: Option<Fault>,
    suppress_context: bool,
}

/// Interior-mutable cell holding a raisable value's causal-chain slots.
///
/// `cause` is the fault that directly led to this one; `context` is the fault
/// that was in flight when this one was raised and is consulted only while
/// `suppress_context` is false. Shared [`Fault`] handles need their chain
/// written at raise time, so the slots sit behind a mutex; the cell absorbs
/// poisoning because the slots are plain data that an unwinding writer cannot
/// leave inconsistent.
#[derive(Default)]
pub struct ChainCell {
    slots: Mutex<ChainSlots>,
}

impl ChainCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fault that directly led to this one, if any.
    pub fn cause(&self) -> Option<Fault> {
        self.lock().cause.clone()
    }

    /// The fault that was in flight when this one was raised, if any.
    pub fn context(&self) -> Option<Fault> {
        self.lock().context.clone()
    }

    /// True once a cause has been set explicitly.
    pub fn suppress_context(&self) -> bool {
        self.lock().suppress_context
    }

    /// Set the direct cause.
    ///
    /// Mirroring raise-from semantics, this also flips `suppress_context` to
    /// true, even when the cause itself is `None`.
    pub fn set_cause(&self, cause: Option<Fault>) {
        let mut slots = self.lock();
        slots.cause = cause;
        slots.suppress_context = true;
    }

    pub fn set_context(&self, context: Option<Fault>) {
        self.lock().context = context;
    }

    pub fn set_suppress_context(&self, suppress: bool) {
        self.lock().suppress_context = suppress;
    }

    /// Copy every slot from another cell.
    ///
    /// Writes go through the setters in a fixed order: cause, context, and
    /// `suppress_context` last. `set_cause` flips the suppress flag as a side
    /// effect, so the explicitly copied value must be written after it.
    pub fn copy_from(&self, other: &ChainCell) {
        let (cause, context, suppress) = {
            let slots = other.lock();
            (slots.cause.clone(), slots.context.clone(), slots.suppress_context)
        };
        self.set_cause(cause);
        self.set_context(context);
        self.set_suppress_context(suppress);
    }

    fn lock(&self) -> MutexGuard<'_, ChainSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for ChainCell {
    fn clone(&self) -> Self {
        let cell = ChainCell::new();
        cell.copy_from(self);
        cell
    }
}

impl fmt::Debug for ChainCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.lock();
        f.debug_struct("ChainCell")
            .field("cause", &slots.cause.as_ref().map(|fault| fault.to_string()))
            .field("context", &slots.context.as_ref().map(|fault| fault.to_string()))
            .field("suppress_context", &slots.suppress_context)
            .finish()
    }
}
