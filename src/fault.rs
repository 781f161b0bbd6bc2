//! The universal child-error handle.

use std::any::{type_name, TypeId};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::chain::ChainCell;

/// A reference-counted handle to a raisable error value.
///
/// A `Fault` wraps any `std::error::Error` payload together with its
/// causal-chain slots. Cloning clones the handle, not the payload, and
/// identity ([`Fault::ptr_eq`]) follows the handle — this is what membership
/// and removal in a [`crate::FaultGroup`] key on, so a duplicate-valued but
/// separately constructed fault is never mistaken for the one the caller
/// means.
#[derive(Clone)]
pub struct Fault {
    inner: Arc<FaultInner>,
}

struct FaultInner {
    payload: Box<dyn StdError + Send + Sync>,
    kind: TypeId,
    kind_name: &'static str,
    chain: ChainCell,
}

impl Fault {
    /// Wrap a concrete error value, capturing its type for kind matching.
    pub fn new<E>(payload: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Fault {
            inner: Arc::new(FaultInner {
                payload: Box::new(payload),
                kind: TypeId::of::<E>(),
                kind_name: type_name::<E>(),
                chain: ChainCell::new(),
            }),
        }
    }

    /// Identity comparison: true iff both handles refer to the same fault.
    pub fn ptr_eq(&self, other: &Fault) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// `TypeId` of the wrapped payload, captured at construction.
    pub fn kind(&self) -> TypeId {
        self.inner.kind
    }

    /// Type name of the wrapped payload, for reporting.
    pub fn kind_name(&self) -> &'static str {
        self.inner.kind_name
    }

    /// Whether the payload is of concrete type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + Send + Sync + 'static,
    {
        self.inner.kind == TypeId::of::<E>()
    }

    /// Borrow the payload as concrete type `E`, if it is one.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.inner.payload.as_ref().downcast_ref::<E>()
    }

    /// Borrow the payload as a trait object.
    pub fn payload(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.payload.as_ref()
    }

    /// The causal-chain slots of this fault.
    pub fn chain(&self) -> &ChainCell {
        &self.inner.chain
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.payload, f)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fault({:?})", self.inner.payload)
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.payload.source()
    }
}
