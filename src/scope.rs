//! The re-raise protocol: ambient in-flight fault, cause selection, and the
//! raised value.

use std::error::Error as StdError;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::chain::ChainCell;
use crate::fault::Fault;
use crate::group::FaultGroup;

/// Execution-context handle carrying the fault currently being handled.
///
/// Passed explicitly to [`FaultGroup::maybe_reraise`] so that the default
/// cause of a re-raise comes from the enclosing handler rather than from a
/// hidden global. Handler frames nest: [`HandlerScope::entered`] pushes a
/// frame and the returned guard pops it on drop.
#[derive(Debug, Default)]
pub struct HandlerScope {
    in_flight: Vec<Fault>,
}

impl HandlerScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently entered, not yet exited, handled fault.
    pub fn in_flight(&self) -> Option<&Fault> {
        self.in_flight.last()
    }

    /// Mark `fault` as being handled until the returned guard drops.
    pub fn entered(&mut self, fault: Fault) -> Entered<'_> {
        self.in_flight.push(fault);
        Entered { scope: self }
    }
}

/// RAII guard for a handler frame; derefs to the scope.
pub struct Entered<'a> {
    scope: &'a mut HandlerScope,
}

impl Deref for Entered<'_> {
    type Target = HandlerScope;

    fn deref(&self) -> &HandlerScope {
        self.scope
    }
}

impl DerefMut for Entered<'_> {
    fn deref_mut(&mut self) -> &mut HandlerScope {
        self.scope
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.scope.in_flight.pop();
    }
}

impl fmt::Debug for Entered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entered").field(&self.scope).finish()
    }
}

/// Cause selection for a re-raise, mirroring the `from` clause of a raise.
#[derive(Debug, Default)]
pub enum FromError {
    /// Use the scope's in-flight fault, if any.
    #[default]
    Implicit,
    /// Use this fault verbatim.
    Explicit(Fault),
    /// Raise with no cause. The implicit context is still suppressed, exactly
    /// as with an explicit cause.
    None,
}

/// The value produced by a re-raise: the lone child when a singleton group is
/// unwrapped, otherwise the whole group.
#[derive(Debug)]
pub enum Raised {
    Single(Fault),
    Group(FaultGroup),
}

impl Raised {
    /// The causal-chain slots of the raised value.
    pub fn chain(&self) -> &ChainCell {
        match self {
            Raised::Single(fault) => fault.chain(),
            Raised::Group(group) => group.chain(),
        }
    }

    pub fn as_single(&self) -> Option<&Fault> {
        match self {
            Raised::Single(fault) => Some(fault),
            Raised::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&FaultGroup> {
        match self {
            Raised::Single(_) => None,
            Raised::Group(group) => Some(group),
        }
    }

    /// Collapse into a single fault handle, wrapping a raised group so it can
    /// itself be aggregated into another group.
    pub fn into_fault(self) -> Fault {
        match self {
            Raised::Single(fault) => fault,
            Raised::Group(group) => Fault::new(group),
        }
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Single(fault) => fmt::Display::fmt(fault, f),
            Raised::Group(group) => fmt::Display::fmt(group, f),
        }
    }
}

impl StdError for Raised {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Raised::Single(fault) => fault.source(),
            Raised::Group(_) => None,
        }
    }
}
