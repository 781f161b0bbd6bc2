//! Search parameters for [`crate::FaultGroup::find`] and friends.

use std::any::TypeId;
use std::error::Error as StdError;
use std::fmt;

use crate::fault::Fault;

/// A search parameter: either an arbitrary predicate over faults or a set of
/// payload kinds. A kind set is resolved internally to a predicate over the
/// fault's captured `TypeId`, so both forms match uniformly.
pub enum Matcher<'a> {
    /// Matches faults the closure accepts.
    Predicate(Box<dyn Fn(&Fault) -> bool + 'a>),
    /// Matches faults whose concrete payload type is one of these.
    Kinds(Vec<TypeId>),
}

impl<'a> Matcher<'a> {
    /// Match payloads of concrete type `E`.
    pub fn of<E>() -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Matcher::Kinds(vec![TypeId::of::<E>()])
    }

    /// Match payloads whose type is any of the given kinds.
    pub fn any_of(kinds: impl IntoIterator<Item = TypeId>) -> Self {
        Matcher::Kinds(kinds.into_iter().collect())
    }

    /// Match faults the closure accepts.
    pub fn predicate(predicate: impl Fn(&Fault) -> bool + 'a) -> Self {
        Matcher::Predicate(Box::new(predicate))
    }

    pub(crate) fn matches(&self, fault: &Fault) -> bool {
        match self {
            Matcher::Predicate(predicate) => predicate(fault),
            Matcher::Kinds(kinds) => kinds.contains(&fault.kind()),
        }
    }
}

impl fmt::Debug for Matcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Predicate(_) => f.write_str("Matcher::Predicate(..)"),
            Matcher::Kinds(kinds) => f.debug_tuple("Matcher::Kinds").field(kinds).finish(),
        }
    }
}
