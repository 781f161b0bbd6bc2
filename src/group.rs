//! The aggregate-error container and its transform algebra.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::slice;

use tracing::{debug, trace};

use crate::chain::ChainCell;
use crate::error::{GroupError, GroupResult};
use crate::fault::Fault;
use crate::matcher::Matcher;
use crate::scope::{FromError, HandlerScope, Raised};

/// An error value bundling several independently-raised faults, each tagged
/// with a provenance label.
///
/// The child list and the source list are positionally paired and always the
/// same length. A group is immutable once constructed: [`FaultGroup::add`]
/// and [`FaultGroup::remove`] return new groups with the causal-chain slots
/// copied across, and membership keys on [`Fault::ptr_eq`] identity.
///
/// Typical handling discharges recognised faults one by one, then re-raises
/// whatever is left:
///
/// ```
/// use fault_group::{Fault, FaultGroup, HandlerScope, Matcher};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("bad record {0}")]
/// struct BadRecord(u32);
///
/// # fn demo(mut group: FaultGroup) -> Result<(), fault_group::Raised> {
/// while let Some(fault) = group.find(Matcher::of::<BadRecord>()).cloned() {
///     // handle the bad record here
///     group = group.remove(&fault).expect("fault came from this group");
/// }
/// group.maybe_reraise(&HandlerScope::new())
/// # }
/// # let g = FaultGroup::new("e", vec![], vec![]).unwrap();
/// # demo(g).unwrap();
/// ```
pub struct FaultGroup {
    message: String,
    children: Vec<Fault>,
    sources: Vec<String>,
    chain: ChainCell,
}

impl FaultGroup {
    /// Build a group from positionally paired faults and provenance labels.
    ///
    /// Fails with [`GroupError::LengthMismatch`] when the lists differ in
    /// length; nothing is constructed in that case. Taking the vectors by
    /// value is the defensive copy: the caller cannot mutate them afterwards.
    pub fn new(
        message: impl Into<String>,
        children: Vec<Fault>,
        sources: Vec<String>,
    ) -> GroupResult<Self> {
        if children.len() != sources.len() {
            return Err(GroupError::LengthMismatch {
                children: children.len(),
                sources: sources.len(),
            });
        }
        Ok(Self {
            message: message.into(),
            children,
            sources,
            chain: ChainCell::new(),
        })
    }

    /// Build a group from dynamic payloads caught at a propagation boundary,
    /// such as panic payloads from `std::thread::JoinHandle::join` or
    /// `catch_unwind`.
    ///
    /// Every payload must be a [`Fault`]; anything else fails the base-error
    /// conformance check with [`GroupError::InvalidMember`], identifying the
    /// offending payload, and nothing is constructed.
    pub fn from_caught(
        message: impl Into<String>,
        payloads: Vec<Box<dyn Any + Send>>,
        sources: Vec<String>,
    ) -> GroupResult<Self> {
        if payloads.len() != sources.len() {
            return Err(GroupError::LengthMismatch {
                children: payloads.len(),
                sources: sources.len(),
            });
        }
        let mut children = Vec::with_capacity(payloads.len());
        for (index, payload) in payloads.into_iter().enumerate() {
            match payload.downcast::<Fault>() {
                Ok(fault) => children.push(*fault),
                Err(other) => {
                    return Err(GroupError::InvalidMember {
                        index,
                        found: describe_payload(other.as_ref()),
                    })
                }
            }
        }
        Self::new(message, children, sources)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn children(&self) -> &[Fault] {
        &self.children
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// The group's own causal-chain slots.
    pub fn chain(&self) -> &ChainCell {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True iff the group carries no faults; the truthiness of the type.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Identity membership: true iff `fault` is one of the children.
    pub fn contains(&self, fault: &Fault) -> bool {
        self.children.iter().any(|child| child.ptr_eq(fault))
    }

    /// Iterate the `(fault, source)` pairs in order. Each call starts a fresh
    /// iteration.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.children.iter().zip(self.sources.iter()),
        }
    }

    /// First fault accepted by the matcher, or `None`.
    pub fn find<'a>(&'a self, matcher: Matcher<'a>) -> Option<&'a Fault> {
        self.find_all(matcher).next()
    }

    /// Like [`FaultGroup::find`], paired with the fault's provenance label.
    pub fn find_with_source<'a>(&'a self, matcher: Matcher<'a>) -> Option<(&'a Fault, &'a str)> {
        self.find_all_with_source(matcher).next()
    }

    /// All faults accepted by the matcher, lazily, in original order.
    pub fn find_all<'a>(&'a self, matcher: Matcher<'a>) -> impl Iterator<Item = &'a Fault> + 'a {
        self.children.iter().filter(move |fault| matcher.matches(fault))
    }

    /// Like [`FaultGroup::find_all`], paired with each fault's provenance
    /// label. The matcher only ever sees the fault; the label does not affect
    /// matching.
    pub fn find_all_with_source<'a>(
        &'a self,
        matcher: Matcher<'a>,
    ) -> impl Iterator<Item = (&'a Fault, &'a str)> + 'a {
        self.iter().filter(move |(fault, _)| matcher.matches(fault))
    }

    /// New group with `child`/`source` appended; this group is untouched and
    /// the chain slots are copied across.
    pub fn add(&self, child: Fault, source: impl Into<String>) -> Self {
        let source = source.into();
        trace!(members = self.len(), source = %source, "adding fault to group");
        let mut children = self.children.clone();
        children.push(child);
        let mut sources = self.sources.clone();
        sources.push(source);
        self.with_parts(children, sources)
    }

    /// New group with the first identity-equal occurrence of `fault` excised;
    /// later members shift down one position, order otherwise preserved.
    ///
    /// Fails with [`GroupError::NotAMember`] when no occurrence exists; this
    /// group is untouched either way.
    pub fn remove(&self, fault: &Fault) -> GroupResult<Self> {
        let index = self
            .children
            .iter()
            .position(|child| child.ptr_eq(fault))
            .ok_or_else(|| GroupError::NotAMember {
                fault: fault.clone(),
                group: format!("{self:?}"),
            })?;
        trace!(index, members = self.len(), "removing fault from group");
        let mut children = self.children.clone();
        children.remove(index);
        let mut sources = self.sources.clone();
        sources.remove(index);
        Ok(self.with_parts(children, sources))
    }

    /// Re-raise with the defaults: the cause resolves to the scope's
    /// in-flight fault and a singleton group is unwrapped.
    pub fn maybe_reraise(self, scope: &HandlerScope) -> Result<(), Raised> {
        self.maybe_reraise_with(scope, FromError::Implicit, true)
    }

    /// Re-raise this group if it contains any fault.
    ///
    /// An empty group returns `Ok(())` and raises nothing. With `unwrap` set
    /// and exactly one child, the child itself is raised and the group
    /// wrapper discarded; otherwise the group is raised whole. The raise
    /// writes the scope's in-flight fault as `context`, then the resolved
    /// cause, which forces `suppress_context` on the raised value.
    pub fn maybe_reraise_with(
        self,
        scope: &HandlerScope,
        from: FromError,
        unwrap: bool,
    ) -> Result<(), Raised> {
        if self.children.is_empty() {
            return Ok(());
        }
        let members = self.len();
        let cause = match from {
            FromError::Implicit => scope.in_flight().cloned(),
            FromError::Explicit(fault) => Some(fault),
            FromError::None => None,
        };
        let raised = if unwrap && members == 1 {
            let mut children = self.children;
            Raised::Single(children.swap_remove(0))
        } else {
            Raised::Group(self)
        };
        debug!(
            members,
            unwrap,
            unwrapped = raised.as_single().is_some(),
            "re-raising fault group"
        );
        raised.chain().set_context(scope.in_flight().cloned());
        raised.chain().set_cause(cause);
        Err(raised)
    }

    fn with_parts(&self, children: Vec<Fault>, sources: Vec<String>) -> Self {
        let group = Self {
            message: self.message.clone(),
            children,
            sources,
            chain: ChainCell::new(),
        };
        group.chain.copy_from(&self.chain);
        group
    }
}

/// Structural copy: same message, the same child handles, same sources, and
/// the chain slots copied via [`ChainCell::copy_from`] so an explicitly
/// cleared `suppress_context` survives the copy.
impl Clone for FaultGroup {
    fn clone(&self) -> Self {
        self.with_parts(self.children.clone(), self.sources.clone())
    }
}

/// Joins each child's rendering with `", "`; no child is omitted.
impl fmt::Display for FaultGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, fault) in self.children.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{fault}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FaultGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<FaultGroup: {self}>")
    }
}

impl StdError for FaultGroup {}

impl<'a> IntoIterator for &'a FaultGroup {
    type Item = (&'a Fault, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ordered iterator over a group's `(fault, source)` pairs.
pub struct Iter<'a> {
    inner: std::iter::Zip<slice::Iter<'a, Fault>, slice::Iter<'a, String>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Fault, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(fault, source)| (fault, source.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

fn describe_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("panic text {text:?}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("panic text {text:?}")
    } else {
        "opaque non-fault payload".to_string()
    }
}
