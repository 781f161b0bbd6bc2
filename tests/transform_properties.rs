//! Property tests: any sequence of add/remove transforms keeps the child and
//! source lists paired, ordered, and structurally reversible.

use fault_group::{Fault, FaultGroup};
use proptest::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("worker fault: {0}")]
struct WorkerFault(String);

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a random group message.
fn arb_message() -> impl Strategy<Value = String> {
    "[a-z ]{0,24}"
}

/// Generate random paired member texts and source labels.
fn arb_members() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,12}", "[a-z/-]{0,12}"), 0..6)
}

fn build_group(message: &str, members: &[(String, String)]) -> FaultGroup {
    let children = members
        .iter()
        .map(|(text, _)| Fault::new(WorkerFault(text.clone())))
        .collect();
    let sources = members.iter().map(|(_, source)| source.clone()).collect();
    FaultGroup::new(message, children, sources).expect("paired lists")
}

fn assert_structurally_equal(left: &FaultGroup, right: &FaultGroup) {
    assert_eq!(left.message(), right.message());
    assert_eq!(left.len(), right.len());
    for (l, r) in left.children().iter().zip(right.children()) {
        assert!(l.ptr_eq(r));
    }
    assert_eq!(left.sources(), right.sources());
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Adding a fresh fault and removing it again restores the group
    /// structurally, wherever the fault sits.
    #[test]
    fn add_then_remove_round_trips(
        message in arb_message(),
        members in arb_members(),
        text in "[a-z]{1,12}",
        source in "[a-z/-]{0,12}",
    ) {
        let group = build_group(&message, &members);
        let fresh = Fault::new(WorkerFault(text));

        let grown = group.add(fresh.clone(), source);
        prop_assert_eq!(grown.len(), group.len() + 1);
        prop_assert!(grown.contains(&fresh));
        prop_assert!(!group.contains(&fresh));

        let back = grown.remove(&fresh).unwrap();
        assert_structurally_equal(&back, &group);
        prop_assert!(!back.contains(&fresh));
    }

    /// Children and sources stay positionally paired across any removal.
    #[test]
    fn removal_keeps_lists_paired(
        message in arb_message(),
        members in arb_members(),
        pick in any::<prop::sample::Index>(),
    ) {
        let group = build_group(&message, &members);
        prop_assert_eq!(group.len(), group.sources().len());
        if group.is_empty() {
            return Ok(());
        }

        let index = pick.index(group.len());
        let target = group.children()[index].clone();
        let remaining = group.remove(&target).unwrap();

        prop_assert_eq!(remaining.len(), group.len() - 1);
        prop_assert_eq!(remaining.len(), remaining.sources().len());
        prop_assert!(!remaining.contains(&target));

        // Everything except the excised position survives in order.
        let mut expected_children: Vec<_> = group.children().to_vec();
        expected_children.remove(index);
        for (l, r) in remaining.children().iter().zip(&expected_children) {
            prop_assert!(l.ptr_eq(r));
        }
        let mut expected_sources = group.sources().to_vec();
        expected_sources.remove(index);
        prop_assert_eq!(remaining.sources(), &expected_sources[..]);
    }

    /// Removing a stranger fails and leaves the group structurally intact.
    #[test]
    fn removing_a_stranger_changes_nothing(
        message in arb_message(),
        members in arb_members(),
        text in "[a-z]{1,12}",
    ) {
        let group = build_group(&message, &members);
        let reference = group.clone();
        let stranger = Fault::new(WorkerFault(text));

        prop_assert!(group.remove(&stranger).is_err());
        assert_structurally_equal(&group, &reference);
    }

    /// Iteration always yields exactly the stored pairs, in order.
    #[test]
    fn iteration_matches_construction(
        message in arb_message(),
        members in arb_members(),
    ) {
        let group = build_group(&message, &members);
        let pairs: Vec<_> = group.iter().collect();
        prop_assert_eq!(pairs.len(), members.len());
        for ((fault, source), (text, expected_source)) in pairs.iter().zip(&members) {
            prop_assert_eq!(&fault.to_string(), &format!("worker fault: {}", text));
            prop_assert_eq!(*source, expected_source.as_str());
        }
    }
}
