// Rename Idempotence Contract Tests
//
// These tests verify that check and rename agree with each other and that
// rename can be re-run safely after a partial or repeated run.
//
// **Problem**: a rename that rewrites values it didn't need to, or reports
// changes it didn't make, can't be re-run to recover from a partial failure
// **Solution**: Contract tests on repeated and reversed renames

#[path = "../common/mod.rs"]
mod common;

use common::ProjectTree;
use pretty_assertions::assert_eq;

/// WHY: Recovery from a partial rename is "run it again"
/// REASON: Rename only touches values that differ from the target name
/// BREAKS: Repeated runs would rewrite files and report phantom changes
#[test]
fn second_rename_changes_nothing() {
    let tree = ProjectTree::full("OldWidget");

    let mut model = tree.open();
    assert!(model.rename("Widget").unwrap());
    let after_first = tree.snapshot();

    assert!(!model.rename("Widget").unwrap());
    assert!(model.changes().is_empty());
    assert_eq!(tree.snapshot(), after_first);

    // a fresh model over the renamed tree agrees
    let mut fresh = tree.open();
    assert!(!fresh.rename("Widget").unwrap());
    assert_eq!(tree.snapshot(), after_first);
}

/// WHY: Check and rename describe the same invariants
/// REASON: Renaming to the `.ioc` name fixes exactly what check reports
/// BREAKS: The tool would report issues it can't fix, or fix things it never reported
#[test]
fn rename_to_ioc_name_clears_every_issue() {
    let tree = ProjectTree::cube("Widget", "OldWidget", "Stale")
        .with_touchgfx("OldWidget")
        .with_launch("Other");

    let mut model = tree.open();
    let issue_count = model.issues().len();
    assert_eq!(issue_count, 12);

    let ioc_name = model.device_config().name().to_string();
    assert!(model.rename(&ioc_name).unwrap());
    assert!(model.issues().is_empty(), "{:?}", model.issues());
    assert!(tree.open().issues().is_empty());
}

/// WHY: Renaming back restores the original bytes
/// REASON: Only bound values change; everything else round-trips untouched
/// BREAKS: Each rename would drift the files away from what the IDE wrote
#[test]
fn rename_and_back_restores_tree() {
    let tree = ProjectTree::full("Widget");
    let original = tree.snapshot();

    let mut model = tree.open();
    assert!(model.rename("Gadget").unwrap());
    assert_ne!(tree.snapshot(), original);

    let mut model = tree.open();
    assert!(model.rename("Widget").unwrap());
    assert_eq!(tree.snapshot(), original);
}

/// WHY: Changes list what actually happened, nothing more
/// REASON: Each change is recorded after its file move or save succeeded
/// BREAKS: Users would be told about edits that never reached the disk
#[test]
fn changes_are_counted_once_per_field() {
    let tree = ProjectTree::full("OldWidget");

    let mut model = tree.open();
    model.rename("Widget").unwrap();
    let mut changes = model.changes().to_vec();
    let total = changes.len();
    changes.sort();
    changes.dedup();
    assert_eq!(changes.len(), total);
    assert_eq!(total, 13);
}
