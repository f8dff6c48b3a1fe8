//! Tests to ensure forests prevent users from making cyclic links.

mod common;

use cellulose::{Error, NodeId};

use common::{child_names, sample_tree, step_names};

/// Returns the node reached by the path of child indices from the root.
fn descendant(forest: &cellulose::Forest<common::Kind>, root: NodeId, path: &[usize]) -> NodeId {
    path.iter().fold(root, |node, &index| {
        forest
            .children(node)
            .expect("alive")
            .nth(index)
            .map(|child| child.id())
            .expect("path exists")
    })
}

/// Append the node to itself.
#[test]
fn self_as_child() {
    let (mut forest, root) = sample_tree();
    let before = step_names(&forest, root);

    let err = forest.append_child(root, root).expect_err("cycle");
    assert!(matches!(err, Error::Cycle));
    assert_eq!(step_names(&forest, root), before);
}

/// Append the parent as a child.
#[test]
fn parent_as_child() {
    let (mut forest, root) = sample_tree();
    let aa = descendant(&forest, root, &[0]);

    let err = forest.append_child(aa, root).expect_err("cycle");
    assert_eq!(err.to_string(), "The new child is an ancestor of the parent");
}

/// Append the grandparent as a child.
#[test]
fn grandparent_as_child() {
    let (mut forest, root) = sample_tree();
    let aaa = descendant(&forest, root, &[0, 0]);

    assert!(matches!(forest.append_child(aaa, root), Err(Error::Cycle)));
    assert_eq!(child_names(&forest, root), ["aa", "ab"]);
}

/// Insert the parent before one of its children.
#[test]
fn parent_before_child() {
    let (mut forest, root) = sample_tree();
    let ab = descendant(&forest, root, &[1]);
    let aba = descendant(&forest, root, &[1, 0]);

    assert!(matches!(forest.insert_before(ab, ab, aba), Err(Error::Cycle)));
    assert!(matches!(forest.insert_before(ab, root, aba), Err(Error::Cycle)));
}

/// Replace a child with an ancestor of the parent.
#[test]
fn ancestor_as_replacement() {
    let (mut forest, root) = sample_tree();
    let ab = descendant(&forest, root, &[1]);
    let abb = descendant(&forest, root, &[1, 1]);

    assert!(matches!(forest.replace_child(ab, root, abb), Err(Error::Cycle)));
    assert_eq!(child_names(&forest, ab), ["aba", "abb"]);
}

/// Moving a node under its sibling is not a cycle.
#[test]
fn sibling_as_child() {
    let (mut forest, root) = sample_tree();
    let aa = descendant(&forest, root, &[0]);
    let ab = descendant(&forest, root, &[1]);

    forest.append_child(aa, ab).expect("not a cycle");
    assert_eq!(child_names(&forest, aa), ["aaa", "ab"]);
    assert!(forest.contains(root, ab).expect("alive"));
    assert!(forest.contains(aa, ab).expect("alive"));
    assert!(!forest.contains(ab, aa).expect("alive"));
}
