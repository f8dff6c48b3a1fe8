//! Tests for name and data validation.

mod common;

use cellulose::{Error, Forest, NodeConfig, NodeKind, NodeStep, TreeBuilder};
use rstest::rstest;

use common::{create, forest, sample_tree};

#[rstest]
#[case::empty("")]
#[case::slash("a/b")]
fn invalid_name_is_rejected(#[case] name: &str) {
    let mut forest = forest();
    let node = create(&mut forest, "node");

    let err = forest
        .set_name(node, name.to_owned())
        .expect_err("invalid name");
    assert_eq!(
        err.to_string(),
        r#"Invalid "assigned value", one "NameString" expected."#
    );
    assert_eq!(forest.name(node).map(String::as_str), Some("node"));
}

#[test]
fn new_node_has_initial_values() {
    let mut forest = forest();
    let node = forest.create_node();

    assert_eq!(forest.name(node).map(String::as_str), Some("unnamed"));
    assert_eq!(forest.data(node), Some(&0));
    assert_eq!(forest.description().name, "NameString");
    assert_eq!(forest.description().data, "Number below 1000");
}

#[test]
fn rename_rejects_sibling_name() {
    let (mut forest, root) = sample_tree();
    let aa = forest.node(root).and_then(|n| n.first_child_id()).expect("aa");

    let err = forest.set_name(aa, "ab".to_owned()).expect_err("collision");
    assert!(matches!(err, Error::NameCollision { ref name } if name == "ab"));
}

#[test]
fn rename_to_own_name() {
    let (mut forest, root) = sample_tree();
    let aa = forest.node(root).and_then(|n| n.first_child_id()).expect("aa");

    forest.set_name(aa, "aa".to_owned()).expect("own name");
    forest.set_name(aa, "ac".to_owned()).expect("free name");
    assert_eq!(common::child_names(&forest, root), ["ac", "ab"]);
}

#[test]
fn roots_may_share_names() {
    let mut forest = forest();
    let a = create(&mut forest, "same");
    let b = create(&mut forest, "same");

    assert!(forest.is_name_equal_node(a, b).expect("alive"));
    assert!(!forest.is_same_node(a, b).expect("alive"));
    assert!(forest.is_same_node(a, a).expect("alive"));
}

#[test]
fn data_is_validated() {
    let mut forest = forest();
    let node = forest.create_node();

    forest.set_data(node, 999).expect("valid data");
    let err = forest.set_data(node, 1000).expect_err("invalid data");
    assert_eq!(
        err.to_string(),
        r#"Invalid "assigned value", one "Number below 1000" expected."#
    );
    assert_eq!(forest.data(node), Some(&999));
}

#[test]
fn has_child_validates_name() {
    let (forest, root) = sample_tree();

    assert!(forest.has_child(root, &"aa".to_owned()).expect("valid"));
    assert!(!forest.has_child(root, &"aaa".to_owned()).expect("valid"));
    let err = forest
        .has_child(root, &String::new())
        .expect_err("invalid name");
    assert!(matches!(err, Error::InvalidArgument { role: "name", .. }));
}

/// Names compared without regard to ASCII case.
#[derive(Debug, Default)]
struct CaseInsensitive;

impl NodeKind for CaseInsensitive {
    type Name = String;
    type Data = ();

    fn init_name(&self) -> String {
        "node".to_owned()
    }
    fn name_description(&self) -> &str {
        "string"
    }
    fn is_valid_name(&self, _: &String) -> bool {
        true
    }
    fn name_equal(&self, a: &String, b: &String) -> bool {
        a.eq_ignore_ascii_case(b)
    }
    fn name_to_string(&self, name: &String) -> String {
        name.clone()
    }
    fn init_data(&self) {}
    fn data_description(&self) -> &str {
        "unit"
    }
    fn is_valid_data(&self, _: &()) -> bool {
        true
    }
}

#[test]
fn collisions_follow_the_kind() {
    let mut forest = Forest::<CaseInsensitive>::new();
    let root = forest.create_node();
    let lower = forest.create_node();
    forest.set_name(lower, "readme".to_owned()).expect("valid");
    forest.append_child(root, lower).expect("first child");

    let upper = forest.create_node();
    forest.set_name(upper, "README".to_owned()).expect("valid");
    assert!(matches!(
        forest.append_child(root, upper),
        Err(Error::NameCollision { .. })
    ));
    assert!(forest.has_child(root, &"ReadMe".to_owned()).expect("valid"));
}

#[test]
fn builder_reports_missing_validator() {
    let err = NodeConfig::<String, ()>::builder()
        .name_init(String::new)
        .name_description("string")
        .build()
        .expect_err("validators are missing");
    assert_eq!(
        err.to_string(),
        r#"Invalid "name.is_valid", one "function" expected."#
    );
}

#[test]
fn node_has_child_validates_name() {
    let (forest, root) = sample_tree();
    let root = forest.node(root).expect("alive");

    assert!(root.has_child(&"ab".to_owned()).expect("valid"));
    let err = root.has_child(&"a/b".to_owned()).expect_err("invalid name");
    assert_eq!(err.to_string(), r#"Invalid "name", one "NameString" expected."#);
}

#[test]
fn rejected_builder_names_create_no_node() {
    let mut forest = forest();
    let mut builder = TreeBuilder::new(&mut forest, "root".into()).expect("valid name");
    builder.child("a".into()).expect("valid name");

    assert!(matches!(
        builder.sibling("a".into()),
        Err(Error::NameCollision { .. })
    ));
    assert!(matches!(
        builder.parent().child("a".into()),
        Err(Error::NameCollision { .. })
    ));
    assert!(matches!(
        builder.child("a/b".into()),
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(builder.forest().len(), 2);
}

#[test]
fn graft_rejects_sibling_collision_without_orphans() {
    let mut forest = forest();
    let steps = [
        NodeStep::enter("root"),
        NodeStep::enter("x"),
        NodeStep::leave("x"),
        NodeStep::enter("x"),
        NodeStep::leave("x"),
        NodeStep::leave("root"),
    ]
    .map(Ok);

    let result = forest.graft(steps, |name| Ok(((*name).to_owned(), 0)));
    assert!(matches!(result, Err(Error::NameCollision { ref name }) if name == "x"));
    assert_eq!(forest.len(), 2);

    let bad_data = [NodeStep::enter("y"), NodeStep::leave("y")].map(Ok);
    let result = forest.graft(bad_data, |name| Ok(((*name).to_owned(), 1000)));
    assert!(matches!(result, Err(Error::InvalidArgument { role: "data", .. })));
    assert_eq!(forest.len(), 2);
}
