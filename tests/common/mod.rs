//! Helpers shared by the integration tests.
#![allow(dead_code)]

use std::sync::Once;

use cellulose::{ConfiguredKind, Forest, NodeConfig, NodeId, NodeStep, TreeBuilder};

/// Installs a tracing subscriber once per test binary.
///
/// Set `RUST_LOG=cellulose=trace` to see the logs of a failing test.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Kind used by most tests.
///
/// Names are non-empty strings without `/`, data is a number below 1000.
pub type Kind = ConfiguredKind<String, u32>;

/// Returns the kind used by most tests.
pub fn kind() -> Kind {
    NodeConfig::builder()
        .name_init(|| "unnamed".to_owned())
        .name_description("NameString")
        .name_is_valid(|name: &String| !name.is_empty() && !name.contains('/'))
        .name_equal(|a: &String, b: &String| a == b)
        .name_to_string(|name: &String| name.clone())
        .data_init(|| 0)
        .data_description("Number below 1000")
        .data_is_valid(|data: &u32| *data < 1000)
        .build()
        .expect("all validators are set")
}

/// Returns an empty forest of [`Kind`].
pub fn forest() -> Forest<Kind> {
    init_tracing();
    Forest::with_kind(kind())
}

/// Creates a detached node with the given name.
pub fn create(forest: &mut Forest<Kind>, name: &str) -> NodeId {
    let id = forest.create_node();
    forest
        .set_name(id, name.to_owned())
        .expect("test names are valid");
    id
}

/// Returns the sample tree as a forest and the root node ID.
///
/// Tree to be built:
///
/// ```text
/// a
/// |-- aa
/// |   `-- aaa
/// `-- ab
///     |-- aba
///     `-- abb
/// ```
pub fn sample_tree() -> (Forest<Kind>, NodeId) {
    let mut forest = forest();
    let root = TreeBuilder::new(&mut forest, "a".into())
        .and_then(|mut builder| {
            Ok(builder
                .child("aa".into())?
                .child("aaa".into())?
                .parent()
                .sibling("ab".into())?
                .child("aba".into())?
                .sibling("abb".into())?
                .root_id())
        })
        .expect("sample tree is valid");
    (forest, root)
}

/// Returns the depth-first steps of the subtree as names.
pub fn step_names(forest: &Forest<Kind>, root: NodeId) -> Vec<NodeStep<String>> {
    forest
        .nodes(root)
        .expect("root is a node")
        .map(|step| step.map(|node| node.name().clone()))
        .collect()
}

/// Returns the names of the direct children.
pub fn child_names(forest: &Forest<Kind>, parent: NodeId) -> Vec<String> {
    forest
        .children(parent)
        .expect("parent is a node")
        .map(|child| child.name().clone())
        .collect()
}

/// Checks that every link of the subtree agrees with its counterpart.
pub fn assert_links(forest: &Forest<Kind>, root: NodeId) {
    for step in forest.nodes(root).expect("root is a node") {
        if !step.is_enter() {
            continue;
        }
        let node = step.node;
        let children = node.children().collect::<Vec<_>>();

        assert_eq!(node.first_child_id(), children.first().map(|c| c.id()));
        assert_eq!(node.last_child_id(), children.last().map(|c| c.id()));
        for (i, child) in children.iter().enumerate() {
            assert_eq!(child.parent_id(), Some(node.id()));
            let prev = i.checked_sub(1).map(|i| children[i].id());
            let next = children.get(i + 1).map(|c| c.id());
            assert_eq!(child.previous_sibling_id(), prev);
            assert_eq!(child.next_sibling_id(), next);
        }
    }
}
