//! Tests for the filesystem directory provider.
#![cfg(feature = "fs")]

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use cellulose::{Action, Error, FsDirectoryProvider, FsNode, NodeStep, Provider};
use tempfile::TempDir;

/// Creates `a/{aa/aaa, ab/{aba, abb/abba}, ac}` and the regular file `a/bad`.
fn sample_dir() -> (TempDir, PathBuf) {
    common::init_tracing();
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("a");
    for dir in ["aa/aaa", "ab/aba", "ab/abb/abba", "ac"] {
        fs::create_dir_all(root.join(dir)).expect("failed to create dir");
    }
    fs::write(root.join("bad"), "").expect("failed to create file");
    (temp, root)
}

fn seek_paths(provider: &FsDirectoryProvider, root: &Path) -> Vec<(PathBuf, Action)> {
    provider
        .seek(root.to_path_buf())
        .expect("absolute origin")
        .map(|step| step.map(|step| (step.node.origin, step.action)))
        .collect::<cellulose::Result<_>>()
        .expect("directories are readable")
}

#[test]
fn seek_walks_directories_in_order() {
    let (_temp, root) = sample_dir();
    let p = |rel: &str| if rel.is_empty() { root.clone() } else { root.join(rel) };

    let expected = [
        ("", Action::Enter),
        ("aa", Action::Enter),
        ("aa/aaa", Action::Enter),
        ("aa/aaa", Action::Leave),
        ("aa", Action::Leave),
        ("ab", Action::Enter),
        ("ab/aba", Action::Enter),
        ("ab/aba", Action::Leave),
        ("ab/abb", Action::Enter),
        ("ab/abb/abba", Action::Enter),
        ("ab/abb/abba", Action::Leave),
        ("ab/abb", Action::Leave),
        ("ab", Action::Leave),
        ("ac", Action::Enter),
        ("ac", Action::Leave),
        ("", Action::Leave),
    ]
    .map(|(rel, action)| (p(rel), action));
    assert_eq!(seek_paths(&FsDirectoryProvider::new(), &root), expected);
}

#[test]
fn max_depth_bounds_descent() {
    let (_temp, root) = sample_dir();

    let entered = seek_paths(&FsDirectoryProvider::new().max_depth(Some(1)), &root)
        .into_iter()
        .filter(|(_, action)| *action == Action::Enter)
        .map(|(path, _)| path)
        .collect::<Vec<_>>();
    assert_eq!(
        entered,
        [root.clone(), root.join("aa"), root.join("ab"), root.join("ac")]
    );
}

#[test]
fn regular_file_origin_is_not_a_directory() {
    let (_temp, root) = sample_dir();
    let bad = root.join("bad");

    let mut seek = FsDirectoryProvider::new()
        .seek(bad.clone())
        .expect("absolute origin");
    let err = match seek.next() {
        Some(Err(e)) => e,
        other => panic!("expected an error, got {:?}", other),
    };
    assert!(matches!(err, Error::NotADirectory { ref path } if *path == bad));
    assert!(err.to_string().contains("MUST be a directory"));
    assert!(seek.next().is_none());
}

#[test]
fn missing_origin_is_io_error() {
    let (_temp, root) = sample_dir();

    let result = FsDirectoryProvider::new()
        .seek(root.join("missing"))
        .expect("absolute origin")
        .next();
    assert!(matches!(result, Some(Err(Error::Io { .. }))));
}

#[test]
fn relative_origin_is_rejected() {
    let err = FsDirectoryProvider::new()
        .seek(PathBuf::from("relative/path"))
        .expect_err("relative origin");
    assert_eq!(
        err.to_string(),
        r#"Invalid "origin", one "AbsolutePathnameString" expected."#
    );
}

#[test]
fn nodes_carry_absolute_origins() {
    let provider = FsDirectoryProvider::new();

    assert!(provider.is_node(&FsNode {
        origin: std::env::temp_dir()
    }));
    assert!(!provider.is_node(&FsNode {
        origin: PathBuf::from("a")
    }));
    assert_eq!(provider.node_description(), "ObjectWithOrigin");
}

#[test]
fn graft_mirrors_directories_into_forest() {
    let (_temp, root) = sample_dir();
    let mut forest = common::forest();

    let seek = FsDirectoryProvider::new()
        .seek(root.clone())
        .expect("absolute origin");
    let tree = forest
        .graft(seek, |node| {
            let name = node
                .origin
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok((name, 0))
        })
        .expect("directories are readable")
        .expect("origin is entered");

    let expected = "\
a
|-- aa
|   `-- aaa
|-- ab
|   |-- aba
|   `-- abb
|       `-- abba
`-- ac";
    let printed = forest.debug_print(tree).map(|p| p.to_string());
    assert_eq!(printed.as_deref(), Some(expected));
    common::assert_links(&forest, tree);
}

#[test]
fn graft_stops_at_first_error() {
    let (_temp, root) = sample_dir();
    let mut forest = common::forest();

    let seek = FsDirectoryProvider::new()
        .seek(root.join("bad"))
        .expect("absolute origin");
    let result = forest.graft(seek, |_| Ok(("x".to_owned(), 0)));
    assert!(matches!(result, Err(Error::NotADirectory { .. })));
    assert!(forest.is_empty());
}

/// Starts a walk whose provider does not outlive this function.
fn walk_with_local_provider(
    root: &Path,
) -> impl Iterator<Item = cellulose::Result<NodeStep<FsNode>>> {
    let provider = FsDirectoryProvider::new().max_depth(Some(0));
    provider.seek(root.to_path_buf()).expect("absolute origin")
}

#[test]
fn steps_do_not_borrow_the_provider() {
    let (_temp, root) = sample_dir();

    let steps = walk_with_local_provider(&root)
        .map(|step| step.map(|step| (step.node.origin, step.action)))
        .collect::<cellulose::Result<Vec<_>>>()
        .expect("origin is readable");
    assert_eq!(
        steps,
        [(root.clone(), Action::Enter), (root.clone(), Action::Leave)]
    );
}
