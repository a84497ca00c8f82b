use std::collections::HashMap;
use std::sync::Arc;

use arbor_reflect::value::{CopyMode, Value};
use arbor_reflect::{Archivist, Config, Reflect};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "ops::Leaf")]
struct Leaf {
    value: f64,
    tag: String,
}

impl Leaf {
    fn new(value: f64, tag: &str) -> Self {
        Self {
            value,
            tag: tag.to_owned(),
        }
    }
}

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "ops::Tree")]
struct Tree {
    shared: Arc<Leaf>,
    owned: Leaf,
    children: Vec<Leaf>,
    weights: HashMap<String, f32>,
    spare: Option<Arc<Leaf>>,
}

fn tree() -> Tree {
    Tree {
        shared: Arc::new(Leaf::new(1.0, "root")),
        owned: Leaf::new(2.5, "own"),
        children: vec![Leaf::new(3.0, "a"), Leaf::new(4.0, "b")],
        weights: [("x".to_owned(), 0.5), ("y".to_owned(), 1.5)].into(),
        spare: None,
    }
}

#[test]
fn deep_copy_reallocates_shared() {
    let cx = Archivist::new();
    let source = tree();

    let copy = cx.deep_copy(&source).unwrap();
    assert!(!Arc::ptr_eq(&source.shared, &copy.shared));
    assert_eq!(copy.shared, source.shared);
    assert_eq!(copy.children, source.children);
    assert_eq!(copy.weights, source.weights);
    assert!(cx.deep_equals(&source, &copy).unwrap());
}

#[test]
fn shallow_copy_shares_arcs() {
    let cx = Archivist::new();
    let mut source = tree();
    source.spare = Some(Arc::new(Leaf::new(9.0, "spare")));

    let copy = cx.shallow_copy(&source).unwrap();
    assert!(Arc::ptr_eq(&source.shared, &copy.shared));
    assert!(Arc::ptr_eq(
        source.spare.as_ref().unwrap(),
        copy.spare.as_ref().unwrap()
    ));
    assert_eq!(copy.owned, source.owned);
    assert!(cx.deep_equals(&source, &copy).unwrap());
}

#[test]
fn merge_into_shared_content_replaces_it() {
    let cx = Archivist::new();
    let source = tree();
    let mut copy = cx.shallow_copy(&source).unwrap();

    cx.merge("shared=ops::Leaf {\n  value=8\n}\n", &mut copy).unwrap();
    assert_eq!(source.shared.value, 1.0);
    assert_eq!(copy.shared.value, 8.0);
    // Shared content is rebuilt, not merged.
    assert_eq!(copy.shared.tag, "");
}

#[test]
fn equality_is_structural() {
    let cx = Archivist::new();
    let a = tree();
    let mut b = tree();
    assert!(cx.deep_equals(&a, &b).unwrap());

    b.children[1].tag.push('!');
    assert!(!cx.deep_equals(&a, &b).unwrap());

    let nan = Leaf::new(f64::NAN, "nan");
    let copy = cx.deep_copy(&nan).unwrap();
    assert_ne!(nan, copy);
    assert!(cx.deep_equals(&nan, &copy).unwrap());

    assert!(!cx.deep_equals(&a, &nan).unwrap());
    assert!(!cx.deep_equals(&Leaf::new(0.0, ""), &Leaf::new(-0.0, "")).unwrap());
}

#[test]
fn dyn_copy() {
    let cx = Archivist::new();
    let source: Box<dyn Reflect> = Box::new(tree());

    let copy = cx.copy_dyn(&*source, CopyMode::Deep).unwrap();
    assert_eq!(copy.value_type_path(), "ops::Tree");
    assert!(cx.deep_equals(&*source, &*copy).unwrap());
}

#[test]
fn checksum_follows_text() {
    let cx = Archivist::new();
    let source = tree();

    let text = cx.serialize(&source).unwrap();
    let checksum = cx.checksum(&source).unwrap();
    assert_eq!(checksum, crc32fast::hash(text.as_bytes()));

    let mut reordered = tree();
    reordered.weights = [("y".to_owned(), 1.5), ("x".to_owned(), 0.5)].into();
    assert_eq!(cx.checksum(&reordered).unwrap(), checksum);

    reordered.owned.value = 2.75;
    assert_ne!(cx.checksum(&reordered).unwrap(), checksum);

    let numbered = Archivist::with_config(Config {
        numbered_lines: true,
        ..Config::default()
    });
    assert_eq!(numbered.checksum(&source).unwrap(), checksum);
}

#[derive(Reflect, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[reflect(type_path = "ops::Cell")]
struct Cell {
    row: u32,
    col: u32,
}

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "ops::Grid")]
struct Grid {
    cells: HashMap<Cell, String>,
}

#[test]
fn object_keys_are_sorted() {
    let cx = Archivist::new();
    let cells: Vec<(Cell, String)> = (0..16_u32)
        .map(|i| (Cell { row: i % 4, col: i / 4 }, i.to_string()))
        .collect();
    let forward = Grid {
        cells: cells.iter().cloned().collect(),
    };
    let backward = Grid {
        cells: cells.iter().rev().cloned().collect(),
    };

    let text = cx.serialize(&forward).unwrap();
    assert!(text.starts_with(
        "cells=HashMap {\n  ops::Cell {\n    col=0\n    row=0\n  }\n  \"0\"\n  ops::Cell {\n    col=0\n    row=1\n  }\n  \"1\"\n"
    ));
    assert_eq!(cx.serialize(&backward).unwrap(), text);
    assert_eq!(cx.checksum(&backward).unwrap(), cx.checksum(&forward).unwrap());

    let back: Grid = cx.deserialize(&text).unwrap();
    assert_eq!(back.cells, forward.cells);
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "left::Twin")]
struct LeftTwin {
    a: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "right::Twin")]
struct RightTwin {
    b: i32,
}

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "ops::Pair")]
struct Pair {
    left: LeftTwin,
}

#[test]
fn shared_short_name_is_not_a_match() {
    let cx = Archivist::new();
    cx.register::<LeftTwin>().unwrap();
    cx.register::<RightTwin>().unwrap();
    assert!(cx.types().read().is_ambiguous("Twin"));

    assert!(!cx.matches_type("Twin", "left::Twin"));
    assert!(!cx.matches_type("Twin", "right::Twin"));
    assert!(cx.matches_type("left::Twin", "left::Twin"));
    assert!(!cx.matches_type("right::Twin", "left::Twin"));

    assert!(cx.deserialize::<Pair>("left=Twin {\n  a=1\n}\n").is_err());
    let pair: Pair = cx.deserialize("left=left::Twin {\n  a=1\n}\n").unwrap();
    assert_eq!(pair.left, LeftTwin { a: 1 });
}
