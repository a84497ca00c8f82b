use std::collections::{BTreeMap, HashMap};

use arbor_reflect::error::{ArchiveError, FormatError};
use arbor_reflect::{Archivist, Config, Reflect};

#[derive(Reflect, Default, Debug, PartialEq)]
struct Inventory {
    count: i32,
    label: String,
    tags: Vec<i32>,
}

#[derive(Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(type_path = "MyEnum")]
enum MyEnum {
    #[default]
    A,
    B,
    C,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "test::Palette")]
struct Palette {
    colors: [MyEnum; 2],
    names: BTreeMap<String, i32>,
    note: Option<String>,
    scores: HashMap<String, u8>,
    weights: Box<[f32]>,
}

fn palette() -> Palette {
    Palette {
        colors: [MyEnum::B, MyEnum::C],
        names: [("x".to_owned(), 1), ("a".to_owned(), 2)].into(),
        note: None,
        scores: [("b".to_owned(), 3), ("a".to_owned(), 4)].into(),
        weights: vec![0.5, 1.25].into_boxed_slice(),
    }
}

const PALETTE_TEXT: &str = "\
colors=MyEnum 2 {
  B C
}
names=BTreeMap {
  \"a\"
  2
  \"x\"
  1
}
note=null
scores=HashMap {
  \"a\"
  4
  \"b\"
  3
}
weights=float 2 {
  0.5 1.25
}
";

#[test]
fn read_rust_aliases() {
    let cx = Archivist::new();
    let text = "count=3\nlabel=\"hi\"\ntags=Vec {\n  i32 3\n  1 2 3\n}\n";

    let inventory: Inventory = cx.deserialize(text).unwrap();
    assert_eq!(
        inventory,
        Inventory {
            count: 3,
            label: "hi".to_owned(),
            tags: vec![1, 2, 3],
        }
    );

    let written = cx.serialize(&inventory).unwrap();
    assert_eq!(written, "count=3\nlabel=\"hi\"\ntags=Vec {\n  int 3\n  1 2 3\n}\n");
}

#[test]
fn write_every_category() {
    let cx = Archivist::new();
    let text = cx.serialize(&palette()).unwrap();
    assert_eq!(text, PALETTE_TEXT);

    let back: Palette = cx.deserialize(&text).unwrap();
    assert_eq!(back, palette());
}

#[test]
fn empty_sequences() {
    let cx = Archivist::new();
    let text = cx.serialize(&Inventory::default()).unwrap();
    assert_eq!(text, "count=0\nlabel=\"\"\ntags=Vec {\n  int 0\n}\n");

    let back: Inventory = cx.deserialize(&text).unwrap();
    assert!(back.tags.is_empty());
}

#[test]
fn escaped_text() {
    let cx = Archivist::new();
    let inventory = Inventory {
        label: "two\nlines\t100%".to_owned(),
        ..Inventory::default()
    };
    let text = cx.serialize(&inventory).unwrap();
    assert!(text.contains("label=\"two%0Alines%09100%25\"\n"));

    let back: Inventory = cx.deserialize(&text).unwrap();
    assert_eq!(back.label, inventory.label);
}

#[test]
fn comments_and_blank_lines() {
    let cx = Archivist::new();
    let text = "# saved inventory\n\ncount=4\n   \ntags=Vec {\n  # numbers\n  i32 1\n  9\n}\n";
    let inventory: Inventory = cx.deserialize(text).unwrap();
    assert_eq!(inventory.count, 4);
    assert_eq!(inventory.tags, [9]);
    assert_eq!(inventory.label, "");
}

#[test]
fn bad_constant_reports_line() {
    let cx = Archivist::new();
    let text = "note=\"n\"\ncolors=MyEnum 2 {\n  A Q\n}\n";
    let err = cx.deserialize::<Palette>(text).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(matches!(
        err,
        ArchiveError::Format {
            source: FormatError::UnknownConstant { ref token, .. },
            ..
        } if token == "Q"
    ));
}

#[test]
fn fixed_length_mismatch() {
    let cx = Archivist::new();

    let err = cx
        .deserialize::<Palette>("colors=MyEnum 3 {\n  A B C\n}\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 1,
            source: FormatError::LengthMismatch {
                expected: 2,
                actual: 3
            },
        }
    ));

    let err = cx
        .deserialize::<Palette>("colors=MyEnum 2 {\n  A\n}\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 2,
            source: FormatError::LengthMismatch { .. },
        }
    ));
}

#[test]
fn element_type_mismatch() {
    let cx = Archivist::new();
    let err = cx
        .deserialize::<Inventory>("tags=Vec {\n  String 1\n  \"a\"\n}\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 2,
            source: FormatError::TypeMismatch { .. },
        }
    ));
}

#[test]
fn lenient_list_container() {
    let cx = Archivist::new();
    let inventory: Inventory = cx
        .deserialize("tags=VecDeque {\n  i32 2\n  4 5\n}\n")
        .unwrap();
    assert_eq!(inventory.tags, [4, 5]);
}

#[test]
fn unknown_fields() {
    let text = "count=1\nextra=Thing {\n  a=1\n  inner=Other {\n  }\n}\nlabel=\"x\"\n";

    let lenient = Archivist::new();
    let inventory: Inventory = lenient.deserialize(text).unwrap();
    assert_eq!(inventory.count, 1);
    assert_eq!(inventory.label, "x");

    let strict = Archivist::with_config(Config {
        strict_unknown_fields: true,
        ..Config::default()
    });
    let err = strict.deserialize::<Inventory>(text).unwrap_err();
    assert_eq!(err.line(), Some(2));
    match err {
        ArchiveError::Format {
            source: FormatError::UnknownField { field, known, .. },
            ..
        } => {
            assert_eq!(field, "extra");
            assert_eq!(known, "count, label, tags");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn null_values() {
    let cx = Archivist::new();

    let palette: Palette = cx.deserialize("note=\"set\"\n").unwrap();
    assert_eq!(palette.note.as_deref(), Some("set"));

    let mut palette = palette;
    cx.merge("note=null\n", &mut palette).unwrap();
    assert_eq!(palette.note, None);

    let err = cx.deserialize::<Inventory>("count=null\n").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 1,
            source: FormatError::NullNotAllowed(_),
        }
    ));
}

#[test]
fn structural_errors() {
    let cx = Archivist::new();

    let err = cx.deserialize::<Inventory>("count 3\n").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            source: FormatError::MalformedField(_),
            ..
        }
    ));

    let err = cx
        .deserialize::<Inventory>("tags=Vec {\n  i32 1\n  5\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            source: FormatError::UnexpectedEnd { depth: 1 },
            ..
        }
    ));

    let err = cx.deserialize::<Inventory>("count=3\n}\n").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 2,
            source: FormatError::UnexpectedClose,
        }
    ));

    let err = cx.deserialize::<Inventory>("count=3 {\n}\n").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            source: FormatError::UnexpectedBlock(_),
            ..
        }
    ));

    let err = cx.deserialize::<Inventory>("count=three\n").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            source: FormatError::InvalidToken { .. },
            ..
        }
    ));
}

#[test]
fn numbered_output() {
    let cx = Archivist::with_config(Config {
        numbered_lines: true,
        ..Config::default()
    });
    let text = cx.serialize(&Inventory::default()).unwrap();
    assert_eq!(
        text,
        "    1: count=0\n    2: label=\"\"\n    3: tags=Vec {\n    4:   int 0\n    5: }\n"
    );
}

#[test]
fn file_round_trip() {
    let cx = Archivist::new();
    let path = std::env::temp_dir().join(format!("arbor-archive-{}.txt", std::process::id()));

    cx.save(&palette(), &path).unwrap();
    let back: Palette = cx.load(&path).unwrap();
    assert_eq!(back, palette());

    let mut target = Palette::default();
    assert!(cx.try_load(&path, &mut target, false));
    assert_eq!(target, palette());

    std::fs::remove_file(&path).unwrap();
    assert!(!cx.try_load(&path, &mut target, false));
    assert!(matches!(
        cx.load::<Palette>(&path),
        Err(ArchiveError::Io { .. })
    ));
}
