use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use arbor_reflect::error::{ArchiveError, FormatError, SchemaError};
use arbor_reflect::schema::{Schema, SchemaBuilder};
use arbor_reflect::text::{TextReader, TextWriter};
use arbor_reflect::value::{Category, CopyMode, Typed, Value, ValueMut, ValueRef};
use arbor_reflect::{Archivist, Config, Describe, Reflect};

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "shapes::Circle", alias = "shapes::Round")]
struct Circle {
    #[reflect(alias = "size")]
    radius: f64,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "shapes::Square")]
struct Square {
    side: f64,
}

#[derive(Reflect, Debug)]
#[reflect(type_path = "shapes::Scene")]
struct Scene {
    main: Box<dyn Reflect>,
    extra: Option<Box<dyn Reflect>>,
    shapes: Vec<Box<dyn Reflect>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            main: Box::new(Circle::default()),
            extra: None,
            shapes: Vec::new(),
        }
    }
}

fn downcast<T: 'static>(object: &dyn Reflect) -> Option<&T> {
    let any: &dyn Any = object;
    any.downcast_ref::<T>()
}

#[test]
fn polymorphic_round_trip() {
    let cx = Archivist::new();
    let scene = Scene {
        main: Box::new(Square { side: 2.0 }),
        extra: Some(Box::new(Circle { radius: 0.5 })),
        shapes: vec![Box::new(Circle { radius: 1.0 }), Box::new(Square { side: 3.0 })],
    };

    let text = cx.serialize(&scene).unwrap();
    assert!(text.starts_with("extra=shapes::Circle {\n"));
    assert!(text.contains("shapes=Vec {\n  Reflect 2\n  shapes::Circle {\n"));

    let back: Scene = cx.deserialize(&text).unwrap();
    assert_eq!(format!("{:?}", back.main), "Reflect(\"shapes::Square\")");
    assert_eq!(downcast::<Square>(&*back.main), Some(&Square { side: 2.0 }));
    let extra = back.extra.as_deref().unwrap();
    assert_eq!(downcast::<Circle>(extra), Some(&Circle { radius: 0.5 }));
    assert_eq!(back.shapes.len(), 2);
    assert_eq!(back.shapes[1].value_type_path(), "shapes::Square");
    assert!(cx.deep_equals(&scene, &back).unwrap());
}

#[test]
fn stripped_headers() {
    let cx = Archivist::with_config(Config {
        strip_qualifiers: true,
        ..Config::default()
    });
    let scene = Scene {
        main: Box::new(Square { side: 2.0 }),
        extra: Some(Box::new(Circle { radius: 0.5 })),
        shapes: Vec::new(),
    };

    let text = cx.serialize(&scene).unwrap();
    assert_eq!(
        text,
        "extra=Circle {\n  radius=0.5\n}\nmain=Square {\n  side=2\n}\nshapes=Vec {\n  Reflect 0\n}\n"
    );

    let back: Scene = cx.deserialize(&text).unwrap();
    assert!(cx.deep_equals(&scene, &back).unwrap());
}

#[test]
fn unknown_header() {
    let cx = Archivist::new();
    let err = cx
        .deserialize::<Scene>("main=shapes::Hexagon {\n}\n")
        .unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(matches!(
        err,
        ArchiveError::SchemaAt {
            source: SchemaError::UnknownType(ref name),
            ..
        } if name == "shapes::Hexagon"
    ));
}

#[test]
fn aliases_are_accepted() {
    let cx = Archivist::new();
    let scene: Scene = cx
        .deserialize("main=shapes::Round {\n  size=3\n}\n")
        .unwrap();
    assert_eq!(downcast::<Circle>(&*scene.main), Some(&Circle { radius: 3.0 }));

    let circle: Circle = cx.deserialize("size=1.5\n").unwrap();
    assert_eq!(circle.radius, 1.5);
    assert_eq!(cx.serialize(&circle).unwrap(), "radius=1.5\n");

    assert!(cx.matches_type("Circle", "shapes::Circle"));
    assert!(cx.matches_type("shapes::Round", "shapes::Circle"));
    assert!(!cx.matches_type("Square", "shapes::Circle"));
}

// -----------------------------------------------------------------------------
// Schema attributes

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "units::Base")]
struct Base {
    id: u32,
    name: String,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "units::Unit")]
struct Unit {
    hp: u32,
    #[reflect(flatten)]
    base: Base,
}

#[test]
fn flattened_fields() {
    let cx = Archivist::new();
    let unit = Unit {
        hp: 10,
        base: Base {
            id: 7,
            name: "orc".to_owned(),
        },
    };

    let text = cx.serialize(&unit).unwrap();
    assert_eq!(text, "hp=10\nid=7\nname=\"orc\"\n");
    assert_eq!(cx.deserialize::<Unit>(&text).unwrap(), unit);

    let schema = cx.schema_of::<Unit>().unwrap();
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["hp", "id", "name"]);
}

#[derive(Reflect, Default)]
#[reflect(type_path = "units::Clash")]
struct Clash {
    a: i32,
    #[reflect(rename = "a")]
    b: i32,
}

#[derive(Reflect, Default)]
#[reflect(type_path = "units::Misfit")]
struct Misfit {
    #[reflect(archiver = "List")]
    count: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "units::Rank")]
struct Rank {
    #[reflect(archiver = "Text")]
    level: u8,
}

#[test]
fn invalid_schemas() {
    let cx = Archivist::new();
    assert!(matches!(
        cx.schema_of::<Clash>(),
        Err(SchemaError::DuplicateField { field: "a", .. })
    ));
    assert!(matches!(
        cx.schema_of::<Misfit>(),
        Err(SchemaError::UnsupportedCategory {
            field: "count",
            category: Category::Primitive,
            ..
        })
    ));

    let err = cx.serialize(&Clash::default()).unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::SchemaAt {
            source: SchemaError::DuplicateField { .. },
            ..
        }
    ));
}

#[test]
fn quoted_primitive() {
    let cx = Archivist::new();
    let text = cx.serialize(&Rank { level: 5 }).unwrap();
    assert_eq!(text, "level=\"5\"\n");
    assert_eq!(cx.deserialize::<Rank>(&text).unwrap(), Rank { level: 5 });
}

// -----------------------------------------------------------------------------
// Hand-written layout

/// Writes both coordinates on a single `xy=` line.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f32,
    y: f32,
}

impl Value for Point {
    fn value_type_path(&self) -> Cow<'static, str> {
        Self::type_path()
    }

    fn category(&self) -> Category {
        Category::Object
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Object(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Object(self)
    }
}

impl Typed for Point {
    const CATEGORY: Category = Category::Object;

    fn type_path() -> Cow<'static, str> {
        Cow::Borrowed("geo::Point")
    }

    fn construct(_header: &str, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(Self::default())
    }

    fn copy(&self, _mode: CopyMode, _cx: &Archivist) -> Result<Self, SchemaError> {
        Ok(*self)
    }
}

impl Reflect for Point {
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn schema(&self, cx: &Archivist) -> Result<Arc<Schema>, SchemaError> {
        cx.schemas().get_or_build::<Self>()
    }

    fn reflect_reset(&mut self) {
        *self = Self::default();
    }

    fn reflect_copy(&self, _mode: CopyMode, _cx: &Archivist) -> Result<Box<dyn Reflect>, SchemaError> {
        Ok(Box::new(*self))
    }

    fn write_fields(&self, out: &mut TextWriter<'_>, _cx: &Archivist) -> Result<(), ArchiveError> {
        out.write_line(&format!("xy={} {}", self.x, self.y))
    }

    fn read_fields(
        &mut self,
        input: &mut TextReader<'_>,
        _cx: &Archivist,
        _keep: bool,
    ) -> Result<(), ArchiveError> {
        while let Some(line) = input.read_line()? {
            let coords = line
                .text
                .strip_prefix("xy=")
                .and_then(|rest| rest.split_once(' '))
                .and_then(|(x, y)| Some((x.parse().ok()?, y.parse().ok()?)));
            match coords {
                Some((x, y)) => {
                    self.x = x;
                    self.y = y;
                }
                None => return Err(input.error(FormatError::MalformedField(line.text))),
            }
        }
        Ok(())
    }
}

impl Describe for Point {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.field("x", |p| &p.x, |p| &mut p.x);
        schema.field("y", |p| &p.y, |p| &mut p.y);
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "geo::Route")]
struct Route {
    start: Point,
    stops: Vec<Point>,
}

#[test]
fn custom_layout() {
    let cx = Archivist::new();
    let route = Route {
        start: Point { x: 1.0, y: 2.0 },
        stops: vec![Point { x: 3.0, y: 4.5 }],
    };

    let text = cx.serialize(&route).unwrap();
    assert_eq!(
        text,
        "start=geo::Point {\n  xy=1 2\n}\nstops=Vec {\n  geo::Point 1\n  geo::Point {\n    xy=3 4.5\n  }\n}\n"
    );
    assert_eq!(cx.deserialize::<Route>(&text).unwrap(), route);

    let mut moved = cx.deep_copy(&route).unwrap();
    moved.start.y = 0.0;
    assert!(!cx.deep_equals(&route, &moved).unwrap());

    let err = cx
        .deserialize::<Route>("start=geo::Point {\n  x=1\n}\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Format {
            line: 2,
            source: FormatError::MalformedField(_),
        }
    ));
}
