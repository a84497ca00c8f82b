use arbor_reflect::dirty::{DirtyList, DirtyMap, Tracked};
use arbor_reflect::value::Value;
use arbor_reflect::{Archivist, Reflect};

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "sim::Stats")]
struct Stats {
    hp: Tracked<i32>,
    mp: Tracked<i32>,
}

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "sim::Player")]
struct Player {
    name: Tracked<String>,
    stats: Stats,
    log: DirtyList<i32>,
    marks: DirtyMap<String, i32>,
    plain: i32,
}

fn player() -> Player {
    Player {
        name: Tracked::new("ayla".to_owned()),
        stats: Stats {
            hp: Tracked::new(10),
            mp: Tracked::new(4),
        },
        log: DirtyList::from(vec![1, 2]),
        marks: DirtyMap::new(),
        plain: 3,
    }
}

#[test]
fn fresh_values_are_clean() {
    let cx = Archivist::new();
    let player = player();
    assert!(!cx.is_dirty(&player));
    assert_eq!(cx.serialize_dirty(&player).unwrap(), "");
}

#[test]
fn dirty_field_inside_clean_object() {
    let cx = Archivist::new();
    let mut player = player();

    *player.stats.hp = 5;
    assert!(cx.is_dirty(&player));
    assert!(!player.stats.mp.is_dirty());
    assert_eq!(
        cx.serialize_dirty(&player).unwrap(),
        "stats=sim::Stats {\n  hp=5\n}\n"
    );

    cx.mark_clean(&mut player);
    assert!(!cx.is_dirty(&player));
    assert_eq!(*player.stats.hp, 5);
}

#[test]
fn dirty_containers() {
    let cx = Archivist::new();
    let mut player = player();

    player.log.push(7);
    player.name.set("kael".to_owned());
    player.marks.insert("boss".to_owned(), 1);

    assert_eq!(
        cx.serialize_dirty(&player).unwrap(),
        "log=DirtyList {\n  int 3\n  1 2 7\n}\nmarks=DirtyMap {\n  \"boss\"\n  1\n}\nname=\"kael\"\n"
    );
}

#[test]
fn changes_merge_onto_older_copy() {
    let cx = Archivist::new();
    let mut player = player();
    let mut replica = cx.deep_copy(&player).unwrap();

    *player.stats.mp += 2;
    player.log.remove(0);
    player.plain = 99;

    let delta = cx.serialize_dirty(&player).unwrap();
    cx.merge(&delta, &mut replica).unwrap();

    assert_eq!(*replica.stats.mp, 6);
    assert_eq!(*replica.stats.hp, 10);
    assert_eq!(&*replica.log, &[2]);
    // Untracked fields never show up in the delta.
    assert_eq!(replica.plain, 3);

    player.plain = 3;
    assert!(cx.deep_equals(&player, &replica).unwrap());
}

#[test]
fn reading_marks_dirty() {
    let cx = Archivist::new();
    let mut player = player();

    cx.merge("name=\"zed\"\n", &mut player).unwrap();
    assert!(player.name.is_locally_dirty());
    assert!(!player.stats.is_dirty());

    let mut whole = Tracked::new(Stats::default());
    cx.merge("hp=1\n", &mut whole).unwrap();
    assert!(whole.is_locally_dirty());
    assert_eq!(*whole.hp, 1);
}

#[test]
fn locally_dirty_object_is_written_whole() {
    let cx = Archivist::new();
    let mut stats = Tracked::new(Stats {
        hp: Tracked::new(3),
        mp: Tracked::new(4),
    });
    stats.mark_dirty();
    assert_eq!(cx.serialize_dirty(&stats).unwrap(), "hp=3\nmp=4\n");
}
