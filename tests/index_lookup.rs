use std::path::Path;

use liftlex::{Item, LiftVersion, Lexicon, Parent};

fn setup() -> Lexicon {
    Lexicon::from_path(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/minimal_13.lift"))
        .unwrap()
}

#[test]
fn every_id_resolves_to_its_item() {
    let lexicon = setup();
    for entry in &lexicon.entry_items {
        let found = lexicon.get_item_by_id(&entry.id).unwrap();
        assert!(std::ptr::eq(found.as_entry().unwrap(), entry));
        assert!(matches!(lexicon.get_item_parent_by_id(&entry.id), Some(Parent::Lexicon)));
        for (_, sense) in entry.senses() {
            let found = lexicon.get_item_by_id(&sense.id).unwrap();
            assert!(std::ptr::eq(found.as_sense().unwrap(), sense));
        }
    }
    assert!(lexicon.get_item_by_id("no-such-id").is_none());
    assert!(lexicon.get_item_parent_by_id("no-such-id").is_none());
}

#[test]
fn parents_are_direct_containers() {
    let lexicon = setup();
    let sense = "f6c860ea-80ff-431a-a5dd-9469b315f40c";
    let subsense = "b7d1e2a0-5c3f-4e2b-9a8d-6f1e0c2b3a4d";
    match lexicon.get_item_parent_by_id(sense) {
        Some(Parent::Entry(entry)) => assert_eq!(entry.id, "kôli_0ae89610-fb4a-4a4f-9b6d-4c1b58d1a1f0"),
        other => panic!("unexpected parent {other:?}"),
    }
    match lexicon.get_item_parent_by_id(subsense) {
        Some(parent @ Parent::Sense(_)) => assert_eq!(parent.id().map(|id| id.as_str()), Some(sense)),
        other => panic!("unexpected parent {other:?}"),
    }
}

#[test]
fn lookups_follow_structural_edits() {
    let mut lexicon = setup();
    let removed = lexicon.remove_entry(0).unwrap();
    assert!(lexicon.get_item_by_id(&removed.id).is_none());
    let house = lexicon.get_item_by_id("086e06e3-a5f6-4c54-805a-4a1adcd51d4f").unwrap();
    assert_eq!(house.as_sense().unwrap().gloss("en").unwrap().text.plain(), "house");

    let index = lexicon.add_entry();
    let id = lexicon.entry_items[index].id.to_string();
    assert!(lexicon.get_item_by_id(&id).is_some());

    let entry = lexicon.entry_mut(index).unwrap();
    let s = entry.add_sense();
    let sub = entry.sense_items[s].add_subsense();
    let sub_id = entry.sense_items[s].subsense_items[sub].id.to_string();
    let sense_id = entry.sense_items[s].id.to_string();
    match lexicon.get_item_parent_by_id(&sub_id) {
        Some(Parent::Sense(parent)) => assert_eq!(parent.id, sense_id.as_str()),
        other => panic!("unexpected parent {other:?}"),
    }
}

#[test]
fn edits_through_public_fields_are_caught() {
    let mut lexicon = setup();
    // reorder without telling the lexicon
    lexicon.entry_items.swap(0, 3);
    let found = lexicon.get_item_by_id("9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b").unwrap();
    assert_eq!(found.id(), "9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b");

    let moved = lexicon.entry_items[0].sense_items.pop().unwrap();
    lexicon.entry_items[1].sense_items.push(moved);
    lexicon.reindex();
    match lexicon.get_item_parent_by_id("9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b") {
        Some(Parent::Entry(entry)) => assert_eq!(entry.id, lexicon.entry_items[1].id),
        other => panic!("unexpected parent {other:?}"),
    }
}

#[test]
fn added_entries_get_unique_guid_ids() {
    let mut lexicon = Lexicon::new(LiftVersion::V0_15);
    let ids: Vec<String> = (0..50)
        .map(|_| {
            let index = lexicon.add_entry();
            lexicon.entry_items[index].id.to_string()
        })
        .collect();
    for (i, id) in ids.iter().enumerate() {
        assert!(lexicon.entry_items[i].id.is_guid());
        assert!(!ids[..i].contains(id));
        assert!(matches!(lexicon.get_item_by_id(id), Some(Item::Entry(_))));
    }
}

#[test]
fn duplicate_ids_keep_the_first_occurrence() {
    let xml = r#"<lift version="0.15">
  <entry id="a"><sense id="s1"/></entry>
  <entry id="b"><sense id="s1"/></entry>
</lift>"#;
    let lexicon = Lexicon::from_xml_str(xml).unwrap();
    match lexicon.get_item_parent_by_id("s1") {
        Some(Parent::Entry(entry)) => assert_eq!(entry.id, "a"),
        other => panic!("unexpected parent {other:?}"),
    }
}
