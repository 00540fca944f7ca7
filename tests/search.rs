use std::path::Path;

use liftlex::query::SearchField;
use liftlex::{Item, LiftError, Lexicon, MatchType, Query};

fn setup() -> Lexicon {
    Lexicon::from_path(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/minimal_13.lift"))
        .unwrap()
}

fn ids(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

#[test]
fn gloss_is_the_default_field() {
    let lexicon = setup();
    let house = lexicon.find("house", None, MatchType::Substring).unwrap().unwrap();
    assert_eq!(house.id(), "086e06e3-a5f6-4c54-805a-4a1adcd51d4f");
    assert!(house.as_sense().is_some());

    let man = lexicon.find_all("man", None, MatchType::Substring).unwrap();
    assert_eq!(
        ids(&man),
        ["f6c860ea-80ff-431a-a5dd-9469b315f40c", "3f0c9a24-77c9-4d3b-bf0f-2f2a3e9c5a11"]
    );
    let exact = lexicon.find_all("man", Some("gloss"), MatchType::Exact).unwrap();
    assert_eq!(ids(&exact), ["f6c860ea-80ff-431a-a5dd-9469b315f40c"]);
}

#[test]
fn matching_is_case_sensitive() {
    let lexicon = setup();
    assert!(lexicon.find("House", None, MatchType::Substring).unwrap().is_none());
    assert!(lexicon.find("nom", Some("grammatical-info"), MatchType::Exact).unwrap().is_none());
}

#[test]
fn definitions_include_span_text() {
    let lexicon = setup();
    let man = lexicon.find("man", Some("definition"), MatchType::Substring).unwrap().unwrap();
    assert_eq!(man.id(), "f6c860ea-80ff-431a-a5dd-9469b315f40c");
    assert_eq!(lexicon.find_all("husband", Some("definition"), MatchType::Substring).unwrap().len(), 2);
    assert_eq!(lexicon.find_all("head", Some("definition"), MatchType::Substring).unwrap().len(), 1);
    // "da" only occurs inside a span
    let span = lexicon.find_all("lives; da of", Some("definition"), MatchType::Substring).unwrap();
    assert_eq!(ids(&span), ["086e06e3-a5f6-4c54-805a-4a1adcd51d4f"]);
}

#[test]
fn grammatical_info_values() {
    let lexicon = setup();
    assert_eq!(lexicon.find_all("Nom", Some("grammatical-info"), MatchType::Substring).unwrap().len(), 4);
    assert_eq!(lexicon.find_all("Nom", Some("grammatical-info"), MatchType::Exact).unwrap().len(), 4);
    let verbs = lexicon.find_all("Verbe", Some("grammatical-info"), MatchType::Exact).unwrap();
    assert_eq!(ids(&verbs), ["9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b"]);
}

#[test]
fn custom_fields_by_name() {
    let lexicon = setup();
    let first = lexicon.find("1000", Some("CAWL"), MatchType::Substring).unwrap().unwrap();
    assert_eq!(first.id(), "086e06e3-a5f6-4c54-805a-4a1adcd51d4f");
    assert_eq!(lexicon.find_all("1021", Some("CAWL"), MatchType::Substring).unwrap().len(), 1);

    // the empty string matches every sense carrying the field, subsenses included
    let all = lexicon.find_all("", Some("CAWL"), MatchType::Substring).unwrap();
    assert_eq!(
        ids(&all),
        [
            "f6c860ea-80ff-431a-a5dd-9469b315f40c",
            "b7d1e2a0-5c3f-4e2b-9a8d-6f1e0c2b3a4d",
            "086e06e3-a5f6-4c54-805a-4a1adcd51d4f",
            "3f0c9a24-77c9-4d3b-bf0f-2f2a3e9c5a11",
        ]
    );
    assert!(lexicon.find_all("", Some("scientific-name"), MatchType::Substring).unwrap().is_empty());

    let residue = lexicon.find("\\ps", Some("Import Residue"), MatchType::Substring).unwrap().unwrap();
    assert_eq!(residue.as_entry().unwrap().headword().as_deref(), Some("gue"));
}

#[test]
fn entry_level_fields() {
    let lexicon = setup();
    let koli = lexicon.find("kôli", Some("lexical-unit"), MatchType::Exact).unwrap().unwrap();
    assert_eq!(koli.id(), "kôli_0ae89610-fb4a-4a4f-9b6d-4c1b58d1a1f0");
    let da = lexicon.find("dä", Some("variant"), MatchType::Exact).unwrap().unwrap();
    assert_eq!(da.as_entry().unwrap().headword().as_deref(), Some("da"));
    assert!(lexicon.find("kôli", Some("gloss"), MatchType::Exact).unwrap().is_none());
}

#[test]
fn regular_expressions() {
    let lexicon = setup();
    let found = lexicon.find_all("^(man|go)$", None, MatchType::Regex).unwrap();
    assert_eq!(
        ids(&found),
        ["f6c860ea-80ff-431a-a5dd-9469b315f40c", "9e8d7c6b-5a4f-4e3d-2c1b-0a9f8e7d6c5b"]
    );
    assert_eq!(lexicon.find_all(r"^\d{4}$", Some("CAWL"), MatchType::Regex).unwrap().len(), 4);
    assert!(matches!(
        lexicon.find_all("(unclosed", None, MatchType::Regex),
        Err(LiftError::Regex(_))
    ));
}

#[test]
fn compiled_queries_can_be_reused() {
    let lexicon = setup();
    let query = Query::new("wife", None, MatchType::Substring).unwrap();
    assert_eq!(query.field(), &SearchField::Gloss);
    assert_eq!(ids(&lexicon.search(&query)), ["3f0c9a24-77c9-4d3b-bf0f-2f2a3e9c5a11"]);
    assert_eq!(lexicon.search(&query).len(), 1);

    let custom = Query::new("x", Some("CAWL"), "exact".parse().unwrap()).unwrap();
    assert_eq!(custom.field(), &SearchField::Custom("CAWL".into()));
    assert!("fuzzy".parse::<MatchType>().is_err());
}

#[test]
fn search_in_0_15_document() {
    let lexicon = Lexicon::from_path(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/minimal_15.lift"),
    )
    .unwrap();
    let eat = lexicon.find("eat", None, MatchType::Substring).unwrap().unwrap();
    assert_eq!(eat.id(), "4e5f6071-8293-4a4b-8d5e-6f7a8b9cadbe");
    let with_status = lexicon.find_all("", Some("status"), MatchType::Substring).unwrap();
    assert_eq!(with_status.len(), 2);
    assert!(with_status.iter().all(|item| item.as_entry().is_some()));
}
