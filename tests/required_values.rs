use liftlex::base::{Annotation, Extensible, Field, Form, Gloss, Multitext, Span, Text, Trait, UrlRef};
use liftlex::binder::{self, LiftElement};
use liftlex::entry::{
    Entry, Etymology, Example, GrammaticalInfo, Note, Phonetic, Relation, Reversal, Sense,
    Translation, Variant,
};
use liftlex::header::{FieldDefinition, Fields, Header, Range, RangeElement, Ranges};
use liftlex::registry;
use liftlex::{LiftError, LiftVersion, Lexicon};

fn missing_names(result: liftlex::Result<impl Sized>) -> Vec<String> {
    match result {
        Err(LiftError::RequiredValueMissing { names, .. }) => names,
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("construction should have failed"),
    }
}

fn assert_blank_reports_required<T: LiftElement>() {
    let expected: Vec<&str> = registry::required_props(T::KIND)
        .into_iter()
        .map(|prop| prop.name)
        .collect();
    let blank = T::blank();
    assert_eq!(binder::missing_required(&blank), expected, "{}", T::KIND);
    if expected.is_empty() {
        assert!(binder::check_required(&blank).is_ok());
    } else {
        let names = missing_names(binder::check_required(&blank));
        assert_eq!(names, expected, "{}", T::KIND);
    }
}

macro_rules! blank_reports_required {
    ($($ty:ty),* $(,)?) => {
        $(assert_blank_reports_required::<$ty>();)*
    };
}

#[test]
fn every_kind_reports_its_required_props() {
    blank_reports_required!(
        Span, Text, Form, Multitext, Gloss, Trait, Annotation, Field, UrlRef, Extensible,
        FieldDefinition, Fields, RangeElement, Range, Ranges, Header, Note, Phonetic, Etymology,
        GrammaticalInfo, Reversal, Translation, Example, Relation, Variant, Sense, Entry, Lexicon,
    );
}

#[test]
fn required_props_match_the_documented_set() {
    let names = |kind| -> Vec<&'static str> {
        registry::required_props(kind).into_iter().map(|p| p.name).collect()
    };
    use registry::Kind;
    assert_eq!(names(Kind::Form), ["lang", "text"]);
    assert_eq!(names(Kind::Gloss), ["lang", "text"]);
    assert_eq!(names(Kind::Trait), ["name", "value"]);
    assert_eq!(names(Kind::Annotation), ["name", "value"]);
    assert_eq!(names(Kind::Field), ["name"]);
    assert_eq!(names(Kind::UrlRef), ["href"]);
    assert_eq!(names(Kind::FieldDefinition), ["name"]);
    assert_eq!(names(Kind::Range), ["id"]);
    assert_eq!(names(Kind::RangeElement), ["id"]);
    assert_eq!(names(Kind::Etymology), ["type", "source"]);
    assert_eq!(names(Kind::GrammaticalInfo), ["value"]);
    assert_eq!(names(Kind::Relation), ["type", "ref"]);
    assert_eq!(names(Kind::Sense), ["id"]);
    assert_eq!(names(Kind::Entry), ["id"]);
    assert_eq!(names(Kind::Lexicon), ["version"]);
    assert!(names(Kind::Note).is_empty());
    assert!(names(Kind::Variant).is_empty());
}

#[test]
fn constructors_reject_empty_required_values() {
    assert_eq!(missing_names(Form::new("", "kôli")), ["lang"]);
    assert_eq!(missing_names(Form::new("sg", "")), ["text"]);
    assert_eq!(missing_names(Gloss::new("", "")), ["lang", "text"]);
    assert_eq!(missing_names(Trait::new("status", "")), ["value"]);
    assert_eq!(missing_names(Annotation::new("", "checked")), ["name"]);
    assert_eq!(missing_names(Field::new("")), ["name"]);
    assert_eq!(missing_names(UrlRef::new("")), ["href"]);
    assert_eq!(missing_names(FieldDefinition::new("")), ["name"]);
    assert_eq!(missing_names(Range::new("")), ["id"]);
    assert_eq!(missing_names(RangeElement::new("")), ["id"]);
    assert_eq!(missing_names(Etymology::new("", "")), ["type", "source"]);
    assert_eq!(missing_names(GrammaticalInfo::new("")), ["value"]);
    assert_eq!(missing_names(Relation::new("synonym", "")), ["ref"]);

    assert!(Form::new("sg", "kôli").is_ok());
    assert!(Relation::new("synonym", "086e06e3-a5f6-4c54-805a-4a1adcd51d4f").is_ok());
}

#[test]
fn error_message_names_element_and_props() {
    let err = Etymology::new("", "").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Required value(s) missing on <etymology>: type, source"
    );
}

#[test]
fn add_methods_propagate_missing_values() {
    let mut sense = Sense::new();
    assert_eq!(
        missing_names(sense.add_gloss("en", "", Default::default())),
        ["text"]
    );
    assert!(sense.gloss_items.is_empty());
    let mut entry = Entry::new();
    assert_eq!(missing_names(entry.add_relation("", "x")), ["type"]);
    assert_eq!(missing_names(entry.extensible.add_trait("", "")), ["name", "value"]);
}

#[test]
fn absent_values_abort_parsing() {
    let form = liftlex::xml::parse_document("<form><text>da</text></form>").unwrap();
    let err = binder::from_node::<Form>(&form, LiftVersion::V0_13).unwrap_err();
    assert!(matches!(err, LiftError::RequiredValueMissing { ref names, .. } if names == &["lang"]));

    let form = liftlex::xml::parse_document("<form lang=\"sg\"/>").unwrap();
    let err = binder::from_node::<Form>(&form, LiftVersion::V0_15).unwrap_err();
    assert!(matches!(err, LiftError::RequiredValueMissing { ref names, .. } if names == &["text"]));

    // present but empty is accepted when reading
    let form = liftlex::xml::parse_document("<form lang=\"\"><text>da</text></form>").unwrap();
    assert!(binder::from_node::<Form>(&form, LiftVersion::V0_13).is_ok());
}

#[test]
fn field_name_is_required_under_either_attribute() {
    let field_13 = liftlex::xml::parse_document("<field name=\"CAWL\"/>").unwrap();
    let err = binder::from_node::<Field>(&field_13, LiftVersion::V0_13).unwrap_err();
    assert!(matches!(err, LiftError::RequiredValueMissing { .. }));
    let field_15 = liftlex::xml::parse_document("<field type=\"CAWL\"/>").unwrap();
    let err = binder::from_node::<Field>(&field_15, LiftVersion::V0_15).unwrap_err();
    assert!(matches!(err, LiftError::RequiredValueMissing { .. }));
}

#[test]
fn entry_without_id_fails_the_whole_load() {
    let xml = "<lift version=\"0.15\"><entry><lexical-unit/></entry></lift>";
    let err = Lexicon::from_xml_str(xml).unwrap_err();
    assert!(
        matches!(err, LiftError::RequiredValueMissing { ref element, ref names } if element == "entry" && names == &["id"])
    );
}
