use liftlex::base::{Annotation, Field, Form, Gloss, Multitext, Text, Trait, UrlRef};
use liftlex::binder::{self, BindContext, LiftElement};
use liftlex::entry::{Example, Note};
use liftlex::xml::{self, XmlNode};
use liftlex::{Issue, Lexicon, LiftVersion};

fn node(input: &str) -> XmlNode {
    xml::parse_document(input).unwrap()
}

fn parse<T: LiftElement>(input: &str, version: LiftVersion) -> (T, Vec<Issue>) {
    let mut cx = BindContext::new(version);
    let item = binder::parse_node::<T>(&node(input), None, &mut cx).unwrap();
    (item, cx.issues)
}

fn emit<T: LiftElement>(item: &T, tag: &str, version: LiftVersion) -> String {
    let node = binder::to_node(item, tag, version).unwrap();
    let document = node.to_document(2);
    document
        .trim_start_matches("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")
        .to_string()
}

#[test]
fn mixed_text_keeps_spans_and_tails() {
    let input = "<text>Hello <span lang=\"fr\" class=\"em\">mon <span>cher</span> </span>ami</text>";
    for version in LiftVersion::ALL {
        let (text, issues) = parse::<Text>(input, version);
        assert!(issues.is_empty());
        assert_eq!(text.pcdata.as_deref(), Some("Hello "));
        assert_eq!(text.span_items.len(), 1);
        let span = &text.span_items[0];
        assert_eq!(span.lang.as_deref(), Some("fr"));
        assert_eq!(span.class.as_deref(), Some("em"));
        assert_eq!(span.tail.as_deref(), Some("ami"));
        assert_eq!(span.span_items[0].tail.as_deref(), Some(" "));
        assert_eq!(text.plain(), "Hello mon cher ami");
        assert_eq!(binder::to_node(&text, "text", version).unwrap(), node(input));
    }
}

#[test]
fn whitespace_between_spans_is_text() {
    let input = "<text><span lang=\"fr\">foo</span> <span lang=\"en\">bar</span></text>\n";
    for version in LiftVersion::ALL {
        let (text, issues) = parse::<Text>(input, version);
        assert!(issues.is_empty());
        assert_eq!(text.span_items[0].tail.as_deref(), Some(" "));
        assert_eq!(text.plain(), "foo bar");
        assert_eq!(emit(&text, "text", version), input);
    }
}

#[test]
fn blank_leading_text_and_tails_are_kept() {
    let input = "<text> word<span lang=\"fr\">mot</span> </text>\n";
    for version in LiftVersion::ALL {
        let (text, _) = parse::<Text>(input, version);
        assert_eq!(text.pcdata.as_deref(), Some(" word"));
        assert_eq!(text.span_items[0].tail.as_deref(), Some(" "));
        assert_eq!(text.plain(), " wordmot ");
        assert_eq!(emit(&text, "text", version), input);
    }
    let input = "<text> <span lang=\"fr\">mot</span></text>\n";
    for version in LiftVersion::ALL {
        let (text, _) = parse::<Text>(input, version);
        assert_eq!(text.pcdata.as_deref(), Some(" "));
        assert_eq!(emit(&text, "text", version), input);
    }
}

#[test]
fn text_holding_only_spans_is_written_inline() {
    let input = "<form lang=\"sg\">\n  <text><span lang=\"fr\">mot</span></text>\n</form>\n";
    for version in LiftVersion::ALL {
        let (form, issues) = parse::<Form>(input, version);
        assert!(issues.is_empty());
        assert_eq!(form.text.pcdata, None);
        assert_eq!(form.text.plain(), "mot");
        assert_eq!(emit(&form, "form", version), input);
    }
    // nested spans stay inline too
    let input = "<text><span lang=\"fr\"><span class=\"em\">mot</span></span></text>\n";
    let (text, _) = parse::<Text>(input, LiftVersion::V0_15);
    assert_eq!(emit(&text, "text", LiftVersion::V0_15), input);
}

#[test]
fn lexicon_keeps_mixed_content_on_one_line() {
    for version in LiftVersion::ALL {
        let xml = format!(
            "<lift version=\"{version}\">\n  <entry id=\"e1\">\n    <lexical-unit>\n      <form lang=\"sg\">\n        <text><span lang=\"fr\">mot</span> <span lang=\"en\">word</span></text>\n      </form>\n    </lexical-unit>\n  </entry>\n</lift>\n"
        );
        let lexicon = Lexicon::from_xml_str(&xml).unwrap();
        let unit = lexicon.entry_items[0].lexical_unit.as_ref().unwrap();
        assert_eq!(unit.text_by_lang("sg").as_deref(), Some("mot word"));
        let written = lexicon.to_xml_string().unwrap();
        assert!(written.contains(
            "        <text><span lang=\"fr\">mot</span> <span lang=\"en\">word</span></text>\n"
        ));
        assert!(!written.contains("<text>\n"));
    }
}

#[test]
fn form_and_multitext() {
    let input = "<definition>\n  <form lang=\"en\">\n    <text>house</text>\n  </form>\n  <form lang=\"fr\">\n    <text>maison</text>\n    <annotation name=\"checked\" value=\"yes\"/>\n  </form>\n</definition>\n";
    for version in LiftVersion::ALL {
        let (multitext, issues) = parse::<Multitext>(input, version);
        assert!(issues.is_empty());
        assert_eq!(multitext.form_items.len(), 2);
        assert_eq!(multitext.text_by_lang("fr").as_deref(), Some("maison"));
        assert_eq!(multitext.form_items[1].annotation_items[0].name, "checked");
        assert_eq!(multitext.to_string(), "house (en) (+1 more)");
        assert_eq!(emit(&multitext, "definition", version), input);
    }
}

#[test]
fn bare_text_in_multitext_is_read_in_0_13_only() {
    let input = "<label><text>legacy label</text></label>";
    let (old, issues) = parse::<Multitext>(input, LiftVersion::V0_13);
    assert!(issues.is_empty());
    assert_eq!(old.text.as_ref().map(Text::plain).as_deref(), Some("legacy label"));
    assert_eq!(old.texts().collect::<Vec<_>>(), ["legacy label"]);

    let (new, issues) = parse::<Multitext>(input, LiftVersion::V0_15);
    assert!(new.text.is_none());
    assert_eq!(
        issues,
        [Issue::UnknownTag { location: "label".into(), tag: "text".into() }]
    );
    assert!(!emit(&old, "label", LiftVersion::V0_15).contains("legacy"));
}

#[test]
fn gloss_traits_are_gated_to_0_15() {
    let input = "<gloss lang=\"en\">\n  <text>I, me</text>\n  <trait name=\"register\" value=\"neutral\"/>\n</gloss>\n";
    let (gloss, issues) = parse::<Gloss>(input, LiftVersion::V0_15);
    assert!(issues.is_empty());
    assert_eq!(gloss.trait_items.len(), 1);
    assert_eq!(gloss.to_string(), "I, me (en)");
    assert_eq!(emit(&gloss, "gloss", LiftVersion::V0_15), input);
    assert_eq!(
        emit(&gloss, "gloss", LiftVersion::V0_13),
        "<gloss lang=\"en\">\n  <text>I, me</text>\n</gloss>\n"
    );

    let (old, issues) = parse::<Gloss>(input, LiftVersion::V0_13);
    assert!(old.trait_items.is_empty());
    assert_eq!(issues.len(), 1);
}

#[test]
fn field_name_attribute_follows_version() {
    let old = "<field type=\"CAWL\" dateCreated=\"2012-03-14T09:21:07Z\">\n  <form lang=\"en\">\n    <text>0312</text>\n  </form>\n</field>\n";
    let (field, issues) = parse::<Field>(old, LiftVersion::V0_13);
    assert!(issues.is_empty());
    assert_eq!(field.name, "CAWL");
    assert_eq!(field.date_created.as_deref(), Some("2012-03-14T09:21:07Z"));
    assert_eq!(field.to_string(), "CAWL: 0312 (en)");
    assert_eq!(emit(&field, "field", LiftVersion::V0_13), old);
    let new = emit(&field, "field", LiftVersion::V0_15);
    assert!(new.starts_with("<field name=\"CAWL\" dateCreated="));
    assert!(!new.contains("type="));
}

#[test]
fn trait_and_annotation() {
    let input = "<trait name=\"semantic-domain-ddp4\" value=\"2.6.1 Marriage\" id=\"t1\">\n  <annotation name=\"reviewed\" value=\"no\" who=\"linguist\" when=\"2013-05-01\">\n    <form lang=\"en\">\n      <text>needs checking</text>\n    </form>\n  </annotation>\n</trait>\n";
    for version in LiftVersion::ALL {
        let (item, issues) = parse::<Trait>(input, version);
        assert!(issues.is_empty());
        assert_eq!(item.to_string(), "semantic-domain-ddp4: 2.6.1 Marriage");
        let annotation: &Annotation = &item.annotation_items[0];
        assert_eq!(annotation.who.as_deref(), Some("linguist"));
        assert!(annotation.when.as_ref().and_then(|w| w.parsed()).is_some());
        assert_eq!(emit(&item, "trait", version), input);
    }
}

#[test]
fn urlref_with_label() {
    let input = "<illustration href=\"pictures/da.jpg\">\n  <label>\n    <form lang=\"en\">\n      <text>a round house</text>\n    </form>\n  </label>\n</illustration>\n";
    let (item, _) = parse::<UrlRef>(input, LiftVersion::V0_13);
    assert_eq!(item.href, "pictures/da.jpg");
    assert_eq!(emit(&item, "illustration", LiftVersion::V0_13), input);
    assert_eq!(emit(&item, "media", LiftVersion::V0_15).lines().next(), Some("<media href=\"pictures/da.jpg\">"));
}

#[test]
fn invalid_optional_values_are_dropped_with_an_issue() {
    let input = "<annotation name=\"status\" value=\"ok\" when=\"yesterday\" colour=\"red\" xml:space=\"preserve\"/>";
    let (annotation, issues) = parse::<Annotation>(input, LiftVersion::V0_13);
    assert_eq!(annotation.when, None);
    assert_eq!(
        issues,
        [
            Issue::InvalidValue {
                location: "annotation".into(),
                name: "when".into(),
                value: "yesterday".into()
            },
            Issue::UnknownAttribute { location: "annotation".into(), name: "colour".into() },
        ]
    );
}

#[test]
fn unknown_tags_are_skipped() {
    let input = "<note type=\"general\"><form lang=\"en\"><text>ok</text></form><sparkle/></note>";
    let (note, issues) = parse::<Note>(input, LiftVersion::V0_15);
    assert_eq!(note.multitext.form_items.len(), 1);
    assert_eq!(
        issues,
        [Issue::UnknownTag { location: "note".into(), tag: "sparkle".into() }]
    );
}

#[test]
fn example_notes_are_gated_to_0_15() {
    let mut example = Example::default();
    example.multitext.set_form("sg", "Mbï yeke ge.").unwrap();
    example.add_note();
    example.note_items[0].multitext.set_form("en", "Recorded in Bangui").unwrap();
    assert!(emit(&example, "example", LiftVersion::V0_15).contains("<note"));
    assert!(!emit(&example, "example", LiftVersion::V0_13).contains("<note"));
}

#[test]
fn extensible_bundle_is_written_after_own_children() {
    let mut note = Note::default();
    note.r#type = Some("general".into());
    note.multitext.set_form("en", "checked").unwrap();
    note.extensible.add_trait("status", "final").unwrap();
    note.extensible.date_modified = Some("2020-01-01".into());
    assert_eq!(
        emit(&note, "note", LiftVersion::V0_15),
        "<note type=\"general\" dateModified=\"2020-01-01\">\n  <form lang=\"en\">\n    <text>checked</text>\n  </form>\n  <trait name=\"status\" value=\"final\"/>\n</note>\n"
    );
}
