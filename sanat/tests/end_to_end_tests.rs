use quick_xml::Reader;
use quick_xml::events::Event;
use sanat::formats::{FormatType, Registry};
use sanat::preprocess::{Markdown, NoOp, Pipeline, SmartyPants};
use sanat::types::{DataType, Platform, Segment, TranslationSet};
use sanat::{DocumentParser, Error, ParseOptions, parse_file, parse_str};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("comprehensive.sanat")
}

fn comprehensive() -> TranslationSet {
    parse_file(fixture_path(), &NoOp).expect("fixture parses cleanly")
}

/// Collects `attr` → unescaped text of every `element` in an XML document,
/// failing on any well-formedness error.
fn xml_entries(xml: &str, element: &str, attr: &str) -> BTreeMap<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut entries = BTreeMap::new();
    let mut current: Option<(String, String)> = None;
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) if e.name().as_ref() == element.as_bytes() => {
                let name = e
                    .try_get_attribute(attr)
                    .expect("attribute parses")
                    .expect("attribute present")
                    .unescape_value()
                    .expect("attribute unescapes")
                    .into_owned();
                current = Some((name, String::new()));
            }
            Event::Text(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t.unescape().expect("text unescapes"));
                }
            }
            Event::End(e) if e.name().as_ref() == element.as_bytes() => {
                if let Some((name, text)) = current.take() {
                    entries.insert(name, text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    entries
}

#[test]
fn greeting_scenario_renders_android_resource() {
    let input = "=== Greeting ===\n  Hello\n    en = Hi {@}\n    fi = Moro {@}\n";
    let set = parse_str(input, &NoOp).unwrap();
    let xml = FormatType::Android.render(&set, "en").unwrap();

    assert!(xml.contains("<resources>"));
    assert!(xml.contains(r#"<string name="Hello">Hi %s</string>"#));
    let entries = xml_entries(&xml, "string", "name");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["Hello"], "Hi %s");
}

#[test]
fn comprehensive_fixture_model() {
    let set = comprehensive();
    assert_eq!(
        set.languages.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["en", "fi"]
    );
    let names: Vec<_> = set.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Greetings", "Numbers", "Platform specific"]);
    assert_eq!(set.translations().count(), 8);

    let farewell = set.translations().find(|t| t.key == "Farewell").unwrap();
    assert_eq!(farewell.tags, vec!["home", "exit"]);
    assert_eq!(
        farewell.value_for_language("en").unwrap().segments[0],
        Segment::text("Bye, ")
    );

    let both = set
        .translations()
        .find(|t| t.key == "AndroidAndWindows")
        .unwrap();
    assert!(both.is_for_platform(Platform::Android));
    assert!(both.is_for_platform(Platform::Windows));
    assert!(!both.is_for_platform(Platform::Apple));

    let price = set.translations().find(|t| t.key == "Price").unwrap();
    let types: Vec<_> = price
        .value_for_language("en")
        .unwrap()
        .placeholders()
        .map(|(_, p)| p.data_type)
        .collect();
    assert_eq!(types, vec![DataType::Float, DataType::Integer]);
}

#[test]
fn comprehensive_fixture_apple() {
    let strings = FormatType::Apple.render(&comprehensive(), "en").unwrap();
    assert!(strings.contains("/* Shown on the start screen */\n\"Hello\" = \"Hi %@\";\n"));
    assert!(strings.contains("\"Farewell\" = \"Bye, %@!\";"));
    assert!(strings.contains("\"Price\" = \"Costs %.2f -- %d items in total\";"));
    assert!(strings.contains("\"Reordered\" = \"%1$@ has %2$d new messages\";"));
    assert!(strings.contains("\"Percent\" = \"100%% <done> & \\\"quoted\\\"\";"));
    assert!(strings.contains("\"AppleOnly\" = \"Tap here\";"));
    assert!(strings.contains("\"Escapes\" = \"Braces {like this} and 'quotes'\";"));
    assert!(!strings.contains("AndroidAndWindows"));
    assert!(strings.contains("/********** Platform specific **********/"));
}

#[test]
fn comprehensive_fixture_android() {
    let xml = FormatType::Android.render(&comprehensive(), "fi").unwrap();
    let entries = xml_entries(&xml, "string", "name");
    assert_eq!(entries["Hello"], "Moro %s");
    assert_eq!(entries["Reordered"], "%2$d uutta viestiä käyttäjälle %1$s");
    assert_eq!(entries["Percent"], "100 %% valmis");
    assert_eq!(entries["AndroidAndWindows"], "Paina %s-painiketta");
    assert!(!entries.contains_key("AppleOnly"));

    let en = xml_entries(
        &FormatType::Android.render(&comprehensive(), "en").unwrap(),
        "string",
        "name",
    );
    assert_eq!(en["Percent"], "100%% <done> & \"quoted\"");
}

#[test]
fn comprehensive_fixture_java() {
    let xml = FormatType::Java.render(&comprehensive(), "en").unwrap();
    let entries = xml_entries(&xml, "entry", "key");
    assert_eq!(entries["Hello"], "Hi {0}");
    assert_eq!(
        entries["Price"],
        "Costs {0,number,#.##} -- {1,number,integer} items in total"
    );
    assert_eq!(entries["Reordered"], "{0} has {1,number,integer} new messages");
    assert_eq!(entries["Escapes"], "Braces '{'like this'}' and ''quotes''");
    assert!(!entries.contains_key("AppleOnly"));
    assert!(!entries.contains_key("AndroidAndWindows"));
}

#[test]
fn comprehensive_fixture_windows() {
    for format in [FormatType::WindowsResx, FormatType::WindowsResw] {
        let xml = format.render(&comprehensive(), "fi").unwrap();
        let entries = xml_entries(&xml, "data", "name");
        assert!(entries["Hello"].contains("Moro {0}"));
        assert!(entries["Hello"].contains("Shown on the start screen"));
        assert!(entries["AndroidAndWindows"].contains("Paina {0}-painiketta"));
        assert!(!entries.contains_key("AppleOnly"));
    }
}

#[test]
fn comprehensive_fixture_windows_values() {
    let xml = FormatType::WindowsResx
        .render(&comprehensive(), "en")
        .unwrap();
    assert!(xml.contains("<value>Costs {0:F2} -- {1} items in total</value>"));
    assert!(xml.contains("<value>{0} has {1} new messages</value>"));
    assert!(xml.contains("<comment>Order index changes placement</comment>"));
}

#[test]
fn json_and_dump_cover_every_language() {
    let set = comprehensive();
    let json = FormatType::Json.render(&set, "en").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["languages"], serde_json::json!(["en", "fi"]));
    assert_eq!(value["sections"][0]["translations"][0]["key"], "Hello");

    let dump = FormatType::Dump.render(&set, "en").unwrap();
    assert!(dump.contains("Languages: en, fi"));
    assert!(dump.contains("    Language: fi"));
    assert!(dump.contains("    Platform: Apple"));
}

#[test]
fn registry_renders_by_name() {
    let registry = Registry::builtin();
    let set = comprehensive();
    for format in FormatType::ALL {
        assert_eq!(
            registry.render(format.name(), &set, "en").unwrap(),
            format.render(&set, "en").unwrap()
        );
    }
    assert!(matches!(
        registry.render("xliff", &set, "en"),
        Err(Error::UnknownFormat { .. })
    ));
}

#[test]
fn parse_errors_are_collected_with_line_numbers() {
    let input = "\
=== Section ===
  Empty
  Filled
    platforms = apple, xx
    en = ok
not a header
    orphan row without separator
";
    let err = parse_str(input, &NoOp).unwrap_err();
    let errors = err.parse_errors().unwrap();
    let lines: Vec<_> = errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 4, 6, 7]);
    assert!(errors[0].message.contains("no values"));
    assert!(errors[1].message.contains("Unknown platform"));
    assert!(errors[2].message.contains("Unknown un-indented line"));
}

#[test]
fn lenient_indentation_skips_odd_lines() {
    let input = "=== S ===\n  Key\n   three spaces\n    en = Value\n";
    let strict = DocumentParser::default().parse(input);
    assert_eq!(strict.errors.len(), 1);
    assert_eq!(strict.errors[0].line, 3);

    let lenient = DocumentParser::default()
        .with_options(ParseOptions::new().with_lenient_indentation(true))
        .parse(input);
    assert!(lenient.is_ok());
    assert_eq!(lenient.set.translations().count(), 1);
}

#[test]
fn utf16_documents_are_decoded() {
    let document = "=== Greeting ===\n  Hello\n    fi = Hyvää päivää {s}\n";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in document.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let set = parse_file(file.path(), &NoOp).unwrap();
    let strings = FormatType::Apple.render(&set, "fi").unwrap();
    assert!(strings.contains("\"Hello\" = \"Hyvää päivää %@\";"));
}

#[test]
fn preprocessors_run_before_tokenizing() {
    let input = "=== S ===\n  Key\n    en = *Hi* \"{s}\"...\n";
    let pipeline = Pipeline::new().with(Markdown).with(SmartyPants);
    let set = parse_str(input, &pipeline).unwrap();
    let strings = FormatType::Apple.render(&set, "en").unwrap();
    assert!(strings.contains("<em>Hi</em>"), "{}", strings);
    assert!(strings.contains("%@"), "{}", strings);
    assert!(!strings.contains("..."), "{}", strings);
}

#[test]
fn markdown_code_spans_keep_escaped_braces_literal() {
    let input = "=== S ===\n  K\n    en = Use `\\{name}` literally\n";
    let set = parse_str(input, &Markdown).unwrap();
    let value = set.translations().next().unwrap().value_for_language("en").unwrap();
    assert_eq!(
        value.segments,
        vec![Segment::text("Use <code>{name}</code> literally")]
    );
    assert_eq!(value.placeholders().count(), 0);
}
