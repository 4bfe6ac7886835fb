//! Parse the fixture files under testdata/.

use pretty_assertions::assert_eq;
use protohdl::parser::parse_file;
use protohdl::{validate, ErrorKind, Level, Member, NullSink, RecordingSink};

fn testdata(name: &str) -> String {
    format!("{}/testdata/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_addressbook() {
    let schema = parse_file(testdata("addressbook.proto"), &mut NullSink).unwrap();
    assert_eq!(schema.messages.len(), 2);

    let person = schema.get_message("Person").expect("Person message missing");
    assert_eq!(person.members.len(), 6);
    let phone_type = person.enums().next().expect("PhoneType enum missing");
    assert_eq!(phone_type.name, "PhoneType");
    assert_eq!(phone_type.values.len(), 3);
    let numbers = person.get_field("numbers").unwrap();
    assert!(numbers.repeated);
    assert_eq!(numbers.number, 5);

    let book = schema.get_message("AddressBook").unwrap();
    let people = book.get_field("people").unwrap();
    assert_eq!(people.type_name, "Person");
    assert!(people.repeated);

    validate::validate(&schema).unwrap();
}

#[test]
fn test_packet() {
    let schema = parse_file(testdata("packet.proto"), &mut NullSink).unwrap();
    let names: Vec<&str> = schema.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Packet", "Ping", "Data"]);

    let packet = &schema.messages[0];
    match &packet.members[1] {
        Member::Oneof(o) => {
            assert_eq!(o.name, "payload");
            assert_eq!(o.fields[1].type_name, "Data");
        }
        other => panic!("expected oneof, got {:?}", other),
    }
    match &packet.members[2] {
        Member::Enum(e) => {
            let values: Vec<i64> = e.values.iter().map(|v| v.value).collect();
            assert_eq!(values, vec![0, 1, 2]);
        }
        other => panic!("expected enum, got {:?}", other),
    }
    assert!(schema.get_message("Ping").unwrap().members.is_empty());
    assert_eq!(
        schema.get_message("Data").unwrap().get_field("checksum").unwrap().number,
        2
    );
}

#[test]
fn test_missing_syntax_file() {
    let err = parse_file(testdata("no_syntax.proto"), &mut NullSink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Ordering);
}

#[test]
fn test_bad_oneof_file() {
    let err = parse_file(testdata("bad_oneof.proto"), &mut NullSink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
}

#[test]
fn test_missing_file() {
    let err = parse_file(testdata("does_not_exist.proto"), &mut NullSink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_diagnostics_trace_nesting() {
    let mut sink = RecordingSink::new();
    parse_file(testdata("addressbook.proto"), &mut sink).unwrap();
    let debug = sink.messages(Level::Debug);
    assert!(debug[0].starts_with("Compiling .proto file"));
    assert!(debug.contains(&"Processing message \"Person\""));
    assert!(debug.contains(&"Field people is of type repeated Person (id = 1)"));
    let max_depth = sink.records.iter().map(|r| r.depth).max().unwrap();
    assert_eq!(max_depth, 2);
}
