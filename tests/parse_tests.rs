//! End-to-end parsing of valid schemas.

use pretty_assertions::assert_eq;
use protohdl::parser::parse_with;
use protohdl::{Enum, EnumValue, Field, Member, Message, NullSink, Oneof, SchemaFile, Syntax};

fn parse(text: &str) -> SchemaFile {
    parse_with(text, &mut NullSink).unwrap()
}

fn field(name: &str, type_name: &str, number: i64, repeated: bool) -> Field {
    Field {
        name: name.into(),
        type_name: type_name.into(),
        number,
        repeated,
    }
}

#[test]
fn test_single_field_message() {
    let schema = parse(r#"syntax = "proto3"; message M { int32 x = 1; }"#);
    assert_eq!(
        schema,
        SchemaFile {
            syntax: Some(Syntax::Proto3),
            messages: vec![Message {
                name: "M".into(),
                members: vec![Member::Field(field("x", "int32", 1, false))],
            }],
        }
    );
}

#[test]
fn test_repeated_field() {
    let schema = parse(r#"syntax = "proto3"; message M { repeated string s = 2; }"#);
    assert_eq!(
        schema.messages[0].members,
        vec![Member::Field(field("s", "string", 2, true))]
    );
}

#[test]
fn test_nested_enum_values_in_order() {
    let schema = parse(
        r#"syntax = "proto3";
        message M { enum Color { RED = 0; GREEN = 1; } }"#,
    );
    assert_eq!(
        schema.messages[0].members,
        vec![Member::Enum(Enum {
            name: "Color".into(),
            values: vec![
                EnumValue {
                    name: "RED".into(),
                    value: 0
                },
                EnumValue {
                    name: "GREEN".into(),
                    value: 1
                },
            ],
        })]
    );
}

#[test]
fn test_member_order_follows_declaration() {
    let schema = parse(
        r#"syntax = "proto3";
        message M {
            int32 b = 9;
            oneof pick { string s = 3; Other o = 4; }
            enum E { Z = 0; }
            int32 a = 1;
        }"#,
    );
    let m = &schema.messages[0];
    let names: Vec<&str> = m.members.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["b", "pick", "E", "a"]);
    assert_eq!(
        m.oneofs().next().unwrap(),
        &Oneof {
            name: "pick".into(),
            fields: vec![
                field("s", "string", 3, false),
                field("o", "Other", 4, false)
            ],
        }
    );
}

#[test]
fn test_multiple_messages_and_stray_semicolons() {
    let schema = parse(
        r#"syntax = "proto3";;
        message A {};
        ;
        message B { A a = 1; }
        "#,
    );
    let names: Vec<&str> = schema.messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_comments_do_not_change_result() {
    let plain = parse(
        "syntax = \"proto3\";\nmessage M {\nint32 x = 1;\nenum E { A = 0; }\noneof o { string s = 2; }\n}\n",
    );
    let commented = parse(
        "// header\n\
         syntax = \"proto3\"; // version\n\
         // c1\n   // c2\n\
         message M // trailing\n\
         { // open\n\
         int32 x = 1; // field\n\
         enum E { // enum\n A = 0; // value\n } // done\n\
         oneof o // name\n { string s = 2; }\n\
         // before close\n\
         }\n\
         // end of file",
    );
    assert_eq!(plain, commented);
}

#[test]
fn test_parse_is_idempotent() {
    let text = r#"syntax = "proto3";
        message M {
            repeated int64 ids = 1;
            enum E { A = 0; B = 1; }
            oneof o { string s = 2; }
        }"#;
    assert_eq!(parse(text), parse(text));
}

#[test]
fn test_display_round_trip() {
    let original = parse(
        r#"syntax = "proto3";
        message Person {
            string name = 1;
            repeated string email = 2;
            enum Kind { HUMAN = 0; ROBOT = 0x10; }
            oneof contact { string phone = 3; Address address = 4; }
        }
        message Address { string line = 1; }"#,
    );
    let rendered = original.to_string();
    assert_eq!(parse(&rendered), original);
}
