#![cfg(test)]

use std::rc::Rc;

use idl_bridge_engine::{
    translate_with, CaseStyle, Config, MemoryDiagnostics, Task,
};

fn thrift_to_proto_config() -> Config {
    Config {
        task: Task::ThriftToProto,
        ..Config::default()
    }
}

fn proto_to_thrift_config() -> Config {
    Config {
        task: Task::ProtoToThrift,
        ..Config::default()
    }
}

fn run(content: &str, config: &Config) -> (String, Vec<String>) {
    let diags = Rc::new(MemoryDiagnostics::new());
    let output = translate_with(content, config, diags.clone()).expect("translation failed");
    let entries = diags.entries();
    (output, entries)
}

#[test]
fn test_enum_unknown_member_synthesized_for_proto3() {
    let input = "enum Color { RED = 1, GREEN = 2 }";
    let mut config = thrift_to_proto_config();
    config.name_case = CaseStyle::Pascal;

    let (output, _) = run(input, &config);
    assert_eq!(
        output,
        "syntax = \"proto3\";\n\n\
         enum Color {\n\
         \tColor_Unknown = 0;\n\
         \tred = 1;\n\
         \tgreen = 2;\n\
         }\n"
    );
    assert_eq!(output.matches("_Unknown").count(), 1);
}

#[test]
fn test_enum_with_zero_member_gets_no_synthesized_member() {
    let input = "enum Status { OK = 0, FAILED = 1 }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(!output.contains("_Unknown"));
    assert!(output.contains("ok = 0;"));
}

#[test]
fn test_enum_members_sorted_by_value() {
    let input = "enum Priority { HIGH = 10, LOW = 1, MID = 5 }";
    let (output, _) = run(input, &thrift_to_proto_config());
    let low = output.find("low = 1").unwrap();
    let mid = output.find("mid = 5").unwrap();
    let high = output.find("high = 10").unwrap();
    assert!(low < mid && mid < high);
}

#[test]
fn test_enum_members_with_equal_values_keep_source_order() {
    // the sort on member values must be stable
    let input = "enum E { B = 1, A = 1, Z = 0 }";
    let (output, _) = run(input, &thrift_to_proto_config());
    let z = output.find("z = 0;").unwrap();
    let b = output.find("b = 1;").unwrap();
    let a = output.find("a = 1;").unwrap();
    assert!(z < b && b < a);
}

#[test]
fn test_enum_members_with_equal_values_keep_source_order_to_thrift() {
    let input = "enum E { B = 1; A = 1; Z = 0; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    let z = output.find("z = 0").unwrap();
    let b = output.find("b = 1").unwrap();
    let a = output.find("a = 1").unwrap();
    assert!(z < b && b < a);
}

#[test]
fn test_enum_unknown_member_not_synthesized_for_proto2() {
    let input = "enum Color { RED = 1 }";
    let mut config = thrift_to_proto_config();
    config.syntax = 2;
    let (output, _) = run(input, &config);
    assert!(output.starts_with("syntax = \"proto2\";\n"));
    assert!(!output.contains("_Unknown"));
}

#[test]
fn test_repeated_field_becomes_thrift_list() {
    let input = "syntax = \"proto3\";\nmessage M { repeated string tags = 3; }";
    let mut config = proto_to_thrift_config();
    config.name_case = CaseStyle::Pascal;

    let (output, _) = run(input, &config);
    assert_eq!(output, "struct M {\n\t3: list<string> tags\n}\n");
}

#[test]
fn test_thrift_list_becomes_repeated_field() {
    let input = "struct M { 3: list<string> tags }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("repeated string tags = 3;"));
}

#[test]
fn test_field_ids_survive_translation() {
    let input = r#"
        struct UserProfile {
            7: i32 id
            12: string name
            44: list<i64> scores
        }
    "#;
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("int32 id = 7;"));
    assert!(output.contains("string name = 12;"));
    assert!(output.contains("repeated int64 scores = 44;"));
}

#[test]
fn test_zero_argument_method_keeps_empty_request_slot() {
    let input = "service S { i32 ping() }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("rpc ping() returns (int32) {}"));
}

#[test]
fn test_void_return_maps_to_empty_returns_slot() {
    let input = "service S { void reset(1: i32 id) }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("rpc reset(int32) returns () {}"));
}

#[test]
fn test_set_field_dropped_with_warning_and_ids_unshifted() {
    let input = r#"
        struct Data {
            1: i32 id
            2: set<string> labels
            3: string name
        }
    "#;
    let (output, diags) = run(input, &thrift_to_proto_config());
    assert!(output.contains("int32 id = 1;"));
    assert!(output.contains("string name = 3;"));
    assert!(!output.contains("labels"));
    assert!(diags.iter().any(|d| d.contains("set")));
}

#[test]
fn test_map_with_non_basic_key_is_skipped() {
    let input = "struct M { 1: map<UserId, string> index 2: i32 n }";
    let (output, diags) = run(input, &thrift_to_proto_config());
    assert!(!output.contains("index"));
    assert!(output.contains("int32 n = 2;"));
    assert!(diags.iter().any(|d| d.contains("map key")));
}

#[test]
fn test_map_with_basic_key_translates() {
    let input = "struct M { 4: map<string, i64> counts }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("map<string, int64> counts = 4;"));
}

#[test]
fn test_multi_argument_method_truncated_to_first() {
    let input = "service S { i32 get(1: i32 id, 2: string region) }";
    let (output, diags) = run(input, &thrift_to_proto_config());
    assert!(output.contains("rpc get(int32) returns (int32) {}"));
    assert!(!output.contains("region"));
    assert!(diags.iter().any(|d| d.contains("only the first")));
}

#[test]
fn test_method_annotations_fold_into_http_option_block() {
    let input = r#"service S { i32 count() ( method = "GET", path = "/count" ) }"#;
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("rpc count() returns (int32) {\n"));
    assert!(output.contains("option (google.api.http) = {\n"));
    assert!(output.contains("method: \"GET\"\n"));
    assert!(output.contains("path: \"/count\"\n"));
}

#[test]
fn test_no_annotations_means_no_option_block() {
    let input = "service S { i32 count() }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(!output.contains("google.api.http"));
}

#[test]
fn test_thrift_optional_carries_marker_under_proto2_only() {
    let input = "struct User { 1: i32 id 2: optional string name }";

    let mut config = thrift_to_proto_config();
    config.syntax = 2;
    let (output, _) = run(input, &config);
    assert!(output.contains("optional string name = 2;"));

    config.syntax = 3;
    let (output, _) = run(input, &config);
    assert!(output.contains("string name = 2;"));
    assert!(!output.contains("optional"));
}

#[test]
fn test_proto2_optional_carries_thrift_marker() {
    // no syntax statement means proto2
    let input = "message M { optional string name = 2; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.contains("2: optional string name"));
}

#[test]
fn test_proto3_optional_label_carries_no_marker() {
    let input = "syntax = \"proto3\";\nmessage M { optional string name = 2; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.contains("2: string name"));
    assert!(!output.contains("optional"));
}

#[test]
fn test_proto_float_narrows_to_double() {
    let input = "message M { float ratio = 1; double exact = 2; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.contains("1: double ratio"));
    assert!(output.contains("2: double exact"));
}

#[test]
fn test_proto_bytes_maps_to_binary() {
    let input = "message M { bytes payload = 1; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.contains("1: binary payload"));
}

#[test]
fn test_thrift_binary_maps_to_bytes() {
    let input = "struct M { 1: binary payload }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("bytes payload = 1;"));
}

#[test]
fn test_package_becomes_namespace() {
    let input = "syntax = \"proto3\";\npackage demo.user;\nmessage M { int32 a = 1; }";
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.starts_with("namespace * demo.user;\n\n"));
}

#[test]
fn test_namespace_becomes_package() {
    let input = "namespace go demo.user\nstruct M { 1: i32 a }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("package demo.user;\n"));
}

#[test]
fn test_nested_declarations_are_hoisted_with_prefix() {
    let input = r#"
        message Outer {
            message Inner { int32 a = 1; }
            enum Kind { UNSET = 0; }
            Inner inner = 1;
            Kind kind = 2;
        }
    "#;
    let mut config = proto_to_thrift_config();
    config.name_case = CaseStyle::Pascal;

    let (output, _) = run(input, &config);
    assert!(output.contains("struct Outer {\n\t1: OuterInner inner\n\t2: OuterKind kind\n}\n"));
    assert!(output.contains("enum OuterKind {"));
    assert!(output.contains("struct OuterInner {\n\t1: i32 a\n}\n"));
    // hoisted declarations come after their owner
    assert!(output.find("struct Outer").unwrap() < output.find("struct OuterInner").unwrap());
}

#[test]
fn test_oneof_dropped_with_warning() {
    let input = r#"
        message M {
            oneof body { string text = 1; bytes blob = 2; }
            int32 id = 3;
        }
    "#;
    let (output, diags) = run(input, &proto_to_thrift_config());
    assert!(!output.contains("text"));
    assert!(output.contains("3: i32 id"));
    assert!(diags.iter().any(|d| d.contains("oneof")));
}

#[test]
fn test_top_level_comments_survive() {
    let input = "// user types\nstruct User { 1: i32 id }";
    let (output, _) = run(input, &thrift_to_proto_config());
    assert!(output.contains("// user types\n"));
}

#[test]
fn test_rpc_translates_to_thrift_method_with_req_argument() {
    let input = r#"
        syntax = "proto3";
        service Greeter {
            rpc SayHello (HelloReq) returns (HelloResp);
        }
    "#;
    let (output, _) = run(input, &proto_to_thrift_config());
    assert!(output.contains("\nservice greeter {\n"));
    assert!(output.contains("\thelloResp sayHello (1: helloReq req)\n"));
}

#[test]
fn test_space_indent_option() {
    let input = "struct M { 1: i32 a }";
    let mut config = thrift_to_proto_config();
    config.use_space_indent = true;
    config.indent_space = 2;
    let (output, _) = run(input, &config);
    assert!(output.contains("\n  int32 a = 1;\n"));
}

#[test]
fn test_screaming_snake_field_case() {
    let input = "enum Color { RED = 0 }";
    let mut config = thrift_to_proto_config();
    config.field_case = CaseStyle::ScreamingSnake;
    let (output, _) = run(input, &config);
    assert!(output.contains("RED = 0;"));
}

#[test]
fn test_parse_error_is_fatal() {
    let diags = Rc::new(MemoryDiagnostics::new());
    let err = translate_with("struct {", &thrift_to_proto_config(), diags);
    assert!(err.is_err());
}
