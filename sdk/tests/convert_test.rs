#![cfg(test)]

use idl_bridge::{proto_to_json, proto_to_thrift, thrift_to_json, thrift_to_proto, Config};

#[test]
fn test_proto_to_thrift_helper() {
    let input = "syntax = \"proto3\";\nmessage Ping { int32 seq = 1; }";
    let output = proto_to_thrift(input, &Config::default()).unwrap();
    assert!(output.contains("struct ping {"));
    assert!(output.contains("1: i32 seq"));
}

#[test]
fn test_thrift_to_proto_helper() {
    let input = "struct Ping { 1: i32 seq }";
    let output = thrift_to_proto(input, &Config::default()).unwrap();
    assert!(output.starts_with("syntax = \"proto3\";\n"));
    assert!(output.contains("int32 seq = 1;"));
}

#[test]
fn test_proto_ast_as_json() {
    let json = proto_to_json("syntax = \"proto3\";\nenum E { A = 0; }").unwrap();
    assert!(json.contains("\"Enum\""));
    assert!(json.contains("\"A\""));
}

#[test]
fn test_thrift_ast_as_json() {
    let json = thrift_to_json("enum E { A = 1 }").unwrap();
    assert!(json.contains("\"Enum\""));
    assert!(json.contains("\"A\""));
}

#[test]
fn test_parse_error_propagates() {
    assert!(thrift_to_proto("struct {", &Config::default()).is_err());
}
