//! Front-end for `.proto` files.
//!
//! Recursive descent over the shared token stream. Only the subset of the
//! protobuf grammar that has a translation counterpart is modeled in the
//! AST; `option` statements are recognized and skipped, `oneof` and
//! `reserved` are captured so the translator can drop them explicitly.

use lazy_static::lazy_static;
use regex::Regex;

use idl_bridge_ast::proto::{
    FieldLabel, MessageElement, ProtoDecl, ProtoEnum, ProtoField, ProtoMapField, ProtoMessage,
    ProtoOneof, ProtoRpc, ProtoSchema, ProtoService,
};
use idl_bridge_ast::EnumMember;

use crate::error::BridgeError;
use crate::tokenizer::{comment_lines, tokenize, Cursor, Token};
use crate::utils::{parse_error, quote};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
    static ref INTEGER:    Regex = Regex::new(r"^-?\d+$").unwrap();
}

pub fn parse_proto(text: &str) -> Result<ProtoSchema, BridgeError> {
    let tokens = tokenize(text)?;
    parse_proto_tokens(&tokens)
}

pub fn parse_proto_tokens(tokens: &[Token]) -> Result<ProtoSchema, BridgeError> {
    let mut cursor = Cursor::new(tokens);
    let mut schema = ProtoSchema {
        // Files without a syntax statement are proto2.
        syntax: 2,
        declarations: Vec::new(),
    };

    while !cursor.at_eof() {
        let tok = cursor.current();
        if tok.is_comment() {
            schema
                .declarations
                .push(ProtoDecl::Comment(comment_lines(&tok.text)));
            cursor.advance();
        } else if cursor.eat("syntax") {
            cursor.expect("=")?;
            let value = cursor.current();
            if !value.is_string() {
                return Err(parse_error(
                    &format!("Expected syntax string but found {}", quote(&value.text)),
                    value.line,
                    value.column,
                ));
            }
            cursor.advance();
            schema.syntax = if value.unquoted() == "proto3" { 3 } else { 2 };
            cursor.expect(";")?;
        } else if cursor.eat("package") {
            let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
            cursor.expect(";")?;
            schema.declarations.push(ProtoDecl::Package(name.text.clone()));
        } else if cursor.eat("import") {
            let path = cursor.current();
            if !path.is_string() {
                return Err(parse_error(
                    &format!("Expected import path but found {}", quote(&path.text)),
                    path.line,
                    path.column,
                ));
            }
            cursor.advance();
            cursor.expect(";")?;
            schema
                .declarations
                .push(ProtoDecl::Import(path.unquoted().to_string()));
        } else if cursor.eat("option") {
            skip_statement(&mut cursor)?;
        } else if cursor.eat("enum") {
            let decl = parse_enum(&mut cursor)?;
            schema.declarations.push(ProtoDecl::Enum(decl));
        } else if cursor.eat("message") {
            let decl = parse_message(&mut cursor)?;
            schema.declarations.push(ProtoDecl::Message(decl));
        } else if cursor.eat("service") {
            let decl = parse_service(&mut cursor)?;
            schema.declarations.push(ProtoDecl::Service(decl));
        } else {
            return Err(cursor.unexpected());
        }
    }

    Ok(schema)
}

/// Skip the remainder of a statement up to and including its `;`.
fn skip_statement(cursor: &mut Cursor) -> Result<(), BridgeError> {
    while !cursor.eat(";") {
        if cursor.at_eof() {
            return Err(cursor.unexpected());
        }
        cursor.advance();
    }
    Ok(())
}

/// Skip a brace-delimited block, tracking nesting. The opening `{` must
/// already be consumed.
fn skip_block(cursor: &mut Cursor) -> Result<(), BridgeError> {
    let mut depth = 1;
    while depth > 0 {
        if cursor.at_eof() {
            return Err(cursor.unexpected());
        }
        let tok = cursor.advance();
        match tok.text.as_str() {
            "{" => depth += 1,
            "}" => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}

fn parse_enum(cursor: &mut Cursor) -> Result<ProtoEnum, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut members = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        if cursor.eat("option") || cursor.eat("reserved") {
            skip_statement(cursor)?;
            continue;
        }
        let member_name = cursor.expect_match(&IDENTIFIER, "identifier")?;
        cursor.expect("=")?;
        let value = parse_integer(cursor)?;
        if cursor.eat("[") {
            skip_field_options(cursor)?;
        }
        cursor.expect(";")?;
        members.push(EnumMember {
            name: member_name.text.clone(),
            value,
        });
    }

    Ok(ProtoEnum {
        name: name.text.clone(),
        members,
    })
}

fn parse_message(cursor: &mut Cursor) -> Result<ProtoMessage, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut elements = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        if cursor.eat("option") {
            skip_statement(cursor)?;
        } else if cursor.eat("enum") {
            elements.push(MessageElement::Enum(parse_enum(cursor)?));
        } else if cursor.eat("message") {
            elements.push(MessageElement::Message(parse_message(cursor)?));
        } else if cursor.eat("oneof") {
            elements.push(MessageElement::Oneof(parse_oneof(cursor)?));
        } else if cursor.eat("reserved") {
            let mut entries = Vec::new();
            while !cursor.eat(";") {
                if cursor.at_eof() {
                    return Err(cursor.unexpected());
                }
                let tok = cursor.advance();
                if tok.text != "," {
                    entries.push(tok.text.clone());
                }
            }
            elements.push(MessageElement::Reserved(entries));
        } else if cursor.eat("map") {
            elements.push(MessageElement::Map(parse_map_field(cursor)?));
        } else {
            elements.push(MessageElement::Field(parse_normal_field(cursor)?));
        }
    }

    Ok(ProtoMessage {
        name: name.text.clone(),
        elements,
    })
}

fn parse_normal_field(cursor: &mut Cursor) -> Result<ProtoField, BridgeError> {
    let label = if cursor.eat("optional") {
        Some(FieldLabel::Optional)
    } else if cursor.eat("required") {
        Some(FieldLabel::Required)
    } else if cursor.eat("repeated") {
        Some(FieldLabel::Repeated)
    } else {
        None
    };

    let type_name = cursor.expect_match(&IDENTIFIER, "type")?;
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("=")?;
    let id = parse_integer(cursor)?;
    if cursor.eat("[") {
        skip_field_options(cursor)?;
    }
    cursor.expect(";")?;

    Ok(ProtoField {
        id,
        name: name.text.clone(),
        type_name: type_name.text.clone(),
        label,
    })
}

fn parse_map_field(cursor: &mut Cursor) -> Result<ProtoMapField, BridgeError> {
    cursor.expect("<")?;
    let key_type = cursor.expect_match(&IDENTIFIER, "type")?;
    cursor.expect(",")?;
    let value_type = cursor.expect_match(&IDENTIFIER, "type")?;
    cursor.expect(">")?;
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("=")?;
    let id = parse_integer(cursor)?;
    if cursor.eat("[") {
        skip_field_options(cursor)?;
    }
    cursor.expect(";")?;

    Ok(ProtoMapField {
        id,
        name: name.text.clone(),
        key_type: key_type.text.clone(),
        value_type: value_type.text.clone(),
    })
}

fn parse_oneof(cursor: &mut Cursor) -> Result<ProtoOneof, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut fields = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        if cursor.eat("option") {
            skip_statement(cursor)?;
            continue;
        }
        fields.push(parse_normal_field(cursor)?);
    }

    Ok(ProtoOneof {
        name: name.text.clone(),
        fields,
    })
}

fn parse_service(cursor: &mut Cursor) -> Result<ProtoService, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut methods = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        if cursor.eat("option") {
            skip_statement(cursor)?;
            continue;
        }
        cursor.expect("rpc")?;
        let method_name = cursor.expect_match(&IDENTIFIER, "identifier")?;
        cursor.expect("(")?;
        cursor.eat("stream");
        let request_type = cursor.expect_match(&IDENTIFIER, "type")?;
        cursor.expect(")")?;
        cursor.expect("returns")?;
        cursor.expect("(")?;
        cursor.eat("stream");
        let returns_type = cursor.expect_match(&IDENTIFIER, "type")?;
        cursor.expect(")")?;
        if cursor.eat("{") {
            // rpc-level options carry no Thrift counterpart
            skip_block(cursor)?;
        } else {
            cursor.expect(";")?;
        }
        methods.push(ProtoRpc {
            name:         method_name.text.clone(),
            request_type: request_type.text.clone(),
            returns_type: returns_type.text.clone(),
            http_options: Vec::new(),
        });
    }

    Ok(ProtoService {
        name: name.text.clone(),
        methods,
    })
}

fn parse_integer(cursor: &mut Cursor) -> Result<i32, BridgeError> {
    let tok = cursor.expect_match(&INTEGER, "integer")?;
    tok.text.parse::<i32>().map_err(|_| {
        parse_error(
            &format!("Invalid integer {}", quote(&tok.text)),
            tok.line,
            tok.column,
        )
    })
}

/// Skip `[...]` field options; the opening `[` must already be consumed.
fn skip_field_options(cursor: &mut Cursor) -> Result<(), BridgeError> {
    while !cursor.eat("]") {
        if cursor.at_eof() {
            return Err(cursor.unexpected());
        }
        cursor.advance();
    }
    Ok(())
}
