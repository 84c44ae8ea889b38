//! Front-end for `.thrift` files.
//!
//! Covers the declarations the translator understands: namespaces, includes,
//! enums (explicit or auto-incremented values), structs with container field
//! types, and services with multi-argument methods and trailing
//! `( key = "value" )` annotations.

use lazy_static::lazy_static;
use regex::Regex;

use idl_bridge_ast::thrift::{
    Requiredness, ThriftDecl, ThriftEnum, ThriftField, ThriftMethod, ThriftSchema, ThriftService,
    ThriftStruct, ThriftType,
};
use idl_bridge_ast::EnumMember;

use crate::error::BridgeError;
use crate::tokenizer::{comment_lines, tokenize, Cursor, Token};
use crate::utils::{parse_error, quote};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
    static ref INTEGER:    Regex = Regex::new(r"^-?\d+$").unwrap();
}

pub fn parse_thrift(text: &str) -> Result<ThriftSchema, BridgeError> {
    let tokens = tokenize(text)?;
    parse_thrift_tokens(&tokens)
}

pub fn parse_thrift_tokens(tokens: &[Token]) -> Result<ThriftSchema, BridgeError> {
    let mut cursor = Cursor::new(tokens);
    let mut schema = ThriftSchema::default();

    while !cursor.at_eof() {
        let tok = cursor.current();
        if tok.is_comment() {
            schema
                .declarations
                .push(ThriftDecl::Comment(comment_lines(&tok.text)));
            cursor.advance();
        } else if cursor.eat("namespace") {
            // scope is either a language name or `*`
            let scope = if cursor.eat("*") {
                "*".to_string()
            } else {
                cursor.expect_match(&IDENTIFIER, "namespace scope")?.text.clone()
            };
            let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
            cursor.eat(";");
            schema.declarations.push(ThriftDecl::Namespace {
                scope,
                name: name.text.clone(),
            });
        } else if cursor.eat("include") {
            let path = cursor.current();
            if !path.is_string() {
                return Err(parse_error(
                    &format!("Expected include path but found {}", quote(&path.text)),
                    path.line,
                    path.column,
                ));
            }
            cursor.advance();
            schema
                .declarations
                .push(ThriftDecl::Include(path.unquoted().to_string()));
        } else if cursor.eat("enum") {
            let decl = parse_enum(&mut cursor)?;
            schema.declarations.push(ThriftDecl::Enum(decl));
        } else if cursor.eat("struct") {
            let decl = parse_struct(&mut cursor)?;
            schema.declarations.push(ThriftDecl::Struct(decl));
        } else if cursor.eat("service") {
            let decl = parse_service(&mut cursor)?;
            schema.declarations.push(ThriftDecl::Service(decl));
        } else {
            return Err(cursor.unexpected());
        }
    }

    Ok(schema)
}

fn parse_enum(cursor: &mut Cursor) -> Result<ThriftEnum, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut members: Vec<EnumMember> = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        let member_name = cursor.expect_match(&IDENTIFIER, "identifier")?;
        // Thrift allows implicit values: previous value + 1, starting at 0.
        let value = if cursor.eat("=") {
            parse_integer(cursor)?
        } else {
            members.last().map_or(0, |m| m.value + 1)
        };
        cursor.eat(",");
        cursor.eat(";");
        members.push(EnumMember {
            name: member_name.text.clone(),
            value,
        });
    }

    Ok(ThriftEnum {
        name: name.text.clone(),
        members,
    })
}

fn parse_struct(cursor: &mut Cursor) -> Result<ThriftStruct, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut fields = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }
        let field = parse_field(cursor)?;
        cursor.eat(",");
        cursor.eat(";");
        fields.push(field);
    }

    Ok(ThriftStruct {
        name: name.text.clone(),
        fields,
    })
}

/// `<id>: [optional|required] <type> <name> [= <default>]`
fn parse_field(cursor: &mut Cursor) -> Result<ThriftField, BridgeError> {
    let id = parse_integer(cursor)?;
    cursor.expect(":")?;

    let requiredness = if cursor.eat("optional") {
        Some(Requiredness::Optional)
    } else if cursor.eat("required") {
        Some(Requiredness::Required)
    } else {
        None
    };

    let type_ = parse_type(cursor)?;
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;

    // default value, not carried across translation
    if cursor.eat("=") {
        cursor.advance();
    }

    Ok(ThriftField {
        id,
        name: name.text.clone(),
        type_,
        requiredness,
    })
}

fn parse_type(cursor: &mut Cursor) -> Result<ThriftType, BridgeError> {
    if cursor.eat("list") {
        cursor.expect("<")?;
        let elem = parse_type(cursor)?;
        cursor.expect(">")?;
        Ok(ThriftType::List(Box::new(elem)))
    } else if cursor.eat("set") {
        cursor.expect("<")?;
        let elem = parse_type(cursor)?;
        cursor.expect(">")?;
        Ok(ThriftType::Set(Box::new(elem)))
    } else if cursor.eat("map") {
        cursor.expect("<")?;
        let key = parse_type(cursor)?;
        cursor.expect(",")?;
        let value = parse_type(cursor)?;
        cursor.expect(">")?;
        Ok(ThriftType::Map(Box::new(key), Box::new(value)))
    } else {
        let tok = cursor.expect_match(&IDENTIFIER, "type")?;
        Ok(ThriftType::Ident(tok.text.clone()))
    }
}

fn parse_service(cursor: &mut Cursor) -> Result<ThriftService, BridgeError> {
    let name = cursor.expect_match(&IDENTIFIER, "identifier")?;
    cursor.expect("{")?;

    let mut methods = Vec::new();
    loop {
        cursor.skip_comments();
        if cursor.eat("}") {
            break;
        }

        let return_type = if cursor.eat("void") {
            None
        } else {
            Some(parse_type(cursor)?)
        };
        let method_name = cursor.expect_match(&IDENTIFIER, "identifier")?;

        cursor.expect("(")?;
        let mut arguments = Vec::new();
        loop {
            cursor.skip_comments();
            if cursor.eat(")") {
                break;
            }
            let arg = parse_field(cursor)?;
            cursor.eat(",");
            arguments.push(arg);
        }

        if cursor.eat("throws") {
            cursor.expect("(")?;
            while !cursor.eat(")") {
                if cursor.at_eof() {
                    return Err(cursor.unexpected());
                }
                cursor.advance();
            }
        }

        let annotations = parse_annotations(cursor)?;
        cursor.eat(",");
        cursor.eat(";");

        methods.push(ThriftMethod {
            name: method_name.text.clone(),
            return_type,
            arguments,
            annotations,
        });
    }

    Ok(ThriftService {
        name: name.text.clone(),
        methods,
    })
}

/// Trailing `( key = "value", ... )` annotations on a method.
fn parse_annotations(cursor: &mut Cursor) -> Result<Vec<(String, String)>, BridgeError> {
    let mut annotations = Vec::new();
    if !cursor.eat("(") {
        return Ok(annotations);
    }
    loop {
        cursor.skip_comments();
        if cursor.eat(")") {
            break;
        }
        let key = cursor.expect_match(&IDENTIFIER, "annotation name")?;
        cursor.expect("=")?;
        let value = cursor.current();
        if !value.is_string() {
            return Err(parse_error(
                &format!(
                    "Expected annotation value but found {}",
                    quote(&value.text)
                ),
                value.line,
                value.column,
            ));
        }
        cursor.advance();
        cursor.eat(",");
        annotations.push((key.text.clone(), value.unquoted().to_string()));
    }
    Ok(annotations)
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
