//! AST definitions for the two IDL dialects handled by idl-bridge.
//!
//! Both dialects share the same overall shape: a [`proto::ProtoSchema`] or
//! [`thrift::ThriftSchema`] is the root container for one file's
//! declarations, kept in source order so that translated output is
//! deterministic. Declarations are closed tagged variants so that every
//! translator dispatches over them with an exhaustive match.

pub mod proto;
pub mod thrift;

use serde::Serialize;

/// A single name/value pair inside an enum, identical in both dialects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    pub name:  String,
    pub value: i32,
}
