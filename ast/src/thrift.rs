use serde::Serialize;

use crate::EnumMember;

/// Root container for one `.thrift` file's declarations.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ThriftSchema {
    pub declarations: Vec<ThriftDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ThriftDecl {
    Namespace { scope: String, name: String },
    Include(String),
    Enum(ThriftEnum),
    Struct(ThriftStruct),
    Service(ThriftService),
    Comment(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThriftEnum {
    pub name:    String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThriftStruct {
    pub name:   String,
    pub fields: Vec<ThriftField>,
}

/// A Thrift type reference. Container nesting deeper than one level is not
/// preserved by the translators, but the AST itself can represent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ThriftType {
    Ident(String),
    List(Box<ThriftType>),
    Set(Box<ThriftType>),
    Map(Box<ThriftType>, Box<ThriftType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Requiredness {
    Optional,
    Required,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThriftField {
    /// Wire-compatibility anchor, copied unchanged across translation.
    pub id:           i32,
    pub name:         String,
    pub type_:        ThriftType,
    pub requiredness: Option<Requiredness>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThriftService {
    pub name:    String,
    pub methods: Vec<ThriftMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThriftMethod {
    pub name:        String,
    /// `None` means `void`.
    pub return_type: Option<ThriftType>,
    pub arguments:   Vec<ThriftField>,
    /// Trailing `( key = "value", ... )` annotations on the method.
    pub annotations: Vec<(String, String)>,
}
