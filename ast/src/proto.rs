use serde::Serialize;

use crate::EnumMember;

/// Root container for one `.proto` file's declarations.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ProtoSchema {
    /// Protobuf syntax version, 2 or 3.
    pub syntax:       i32,
    pub declarations: Vec<ProtoDecl>,
}

/// One top-level declaration, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProtoDecl {
    Package(String),
    Import(String),
    Enum(ProtoEnum),
    Message(ProtoMessage),
    Service(ProtoService),
    Comment(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoEnum {
    pub name:    String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoMessage {
    pub name:     String,
    pub elements: Vec<MessageElement>,
}

/// One element inside a message body. Oneof groups and reserved ranges are
/// kept in the AST even though they have no Thrift counterpart, so the
/// translator's dispatch stays exhaustive and the drop is an explicit arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MessageElement {
    Field(ProtoField),
    Map(ProtoMapField),
    Enum(ProtoEnum),
    Message(ProtoMessage),
    Oneof(ProtoOneof),
    Reserved(Vec<String>),
}

/// Field label under proto syntax 2; syntax 3 fields are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldLabel {
    Optional,
    Required,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoField {
    /// Wire-compatibility anchor, copied unchanged across translation.
    pub id:        i32,
    pub name:      String,
    pub type_name: String,
    pub label:     Option<FieldLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoMapField {
    pub id:         i32,
    pub name:       String,
    pub key_type:   String,
    pub value_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoOneof {
    pub name:   String,
    pub fields: Vec<ProtoField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoService {
    pub name:    String,
    pub methods: Vec<ProtoRpc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoRpc {
    pub name:         String,
    /// Empty when the source Thrift method declared no arguments.
    pub request_type: String,
    /// Empty when the source Thrift method returned `void`.
    pub returns_type: String,
    /// Entries of a synthesized `option (google.api.http)` block.
    pub http_options: Vec<(String, String)>,
}
