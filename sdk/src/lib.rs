//! idl-bridge
//!
//! Embeddable facade over the idl-bridge engine.
//!
//! - One-call helpers for converting IDL text between dialects
//! - Re-exports of the engine's configuration and error types

pub use idl_bridge_engine::{translate, translate_with, BridgeError, CaseStyle, Config, Task};

/// Convert `.proto` source text into Thrift IDL text.
pub fn proto_to_thrift(content: &str, config: &Config) -> Result<String, BridgeError> {
    let mut config = config.clone();
    config.task = Task::ProtoToThrift;
    translate(content, &config)
}

/// Convert `.thrift` source text into protobuf IDL text.
pub fn thrift_to_proto(content: &str, config: &Config) -> Result<String, BridgeError> {
    let mut config = config.clone();
    config.task = Task::ThriftToProto;
    translate(content, &config)
}

/// Parse `.proto` source text into its AST, serialized as pretty JSON.
pub fn proto_to_json(content: &str) -> Result<String, BridgeError> {
    let schema = idl_bridge_engine::proto_parser::parse_proto(content)?;
    Ok(serde_json::to_string_pretty(&schema).unwrap_or_default())
}

/// Parse `.thrift` source text into its AST, serialized as pretty JSON.
pub fn thrift_to_json(content: &str) -> Result<String, BridgeError> {
    let schema = idl_bridge_engine::thrift_parser::parse_thrift(content)?;
    Ok(serde_json::to_string_pretty(&schema).unwrap_or_default())
}

pub mod error {
    pub use idl_bridge_engine::error::BridgeError;
}

pub mod ast {
    pub use idl_bridge_ast::{proto, thrift, EnumMember};
}
