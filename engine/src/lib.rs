//! idl-bridge-engine
//!
//! This crate implements:
//!  1) Tokenizer + parsers for `.proto` and `.thrift` IDL files,
//!  2) The type mapper and identifier case converter,
//!  3) The two per-file translators (proto -> thrift, thrift -> proto),
//!  4) The schema graph driver (include/import discovery, work stack),
//!  5) Error types (`BridgeError`) and the `Diagnostics` sink.

pub mod case;
pub mod config;
pub mod diag;
pub mod driver;
pub mod error;
pub mod mapper;
pub mod proto_gen;
pub mod proto_parser;
pub mod thrift_gen;
pub mod thrift_parser;
pub mod tokenizer;
pub mod utils;

use std::rc::Rc;

pub use case::{case_convert, CaseStyle};
pub use config::{Config, Task};
pub use diag::{Diagnostics, LogDiagnostics, MemoryDiagnostics};
pub use driver::{FileInfo, FileTranslator, Generator};
pub use error::BridgeError;

use config::Task::{ProtoToThrift, ThriftToProto};
use proto_gen::ProtoGenerator;
use thrift_gen::ThriftGenerator;

/// Embeddable one-shot translation: source text in, translated text out.
/// Non-fatal issues go to the `log` facade; parse errors are returned.
pub fn translate(content: &str, config: &Config) -> Result<String, BridgeError> {
    translate_with(content, config, Rc::new(LogDiagnostics))
}

/// Like [`translate`], with an explicit diagnostics sink.
pub fn translate_with(
    content: &str,
    config: &Config,
    diags: Rc<dyn Diagnostics>,
) -> Result<String, BridgeError> {
    let mut config = config.clone();
    config.raw_content = content.to_string();
    config.input_path = None;

    let file = FileInfo::raw_content();
    let mut translator: Box<dyn FileTranslator> = match config.task {
        ProtoToThrift => Box::new(ThriftGenerator::new(&config, file, diags)?),
        ThriftToProto => Box::new(ProtoGenerator::new(&config, file, diags)?),
    };
    translator.parse()?;
    Ok(translator.render()?.to_string())
}
