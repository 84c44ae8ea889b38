//! Per-file translator for the proto -> thrift direction.
//!
//! The parsed `.proto` AST is walked once and Thrift text is emitted
//! directly into the output buffer. Nested enums/messages are hoisted to
//! top level with an `OuterInner` name, emitted right after their owner.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::mem;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use idl_bridge_ast::proto::{
    FieldLabel, MessageElement, ProtoDecl, ProtoEnum, ProtoMessage, ProtoSchema, ProtoService,
};

use crate::case::case_convert;
use crate::config::Config;
use crate::diag::Diagnostics;
use crate::driver::{FileInfo, FileTranslator, RAW_CONTENT_PATH};
use crate::error::BridgeError;
use crate::mapper::proto_basic_to_thrift;
use crate::proto_parser::parse_proto;
use crate::utils::quote;

pub struct ThriftGenerator {
    config:    Config,
    file:      FileInfo,
    def:       ProtoSchema,
    content:   String,
    new_files: Vec<FileInfo>,
    diags:     Rc<dyn Diagnostics>,
}

impl ThriftGenerator {
    pub fn new(
        config: &Config,
        file: FileInfo,
        diags: Rc<dyn Diagnostics>,
    ) -> Result<Self, BridgeError> {
        let text = if file.is_raw_content() {
            config.raw_content.clone()
        } else {
            fs::read_to_string(&file.abs_path)?
        };
        let def = parse_proto(&text)?;
        Ok(ThriftGenerator {
            config: config.clone(),
            file,
            def,
            content: String::new(),
            new_files: Vec::new(),
            diags,
        })
    }

    fn handle_package(&mut self, name: &str) {
        self.content
            .push_str(&format!("namespace * {};\n\n", name));
    }

    /// Record the imported file as a dependency edge and rewrite the import
    /// statement as a Thrift include with the extension swapped.
    fn handle_import(&mut self, import_path: &str) {
        if self.file.is_raw_content() {
            return;
        }

        let file_name = self.config.swap_ext(import_path);
        let parent = self
            .file
            .abs_path
            .parent()
            .unwrap_or_else(|| Path::new(""));
        let import = PathBuf::from(import_path);
        let abs_path = if import.is_absolute() {
            import
        } else {
            parent.join(import_path)
        };
        let output_path = self
            .config
            .output_dir
            .as_ref()
            .map(|dir| dir.join(&file_name));
        self.new_files.push(FileInfo {
            abs_path,
            output_path,
        });

        // thrift include declarations take no trailing semicolon
        self.content
            .push_str(&format!("include \"{}\"\n", file_name));
    }

    fn handle_enum(&mut self, decl: &ProtoEnum) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("enum {} {{\n", name));

        // stable sort on value keeps equal-valued members in source order
        let mut members = decl.members.clone();
        members.sort_by_key(|m| m.value);

        for member in &members {
            let member_name = case_convert(self.config.field_case, &member.name);
            self.write_indent();
            self.content
                .push_str(&format!("{} = {}\n", member_name, member.value));
        }
        self.content.push_str("}\n");
    }

    fn handle_message(&mut self, decl: &ProtoMessage) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("struct {} {{\n", name));

        // Pre-scan for nested declarations so sibling fields can refer to a
        // hoisted type regardless of declaration order.
        let nested_names: HashSet<String> = decl
            .elements
            .iter()
            .filter_map(|ele| match ele {
                MessageElement::Enum(e) => Some(format!("{}{}", decl.name, e.name)),
                MessageElement::Message(m) => Some(format!("{}{}", decl.name, m.name)),
                _ => None,
            })
            .collect();

        let mut nested_enums: Vec<ProtoEnum> = Vec::new();
        let mut nested_messages: Vec<ProtoMessage> = Vec::new();

        for ele in &decl.elements {
            match ele {
                MessageElement::Field(field) => {
                    let optional = self.def.syntax == 2 && field.label == Some(FieldLabel::Optional);
                    let type_str =
                        if field.label == Some(FieldLabel::Repeated) {
                            let elem = self.field_type(&field.type_name, &decl.name, &nested_names);
                            format!("list<{}>", elem)
                        } else {
                            self.field_type(&field.type_name, &decl.name, &nested_names)
                        };
                    self.write_field(field.id, optional, &type_str, &field.name);
                }
                MessageElement::Map(field) => {
                    let key_type = match proto_basic_to_thrift(&field.key_type) {
                        Some(t) => t.to_string(),
                        None => {
                            self.diags.error(&format!(
                                "Invalid map key type {} for field {}",
                                quote(&field.key_type),
                                quote(&field.name)
                            ));
                            continue;
                        }
                    };
                    let value_type =
                        self.field_type(&field.value_type, &decl.name, &nested_names);
                    let type_str = format!("map<{}, {}>", key_type, value_type);
                    self.write_field(field.id, false, &type_str, &field.name);
                }
                MessageElement::Enum(nested) => {
                    let mut hoisted = nested.clone();
                    hoisted.name = format!("{}{}", decl.name, nested.name);
                    nested_enums.push(hoisted);
                }
                MessageElement::Message(nested) => {
                    let mut hoisted = nested.clone();
                    hoisted.name = format!("{}{}", decl.name, nested.name);
                    nested_messages.push(hoisted);
                }
                MessageElement::Oneof(oneof) => {
                    self.diags.warn(&format!(
                        "Thrift doesn't support oneof, dropping {}",
                        quote(&oneof.name)
                    ));
                }
                // reserved ranges carry no data worth translating
                MessageElement::Reserved(_) => {}
            }
        }

        self.content.push_str("}\n");

        for nested in &nested_enums {
            self.handle_enum(nested);
        }
        for nested in &nested_messages {
            self.handle_message(nested);
        }
    }

    fn handle_service(&mut self, decl: &ProtoService) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("\nservice {} {{\n", name));
        for method in &decl.methods {
            let method_name = case_convert(self.config.name_case, &method.name);
            let returns_type = self.type_converter(&method.returns_type);
            let request_type = self.type_converter(&method.request_type);
            // protobuf rpc request arguments are unnamed, use `req`
            let arg_name = case_convert(self.config.field_case, "req");
            self.write_indent();
            self.content.push_str(&format!(
                "{} {} (1: {} {})\n",
                returns_type, method_name, request_type, arg_name
            ));
        }
        self.content.push_str("}\n");
    }

    fn handle_comment(&mut self, lines: &[String]) {
        for line in lines {
            self.content.push_str(&format!("//{}\n", line));
        }
    }

    fn write_field(&mut self, id: i32, optional: bool, type_str: &str, name: &str) {
        let field_name = case_convert(self.config.field_case, name);
        let opt_str = if optional { " optional" } else { "" };
        self.write_indent();
        self.content
            .push_str(&format!("{}:{} {} {}\n", id, opt_str, type_str, field_name));
    }

    /// Resolve a field type, preferring a hoisted nested declaration of the
    /// owning message over an outer name.
    fn field_type(&self, type_name: &str, owner: &str, nested_names: &HashSet<String>) -> String {
        let prefixed = format!("{}{}", owner, type_name);
        if nested_names.contains(&prefixed) {
            self.type_converter(&prefixed)
        } else {
            self.type_converter(type_name)
        }
    }

    /// Basic types map through the fixed table; anything else is a
    /// user-defined reference and only gets its case converted.
    fn type_converter(&self, type_name: &str) -> String {
        match proto_basic_to_thrift(type_name) {
            Some(basic) => basic.to_string(),
            None => case_convert(self.config.name_case, type_name),
        }
    }

    fn write_indent(&mut self) {
        let indent = self.config.indent();
        self.content.push_str(&indent);
    }
}

impl FileTranslator for ThriftGenerator {
    fn parse(&mut self) -> Result<Vec<FileInfo>, BridgeError> {
        let declarations = mem::take(&mut self.def.declarations);
        for decl in &declarations {
            match decl {
                ProtoDecl::Package(name) => self.handle_package(name),
                ProtoDecl::Import(path) => self.handle_import(path),
                ProtoDecl::Enum(e) => self.handle_enum(e),
                ProtoDecl::Message(m) => self.handle_message(m),
                ProtoDecl::Service(s) => self.handle_service(s),
                ProtoDecl::Comment(lines) => self.handle_comment(lines),
            }
        }
        self.def.declarations = declarations;
        Ok(mem::take(&mut self.new_files))
    }

    // Emission happens during `parse` in this direction, so rendering is
    // just handing out the buffer.
    fn render(&mut self) -> Result<&str, BridgeError> {
        Ok(&self.content)
    }

    fn sink(&mut self) -> Result<(), BridgeError> {
        match &self.file.output_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, &self.content)?;
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(self.content.as_bytes())?;
            }
        }
        Ok(())
    }

    fn file_path(&self) -> &Path {
        if self.file.is_raw_content() {
            Path::new(RAW_CONTENT_PATH)
        } else {
            &self.file.abs_path
        }
    }
}
