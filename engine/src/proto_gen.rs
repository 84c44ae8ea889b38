//! Per-file translator for the thrift -> proto direction.
//!
//! Translation is two-phase, following the parse-all-then-sink-all driver:
//! `parse` maps the Thrift AST onto a protobuf AST (dropping the constructs
//! protobuf cannot express), `sink` serializes that AST to text.

use std::fs;
use std::io::Write;
use std::mem;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use idl_bridge_ast::proto::{
    FieldLabel, MessageElement, ProtoDecl, ProtoEnum, ProtoField, ProtoMapField, ProtoMessage,
    ProtoRpc, ProtoSchema, ProtoService,
};
use idl_bridge_ast::thrift::{
    Requiredness, ThriftDecl, ThriftEnum, ThriftSchema, ThriftService, ThriftStruct, ThriftType,
};

use crate::case::case_convert;
use crate::config::Config;
use crate::diag::Diagnostics;
use crate::driver::{FileInfo, FileTranslator, RAW_CONTENT_PATH};
use crate::error::BridgeError;
use crate::mapper::thrift_basic_to_proto;
use crate::thrift_parser::parse_thrift;
use crate::utils::quote;

pub struct ProtoGenerator {
    config:    Config,
    file:      FileInfo,
    def:       ThriftSchema,
    proto_ast: ProtoSchema,
    content:   String,
    new_files: Vec<FileInfo>,
    diags:     Rc<dyn Diagnostics>,
}

impl ProtoGenerator {
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
        let def = parse_thrift(&text)?;
        Ok(ProtoGenerator {
            config: config.clone(),
            file,
            def,
            proto_ast: ProtoSchema {
                syntax: config.syntax,
                declarations: Vec::new(),
            },
            content: String::new(),
            new_files: Vec::new(),
            diags,
        })
    }

    fn handle_namespace(&mut self, name: &str, package_seen: &mut bool) {
        // protobuf has a single package declaration; the first namespace wins
        if *package_seen {
            return;
        }
        *package_seen = true;
        self.proto_ast
            .declarations
            .push(ProtoDecl::Package(name.to_string()));
    }

    fn handle_include(&mut self, include_path: &str) {
        if self.file.is_raw_content() {
            return;
        }

        let file_name = self.config.swap_ext(include_path);
        let parent = self
            .file
            .abs_path
            .parent()
            .unwrap_or_else(|| Path::new(""));
        let include = PathBuf::from(include_path);
        let abs_path = if include.is_absolute() {
            include
        } else {
            parent.join(include_path)
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

        self.proto_ast
            .declarations
            .push(ProtoDecl::Import(file_name));
    }

    fn handle_enum(&mut self, decl: &ThriftEnum) {
        // stable sort on value keeps equal-valued members in source order
        let mut members = decl.members.clone();
        members.sort_by_key(|m| m.value);

        self.proto_ast.declarations.push(ProtoDecl::Enum(ProtoEnum {
            name: decl.name.clone(),
            members,
        }));
    }

    fn handle_struct(&mut self, decl: &ThriftStruct) {
        let mut elements = Vec::new();

        for field in &decl.fields {
            match &field.type_ {
                ThriftType::List(elem) => {
                    let elem_type = match self.element_type(elem, &field.name) {
                        Some(t) => t,
                        None => continue,
                    };
                    elements.push(MessageElement::Field(ProtoField {
                        id:        field.id,
                        name:      field.name.clone(),
                        type_name: elem_type,
                        label:     Some(FieldLabel::Repeated),
                    }));
                }
                ThriftType::Map(key, value) => {
                    let key_type = match &**key {
                        ThriftType::Ident(name) => thrift_basic_to_proto(name),
                        _ => None,
                    };
                    let key_type = match key_type {
                        Some(t) => t.to_string(),
                        None => {
                            self.diags.error(&format!(
                                "Invalid map key type for field {}, protobuf map keys must be basic types",
                                quote(&field.name)
                            ));
                            continue;
                        }
                    };
                    let value_type = match self.element_type(value, &field.name) {
                        Some(t) => t,
                        None => continue,
                    };
                    elements.push(MessageElement::Map(ProtoMapField {
                        id:         field.id,
                        name:       field.name.clone(),
                        key_type,
                        value_type,
                    }));
                }
                // protobuf has no set type; drop the field and keep going
                ThriftType::Set(_) => {
                    self.diags.warn(&format!(
                        "Protobuf doesn't have type set, dropping field {}",
                        quote(&field.name)
                    ));
                }
                ThriftType::Ident(name) => {
                    let label = match field.requiredness {
                        Some(Requiredness::Optional) => Some(FieldLabel::Optional),
                        _ => None,
                    };
                    elements.push(MessageElement::Field(ProtoField {
                        id:        field.id,
                        name:      field.name.clone(),
                        type_name: self.type_converter(name),
                        label,
                    }));
                }
            }
        }

        self.proto_ast
            .declarations
            .push(ProtoDecl::Message(ProtoMessage {
                name: decl.name.clone(),
                elements,
            }));
    }

    fn handle_service(&mut self, decl: &ThriftService) {
        let mut methods = Vec::new();

        for method in &decl.methods {
            // protobuf rpc takes exactly one request type; extra thrift
            // arguments are dropped
            if method.arguments.len() > 1 {
                self.diags.warn(&format!(
                    "Method {} has {} arguments, protobuf rpc keeps only the first",
                    quote(&method.name),
                    method.arguments.len()
                ));
            }

            let request_type = match method.arguments.first() {
                Some(arg) => match self.method_type(&arg.type_, &method.name) {
                    Some(t) => t,
                    None => continue,
                },
                None => String::new(),
            };
            let returns_type = match &method.return_type {
                Some(t) => match self.method_type(t, &method.name) {
                    Some(t) => t,
                    None => continue,
                },
                None => String::new(),
            };

            methods.push(ProtoRpc {
                name: method.name.clone(),
                request_type,
                returns_type,
                http_options: method.annotations.clone(),
            });
        }

        self.proto_ast
            .declarations
            .push(ProtoDecl::Service(ProtoService {
                name: decl.name.clone(),
                methods,
            }));
    }

    /// Container element types must be plain identifiers; deeper nesting is
    /// not preserved by the translation.
    fn element_type(&self, type_: &ThriftType, field_name: &str) -> Option<String> {
        match type_ {
            ThriftType::Ident(name) => Some(self.type_converter(name)),
            _ => {
                self.diags.warn(&format!(
                    "Nested container types are not supported, dropping field {}",
                    quote(field_name)
                ));
                None
            }
        }
    }

    fn method_type(&self, type_: &ThriftType, method_name: &str) -> Option<String> {
        match type_ {
            ThriftType::Ident(name) => Some(self.type_converter(name)),
            _ => {
                self.diags.error(&format!(
                    "Container types are not supported in rpc signatures, dropping method {}",
                    quote(method_name)
                ));
                None
            }
        }
    }

    fn type_converter(&self, type_name: &str) -> String {
        match thrift_basic_to_proto(type_name) {
            Some(basic) => basic.to_string(),
            None => case_convert(self.config.name_case, type_name),
        }
    }

    // --- sink phase -------------------------------------------------------

    fn emit_enum(&mut self, decl: &ProtoEnum) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("enum {} {{\n", name));

        // proto3 requires a zero-valued member; synthesize one when missing
        if self.proto_ast.syntax == 3 && !decl.members.iter().any(|m| m.value == 0) {
            self.write_indent();
            self.content.push_str(&format!("{}_Unknown = 0;\n", name));
        }

        for member in &decl.members {
            let member_name = case_convert(self.config.field_case, &member.name);
            self.write_indent();
            self.content
                .push_str(&format!("{} = {};\n", member_name, member.value));
        }
        self.content.push_str("}\n");
    }

    fn emit_message(&mut self, decl: &ProtoMessage) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("message {} {{\n", name));

        for ele in &decl.elements {
            match ele {
                MessageElement::Field(field) => {
                    let field_name = case_convert(self.config.field_case, &field.name);
                    self.write_indent();
                    let label = match field.label {
                        Some(FieldLabel::Repeated) => "repeated ",
                        Some(FieldLabel::Optional) if self.proto_ast.syntax == 2 => "optional ",
                        _ => "",
                    };
                    self.content.push_str(&format!(
                        "{}{} {} = {};\n",
                        label, field.type_name, field_name, field.id
                    ));
                }
                MessageElement::Map(field) => {
                    let field_name = case_convert(self.config.field_case, &field.name);
                    self.write_indent();
                    self.content.push_str(&format!(
                        "map<{}, {}> {} = {};\n",
                        field.key_type, field.value_type, field_name, field.id
                    ));
                }
                // never produced in this direction
                MessageElement::Enum(_)
                | MessageElement::Message(_)
                | MessageElement::Oneof(_)
                | MessageElement::Reserved(_) => {}
            }
        }
        self.content.push_str("}\n");
    }

    fn emit_service(&mut self, decl: &ProtoService) {
        let name = case_convert(self.config.name_case, &decl.name);
        self.content.push_str(&format!("service {} {{\n", name));

        for method in &decl.methods {
            let method_name = case_convert(self.config.name_case, &method.name);
            self.write_indent();
            self.content.push_str(&format!(
                "rpc {}({}) returns ({})",
                method_name, method.request_type, method.returns_type
            ));

            if method.http_options.is_empty() {
                self.content.push_str(" {}\n");
            } else {
                self.content.push_str(" {\n");
                self.write_indent();
                self.write_indent();
                self.content.push_str("option (google.api.http) = {\n");
                for (key, value) in &method.http_options {
                    self.write_indent();
                    self.write_indent();
                    self.write_indent();
                    self.content
                        .push_str(&format!("{}: \"{}\"\n", key, value));
                }
                self.write_indent();
                self.write_indent();
                self.content.push_str("};\n");
                self.write_indent();
                self.content.push_str("}\n");
            }
        }
        self.content.push_str("}\n");
    }

    fn write_indent(&mut self) {
        let indent = self.config.indent();
        self.content.push_str(&indent);
    }
}

impl FileTranslator for ProtoGenerator {
    fn parse(&mut self) -> Result<Vec<FileInfo>, BridgeError> {
        let mut package_seen = false;
        let declarations = mem::take(&mut self.def.declarations);
        for decl in &declarations {
            match decl {
                ThriftDecl::Namespace { name, .. } => {
                    self.handle_namespace(name, &mut package_seen)
                }
                ThriftDecl::Include(path) => self.handle_include(path),
                ThriftDecl::Enum(e) => self.handle_enum(e),
                ThriftDecl::Struct(s) => self.handle_struct(s),
                ThriftDecl::Service(s) => self.handle_service(s),
                ThriftDecl::Comment(lines) => self
                    .proto_ast
                    .declarations
                    .push(ProtoDecl::Comment(lines.clone())),
            }
        }
        self.def.declarations = declarations;
        Ok(mem::take(&mut self.new_files))
    }

    fn render(&mut self) -> Result<&str, BridgeError> {
        if !self.content.is_empty() {
            return Ok(&self.content);
        }

        self.content
            .push_str(&format!("syntax = \"proto{}\";\n\n", self.proto_ast.syntax));

        let declarations = mem::take(&mut self.proto_ast.declarations);
        for decl in &declarations {
            match decl {
                ProtoDecl::Package(name) => {
                    self.content.push_str(&format!("package {};\n\n", name));
                }
                ProtoDecl::Import(path) => {
                    self.content
                        .push_str(&format!("import \"{}\";\n", path));
                }
                ProtoDecl::Comment(lines) => {
                    for line in lines {
                        self.content.push_str(&format!("//{}\n", line));
                    }
                }
                ProtoDecl::Enum(e) => self.emit_enum(e),
                ProtoDecl::Message(m) => self.emit_message(m),
                ProtoDecl::Service(s) => self.emit_service(s),
            }
        }
        self.proto_ast.declarations = declarations;
        Ok(&self.content)
    }

    fn sink(&mut self) -> Result<(), BridgeError> {
        self.render()?;

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
