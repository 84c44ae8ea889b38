//! Schema graph driver.
//!
//! Owns the work stack of pending files and the map from absolute path to
//! per-file translator. Translation runs in two phases: every file is
//! parsed (discovering include/import edges along the way), then every
//! translator sinks its output. A path already present in the map is never
//! re-parsed or re-pushed, which also breaks circular-include cycles.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::WalkDir;

use crate::config::{Config, Task};
use crate::diag::Diagnostics;
use crate::error::BridgeError;
use crate::proto_gen::ProtoGenerator;
use crate::thrift_gen::ThriftGenerator;

/// Pseudo-path registered for the stdin/raw-content translator.
pub const RAW_CONTENT_PATH: &str = "raw_content";

/// A file awaiting translation: its absolute source path and, when an
/// output root is configured, the absolute path its output goes to.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub abs_path:    PathBuf,
    pub output_path: Option<PathBuf>,
}

impl FileInfo {
    pub fn raw_content() -> Self {
        FileInfo {
            abs_path:    PathBuf::from(RAW_CONTENT_PATH),
            output_path: None,
        }
    }

    pub fn is_raw_content(&self) -> bool {
        self.abs_path == Path::new(RAW_CONTENT_PATH)
    }
}

/// One per-file translator. `parse` transforms the source AST and returns
/// any include/import edges it discovered; `render` produces the translated
/// text; `sink` writes it to the output file or stdout.
pub trait FileTranslator {
    fn parse(&mut self) -> Result<Vec<FileInfo>, BridgeError>;
    fn render(&mut self) -> Result<&str, BridgeError>;
    fn sink(&mut self) -> Result<(), BridgeError>;
    fn file_path(&self) -> &Path;
}

pub struct Generator {
    config:      Config,
    files_stack: Vec<FileInfo>,
    translators: HashMap<PathBuf, Box<dyn FileTranslator>>,
    diags:       Rc<dyn Diagnostics>,
}

impl Generator {
    pub fn new(config: Config, diags: Rc<dyn Diagnostics>) -> Result<Self, BridgeError> {
        let mut gen = Generator {
            config,
            files_stack: Vec::new(),
            translators: HashMap::new(),
            diags,
        };

        match gen.config.input_path.clone() {
            Some(input) => {
                let abs_path = fs::canonicalize(&input)?;
                let file_name = abs_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let output_path = gen
                    .config
                    .output_dir
                    .as_ref()
                    .map(|dir| dir.join(gen.config.swap_ext(&file_name)));
                gen.init_translators(vec![FileInfo {
                    abs_path,
                    output_path,
                }])?;
            }
            None => {
                let info = FileInfo::raw_content();
                let translator = gen.new_translator(&info)?;
                gen.translators.insert(info.abs_path.clone(), translator);
                gen.files_stack.push(info);
            }
        }

        Ok(gen)
    }

    /// Drain the work stack, then sink every translator.
    pub fn run(&mut self) -> Result<(), BridgeError> {
        while let Some(file) = self.files_stack.pop() {
            let translator = self
                .translators
                .get_mut(&file.abs_path)
                .ok_or_else(|| BridgeError::UnknownTranslator(file.abs_path.clone()))?;
            let new_files = translator.parse()?;
            if self.config.recursive && !new_files.is_empty() {
                self.init_translators(new_files)?;
            }
        }

        for translator in self.translators.values_mut() {
            translator.sink()?;
        }
        Ok(())
    }

    fn new_translator(&self, file: &FileInfo) -> Result<Box<dyn FileTranslator>, BridgeError> {
        Ok(match self.config.task {
            Task::ProtoToThrift => Box::new(ThriftGenerator::new(
                &self.config,
                file.clone(),
                self.diags.clone(),
            )?),
            Task::ThriftToProto => Box::new(ProtoGenerator::new(
                &self.config,
                file.clone(),
                self.diags.clone(),
            )?),
        })
    }

    /// Register translators for newly discovered files, expanding directory
    /// inputs and skipping paths that already have one.
    fn init_translators(&mut self, file_infos: Vec<FileInfo>) -> Result<(), BridgeError> {
        let mut files = Vec::new();

        for info in file_infos {
            if self.translators.contains_key(&info.abs_path) {
                continue;
            }
            let meta = fs::metadata(&info.abs_path)?;
            if meta.is_dir() {
                files.extend(self.all_files_from_dir(&info.abs_path)?);
            } else if self.is_idl_path(&info.abs_path) {
                files.push(info);
            } else {
                self.diags.warn(&format!(
                    "file {} is not a valid {} idl, skipping",
                    info.abs_path.display(),
                    self.config.source_ext()
                ));
            }
        }

        for file in files {
            if self.translators.contains_key(&file.abs_path) {
                continue;
            }
            let translator = self.new_translator(&file)?;
            self.translators.insert(file.abs_path.clone(), translator);
            self.files_stack.push(file);
        }
        Ok(())
    }

    /// Recursively collect every file under `root` with the source-dialect
    /// extension, mirroring the relative directory structure under the
    /// output root.
    fn all_files_from_dir(&self, root: &Path) -> Result<Vec<FileInfo>, BridgeError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| BridgeError::Io(io::Error::other(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let abs_path = entry.into_path();
            if !self.is_idl_path(&abs_path) {
                continue;
            }
            let rel_path = abs_path.strip_prefix(root).unwrap_or(&abs_path);
            let output_path = self
                .config
                .output_dir
                .as_ref()
                .map(|dir| dir.join(self.config.swap_ext(&rel_path.to_string_lossy())));
            found.push(FileInfo {
                abs_path,
                output_path,
            });
        }
        Ok(found)
    }

    fn is_idl_path(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()) == self.config.source_ext())
            .unwrap_or(false)
    }
}
