use std::path::PathBuf;

use crate::case::CaseStyle;

/// Translation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ProtoToThrift,
    ThriftToProto,
}

/// Options recognized by the translation engine. One `Config` drives a whole
/// run; per-file state lives in the translators themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub task: Task,

    /// Input file or directory. `None` means `raw_content` holds the source.
    pub input_path: Option<PathBuf>,
    /// Output root directory. `None` means translated text goes to stdout.
    pub output_dir: Option<PathBuf>,
    pub raw_content: String,

    pub use_space_indent: bool,
    pub indent_space:     usize,
    /// Case style for enum/struct/message/service names.
    pub name_case:  CaseStyle,
    /// Case style for struct fields and enum members.
    pub field_case: CaseStyle,
    /// Target protobuf syntax version, 2 or 3.
    pub syntax: i32,
    /// Follow include/import edges and translate the discovered files too.
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            task:             Task::ThriftToProto,
            input_path:       None,
            output_dir:       None,
            raw_content:      String::new(),
            use_space_indent: false,
            indent_space:     4,
            name_case:        CaseStyle::Camel,
            field_case:       CaseStyle::Camel,
            syntax:           3,
            recursive:        false,
        }
    }
}

impl Config {
    /// Extension of source-dialect files for the configured task.
    pub fn source_ext(&self) -> &'static str {
        match self.task {
            Task::ProtoToThrift => ".proto",
            Task::ThriftToProto => ".thrift",
        }
    }

    pub fn target_ext(&self) -> &'static str {
        match self.task {
            Task::ProtoToThrift => ".thrift",
            Task::ThriftToProto => ".proto",
        }
    }

    /// Swap the dialect extension in a file name or include/import path.
    pub fn swap_ext(&self, filename: &str) -> String {
        filename.replace(self.source_ext(), self.target_ext())
    }

    pub fn indent(&self) -> String {
        if self.use_space_indent {
            " ".repeat(self.indent_space)
        } else {
            "\t".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_ext_both_directions() {
        let mut config = Config::default();
        assert_eq!(config.swap_ext("api/user.thrift"), "api/user.proto");
        config.task = Task::ProtoToThrift;
        assert_eq!(config.swap_ext("api/user.proto"), "api/user.thrift");
    }

    #[test]
    fn test_indent_styles() {
        let mut config = Config::default();
        assert_eq!(config.indent(), "\t");
        config.use_space_indent = true;
        config.indent_space = 2;
        assert_eq!(config.indent(), "  ");
    }
}
