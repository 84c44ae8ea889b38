use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use clap::{Parser, ValueEnum};

use idl_bridge_engine::{BridgeError, CaseStyle, Config, Generator, LogDiagnostics, Task};

#[derive(Parser)]
#[command(name = "idlbridge")]
#[command(about = "Convert between Protocol Buffer and Thrift IDL files", long_about = None)]
struct Cli {
    /// Conversion direction
    #[arg(short, long, value_enum)]
    task: TaskArg,

    /// Input idl file or directory; omit to read from stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory; omit to write to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent with spaces instead of a tab
    #[arg(long)]
    use_space_indent: bool,

    /// Space count for each indent level
    #[arg(long, default_value_t = 4)]
    indent_space: usize,

    /// Case style for enum, message/struct and service names
    #[arg(long, value_enum, default_value_t = CaseArg::CamelCase)]
    name_case: CaseArg,

    /// Case style for struct fields and enum members
    #[arg(long, value_enum, default_value_t = CaseArg::CamelCase)]
    field_case: CaseArg,

    /// Target protobuf syntax version
    #[arg(long, default_value_t = 3)]
    syntax: i32,

    /// Follow include/import statements and convert those files too
    #[arg(short, long)]
    recursive: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TaskArg {
    Proto2thrift,
    Thrift2proto,
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "camelCase")]
enum CaseArg {
    CamelCase,
    SnakeCase,
    KebabCase,
    PascalCase,
    ScreamingSnakeCase,
}

impl From<CaseArg> for CaseStyle {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::CamelCase => CaseStyle::Camel,
            CaseArg::SnakeCase => CaseStyle::Snake,
            CaseArg::KebabCase => CaseStyle::Kebab,
            CaseArg::PascalCase => CaseStyle::Pascal,
            CaseArg::ScreamingSnakeCase => CaseStyle::ScreamingSnake,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), BridgeError> {
    if cli.syntax != 2 && cli.syntax != 3 {
        return Err(BridgeError::Config(format!(
            "invalid protobuf syntax version {}",
            cli.syntax
        )));
    }

    let mut config = Config {
        task: match cli.task {
            TaskArg::Proto2thrift => Task::ProtoToThrift,
            TaskArg::Thrift2proto => Task::ThriftToProto,
        },
        input_path: cli.input.clone(),
        output_dir: cli.output.clone(),
        use_space_indent: cli.use_space_indent,
        indent_space: cli.indent_space,
        name_case: cli.name_case.into(),
        field_case: cli.field_case.into(),
        syntax: cli.syntax,
        recursive: cli.recursive,
        ..Config::default()
    };

    if config.input_path.is_none() {
        log::info!("Paste your original idl here, then press Ctrl+D to continue =>");
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        config.raw_content = content;
    }

    log::info!("Convert started, please wait.");
    let mut generator = Generator::new(config, Rc::new(LogDiagnostics))?;
    generator.run()?;
    log::info!("Convert succeeded.");
    Ok(())
}
