use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use jack_compiler::{Config, JackCompiler, RuntimeNames};

#[derive(Parser)]
#[command(author, version, about = "Compiles Jack classes into VM code")]
struct Cli {
    /// A .jack file, or a directory searched recursively for .jack files
    path: PathBuf,
    /// Also write <Name>T.xml with the token listing of each source
    #[arg(long)]
    tokens: bool,
    /// Keep the partially written .vm file when a file fails to compile
    #[arg(long)]
    keep_partial: bool,
    /// Class providing `alloc` for constructors
    #[arg(long, default_value = "Memory")]
    memory_class: String,
    /// Class providing `multiply` and `divide`
    #[arg(long, default_value = "Math")]
    math_class: String,
    /// Class providing `new` and `appendChar` for string constants
    #[arg(long, default_value = "String")]
    string_class: String,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            runtime: RuntimeNames {
                memory_class: self.memory_class.clone(),
                math_class: self.math_class.clone(),
                string_class: self.string_class.clone(),
            },
            emit_tokens_xml: self.tokens,
            keep_partial_output: self.keep_partial,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let mut compiler = JackCompiler::new(cli.config());
    match compiler.compile_path(&cli.path) {
        Ok(report) => {
            for (src, e) in &report.failed {
                eprintln!("{}\n{e}", src.display());
            }
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
