pub mod code_generator;
pub mod config;
pub mod error;
pub mod jack_compiler;
pub mod sym_table;
pub mod tokenizer;
pub mod tokens;
pub mod utils;
pub mod vm_compilation_engine;
pub mod xml_tokens;

mod tests;

pub use config::{Config, RuntimeNames};
pub use error::{CompileError, FileError, JackError, LexError};
pub use jack_compiler::{collect_sources, output_path, JackCompiler, Report};
