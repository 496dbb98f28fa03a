use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    code_generator::CodeGenerator,
    config::Config,
    error::{FileError, JackError},
    sym_table::SymbolTable,
    tokenizer::{TokenStream, Tokenizer},
    utils::LogErr,
    vm_compilation_engine::VmCompilationEngine,
    xml_tokens::write_tokens_xml,
};

/// Outcome of compiling every source under one input path.
#[derive(Debug, Default)]
pub struct Report {
    pub compiled: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, JackError)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Tokenize, reset symbols, compile, close; one file at a time.
pub struct JackCompiler {
    config: Config,
    tokenizer: Tokenizer,
    sym_table: SymbolTable,
}

impl JackCompiler {
    pub fn new(config: Config) -> Self {
        JackCompiler {
            config,
            tokenizer: Tokenizer::new(),
            sym_table: SymbolTable::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Symbols left over from the last compiled class.
    pub fn sym_table(&self) -> &SymbolTable {
        &self.sym_table
    }

    /// Compiles a single file or every `.jack` file below a directory. A failing
    /// file does not stop the remaining ones.
    pub fn compile_path(&mut self, path: &Path) -> Result<Report, JackError> {
        let sources = collect_sources(path)?;
        let mut report = Report::default();
        for src in sources {
            match self.compile_file(&src) {
                Ok(out) => report.compiled.push(out),
                Err(e) => {
                    debug!("{} failed", src.display());
                    report.failed.push((src, e));
                }
            }
        }
        Ok(report)
    }

    /// Compiles `path` into its sibling `.vm` file and returns the output path.
    pub fn compile_file(&mut self, path: &Path) -> Result<PathBuf, JackError> {
        debug!("compiling {}", path.display());
        let tokens = self.tokenizer.tokenize(path)?;
        if self.config.emit_tokens_xml {
            let xml_path = tokens_xml_path(path);
            let f = File::create(&xml_path)
                .map_err(|e| FileError::new(&xml_path, &format!("cannot create file, {e}")))?;
            write_tokens_xml(tokens.as_slice(), BufWriter::new(f))?;
        }

        let class_name = class_name_of(path)?;
        let out_path = output_path(path);
        let mut code_gen = CodeGenerator::create(&out_path)?;
        let result = match self.compile_tokens(tokens, &class_name, &mut code_gen) {
            Ok(()) => code_gen.close().map(drop).map_err(JackError::from),
            Err(e) => {
                drop(code_gen);
                Err(e)
            }
        };

        if let Err(e) = result {
            if !self.config.keep_partial_output {
                let _ = fs::remove_file(&out_path).log_err("cannot remove partial output");
            }
            return Err(e);
        }
        Ok(out_path)
    }

    /// Compiles source text held in memory and returns the writer.
    pub fn compile_source<W: Write>(
        &mut self,
        class_name: &str,
        source: &str,
        out: W,
    ) -> Result<W, JackError> {
        let tokens = self.tokenizer.tokenize_str(source)?;
        let mut code_gen = CodeGenerator::new(out);
        self.compile_tokens(tokens, class_name, &mut code_gen)?;
        Ok(code_gen.close()?)
    }

    fn compile_tokens<W: Write>(
        &mut self,
        tokens: TokenStream,
        class_name: &str,
        code_gen: &mut CodeGenerator<W>,
    ) -> Result<(), JackError> {
        self.sym_table.reset_table();
        let mut engine =
            VmCompilationEngine::new(tokens, &mut self.sym_table, code_gen, &self.config.runtime);
        engine.compile(class_name)
    }
}

/// Resolves the input path into the sorted list of sources to compile.
pub fn collect_sources(path: &Path) -> Result<Vec<PathBuf>, JackError> {
    if !path.exists() {
        return FileError::err(path, "path does not exist");
    }
    let mut sources = Vec::new();
    if path.is_dir() {
        walk(path, &mut sources)
            .map_err(|e| FileError::new(path, &format!("cannot read directory, {e}")))?;
        sources.sort();
    } else if is_jack_file(path) {
        sources.push(path.to_path_buf());
    } else {
        return FileError::err(path, "not a .jack file");
    }
    if sources.is_empty() {
        return FileError::err(path, "There is no .jack file.");
    }
    Ok(sources)
}

/// Symlinks are not followed, so a link back to an ancestor cannot loop.
fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let ft = entry.file_type()?;
        let path = entry.path();
        if ft.is_dir() {
            walk(&path, found)?;
        } else if ft.is_file() && is_jack_file(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_jack_file(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some("jack")
}

/// `dir/Main.jack` -> `dir/Main.vm`
pub fn output_path(path: &Path) -> PathBuf {
    path.with_extension("vm")
}

fn tokens_xml_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
    path.with_file_name(format!("{stem}T.xml"))
}

fn class_name_of(path: &Path) -> Result<String, JackError> {
    match path.file_stem().and_then(OsStr::to_str) {
        Some(stem) => Ok(stem.to_string()),
        None => FileError::err(path, "file name is not valid UTF-8"),
    }
}
