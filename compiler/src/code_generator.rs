use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use derive_more::Display;

use crate::{
    error::{FileError, JackError},
    sym_table::VarKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Segment {
    #[display(fmt = "constant")]
    Const,
    #[display(fmt = "argument")]
    Arg,
    #[display(fmt = "local")]
    Local,
    #[display(fmt = "static")]
    Static,
    #[display(fmt = "this")]
    This,
    #[display(fmt = "that")]
    That,
    #[display(fmt = "pointer")]
    Pointer,
    #[display(fmt = "temp")]
    Temp,
}

impl From<VarKind> for Segment {
    fn from(kind: VarKind) -> Self {
        match kind {
            VarKind::Static => Segment::Static,
            VarKind::Field => Segment::This,
            VarKind::Arg => Segment::Arg,
            VarKind::Var => Segment::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Command {
    #[display(fmt = "add")]
    Add,
    #[display(fmt = "sub")]
    Sub,
    #[display(fmt = "neg")]
    Neg,
    #[display(fmt = "eq")]
    Eq,
    #[display(fmt = "gt")]
    Gt,
    #[display(fmt = "lt")]
    Lt,
    #[display(fmt = "and")]
    And,
    #[display(fmt = "or")]
    Or,
    #[display(fmt = "not")]
    Not,
}

/// Writes one VM instruction per call. No validation happens here.
pub struct CodeGenerator<W: Write> {
    out: W,
}

impl CodeGenerator<BufWriter<File>> {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<Self, JackError> {
        let f = File::create(path)
            .map_err(|e| FileError::new(path, &format!("cannot create output file, {e}")))?;
        Ok(CodeGenerator::new(BufWriter::new(f)))
    }
}

impl<W: Write> CodeGenerator<W> {
    pub fn new(out: W) -> Self {
        CodeGenerator { out }
    }

    /// Flushes and hands back the underlying writer.
    pub fn close(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        self.out.write_all(data.as_bytes())
    }

    pub fn write_push(&mut self, seg: Segment, idx: u32) -> io::Result<()> {
        self.write(&format!("push {seg} {idx}\n"))
    }

    pub fn write_pop(&mut self, seg: Segment, idx: u32) -> io::Result<()> {
        self.write(&format!("pop {seg} {idx}\n"))
    }

    pub fn write_arithmetic(&mut self, cmd: Command) -> io::Result<()> {
        self.write(&format!("{cmd}\n"))
    }

    pub fn write_label(&mut self, label: &str) -> io::Result<()> {
        self.write(&format!("label {label}\n"))
    }

    pub fn write_goto(&mut self, label: &str) -> io::Result<()> {
        self.write(&format!("goto {label}\n"))
    }

    pub fn write_if(&mut self, label: &str) -> io::Result<()> {
        self.write(&format!("if-goto {label}\n"))
    }

    pub fn write_call(&mut self, name: &str, n_args: u32) -> io::Result<()> {
        self.write(&format!("call {name} {n_args}\n"))
    }

    pub fn write_function(&mut self, name: &str, n_locals: u32) -> io::Result<()> {
        self.write(&format!("function {name} {n_locals}\n"))
    }

    pub fn write_return(&mut self) -> io::Result<()> {
        self.write("return\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_instruction() {
        let mut g = CodeGenerator::new(Vec::new());
        g.write_function("Main.main", 2).unwrap();
        g.write_push(Segment::Const, 7).unwrap();
        g.write_pop(VarKind::Field.into(), 1).unwrap();
        g.write_arithmetic(Command::Neg).unwrap();
        g.write_label("L0").unwrap();
        g.write_if("L0").unwrap();
        g.write_goto("L0").unwrap();
        g.write_call("Math.multiply", 2).unwrap();
        g.write_return().unwrap();
        let out = String::from_utf8(g.close().unwrap()).unwrap();
        assert_eq!(
            "function Main.main 2\npush constant 7\npop this 1\nneg\nlabel L0\n\
             if-goto L0\ngoto L0\ncall Math.multiply 2\nreturn\n",
            out
        );
    }
}
