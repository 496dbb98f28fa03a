use std::collections::BTreeMap;

use derive_more::Display;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display)]
pub enum VarKind {
    #[display(fmt = "static")]
    Static,
    #[display(fmt = "field")]
    Field,
    #[display(fmt = "argument")]
    Arg,
    #[display(fmt = "var")]
    Var,
}

impl VarKind {
    fn is_class_scope(self) -> bool {
        matches!(self, VarKind::Static | VarKind::Field)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Symbol {
    pub tp: String,
    pub kind: VarKind,
    pub index: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Display)]
pub enum SymbolError {
    #[display(fmt = "{} is already defined({}).", name, existing)]
    AlreadyDefined { name: String, existing: VarKind },
    #[display(fmt = "{} doesn't exist.", _0)]
    Undeclared(String),
}

/// Class scope lives for one file, subroutine scope for one subroutine.
/// Lookups prefer the subroutine scope.
#[derive(Debug, Default)]
pub struct SymbolTable {
    class_table: BTreeMap<String, Symbol>,
    sub_routine_table: BTreeMap<String, Symbol>,
    static_count: u32,
    field_count: u32,
    arg_count: u32,
    var_count: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_table(&mut self) {
        self.class_table.clear();
        self.static_count = 0;
        self.field_count = 0;
        self.start_subroutine();
    }

    pub fn start_subroutine(&mut self) {
        self.sub_routine_table.clear();
        self.arg_count = 0;
        self.var_count = 0;
    }

    /// Adds `name` to the scope owning `kind` and returns its index.
    /// Static and field share one namespace, as do argument and var.
    pub fn define(&mut self, name: &str, tp: &str, kind: VarKind) -> Result<u32, SymbolError> {
        let (table, counter) = match kind {
            VarKind::Static => (&mut self.class_table, &mut self.static_count),
            VarKind::Field => (&mut self.class_table, &mut self.field_count),
            VarKind::Arg => (&mut self.sub_routine_table, &mut self.arg_count),
            VarKind::Var => (&mut self.sub_routine_table, &mut self.var_count),
        };
        if let Some(existing) = table.get(name) {
            return Err(SymbolError::AlreadyDefined {
                name: name.to_owned(),
                existing: existing.kind,
            });
        }
        let index = *counter;
        *counter += 1;
        table.insert(
            name.to_owned(),
            Symbol {
                tp: tp.to_owned(),
                kind,
                index,
            },
        );
        Ok(index)
    }

    pub fn var_count(&self, kind: VarKind) -> u32 {
        match kind {
            VarKind::Static => self.static_count,
            VarKind::Field => self.field_count,
            VarKind::Arg => self.arg_count,
            VarKind::Var => self.var_count,
        }
    }

    pub fn kind_of(&self, name: &str) -> Option<VarKind> {
        self.get(name).map(|s| s.kind)
    }

    pub fn type_of(&self, name: &str) -> Result<&str, SymbolError> {
        self.row_of(name).map(|s| s.tp.as_str())
    }

    pub fn index_of(&self, name: &str) -> Result<u32, SymbolError> {
        self.row_of(name).map(|s| s.index)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.sub_routine_table
            .get(name)
            .or_else(|| self.class_table.get(name))
    }

    /// Every visible entry of one kind, ordered by name.
    pub fn symbols_of(&self, kind: VarKind) -> Vec<(&str, &Symbol)> {
        let table = if kind.is_class_scope() {
            &self.class_table
        } else {
            &self.sub_routine_table
        };
        table
            .iter()
            .filter(|(_, s)| s.kind == kind)
            .map(|(n, s)| (n.as_str(), s))
            .collect()
    }

    fn row_of(&self, name: &str) -> Result<&Symbol, SymbolError> {
        self.get(name)
            .ok_or_else(|| SymbolError::Undeclared(name.to_owned()))
    }
}
