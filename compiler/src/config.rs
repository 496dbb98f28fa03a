/// Names of the runtime classes the generated code calls into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeNames {
    pub memory_class: String,
    pub math_class: String,
    pub string_class: String,
}

impl Default for RuntimeNames {
    fn default() -> Self {
        RuntimeNames {
            memory_class: "Memory".to_string(),
            math_class: "Math".to_string(),
            string_class: "String".to_string(),
        }
    }
}

impl RuntimeNames {
    pub fn alloc(&self) -> String {
        format!("{}.alloc", self.memory_class)
    }

    pub fn multiply(&self) -> String {
        format!("{}.multiply", self.math_class)
    }

    pub fn divide(&self) -> String {
        format!("{}.divide", self.math_class)
    }

    pub fn string_new(&self) -> String {
        format!("{}.new", self.string_class)
    }

    pub fn string_append_char(&self) -> String {
        format!("{}.appendChar", self.string_class)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub runtime: RuntimeNames,
    /// Also write `<Stem>T.xml` with the token listing of every source.
    pub emit_tokens_xml: bool,
    /// Keep a half written `.vm` file when compilation fails.
    pub keep_partial_output: bool,
}
