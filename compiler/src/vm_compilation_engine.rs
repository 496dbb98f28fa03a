//! Recursive descent parser that emits VM code while it parses.
//!
//! Every `compile_*` method is entered with the cursor on the first token of its
//! production and returns with the cursor on the last token it consumed.
//! `compile_parameter_list`, `compile_statements` and `compile_expression_list`
//! may match nothing; they then step back once so the caller sees its own
//! lookahead token again.

use std::io::Write;

use log::debug;

use crate::{
    code_generator::{CodeGenerator, Command, Segment},
    config::RuntimeNames,
    error::{CompileError, JackError},
    sym_table::{SymbolTable, VarKind},
    tokenizer::TokenStream,
    tokens::TokenKind,
};

type CompileResult<T> = Result<T, JackError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "constructor" => Some(SubroutineKind::Constructor),
            "function" => Some(SubroutineKind::Function),
            "method" => Some(SubroutineKind::Method),
            _ => None,
        }
    }
}

/// Who receives a subroutine call.
enum Callee {
    /// `name(..)`, a method of the current object.
    This(String),
    /// `var.name(..)`, a method of the object stored in a variable.
    Object {
        kind: VarKind,
        index: u32,
        name: String,
    },
    /// `Class.name(..)`, a function or constructor.
    Class(String),
}

pub struct VmCompilationEngine<'a, W: Write> {
    code_gen: &'a mut CodeGenerator<W>,
    sym_table: &'a mut SymbolTable,
    runtime: &'a RuntimeNames,
    tokens: TokenStream,
    class_name: String,
    func_name: String,
    func_kind: SubroutineKind,
    returns_void: bool,
    label_count: u32,
}

impl<'a, W: Write> VmCompilationEngine<'a, W> {
    pub fn new(
        tokens: TokenStream,
        sym_table: &'a mut SymbolTable,
        code_gen: &'a mut CodeGenerator<W>,
        runtime: &'a RuntimeNames,
    ) -> Self {
        VmCompilationEngine {
            code_gen,
            sym_table,
            runtime,
            tokens,
            class_name: String::new(),
            func_name: String::new(),
            func_kind: SubroutineKind::Function,
            returns_void: false,
            label_count: 0,
        }
    }

    /// Compiles the single class of a file. `expected_class` is the file stem.
    pub fn compile(&mut self, expected_class: &str) -> CompileResult<()> {
        if !self.tokens.has_more_tokens() {
            return CompileError::err("The token does not exist. Is it jack file?", 1);
        }
        self.tokens.advance()?;
        if !self.check_keyword("class") {
            return self.error("The first syntax must be class.");
        }
        self.compile_class(expected_class)?;
        if self.tokens.has_more_tokens() {
            self.tokens.advance()?;
            return self.error("Only one class must exist in one file.");
        }
        Ok(())
    }

    fn advance(&mut self, expected: &str) -> CompileResult<()> {
        if self.tokens.has_more_tokens() {
            self.tokens.advance()
        } else {
            self.error(&format!(
                "Next token does not exist. Compiler expects {expected}."
            ))
        }
    }

    fn retreat(&mut self) -> CompileResult<()> {
        self.tokens.retreat()
    }

    fn line(&self) -> usize {
        self.tokens.line()
    }

    fn text(&self) -> &str {
        self.tokens.current().map_or("", |t| t.text.as_str())
    }

    fn error<T>(&self, message: &str) -> CompileResult<T> {
        CompileError::err(message, self.line())
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.tokens.token_type() == Some(kind)
    }

    fn check_keyword(&self, kw: &str) -> bool {
        self.tokens.current().is_some_and(|t| t.is_keyword(kw))
    }

    fn check_keywords(&self, kws: &[&str]) -> bool {
        kws.iter().any(|kw| self.check_keyword(kw))
    }

    fn check_symbol(&self, sym: char) -> bool {
        self.tokens.current().is_some_and(|t| t.is_symbol(sym))
    }

    fn check_symbols(&self, syms: &[char]) -> bool {
        syms.iter().any(|s| self.check_symbol(*s))
    }

    fn check_type(&self) -> bool {
        self.check_keywords(&["int", "char", "boolean"]) || self.check_kind(TokenKind::Identifier)
    }

    fn check_op(&self) -> bool {
        self.check_symbols(&['+', '-', '*', '/', '&', '|', '<', '>', '='])
    }

    fn check_unary_op(&self) -> bool {
        self.check_symbols(&['-', '~'])
    }

    fn check_keyword_constant(&self) -> bool {
        self.check_keywords(&["true", "false", "null", "this"])
    }

    fn check_term(&self) -> bool {
        self.check_kind(TokenKind::IntConst)
            || self.check_kind(TokenKind::StringConst)
            || self.check_kind(TokenKind::Identifier)
            || self.check_keyword_constant()
            || self.check_symbol('(')
            || self.check_unary_op()
    }

    fn expect_symbol(&self, sym: char) -> CompileResult<()> {
        if self.check_symbol(sym) {
            Ok(())
        } else {
            self.error(&format!("Expected symbol('{sym}')"))
        }
    }

    fn expect_identifier(&self, what: &str) -> CompileResult<String> {
        if self.check_kind(TokenKind::Identifier) {
            Ok(self.text().to_string())
        } else {
            self.error(&format!("Expected identifier for {what}"))
        }
    }

    fn expect_type(&self) -> CompileResult<String> {
        if self.check_type() {
            Ok(self.text().to_string())
        } else {
            self.error("Expected type(primitive type or className)")
        }
    }

    fn expect_term(&self, what: &str) -> CompileResult<()> {
        if self.check_term() {
            Ok(())
        } else {
            self.error(&format!("Expected {what}."))
        }
    }

    fn define(&mut self, tp: &str, kind: VarKind) -> CompileResult<()> {
        let name = self.expect_identifier("varName")?;
        let line = self.line();
        self.sym_table
            .define(&name, tp, kind)
            .map_err(|e| CompileError::new(&e.to_string(), line))?;
        Ok(())
    }

    fn lookup(&self, name: &str) -> CompileResult<(VarKind, u32)> {
        match self.sym_table.get(name) {
            Some(s) => {
                if s.kind == VarKind::Field {
                    self.require_object(&format!("Field {name}"))?;
                }
                Ok((s.kind, s.index))
            }
            None => self.error(&format!("{name} is not defined.")),
        }
    }

    /// `pointer 0` is only bound inside constructors and methods.
    fn require_object(&self, what: &str) -> CompileResult<()> {
        if self.func_kind == SubroutineKind::Function {
            return self.error(&format!("{what} cannot be used in a function."));
        }
        Ok(())
    }

    fn push_var(&mut self, name: &str) -> CompileResult<()> {
        let (kind, idx) = self.lookup(name)?;
        self.code_gen.write_push(kind.into(), idx)?;
        Ok(())
    }

    fn new_label(&mut self, tag: &str) -> String {
        let label = format!(
            "{}.{}${}{}",
            self.class_name, self.func_name, tag, self.label_count
        );
        self.label_count += 1;
        label
    }

    /// class: 'class' className '{' classVarDec* subroutineDec* '}'
    fn compile_class(&mut self, expected_class: &str) -> CompileResult<()> {
        self.advance("identifier for className")?;
        let name = self.expect_identifier("className")?;
        if name != expected_class {
            return self.error(&format!(
                "Class name {name} does not match file name {expected_class}."
            ));
        }
        self.class_name = name;
        self.advance("symbol('{')")?;
        self.expect_symbol('{')?;

        let mut seen_subroutine = false;
        loop {
            self.advance("symbol('}'), or keyword for classVarDec or subroutineDec")?;
            if self.check_symbol('}') {
                break;
            }
            if self.check_keywords(&["static", "field"]) {
                if seen_subroutine {
                    return self.error("classVarDec must precede subroutineDec.");
                }
                self.compile_class_var_dec()?;
            } else if self.check_keywords(&["constructor", "function", "method"]) {
                seen_subroutine = true;
                self.compile_sub_routine_dec()?;
            } else {
                return self.error("Expected symbol('}') or keyword(classVarDec or subroutineDec)");
            }
        }
        Ok(())
    }

    /// classVarDec: ('static' | 'field') type varName (',' varName)* ';'
    fn compile_class_var_dec(&mut self) -> CompileResult<()> {
        let kind = if self.check_keyword("static") {
            VarKind::Static
        } else {
            VarKind::Field
        };
        self.advance("type")?;
        let tp = self.expect_type()?;
        self.advance("identifier for varName")?;
        self.define(&tp, kind)?;
        self.compile_more_names(&tp, kind)
    }

    /// (',' varName)* ';' shared by class and local declarations.
    fn compile_more_names(&mut self, tp: &str, kind: VarKind) -> CompileResult<()> {
        loop {
            self.advance("symbol(';') or symbol(',')")?;
            if self.check_symbol(';') {
                return Ok(());
            }
            if !self.check_symbol(',') {
                return self.error("Expected symbol(';') or symbol(',')");
            }
            self.advance("identifier for varName")?;
            self.define(tp, kind)?;
        }
    }

    /// subroutineDec: ('constructor' | 'function' | 'method') ('void' | type)
    ///                subroutineName '(' parameterList ')' subroutineBody
    fn compile_sub_routine_dec(&mut self) -> CompileResult<()> {
        self.func_kind = match SubroutineKind::from_keyword(self.text()) {
            Some(k) => k,
            None => return self.error("Expected constructor, function or method."),
        };

        self.advance("'void' or type")?;
        let return_type = if self.check_keyword("void") {
            None
        } else {
            Some(self.expect_type()?)
        };
        if self.func_kind == SubroutineKind::Constructor
            && return_type.as_deref() != Some(self.class_name.as_str())
        {
            return self.error(&format!(
                "Constructor return type must be {}.",
                self.class_name
            ));
        }
        self.returns_void = return_type.is_none();

        self.advance("identifier for subroutineName")?;
        self.func_name = self.expect_identifier("subroutineName")?;
        debug!("compiling {}.{}", self.class_name, self.func_name);

        self.advance("symbol('(')")?;
        self.expect_symbol('(')?;

        self.sym_table.start_subroutine();
        self.label_count = 0;
        if self.func_kind == SubroutineKind::Method {
            let class_name = self.class_name.clone();
            let line = self.line();
            self.sym_table
                .define("this", &class_name, VarKind::Arg)
                .map_err(|e| CompileError::new(&e.to_string(), line))?;
        }

        self.advance("type for parameter or symbol(')')")?;
        self.compile_parameter_list()?;
        self.advance("symbol(')')")?;
        self.expect_symbol(')')?;

        self.advance("symbol('{')")?;
        self.expect_symbol('{')?;
        self.compile_sub_routine_body()
    }

    /// parameterList: ((type varName) (',' type varName)*)?
    fn compile_parameter_list(&mut self) -> CompileResult<()> {
        if !self.check_type() {
            return self.retreat();
        }
        let tp = self.expect_type()?;
        self.advance("identifier for varName")?;
        self.define(&tp, VarKind::Arg)?;

        self.advance("symbol(',') or symbol(')')")?;
        while self.check_symbol(',') {
            self.advance("type for parameter")?;
            let tp = self.expect_type()?;
            self.advance("identifier for varName")?;
            self.define(&tp, VarKind::Arg)?;
            self.advance("symbol(',') or symbol(')')")?;
        }
        self.retreat()
    }

    /// subroutineBody: '{' varDec* statements '}'
    fn compile_sub_routine_body(&mut self) -> CompileResult<()> {
        self.advance("'var' or keyword for statement, or symbol('}')")?;
        while self.check_keyword("var") {
            self.compile_var_dec()?;
            self.advance("'var' or keyword for statement, or symbol('}')")?;
        }
        self.write_prologue()?;
        self.compile_statements()?;
        self.advance("symbol('}')")?;
        self.expect_symbol('}')
    }

    fn write_prologue(&mut self) -> CompileResult<()> {
        let n_locals = self.sym_table.var_count(VarKind::Var);
        let name = format!("{}.{}", self.class_name, self.func_name);
        self.code_gen.write_function(&name, n_locals)?;
        match self.func_kind {
            SubroutineKind::Constructor => {
                let n_fields = self.sym_table.var_count(VarKind::Field);
                self.code_gen.write_push(Segment::Const, n_fields)?;
                self.code_gen.write_call(&self.runtime.alloc(), 1)?;
                self.code_gen.write_pop(Segment::Pointer, 0)?;
            }
            SubroutineKind::Method => {
                self.code_gen.write_push(Segment::Arg, 0)?;
                self.code_gen.write_pop(Segment::Pointer, 0)?;
            }
            SubroutineKind::Function => {}
        }
        Ok(())
    }

    /// varDec: 'var' type varName (',' varName)* ';'
    fn compile_var_dec(&mut self) -> CompileResult<()> {
        self.advance("type")?;
        let tp = self.expect_type()?;
        self.advance("identifier for varName")?;
        self.define(&tp, VarKind::Var)?;
        self.compile_more_names(&tp, VarKind::Var)
    }

    /// statements: statement*
    fn compile_statements(&mut self) -> CompileResult<()> {
        loop {
            if self.check_keyword("let") {
                self.compile_let()?;
            } else if self.check_keyword("if") {
                self.compile_if()?;
            } else if self.check_keyword("while") {
                self.compile_while()?;
            } else if self.check_keyword("do") {
                self.compile_do()?;
            } else if self.check_keyword("return") {
                self.compile_return()?;
            } else {
                break;
            }
            self.advance("symbol for closing statements or keyword for statement")?;
        }
        self.retreat()
    }

    /// letStatement: 'let' varName ('[' expression ']')? '=' expression ';'
    fn compile_let(&mut self) -> CompileResult<()> {
        self.advance("identifier for varName")?;
        let name = self.expect_identifier("varName")?;
        let (kind, idx) = self.lookup(&name)?;

        self.advance("symbol('[') or symbol('=')")?;
        if self.check_symbol('[') {
            self.code_gen.write_push(kind.into(), idx)?;
            self.advance("expression")?;
            self.expect_term("expression")?;
            self.compile_expression()?;
            self.advance("symbol(']')")?;
            self.expect_symbol(']')?;
            // target address stays on the stack while the value is computed
            self.code_gen.write_arithmetic(Command::Add)?;

            self.advance("symbol('=')")?;
            self.expect_symbol('=')?;
            self.advance("expression")?;
            self.expect_term("expression")?;
            self.compile_expression()?;
            self.advance("symbol(';')")?;
            self.expect_symbol(';')?;

            self.code_gen.write_pop(Segment::Temp, 0)?;
            self.code_gen.write_pop(Segment::Pointer, 1)?;
            self.code_gen.write_push(Segment::Temp, 0)?;
            self.code_gen.write_pop(Segment::That, 0)?;
        } else {
            self.expect_symbol('=')?;
            self.advance("expression")?;
            self.expect_term("expression")?;
            self.compile_expression()?;
            self.advance("symbol(';')")?;
            self.expect_symbol(';')?;
            self.code_gen.write_pop(kind.into(), idx)?;
        }
        Ok(())
    }

    /// '(' expression ')' for if and while conditions.
    fn compile_condition(&mut self) -> CompileResult<()> {
        self.advance("symbol('(')")?;
        self.expect_symbol('(')?;
        self.advance("expression")?;
        self.expect_term("expression")?;
        self.compile_expression()?;
        self.advance("symbol(')')")?;
        self.expect_symbol(')')
    }

    /// '{' statements '}'
    fn compile_block(&mut self) -> CompileResult<()> {
        self.advance("symbol('{')")?;
        self.expect_symbol('{')?;
        self.advance("keyword for statement, or symbol('}')")?;
        self.compile_statements()?;
        self.advance("symbol('}')")?;
        self.expect_symbol('}')
    }

    /// ifStatement: 'if' '(' expression ')' '{' statements '}'
    ///              ('else' '{' statements '}')?
    fn compile_if(&mut self) -> CompileResult<()> {
        let false_label = self.new_label("IF_FALSE");
        let end_label = self.new_label("IF_END");

        self.compile_condition()?;
        self.code_gen.write_arithmetic(Command::Not)?;
        self.code_gen.write_if(&false_label)?;

        self.compile_block()?;
        self.code_gen.write_goto(&end_label)?;
        self.code_gen.write_label(&false_label)?;

        self.advance("keyword('else') or the next statement")?;
        if self.check_keyword("else") {
            self.compile_block()?;
        } else {
            self.retreat()?;
        }
        self.code_gen.write_label(&end_label)?;
        Ok(())
    }

    /// whileStatement: 'while' '(' expression ')' '{' statements '}'
    fn compile_while(&mut self) -> CompileResult<()> {
        let exp_label = self.new_label("WHILE_EXP");
        let end_label = self.new_label("WHILE_END");

        self.code_gen.write_label(&exp_label)?;
        self.compile_condition()?;
        self.code_gen.write_arithmetic(Command::Not)?;
        self.code_gen.write_if(&end_label)?;

        self.compile_block()?;
        self.code_gen.write_goto(&exp_label)?;
        self.code_gen.write_label(&end_label)?;
        Ok(())
    }

    /// doStatement: 'do' subroutineCall ';'
    fn compile_do(&mut self) -> CompileResult<()> {
        self.advance("identifier for className or varName, or subroutineName")?;
        self.compile_subroutine_call()?;
        self.advance("symbol(';')")?;
        self.expect_symbol(';')?;
        self.code_gen.write_pop(Segment::Temp, 0)?;
        Ok(())
    }

    /// returnStatement: 'return' expression? ';'
    fn compile_return(&mut self) -> CompileResult<()> {
        self.advance("expression or symbol(';')")?;
        if !self.check_term() && !self.check_symbol(';') {
            return self.error("Expected expression or symbol(';')");
        }
        if self.check_term() {
            if self.returns_void {
                return self.error("A void subroutine cannot return a value.");
            }
            self.compile_expression()?;
            self.advance("symbol(';')")?;
        } else {
            if !self.returns_void {
                return self.error("A non-void subroutine must return a value.");
            }
            self.code_gen.write_push(Segment::Const, 0)?;
        }
        if !self.check_symbol(';') {
            return self.error("Expected expression or symbol(';')");
        }
        self.code_gen.write_return()?;
        Ok(())
    }

    /// expression: term (op term)*, evaluated left to right.
    fn compile_expression(&mut self) -> CompileResult<()> {
        self.compile_term()?;
        self.advance("symbol for op or symbol for closing expression")?;
        while self.check_op() {
            let op = self.text().chars().next().unwrap_or_default();
            self.advance("term")?;
            self.expect_term("term")?;
            self.compile_term()?;
            self.write_op(op)?;
            self.advance("symbol for op or symbol for closing expression")?;
        }
        self.retreat()
    }

    fn write_op(&mut self, op: char) -> CompileResult<()> {
        match op {
            '+' => self.code_gen.write_arithmetic(Command::Add)?,
            '-' => self.code_gen.write_arithmetic(Command::Sub)?,
            '*' => self.code_gen.write_call(&self.runtime.multiply(), 2)?,
            '/' => self.code_gen.write_call(&self.runtime.divide(), 2)?,
            '&' => self.code_gen.write_arithmetic(Command::And)?,
            '|' => self.code_gen.write_arithmetic(Command::Or)?,
            '<' => self.code_gen.write_arithmetic(Command::Lt)?,
            '>' => self.code_gen.write_arithmetic(Command::Gt)?,
            '=' => self.code_gen.write_arithmetic(Command::Eq)?,
            _ => return self.error(&format!("Unknown operator {op}")),
        }
        Ok(())
    }

    /// term: integerConstant | stringConstant | keywordConstant | varName |
    ///       varName '[' expression ']' | subroutineCall | '(' expression ')' |
    ///       unaryOp term
    fn compile_term(&mut self) -> CompileResult<()> {
        if self.check_kind(TokenKind::IntConst) {
            let n = match self.text().parse::<u32>() {
                Ok(n) => n,
                Err(_) => return self.error("Invalid integer constant."),
            };
            self.code_gen.write_push(Segment::Const, n)?;
        } else if self.check_kind(TokenKind::StringConst) {
            let s = self.text().to_string();
            self.code_gen
                .write_push(Segment::Const, s.chars().count() as u32)?;
            self.code_gen.write_call(&self.runtime.string_new(), 1)?;
            for c in s.chars() {
                self.code_gen.write_push(Segment::Const, c as u32)?;
                self.code_gen
                    .write_call(&self.runtime.string_append_char(), 2)?;
            }
        } else if self.check_keyword_constant() {
            let kw = self.text().to_string();
            match kw.as_str() {
                "true" => {
                    self.code_gen.write_push(Segment::Const, 0)?;
                    self.code_gen.write_arithmetic(Command::Not)?;
                }
                "this" => {
                    self.require_object("this")?;
                    self.code_gen.write_push(Segment::Pointer, 0)?;
                }
                _ => self.code_gen.write_push(Segment::Const, 0)?,
            }
        } else if self.check_unary_op() {
            let cmd = if self.check_symbol('-') {
                Command::Neg
            } else {
                Command::Not
            };
            self.advance("term")?;
            self.expect_term("term")?;
            self.compile_term()?;
            self.code_gen.write_arithmetic(cmd)?;
        } else if self.check_symbol('(') {
            self.advance("expression")?;
            self.expect_term("expression")?;
            self.compile_expression()?;
            self.advance("symbol(')')")?;
            self.expect_symbol(')')?;
        } else if self.check_kind(TokenKind::Identifier) {
            self.advance("symbol for closing term or symbol('['), or symbol('(' or '.')")?;
            if self.check_symbol('[') {
                self.retreat()?;
                let name = self.text().to_string();
                self.push_var(&name)?;
                self.advance("symbol('[')")?;
                self.advance("expression")?;
                self.expect_term("expression")?;
                self.compile_expression()?;
                self.advance("symbol(']')")?;
                self.expect_symbol(']')?;
                self.code_gen.write_arithmetic(Command::Add)?;
                self.code_gen.write_pop(Segment::Pointer, 1)?;
                self.code_gen.write_push(Segment::That, 0)?;
            } else if self.check_symbols(&['(', '.']) {
                self.retreat()?;
                self.compile_subroutine_call()?;
            } else {
                self.retreat()?;
                let name = self.text().to_string();
                self.push_var(&name)?;
            }
        } else {
            return self.error("Expected term.");
        }
        Ok(())
    }

    /// subroutineCall: subroutineName '(' expressionList ')' |
    ///                 (className | varName) '.' subroutineName '(' expressionList ')'
    fn compile_subroutine_call(&mut self) -> CompileResult<()> {
        let first = self.expect_identifier("className, varName or subroutineName")?;
        self.advance("symbol('.') or symbol('(')")?;

        let callee = if self.check_symbol('.') {
            self.advance("identifier for subroutineName")?;
            let sub = self.expect_identifier("subroutineName")?;
            let callee = match self.sym_table.get(&first) {
                Some(s) if ["int", "char", "boolean"].contains(&s.tp.as_str()) => {
                    return self.error(&format!(
                        "{first} has primitive type {} and has no methods.",
                        s.tp
                    ));
                }
                Some(s) => {
                    if s.kind == VarKind::Field {
                        self.require_object(&format!("Field {first}"))?;
                    }
                    Callee::Object {
                        kind: s.kind,
                        index: s.index,
                        name: format!("{}.{}", s.tp, sub),
                    }
                }
                None => Callee::Class(format!("{first}.{sub}")),
            };
            self.advance("symbol('(')")?;
            callee
        } else if self.check_symbol('(') {
            self.require_object(&format!("Method call {first}()"))?;
            Callee::This(format!("{}.{}", self.class_name, first))
        } else {
            return self.error("Expected symbol('.') or symbol('(')");
        };
        self.expect_symbol('(')?;

        let hidden = match &callee {
            Callee::This(_) => {
                self.code_gen.write_push(Segment::Pointer, 0)?;
                1
            }
            Callee::Object { kind, index, .. } => {
                self.code_gen.write_push((*kind).into(), *index)?;
                1
            }
            Callee::Class(_) => 0,
        };

        self.advance("expressionList or symbol(')')")?;
        let n_args = self.compile_expression_list()?;
        self.advance("symbol(')')")?;
        self.expect_symbol(')')?;

        let name = match callee {
            Callee::This(name) | Callee::Object { name, .. } | Callee::Class(name) => name,
        };
        self.code_gen.write_call(&name, n_args + hidden)?;
        Ok(())
    }

    /// expressionList: (expression (',' expression)*)?
    fn compile_expression_list(&mut self) -> CompileResult<u32> {
        if !self.check_term() {
            self.retreat()?;
            return Ok(0);
        }
        self.compile_expression()?;
        let mut count = 1;
        self.advance("symbol(',') or symbol(')')")?;
        while self.check_symbol(',') {
            self.advance("expression")?;
            self.expect_term("expression")?;
            self.compile_expression()?;
            count += 1;
            self.advance("symbol(',') or symbol(')')")?;
        }
        self.retreat()?;
        return Ok(count);
    }
}
