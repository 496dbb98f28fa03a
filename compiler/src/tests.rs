#![cfg(test)]
use crate::{
    config::{Config, RuntimeNames},
    error::{CompileError, JackError},
    jack_compiler::JackCompiler,
    sym_table::VarKind,
};

fn compile_with(config: Config, class: &str, src: &str) -> Result<Vec<String>, JackError> {
    let mut c = JackCompiler::new(config);
    let out = c.compile_source(class, src, Vec::new())?;
    Ok(String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect())
}

fn compile(class: &str, src: &str) -> Result<Vec<String>, JackError> {
    compile_with(Config::default(), class, src)
}

fn main_body(vars: &str, statements: &str) -> String {
    format!("class Main {{\n function void main() {{\n {vars}\n {statements}\n return;\n }}\n}}\n")
}

fn compile_error(class: &str, src: &str) -> CompileError {
    match compile(class, src) {
        Err(JackError::Compile(e)) => e,
        other => panic!("expected a compile error, got {other:?}"),
    }
}

fn position(lines: &[String], wanted: &str) -> usize {
    lines
        .iter()
        .position(|l| l == wanted)
        .unwrap_or_else(|| panic!("`{wanted}` not emitted"))
}

#[test]
fn let_with_addition() {
    let out = compile("Main", &main_body("var int x;", "let x = 2 + 3;")).unwrap();
    assert_eq!(
        vec![
            "function Main.main 1",
            "push constant 2",
            "push constant 3",
            "add",
            "pop local 0",
            "push constant 0",
            "return"
        ],
        out
    );
}

#[test]
fn if_else_uses_two_fresh_labels() {
    let out = compile(
        "Main",
        &main_body(
            "var boolean x; var int y;",
            "if (x) { let y = 1; } else { let y = 2; }",
        ),
    )
    .unwrap();
    assert_eq!(
        vec![
            "function Main.main 2",
            "push local 0",
            "not",
            "if-goto Main.main$IF_FALSE0",
            "push constant 1",
            "pop local 1",
            "goto Main.main$IF_END1",
            "label Main.main$IF_FALSE0",
            "push constant 2",
            "pop local 1",
            "label Main.main$IF_END1",
            "push constant 0",
            "return"
        ],
        out
    );
}

#[test]
fn if_without_else_still_emits_both_labels() {
    let out = compile(
        "Main",
        &main_body("var int y;", "if (true) { let y = 1; } let y = 3;"),
    )
    .unwrap();
    let false_label = position(&out, "label Main.main$IF_FALSE0");
    let end_label = position(&out, "label Main.main$IF_END1");
    assert_eq!(false_label + 1, end_label);
    assert_eq!("push constant 3", out[end_label + 1]);
}

#[test]
fn nested_constructs_never_share_labels() {
    let out = compile(
        "Main",
        &main_body(
            "var int i;",
            "while (i < 3) { if (i = 1) { if (i) { let i = 0; } } let i = i + 1; }",
        ),
    )
    .unwrap();
    let labels: Vec<&String> = out.iter().filter(|l| l.starts_with("label ")).collect();
    assert_eq!(6, labels.len());
    for (i, l) in labels.iter().enumerate() {
        assert!(!labels[i + 1..].contains(l), "duplicate {l}");
    }
}

#[test]
fn labels_restart_per_subroutine_but_stay_qualified() {
    let src = "class Main {\n\
               function void a() { while (true) { } return; }\n\
               function void b() { while (true) { } return; }\n\
               }";
    let out = compile("Main", src).unwrap();
    assert!(out.contains(&"label Main.a$WHILE_EXP0".to_string()));
    assert!(out.contains(&"label Main.b$WHILE_EXP0".to_string()));
}

#[test]
fn constructor_allocates_fields_before_statements() {
    let src = "class Point {\n\
               field int x, y;\n\
               static int count;\n\
               constructor Point new(int ax, int ay) {\n\
               let x = ax; let y = ay; let count = count + 1;\n\
               return this;\n\
               }\n\
               }";
    let out = compile("Point", src).unwrap();
    assert_eq!(
        vec![
            "function Point.new 0",
            "push constant 2",
            "call Memory.alloc 1",
            "pop pointer 0",
            "push argument 0",
            "pop this 0",
            "push argument 1",
            "pop this 1",
            "push static 0",
            "push constant 1",
            "add",
            "pop static 0",
            "push pointer 0",
            "return"
        ],
        out
    );
}

#[test]
fn allocator_name_is_configurable() {
    let config = Config {
        runtime: RuntimeNames {
            memory_class: "Heap".to_string(),
            ..RuntimeNames::default()
        },
        ..Config::default()
    };
    let src = "class P { field int a; constructor P make() { return this; } }";
    let out = compile_with(config, "P", src).unwrap();
    assert_eq!("call Heap.alloc 1", out[2]);
}

#[test]
fn method_call_on_object_variable() {
    let out = compile(
        "Main",
        &main_body("var Point p, q; var int d;", "let d = p.distance(q);"),
    )
    .unwrap();
    assert_eq!(
        vec![
            "function Main.main 3",
            "push local 0",
            "push local 1",
            "call Point.distance 2",
            "pop local 2"
        ],
        out[..5]
    );
}

#[test]
fn bare_call_is_a_method_on_this() {
    let src = "class Square {\n\
               method void draw() { return; }\n\
               method void redraw(int size) { do draw(); return; }\n\
               }";
    let out = compile("Square", src).unwrap();
    let start = position(&out, "function Square.redraw 0");
    assert_eq!(
        vec![
            "function Square.redraw 0",
            "push argument 0",
            "pop pointer 0",
            "push pointer 0",
            "call Square.draw 1",
            "pop temp 0",
            "push constant 0",
            "return"
        ],
        out[start..]
    );
}

#[test]
fn method_arguments_start_after_this() {
    let src = "class Square {\n\
               field int size;\n\
               method void grow(int by) { let size = size + by; return; }\n\
               }";
    let out = compile("Square", src).unwrap();
    assert_eq!(
        vec![
            "function Square.grow 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "push argument 1",
            "add",
            "pop this 0",
            "push constant 0",
            "return"
        ],
        out
    );
}

#[test]
fn class_function_call_has_no_hidden_argument() {
    let out = compile("Main", &main_body("", "do Output.printInt(1 + 2);")).unwrap();
    assert_eq!(
        vec![
            "function Main.main 0",
            "push constant 1",
            "push constant 2",
            "add",
            "call Output.printInt 1",
            "pop temp 0"
        ],
        out[..6]
    );
}

#[test]
fn calls_are_emitted_left_to_right() {
    let out = compile(
        "Main",
        &main_body("var int x;", "let x = Main.f() + Main.g();"),
    )
    .unwrap();
    assert!(position(&out, "call Main.f 0") < position(&out, "call Main.g 0"));
}

#[test]
fn while_condition_is_inside_the_loop() {
    let out = compile(
        "Main",
        &main_body("var int n;", "while (Main.more()) { let n = n + 1; }"),
    )
    .unwrap();
    let start = position(&out, "label Main.main$WHILE_EXP0");
    let call = position(&out, "call Main.more 0");
    let exit = position(&out, "if-goto Main.main$WHILE_END1");
    let back = position(&out, "goto Main.main$WHILE_EXP0");
    let end = position(&out, "label Main.main$WHILE_END1");
    assert!(start < call && call < exit && exit < back && back < end);
    assert_eq!("not", out[exit - 1]);
    assert_eq!(1, out.iter().filter(|l| *l == "call Main.more 0").count());
}

#[test]
fn array_assignment_saves_address_before_value() {
    let out = compile(
        "Main",
        &main_body("var Array a; var int i;", "let a[i] = a[i + 1];"),
    )
    .unwrap();
    assert_eq!(
        vec![
            "function Main.main 2",
            "push local 0",
            "push local 1",
            "add",
            "push local 0",
            "push local 1",
            "push constant 1",
            "add",
            "add",
            "pop pointer 1",
            "push that 0",
            "pop temp 0",
            "pop pointer 1",
            "push temp 0",
            "pop that 0"
        ],
        out[..15]
    );
}

#[test]
fn local_shadows_field_only_in_its_own_subroutine() {
    let src = "class Box {\n\
               field int x;\n\
               method void a() { var int x; let x = 1; return; }\n\
               method void b() { let x = 2; return; }\n\
               }";
    let out = compile("Box", src).unwrap();
    let a = position(&out, "function Box.a 1");
    let b = position(&out, "function Box.b 0");
    assert_eq!("pop local 0", out[a + 4]);
    assert_eq!("pop this 0", out[b + 4]);
}

#[test]
fn same_class_compiles_identically_twice() {
    let src = "class Counter {\n\
               static int total;\n\
               field int a, b;\n\
               constructor Counter new() { let a = 0; let b = 1; return this; }\n\
               method int sum(int k) { var int t; let t = a + b + k; return t; }\n\
               }";
    let mut c = JackCompiler::new(Config::default());
    let first = c.compile_source("Counter", src, Vec::new()).unwrap();
    let fields_first: Vec<(String, u32)> = c
        .sym_table()
        .symbols_of(VarKind::Field)
        .into_iter()
        .map(|(n, s)| (n.to_string(), s.index))
        .collect();
    let second = c.compile_source("Counter", src, Vec::new()).unwrap();
    let fields_second: Vec<(String, u32)> = c
        .sym_table()
        .symbols_of(VarKind::Field)
        .into_iter()
        .map(|(n, s)| (n.to_string(), s.index))
        .collect();
    assert_eq!(first, second);
    assert_eq!(
        vec![("a".to_string(), 0), ("b".to_string(), 1)],
        fields_first
    );
    assert_eq!(fields_first, fields_second);
    assert_eq!(1, c.sym_table().var_count(VarKind::Static));
}

#[test]
fn duplicate_local_is_reported_on_its_line() {
    let src = "class Main {\n\
               function void main() {\n\
               var int x;\n\
               var int x;\n\
               return;\n\
               }\n\
               }";
    let e = compile_error("Main", src);
    assert_eq!(4, e.line);
    assert!(e.message.contains("already defined"));
}

#[test]
fn argument_and_local_share_a_namespace() {
    let src = "class Main { function void f(int x) { var int x; return; } }";
    assert!(compile_error("Main", src).message.contains("already defined"));
}

#[test]
fn static_and_field_share_a_namespace() {
    let src = "class Main { static int x; field int x; }";
    assert!(compile_error("Main", src).message.contains("already defined"));
}

#[test]
fn undeclared_variable() {
    let e = compile_error("Main", &main_body("", "let y = 1;"));
    assert!(e.message.contains("y is not defined"));
    assert_eq!(4, e.line);
}

#[test]
fn class_name_must_match_file_name() {
    let e = compile_error("Other", "class Main { }");
    assert!(e.message.contains("does not match"));
}

#[test]
fn constructor_must_return_its_class() {
    let src = "class Point { constructor int new() { return 0; } }";
    assert!(compile_error("Point", src).message.contains("Constructor"));
    let src = "class Point { constructor void new() { return; } }";
    assert!(compile_error("Point", src).message.contains("Constructor"));
}

#[test]
fn return_must_match_void() {
    let src = "class Main { function void f() { return 1; } }";
    assert!(compile_error("Main", src).message.contains("void"));
    let src = "class Main { function int f() { return; } }";
    assert!(compile_error("Main", src).message.contains("must return"));
}

#[test]
fn only_one_class_per_file() {
    let e = compile_error("Main", "class Main { }\nclass Other { }");
    assert_eq!(2, e.line);
}

#[test]
fn empty_source_is_rejected() {
    let e = compile_error("Main", "// nothing here\n");
    assert!(e.message.contains("does not exist"));
}

#[test]
fn class_variables_come_first() {
    let src = "class Main { function void f() { return; } field int x; }";
    assert!(compile_error("Main", src).message.contains("precede"));
}

#[test]
fn primitive_variables_have_no_methods() {
    let e = compile_error("Main", &main_body("var int n;", "do n.foo();"));
    assert!(e.message.contains("primitive"));
}

#[test]
fn truncated_source_names_the_missing_token() {
    let e = compile_error("Main", "class Main {\n function void f() {\n let");
    assert!(e.message.contains("Next token does not exist"));
    assert_eq!(3, e.line);
}

#[test]
fn missing_semicolon() {
    let e = compile_error("Main", &main_body("var int x;", "let x = 1\nlet x = 2;"));
    assert!(e.message.contains("Expected symbol(';')"));
    assert_eq!(5, e.line);
}

#[test]
fn lex_errors_carry_the_line() {
    match compile("Main", "class Main {\n\n  field int #x;\n}") {
        Err(JackError::Lex(e)) => assert_eq!(3, e.line),
        other => panic!("expected a lex error, got {other:?}"),
    }
}

#[test]
fn return_with_a_non_expression_is_a_syntax_error() {
    let src = "class Main { function int f() { return class; } }";
    assert_eq!(
        "Expected expression or symbol(';')",
        compile_error("Main", src).message
    );
    let src = "class Main { function void f() { return class; } }";
    assert_eq!(
        "Expected expression or symbol(';')",
        compile_error("Main", src).message
    );
}

#[test]
fn functions_have_no_current_object() {
    let field = "class Main {\n field int x;\n function int f() {\n return x;\n }\n}";
    let e = compile_error("Main", field);
    assert_eq!(4, e.line);
    assert!(e.message.contains("Field x cannot be used in a function"));

    let assign = "class Main { field int x; function void f() { let x = 1; return; } }";
    assert!(compile_error("Main", assign).message.contains("Field x"));

    let this = "class Main { function Main f() { return this; } }";
    assert!(compile_error("Main", this).message.contains("this cannot be used"));

    let bare = "class Main { method void g() { return; } function void f() { do g(); return; } }";
    assert!(compile_error("Main", bare).message.contains("Method call g()"));

    let through_field =
        "class Main { field Point p; function void f() { do p.draw(); return; } }";
    assert!(compile_error("Main", through_field).message.contains("Field p"));
}

#[test]
fn statics_and_class_calls_are_fine_in_functions() {
    let src = "class Main {\n\
               static int n;\n\
               function void f() { let n = Main.g(); return; }\n\
               function int g() { return n; }\n\
               }";
    let out = compile("Main", src).unwrap();
    assert!(out.contains(&"pop static 0".to_string()));
    assert!(out.contains(&"call Main.g 0".to_string()));
}
