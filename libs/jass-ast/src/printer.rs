//! # Source Writer
//!
//! Serializes a [`Program`] back into JASS source text, in the same shape the
//! parser accepts. Output is normalized: one declaration or statement per
//! line, nested blocks indented by one unit per level.
//!
//! The parser drops parentheses, so the writer puts them back wherever the
//! flat operator chains would otherwise re-parse into a different tree.
//!
//! ## Example
//!
//! ```rust
//! use jass_ast::{write, Program, TypeDef, WriteOptions};
//!
//! let mut program = Program::new();
//! program.define_type(TypeDef::new("unit", "widget"));
//! assert_eq!(write(&program, &WriteOptions::default()), "type unit extends widget\n");
//! ```

use crate::ast::*;
use config::constants::{
    DEFAULT_INDENT_UNIT, DEFAULT_LINE_TERMINATOR, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES,
};
use stacker::maybe_grow;

// =============================================================================
// OPTIONS
// =============================================================================

/// Formatting options for [`write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent nested blocks. When false every line starts at column 0.
    pub indent: bool,
    /// Text repeated once per nesting level.
    pub indent_unit: String,
    /// Text appended after every line.
    pub line_terminator: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: true,
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            line_terminator: DEFAULT_LINE_TERMINATOR.to_string(),
        }
    }
}

impl WriteOptions {
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Write a whole program as source text.
///
/// Sections come out in grammar order: type aliases, a `globals` block
/// (only when there is at least one constant or variable), natives, then
/// functions.
pub fn write(program: &Program, options: &WriteOptions) -> String {
    let mut printer = Printer::new(options);
    printer.program(program);
    printer.out
}

/// Write a single expression.
///
/// ## Example
///
/// ```rust
/// use jass_ast::{write_expr, BinaryOp, Expr, OperatorChain};
///
/// let mut chain = OperatorChain::new(Expr::variable("a"));
/// chain.push(BinaryOp::Add, Expr::decimal(1));
/// assert_eq!(write_expr(&Expr::Chain(chain)), "a + 1");
/// ```
pub fn write_expr(expr: &Expr) -> String {
    let mut out = String::new();
    print_expr(&mut out, expr);
    out
}

// =============================================================================
// PRINTER
// =============================================================================

struct Printer<'o> {
    options: &'o WriteOptions,
    out: String,
    depth: usize,
}

impl<'o> Printer<'o> {
    fn new(options: &'o WriteOptions) -> Self {
        Self {
            options,
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        if self.options.indent {
            for _ in 0..self.depth {
                self.out.push_str(&self.options.indent_unit);
            }
        }
        self.out.push_str(text);
        self.out.push_str(&self.options.line_terminator);
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    fn program(&mut self, program: &Program) {
        for def in &program.types {
            self.line(&format!("type {} extends {}", def.name, def.base));
        }

        if !program.constants.is_empty() || !program.globals.is_empty() {
            self.line("globals");
            self.nested(|p| {
                for constant in &program.constants {
                    p.line(&format!(
                        "constant {} {} = {}",
                        constant.ty,
                        constant.id,
                        write_expr(&constant.value)
                    ));
                }
                for var in &program.globals {
                    p.line(&var_decl(var));
                }
            });
            self.line("endglobals");
        }

        for native in &program.natives {
            let prefix = if native.constant { "constant " } else { "" };
            self.line(&format!("{}native {}", prefix, function_decl(&native.decl)));
        }

        for function in &program.functions {
            self.function(function);
        }
    }

    fn function(&mut self, function: &Function) {
        let prefix = if function.constant { "constant " } else { "" };
        self.line(&format!("{}function {}", prefix, function_decl(&function.decl)));
        self.nested(|p| {
            for local in &function.locals {
                p.line(&format!("local {}", var_decl(local)));
            }
            p.block(&function.body);
        });
        self.line("endfunction");
    }

    fn block(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt, "");
        }
    }

    /// `prefix` carries a leading `debug ` onto the first line of the statement.
    fn stmt(&mut self, stmt: &Stmt, prefix: &str) {
        match stmt {
            Stmt::Set { id, index, value } => {
                let target = match index {
                    Some(index) => format!("{}[{}]", id, write_expr(index)),
                    None => id.clone(),
                };
                self.line(&format!("{}set {} = {}", prefix, target, write_expr(value)));
            }
            Stmt::Call { id, args } => {
                self.line(&format!("{}call {}({})", prefix, id, print_args(args)));
            }
            Stmt::If { branches } => self.if_stmt(branches, prefix),
            Stmt::Loop { body } => {
                self.line(&format!("{}loop", prefix));
                self.nested(|p| p.block(body));
                self.line("endloop");
            }
            Stmt::ExitWhen { condition } => {
                self.line(&format!("{}exitwhen {}", prefix, write_expr(condition)));
            }
            Stmt::Return { value } => match value {
                Some(value) => self.line(&format!("{}return {}", prefix, write_expr(value))),
                None => self.line(&format!("{}return", prefix)),
            },
            Stmt::Debug(inner) => self.stmt(inner, "debug "),
        }
    }

    fn if_stmt(&mut self, branches: &[Branch], prefix: &str) {
        for (i, branch) in branches.iter().enumerate() {
            let head = match (&branch.condition, i) {
                (Some(cond), 0) => format!("{}if {} then", prefix, write_expr(cond)),
                (Some(cond), _) => format!("elseif {} then", write_expr(cond)),
                (None, _) => "else".to_string(),
            };
            self.line(&head);
            self.nested(|p| p.block(&branch.body));
        }
        self.line("endif");
    }
}

// =============================================================================
// DECLARATION FRAGMENTS
// =============================================================================

fn function_decl(decl: &FunctionDecl) -> String {
    let params = if decl.params.is_empty() {
        "nothing".to_string()
    } else {
        decl.params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let returns = decl.returns.as_deref().unwrap_or("nothing");
    format!("{} takes {} returns {}", decl.id, params, returns)
}

fn var_decl(var: &VarDecl) -> String {
    if var.array {
        return format!("{} array {}", var.ty, var.id);
    }
    match &var.init {
        Some(init) => format!("{} {} = {}", var.ty, var.id, write_expr(init)),
        None => format!("{} {}", var.ty, var.id),
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

fn print_args(args: &[Expr]) -> String {
    args.iter().map(write_expr).collect::<Vec<_>>().join(", ")
}

fn print_expr(out: &mut String, expr: &Expr) {
    maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
        print_expr_inner(out, expr)
    })
}

fn print_expr_inner(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(lit) => out.push_str(&print_literal(lit)),
        Expr::Variable(id) => out.push_str(id),
        Expr::ArrayRef { id, index } => {
            out.push_str(id);
            out.push('[');
            print_expr(out, index);
            out.push(']');
        }
        Expr::FunctionRef(id) => {
            out.push_str("function ");
            out.push_str(id);
        }
        Expr::Call { id, args } => {
            out.push_str(id);
            out.push('(');
            out.push_str(&print_args(args));
            out.push(')');
        }
        Expr::Unary { op, operand } => {
            out.push_str(op.as_str());
            if *op == UnaryOp::Not {
                out.push(' ');
            }
            let wrap = match operand.as_ref() {
                Expr::Unary { .. } => true,
                Expr::Chain(chain) => chain.tier() == Tier::Additive,
                other => is_negative_literal(other),
            };
            print_operand(out, operand, wrap);
        }
        Expr::Chain(chain) => {
            let tier = chain.tier();
            print_operand(out, &chain.head, needs_parens(&chain.head, tier, true));
            for (op, operand) in &chain.tail {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                print_operand(out, operand, needs_parens(operand, tier, false));
            }
        }
    }
}

fn print_operand(out: &mut String, expr: &Expr, wrap: bool) {
    if wrap {
        out.push('(');
        print_expr(out, expr);
        out.push(')');
    } else {
        print_expr(out, expr);
    }
}

/// Whether a chain operand must be parenthesized to re-parse as the same tree.
fn needs_parens(operand: &Expr, outer: Tier, is_head: bool) -> bool {
    match operand {
        Expr::Chain(inner) => !(outer == Tier::Additive && inner.tier() == Tier::Multiplicative),
        // The grammar only allows a unary operator in front of the first term.
        // A negative literal is written with a leading `-` and parses back as one.
        Expr::Unary { .. } => !(outer == Tier::Additive && is_head),
        other if is_negative_literal(other) => !(outer == Tier::Additive && is_head),
        _ => false,
    }
}

/// Folded literals can carry a sign the grammar has no literal syntax for.
fn is_negative_literal(expr: &Expr) -> bool {
    expr.as_literal()
        .and_then(Literal::numeric_value)
        .map_or(false, f64::is_sign_negative)
}

fn print_literal(lit: &Literal) -> String {
    match lit {
        Literal::Decimal(value) => value.to_string(),
        Literal::Octal { value, .. } if *value == 0 => "0".to_string(),
        Literal::Octal { value, .. } => format!("0{:o}", value),
        Literal::Hex { value, .. } => format!("0x{:x}", value),
        Literal::Real(value) => print_real(*value),
        Literal::Bool(value) => value.to_string(),
        Literal::String(value) => format!("\"{}\"", escape(value)),
        Literal::Null => "null".to_string(),
    }
}

fn print_real(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(head: Expr, tail: Vec<(BinaryOp, Expr)>) -> Expr {
        let mut chain = OperatorChain::new(head);
        for (op, operand) in tail {
            chain.push(op, operand);
        }
        Expr::Chain(chain)
    }

    fn neg(expr: Expr) -> Expr {
        Expr::Unary { op: UnaryOp::Neg, operand: Box::new(expr) }
    }

    fn sample_function() -> Function {
        let mut decl = FunctionDecl::new("Main");
        decl.push_param("integer", "n");
        decl.returns = Some("boolean".into());
        Function {
            constant: false,
            decl,
            locals: vec![VarDecl {
                id: "i".into(),
                ty: "integer".into(),
                array: false,
                init: Some(Expr::decimal(0)),
            }],
            body: vec![
                Stmt::Loop {
                    body: vec![
                        Stmt::ExitWhen {
                            condition: chain(
                                Expr::variable("i"),
                                vec![(BinaryOp::Ge, Expr::variable("n"))],
                            ),
                        },
                        Stmt::Set {
                            id: "i".into(),
                            index: None,
                            value: chain(Expr::variable("i"), vec![(BinaryOp::Add, Expr::decimal(1))]),
                        },
                    ],
                },
                Stmt::Return { value: Some(Expr::Literal(Literal::Bool(true))) },
            ],
        }
    }

    #[test]
    fn test_write_function_layout() {
        let mut program = Program::new();
        program.define_function(sample_function());
        let out = write(&program, &WriteOptions::default());
        let expected = "\
function Main takes integer n returns boolean
    local integer i = 0
    loop
        exitwhen i >= n
        set i = i + 1
    endloop
    return true
endfunction
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_write_without_indent() {
        let mut program = Program::new();
        program.define_function(sample_function());
        let out = write(&program, &WriteOptions::default().indent(false));
        assert!(out.contains("\nloop\nexitwhen i >= n\n"));
    }

    #[test]
    fn test_custom_line_terminator_and_unit() {
        let mut program = Program::new();
        program.define_function(sample_function());
        let options = WriteOptions::default().indent_unit("\t").line_terminator("\r\n");
        let out = write(&program, &options);
        assert!(out.contains("\r\n\tlocal integer i = 0\r\n"));
        assert!(out.contains("\r\n\t\texitwhen i >= n\r\n"));
    }

    #[test]
    fn test_globals_block_only_when_needed() {
        let mut program = Program::new();
        assert!(!write(&program, &WriteOptions::default()).contains("globals"));

        program.declare_constant(ConstDecl {
            id: "MAX".into(),
            ty: "integer".into(),
            value: Expr::decimal(12),
        });
        program.declare_global(VarDecl {
            id: "units".into(),
            ty: "unit".into(),
            array: true,
            init: None,
        });
        let out = write(&program, &WriteOptions::default());
        assert_eq!(
            out,
            "globals\n    constant integer MAX = 12\n    unit array units\nendglobals\n"
        );
    }

    #[test]
    fn test_native_and_constant_function_prefixes() {
        let mut program = Program::new();
        program.declare_native(Native { constant: true, decl: FunctionDecl::new("GetTriggerUnit") });
        program.define_function(Function {
            constant: true,
            decl: FunctionDecl::new("Noop"),
            locals: Vec::new(),
            body: Vec::new(),
        });
        let out = write(&program, &WriteOptions::default());
        assert!(out.contains("constant native GetTriggerUnit takes nothing returns nothing\n"));
        assert!(out.contains("constant function Noop takes nothing returns nothing\nendfunction\n"));
    }

    #[test]
    fn test_if_branches() {
        let stmt = Stmt::If {
            branches: vec![
                Branch { condition: Some(Expr::variable("a")), body: vec![Stmt::Return { value: None }] },
                Branch { condition: Some(Expr::variable("b")), body: Vec::new() },
                Branch { condition: None, body: vec![Stmt::Call { id: "F".into(), args: Vec::new() }] },
            ],
        };
        let options = WriteOptions::default();
        let mut printer = Printer::new(&options);
        printer.stmt(&stmt, "");
        assert_eq!(
            printer.out,
            "if a then\n    return\nelseif b then\nelse\n    call F()\nendif\n"
        );
    }

    #[test]
    fn test_debug_prefixes_inner_statement() {
        let stmt = Stmt::Debug(Box::new(Stmt::Call { id: "BJDebugMsg".into(), args: vec![Expr::string("hi")] }));
        let options = WriteOptions::default();
        let mut printer = Printer::new(&options);
        printer.stmt(&stmt, "");
        assert_eq!(printer.out, "debug call BJDebugMsg(\"hi\")\n");
    }

    #[test]
    fn test_integer_radix_is_preserved() {
        let hex = Expr::Literal(Literal::Hex { value: 31, spelling: "0x1F".into() });
        let octal = Expr::Literal(Literal::Octal { value: 15, spelling: "017".into() });
        assert_eq!(write_expr(&hex), "0x1f");
        assert_eq!(write_expr(&octal), "017");
        assert_eq!(write_expr(&Expr::Literal(Literal::Octal { value: 0, spelling: "0".into() })), "0");
    }

    #[test]
    fn test_real_always_has_point() {
        assert_eq!(write_expr(&Expr::real(3.0)), "3.0");
        assert_eq!(write_expr(&Expr::real(0.25)), "0.25");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(write_expr(&Expr::string("say \"hi\" \\o/")), r#""say \"hi\" \\o/""#);
        assert_eq!(write_expr(&Expr::string("a\nb\tc")), r#""a\nb\tc""#);
    }

    #[test]
    fn test_expression_leaves() {
        let expr = Expr::Call {
            id: "TriggerAddAction".into(),
            args: vec![
                Expr::variable("t"),
                Expr::FunctionRef("Actions".into()),
                Expr::ArrayRef { id: "a".into(), index: Box::new(Expr::decimal(2)) },
                Expr::Literal(Literal::Null),
            ],
        };
        assert_eq!(write_expr(&expr), "TriggerAddAction(t, function Actions, a[2], null)");
    }

    #[test]
    fn test_parentheses_restored() {
        // (a + b) * c
        let sum = chain(Expr::variable("a"), vec![(BinaryOp::Add, Expr::variable("b"))]);
        let product = chain(sum, vec![(BinaryOp::Mul, Expr::variable("c"))]);
        assert_eq!(write_expr(&product), "(a + b) * c");

        // a - (b - c)
        let inner = chain(Expr::variable("b"), vec![(BinaryOp::Sub, Expr::variable("c"))]);
        let outer = chain(Expr::variable("a"), vec![(BinaryOp::Sub, inner)]);
        assert_eq!(write_expr(&outer), "a - (b - c)");

        // a + b * c needs none
        let product = chain(Expr::variable("b"), vec![(BinaryOp::Mul, Expr::variable("c"))]);
        let sum = chain(Expr::variable("a"), vec![(BinaryOp::Add, product)]);
        assert_eq!(write_expr(&sum), "a + b * c");
    }

    #[test]
    fn test_unary_placement() {
        let head = chain(neg(Expr::variable("a")), vec![(BinaryOp::Add, Expr::variable("b"))]);
        assert_eq!(write_expr(&head), "-a + b");

        let later = chain(Expr::variable("a"), vec![(BinaryOp::Mul, neg(Expr::variable("b")))]);
        assert_eq!(write_expr(&later), "a * (-b)");

        assert_eq!(write_expr(&neg(neg(Expr::variable("x")))), "-(-x)");

        let not = Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(chain(Expr::variable("a"), vec![(BinaryOp::Or, Expr::variable("b"))])),
        };
        assert_eq!(write_expr(&not), "not (a or b)");
    }

    #[test]
    fn test_negative_literals_are_wrapped() {
        let folded = crate::fold_constant(&neg(Expr::decimal(3)));
        assert_eq!(folded, Expr::real(-3.0));

        let tail = chain(Expr::variable("a"), vec![(BinaryOp::Mul, folded.clone())]);
        assert_eq!(write_expr(&tail), "a * (-3.0)");
        let sub = chain(Expr::variable("a"), vec![(BinaryOp::Sub, Expr::decimal(-2))]);
        assert_eq!(write_expr(&sub), "a - (-2)");
        let head = chain(folded.clone(), vec![(BinaryOp::Mul, Expr::variable("a"))]);
        assert_eq!(write_expr(&head), "(-3.0) * a");
        let sum = chain(folded.clone(), vec![(BinaryOp::Add, Expr::variable("a"))]);
        assert_eq!(write_expr(&sum), "-3.0 + a");
        assert_eq!(write_expr(&neg(folded)), "-(-3.0)");
    }

    #[test]
    fn test_array_initializer_is_never_written() {
        let mut program = Program::new();
        program.declare_global(VarDecl {
            id: "a".into(),
            ty: "integer".into(),
            array: true,
            init: Some(Expr::decimal(5)),
        });
        let out = write(&program, &WriteOptions::default());
        assert_eq!(out, "globals\n    integer array a\nendglobals\n");
        assert!(!out.contains('='));
    }

    #[test]
    fn test_deeply_nested_expression() {
        let mut expr = Expr::variable("x");
        for _ in 0..5000 {
            expr = neg(expr);
        }
        let out = write_expr(&expr);
        assert!(out.starts_with("-(-(-("));
        assert_eq!(out.matches('(').count(), 4999);
    }
}
