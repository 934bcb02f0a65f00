//! # JASS AST
//!
//! Typed syntax tree produced by the parser and consumed by the writer and
//! the constant folder. Nodes carry no behavior beyond small accessors;
//! they are plain values that can be cloned, compared and serialized.
//!
//! ## Shape
//!
//! ```text
//! Program
//! ├── types      (TypeDef: name extends base)
//! ├── globals    (VarDecl)
//! ├── constants  (ConstDecl)
//! ├── natives    (Native, ordered, duplicates kept)
//! └── functions  (Function → locals + Stmt*)
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// PROGRAM
// =============================================================================

/// Root of a parsed script.
///
/// Types, globals, constants and functions are keyed by identifier: inserting
/// a second entry with the same name replaces the first one in place, so the
/// last definition in source order wins while the original position is kept.
/// Natives are an ordered list and keep every declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub types: Vec<TypeDef>,
    pub globals: Vec<VarDecl>,
    pub constants: Vec<ConstDecl>,
    pub natives: Vec<Native>,
    pub functions: Vec<Function>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `type <name> extends <base>`.
    pub fn define_type(&mut self, def: TypeDef) {
        upsert(&mut self.types, def, |t| &t.name);
    }

    /// Record a global variable declaration.
    pub fn declare_global(&mut self, var: VarDecl) {
        upsert(&mut self.globals, var, |v| &v.id);
    }

    /// Record a global constant declaration.
    pub fn declare_constant(&mut self, constant: ConstDecl) {
        upsert(&mut self.constants, constant, |c| &c.id);
    }

    /// Record a native declaration. Natives are never deduplicated.
    pub fn declare_native(&mut self, native: Native) {
        self.natives.push(native);
    }

    /// Record a function definition.
    pub fn define_function(&mut self, function: Function) {
        upsert(&mut self.functions, function, |f| &f.decl.id);
    }

    /// Base type of a declared type alias.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jass_ast::{Program, TypeDef};
    ///
    /// let mut program = Program::new();
    /// program.define_type(TypeDef::new("unit", "widget"));
    /// assert_eq!(program.base_type("unit"), Some("widget"));
    /// assert_eq!(program.base_type("item"), None);
    /// ```
    pub fn base_type(&self, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.base.as_str())
    }

    pub fn global(&self, id: &str) -> Option<&VarDecl> {
        self.globals.iter().find(|v| v.id == id)
    }

    pub fn constant(&self, id: &str) -> Option<&ConstDecl> {
        self.constants.iter().find(|c| c.id == id)
    }

    pub fn function(&self, id: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.decl.id == id)
    }

    /// All native declarations with the given name, in source order.
    pub fn natives_named<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Native> + 'a {
        self.natives.iter().filter(move |n| n.decl.id == id)
    }
}

/// Replace the entry sharing `item`'s key, or append it.
fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &str) {
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

// =============================================================================
// DECLARATIONS
// =============================================================================

/// `type <name> extends <base>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDef {
    pub name: String,
    pub base: String,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
        }
    }
}

/// Variable declaration, used for globals and function locals.
///
/// Array declarations never carry an initializer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VarDecl {
    pub id: String,
    pub ty: String,
    pub array: bool,
    pub init: Option<Expr>,
}

/// `constant <type> <id> = <expr>` inside a globals block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstDecl {
    pub id: String,
    pub ty: String,
    pub value: Expr,
}

/// Function parameter: `<type> <name>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

/// Signature shared by natives and functions.
///
/// `returns == None` means `returns nothing`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionDecl {
    pub id: String,
    pub params: Vec<Param>,
    pub returns: Option<String>,
}

impl FunctionDecl {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: Vec::new(),
            returns: None,
        }
    }

    /// Add a parameter. A repeated name keeps its position and takes the new type.
    pub fn push_param(&mut self, ty: impl Into<String>, name: impl Into<String>) {
        let param = Param {
            ty: ty.into(),
            name: name.into(),
        };
        upsert(&mut self.params, param, |p| &p.name);
    }
}

/// A function provided by the host engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Native {
    pub constant: bool,
    pub decl: FunctionDecl,
}

/// A function defined in the script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Function {
    pub constant: bool,
    pub decl: FunctionDecl,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
}

// =============================================================================
// STATEMENTS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Stmt {
    /// `set <id>[<index>] = <value>`
    Set {
        id: String,
        index: Option<Expr>,
        value: Expr,
    },
    /// `call <id>(<args>)`
    Call { id: String, args: Vec<Expr> },
    /// `if … elseif … else … endif`
    If { branches: Vec<Branch> },
    /// `loop … endloop`
    Loop { body: Vec<Stmt> },
    /// `exitwhen <condition>`
    ExitWhen { condition: Expr },
    /// `return [<value>]`
    Return { value: Option<Expr> },
    /// `debug <stmt>`; the inner statement is a set, call, if or loop.
    Debug(Box<Stmt>),
}

impl Stmt {
    /// Whether this statement may be wrapped by `debug`.
    pub fn is_debuggable(&self) -> bool {
        matches!(
            self,
            Stmt::Set { .. } | Stmt::Call { .. } | Stmt::If { .. } | Stmt::Loop { .. }
        )
    }
}

/// One arm of an if statement. Only a trailing `else` has no condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Branch {
    pub condition: Option<Expr>,
    pub body: Vec<Stmt>,
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    ArrayRef { id: String, index: Box<Expr> },
    /// `function <id>`, a callback-style reference.
    FunctionRef(String),
    Call { id: String, args: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Chain(OperatorChain),
}

impl Expr {
    pub fn variable(id: impl Into<String>) -> Self {
        Expr::Variable(id.into())
    }

    pub fn decimal(value: i64) -> Self {
        Expr::Literal(Literal::Decimal(value))
    }

    pub fn real(value: f64) -> Self {
        Expr::Literal(Literal::Real(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

/// Flat left-to-right run of operands at a single precedence tier.
///
/// `head op₁ e₁ op₂ e₂ …` is stored as `head` plus `[(op₁, e₁), (op₂, e₂), …]`.
/// Grouping inside the run is implicit: evaluation is strictly left to right.
/// A multiplicative chain nested as an operand of an additive chain carries
/// the precedence between tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorChain {
    pub head: Box<Expr>,
    pub tail: Vec<(BinaryOp, Expr)>,
}

impl OperatorChain {
    pub fn new(head: Expr) -> Self {
        Self {
            head: Box::new(head),
            tail: Vec::new(),
        }
    }

    pub fn push(&mut self, op: BinaryOp, operand: Expr) {
        self.tail.push((op, operand));
    }

    /// Tier of the run, taken from its first operator.
    ///
    /// A chain without operators reports the additive tier.
    pub fn tier(&self) -> Tier {
        self.tail
            .first()
            .map_or(Tier::Additive, |(op, _)| op.tier())
    }

    /// Collapse a single-operand chain to that operand.
    pub fn into_expr(self) -> Expr {
        if self.tail.is_empty() {
            *self.head
        } else {
            Expr::Chain(self)
        }
    }
}

/// The two binary precedence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// `+ - < > == <= >= != and or`
    Additive,
    /// `* /`
    Multiplicative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Lt,
    Gt,
    Eq,
    Le,
    Ge,
    Ne,
    And,
    Or,
    Mul,
    Div,
}

impl BinaryOp {
    /// Operator for a source token, if the token is a binary operator.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jass_ast::{BinaryOp, Tier};
    ///
    /// assert_eq!(BinaryOp::from_token("<="), Some(BinaryOp::Le));
    /// assert_eq!(BinaryOp::from_token("*").map(|op| op.tier()), Some(Tier::Multiplicative));
    /// assert_eq!(BinaryOp::from_token("%"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "+" => Self::Add,
            "-" => Self::Sub,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "==" => Self::Eq,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "!=" => Self::Ne,
            "and" => Self::And,
            "or" => Self::Or,
            "*" => Self::Mul,
            "/" => Self::Div,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Ne => "!=",
            Self::And => "and",
            Self::Or => "or",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Self::Mul | Self::Div => Tier::Multiplicative,
            _ => Tier::Additive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
}

impl UnaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "not" => Some(Self::Not),
            "-" => Some(Self::Neg),
            "+" => Some(Self::Pos),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Neg => "-",
            Self::Pos => "+",
        }
    }
}

// =============================================================================
// LITERALS
// =============================================================================

/// Constant values.
///
/// Octal and hex integers keep the spelling they were parsed from next to
/// the computed value. Equality compares kind and value only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Literal {
    Decimal(i64),
    Octal { value: i64, spelling: String },
    Hex { value: i64, spelling: String },
    Real(f64),
    Bool(bool),
    /// Unescaped string contents.
    String(String),
    Null,
}

impl Literal {
    /// Numeric value for integer and real literals.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use jass_ast::Literal;
    ///
    /// assert_eq!(Literal::Decimal(7).numeric_value(), Some(7.0));
    /// assert_eq!(Literal::Bool(true).numeric_value(), None);
    /// ```
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Literal::Decimal(value)
            | Literal::Octal { value, .. }
            | Literal::Hex { value, .. } => Some(*value as f64),
            Literal::Real(value) => Some(*value),
            _ => None,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Decimal(a), Literal::Decimal(b)) => a == b,
            (Literal::Octal { value: a, .. }, Literal::Octal { value: b, .. }) => a == b,
            (Literal::Hex { value: a, .. }, Literal::Hex { value: b, .. }) => a == b,
            (Literal::Real(a), Literal::Real(b)) => a == b,
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Null, Literal::Null) => true,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
