//! # Declaration Parsing
//!
//! Top-level declarations and function definitions.
//!
//! ## Responsibilities
//!
//! - Type aliases: `type unit extends widget`
//! - Globals blocks: `globals … endglobals`, including `constant` entries
//! - Natives: `[constant] native Foo takes … returns …`
//! - Functions: `[constant] function Foo takes … returns … locals statements endfunction`

use super::Parser;
use crate::error::ParseError;
use jass_ast::{ConstDecl, Function, FunctionDecl, Native, Program, TypeDef, VarDecl};

impl<'a> Parser<'a> {
    /// Parse one top-level declaration into `program`.
    ///
    /// ## Returns
    ///
    /// `false` when input is exhausted or no declaration starts here.
    pub(super) fn declaration(&mut self, program: &mut Program) -> Result<bool, ParseError> {
        if !self.cursor.has_more() {
            return Ok(false);
        }
        if let Some(def) = self.type_def()? {
            program.define_type(def);
            return Ok(true);
        }
        if self.globals(program)? {
            return Ok(true);
        }
        if let Some(native) = self.speculate(Self::native)? {
            program.declare_native(native);
            return Ok(true);
        }
        Ok(false)
    }

    /// ## Grammar
    ///
    /// ```text
    /// type_def = "type" id "extends" id
    /// ```
    fn type_def(&mut self) -> Result<Option<TypeDef>, ParseError> {
        if !self.cursor.next_is("type")? {
            return Ok(None);
        }
        let name = self.id()?;
        self.cursor.expect("extends")?;
        let base = self.id()?;
        Ok(Some(TypeDef { name, base }))
    }

    /// ## Grammar
    ///
    /// ```text
    /// globals = "globals" global_var* "endglobals"
    /// global_var = "constant" id id "=" expression | var_decl
    /// ```
    fn globals(&mut self, program: &mut Program) -> Result<bool, ParseError> {
        if !self.cursor.next_is("globals")? {
            return Ok(false);
        }
        while !self.cursor.next_is("endglobals")? {
            if self.cursor.next_is("constant")? {
                let ty = self.id()?;
                let id = self.id()?;
                self.cursor.expect("=")?;
                let value = self.expression()?;
                program.declare_constant(ConstDecl { id, ty, value });
            } else {
                let var = self.var_decl()?;
                program.declare_global(var);
            }
        }
        Ok(true)
    }

    /// Tried speculatively: `constant` also starts a constant function.
    fn native(&mut self) -> Result<Native, ParseError> {
        let constant = self.cursor.next_is("constant")?;
        self.cursor.expect("native")?;
        let decl = self.function_decl()?;
        Ok(Native { constant, decl })
    }

    /// Parse one function definition into `program`.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// function = "constant"? "function" function_decl ("local" var_decl)* statement* "endfunction"
    /// ```
    ///
    /// ## Returns
    ///
    /// `false` once input is exhausted.
    pub(super) fn function(&mut self, program: &mut Program) -> Result<bool, ParseError> {
        if !self.cursor.has_more() {
            return Ok(false);
        }
        let constant = self.cursor.next_is("constant")?;
        self.cursor.expect("function")?;
        let decl = self.function_decl()?;

        let mut locals = Vec::new();
        while self.cursor.next_is("local")? {
            locals.push(self.var_decl()?);
        }
        let body = self.statements_until("endfunction")?;

        program.define_function(Function {
            constant,
            decl,
            locals,
            body,
        });
        Ok(true)
    }

    /// ## Grammar
    ///
    /// ```text
    /// function_decl = id "takes" ("nothing" | id id ("," id id)*) "returns" ("nothing" | id)
    /// ```
    fn function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        let mut decl = FunctionDecl::new(self.id()?);
        self.cursor.expect("takes")?;
        if !self.cursor.next_is("nothing")? {
            loop {
                let ty = self.id()?;
                let name = self.id()?;
                decl.push_param(ty, name);
                if !self.cursor.next_is(",")? {
                    break;
                }
            }
        }
        self.cursor.expect("returns")?;
        if !self.cursor.next_is("nothing")? {
            decl.returns = Some(self.id()?);
        }
        Ok(decl)
    }

    /// ## Grammar
    ///
    /// ```text
    /// var_decl = id "array" id | id id ("=" expression)?
    /// ```
    fn var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let ty = self.id()?;
        let array = self.cursor.next_is("array")?;
        let id = self.id()?;
        let init = if !array && self.cursor.next_is("=")? {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(VarDecl { id, ty, array, init })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::lexer::Lexer;
    use crate::options::ParseOptions;
    use crate::parser::Parser;
    use jass_ast::{Expr, Program};

    fn parse(source: &str) -> Result<Program, ParseError> {
        Parser::new(Lexer::new(source).tokenize(), ParseOptions::default()).parse()
    }

    #[test]
    fn test_type_alias() {
        let program = parse("type unit extends widget\ntype hero extends unit").unwrap();
        assert_eq!(program.types.len(), 2);
        assert_eq!(program.base_type("hero"), Some("unit"));
    }

    #[test]
    fn test_globals_block() {
        let source = "
globals
    constant integer MAX_PLAYERS = 12
    integer count
    real speed = 1.5
    unit array heroes
endglobals
";
        let program = parse(source).unwrap();
        let max = program.constant("MAX_PLAYERS").unwrap();
        assert_eq!(max.ty, "integer");
        assert_eq!(max.value, Expr::decimal(12));

        let count = program.global("count").unwrap();
        assert!(count.init.is_none());
        assert_eq!(program.global("speed").unwrap().init, Some(Expr::real(1.5)));

        let heroes = program.global("heroes").unwrap();
        assert!(heroes.array);
        assert!(heroes.init.is_none());
    }

    #[test]
    fn test_redeclared_global_last_wins() {
        let program = parse("globals\ninteger a = 1\nreal b\ninteger a = 2\nendglobals").unwrap();
        assert_eq!(program.globals.len(), 2);
        assert_eq!(program.globals[0].id, "a");
        assert_eq!(program.globals[0].init, Some(Expr::decimal(2)));
    }

    #[test]
    fn test_natives_all_retained() {
        let source = "
native GetTriggerUnit takes nothing returns unit
constant native GetPlayerId takes player p returns integer
native GetTriggerUnit takes nothing returns unit
";
        let program = parse(source).unwrap();
        assert_eq!(program.natives.len(), 3);
        assert!(program.natives[1].constant);
        assert_eq!(program.natives[1].decl.params[0].ty, "player");
        assert_eq!(program.natives_named("GetTriggerUnit").count(), 2);
    }

    #[test]
    fn test_constant_function_after_natives() {
        let source = "
native Foo takes nothing returns nothing
constant function Bar takes integer a, real b returns real
    return b
endfunction
";
        let program = parse(source).unwrap();
        let bar = program.function("Bar").unwrap();
        assert!(bar.constant);
        assert_eq!(bar.decl.params.len(), 2);
        assert_eq!(bar.decl.returns.as_deref(), Some("real"));
    }

    #[test]
    fn test_locals() {
        let source = "
function F takes nothing returns nothing
    local integer i = 0
    local unit array us
    local string s
endfunction
";
        let program = parse(source).unwrap();
        let f = program.function("F").unwrap();
        assert_eq!(f.locals.len(), 3);
        assert!(f.locals[1].array);
        assert!(program.globals.is_empty());
    }

    #[test]
    fn test_duplicate_function_last_wins() {
        let source = "
function F takes nothing returns nothing
endfunction
function G takes nothing returns nothing
endfunction
function F takes nothing returns integer
    return 1
endfunction
";
        let program = parse(source).unwrap();
        assert_eq!(program.functions.len(), 2);
        assert_eq!(program.functions[0].decl.returns.as_deref(), Some("integer"));
    }

    #[test]
    fn test_reserved_word_as_parameter_name() {
        let result = parse("native F takes integer loop returns nothing");
        // The native is abandoned and the parser then expects a function.
        assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn test_array_takes_no_initializer() {
        match parse("globals\ninteger array a = 5\nendglobals") {
            Err(ParseError::UnexpectedToken { expected, found }) => {
                assert_eq!(expected, "identifier");
                assert_eq!(found, "=");
            }
            other => panic!("expected UnexpectedToken, got {:?}", other),
        }
        let local = "function F takes nothing returns nothing\nlocal real array r = 1.\nendfunction";
        assert!(matches!(parse(local), Err(ParseError::UnexpectedToken { .. })));
    }
}
