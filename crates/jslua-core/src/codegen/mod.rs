//! Recursive AST-to-Lua code generation.
//!
//! Every node lowers to exactly one syntactically complete Lua fragment or
//! fails with a typed error. Two call conventions exist per node: statement
//! position (value discarded) and expression position (value used); update
//! and assignment expressions lower differently depending on which one the
//! caller is in.

pub mod operators;
pub mod sourcemap;

use crate::ast::expression::*;
use crate::ast::pattern::Pattern;
use crate::ast::statement::*;
use crate::ast::Program;
use crate::errors::{Result, TranspileError};
use crate::span::Span;
pub use sourcemap::{SourceMap, SourceMapBuilder};

/// Mutable state scoped to one top-level compilation.
///
/// Owned by its `CodeGenerator` and discarded with it, so two concurrent
/// compilations can never observe each other's counters.
#[derive(Debug, Default)]
pub struct GenerationContext {
    indent_level: u32,
    temp_counter: u32,
}

impl GenerationContext {
    /// Next unique temp-variable name. The counter only grows within one
    /// compilation, so names are never reused.
    fn next_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("__temp{}", self.temp_counter)
    }
}

/// Code generator for the JavaScript AST to Lua
pub struct CodeGenerator {
    output: String,
    ctx: GenerationContext,
    indent_str: &'static str,
    source_map: Option<SourceMapBuilder>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            ctx: GenerationContext::default(),
            indent_str: "  ",
            source_map: None,
        }
    }

    pub fn with_source_map(mut self, source_file: String) -> Self {
        self.source_map = Some(SourceMapBuilder::new(source_file));
        self
    }

    pub fn take_source_map(&mut self) -> Option<SourceMap> {
        self.source_map.take().map(|builder| builder.build())
    }

    /// Generate Lua source for a whole program. Statements are joined by
    /// newlines; `Empty` nodes contribute nothing.
    pub fn generate(&mut self, program: &Program) -> Result<String> {
        for statement in &program.statements {
            self.generate_statement(statement)?;
        }
        Ok(self.output.trim_end_matches('\n').to_string())
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
        if let Some(source_map) = &mut self.source_map {
            source_map.advance(s);
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write(s);
        self.write("\n");
    }

    fn indent(&mut self) {
        self.ctx.indent_level += 1;
    }

    fn dedent(&mut self) {
        // Underflow is a generator defect, not an input error.
        debug_assert!(self.ctx.indent_level > 0, "indentation underflow");
        self.ctx.indent_level = self.ctx.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.ctx.indent_level {
            self.write(self.indent_str);
        }
    }

    fn map_span(&mut self, span: Span) {
        if let Some(source_map) = &mut self.source_map {
            source_map.add_mapping(span);
        }
    }

    fn generate_statement(&mut self, stmt: &Statement) -> Result<()> {
        if matches!(stmt.kind, StatementKind::Empty) {
            return Ok(());
        }
        self.map_span(stmt.span);

        match &stmt.kind {
            StatementKind::Expression(expr) => self.generate_expression_statement(expr),
            StatementKind::Variable(decl) => self.generate_variable_declaration(decl),
            StatementKind::Function(decl) => self.generate_function_declaration(decl),
            StatementKind::Return(value) => self.generate_return_statement(value.as_ref()),
            StatementKind::If(if_stmt) => self.generate_if_statement(if_stmt),
            StatementKind::While(while_stmt) => self.generate_while_statement(while_stmt),
            StatementKind::For(for_stmt) => self.generate_for_statement(for_stmt),
            StatementKind::Block(block) => self.generate_block(block),
            StatementKind::Break => {
                self.write_indent();
                self.writeln("break");
                Ok(())
            }
            StatementKind::Empty => Ok(()),
            StatementKind::Try(_) => Err(TranspileError::UnsupportedNode {
                kind: "TryStatement",
                span: stmt.span,
            }),
            StatementKind::Throw(_) => Err(TranspileError::UnsupportedNode {
                kind: "ThrowStatement",
                span: stmt.span,
            }),
        }
    }

    /// Lower an expression used in statement position.
    ///
    /// Updates and assignments become plain Lua statements here instead of
    /// the IIFE wrappers they need in expression position. Anything that is
    /// not a statement in Lua is bound to `_` so its side effects survive.
    fn generate_expression_statement(&mut self, expr: &Expression) -> Result<()> {
        match &expr.kind {
            ExpressionKind::Update { op, argument, .. } => {
                self.write_indent();
                self.generate_expression(argument)?;
                self.write(" = ");
                self.generate_expression(argument)?;
                self.write(" ");
                self.write(operators::update_token(*op));
                self.writeln(" 1");
            }
            ExpressionKind::Assignment(left, right) => {
                self.write_indent();
                self.generate_expression(left)?;
                self.write(" = ");
                self.generate_expression(right)?;
                self.writeln("");
            }
            ExpressionKind::Call(_, _) => {
                self.write_indent();
                self.generate_expression(expr)?;
                self.writeln("");
            }
            _ => {
                self.write_indent();
                self.write("local _ = ");
                self.generate_expression(expr)?;
                self.writeln("");
            }
        }
        Ok(())
    }

    fn generate_variable_declaration(&mut self, decl: &VariableDeclaration) -> Result<()> {
        if decl.declarators.is_empty() {
            return Err(TranspileError::MalformedInput {
                reason: format!("variable declaration with no declarators at {}", decl.span),
            });
        }

        self.write_indent();
        self.write("local ");
        for (i, declarator) in decl.declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&declarator.id.node);
        }
        self.write(" = ");
        for (i, declarator) in decl.declarators.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match &declarator.init {
                Some(init) => self.generate_expression(init)?,
                None => self.write("nil"),
            }
        }
        self.writeln("");
        Ok(())
    }

    fn generate_function_declaration(&mut self, decl: &FunctionDeclaration) -> Result<()> {
        self.write_indent();
        self.write("local function ");
        self.write(&decl.name.node);
        self.write("(");
        self.generate_parameter_list(&decl.parameters)?;
        self.writeln(")");
        self.indent();
        self.generate_block(&decl.body)?;
        self.dedent();
        self.write_indent();
        self.writeln("end");
        Ok(())
    }

    fn generate_return_statement(&mut self, value: Option<&Expression>) -> Result<()> {
        self.write_indent();
        self.write("return");
        if let Some(value) = value {
            self.write(" ");
            self.generate_expression(value)?;
        }
        self.writeln("");
        Ok(())
    }

    fn generate_if_statement(&mut self, if_stmt: &IfStatement) -> Result<()> {
        self.write_indent();
        self.write("if ");
        self.generate_expression(&if_stmt.test)?;
        self.writeln(" then");
        self.indent();
        self.generate_nested(&if_stmt.consequent)?;
        self.dedent();

        // A chained `else if` arrives as a nested If in the alternate and is
        // rendered by this same recursion.
        if let Some(alternate) = &if_stmt.alternate {
            self.write_indent();
            self.writeln("else");
            self.indent();
            self.generate_nested(alternate)?;
            self.dedent();
        }

        self.write_indent();
        self.writeln("end");
        Ok(())
    }

    fn generate_while_statement(&mut self, while_stmt: &WhileStatement) -> Result<()> {
        self.write_indent();
        self.write("while ");
        self.generate_expression(&while_stmt.test)?;
        self.writeln(" do");
        self.indent();
        self.generate_nested(&while_stmt.body)?;
        self.dedent();
        self.write_indent();
        self.writeln("end");
        Ok(())
    }

    /// Lower a C-style `for` to init + `while`. A missing test lowers to
    /// `true`, matching the JS rule that an omitted test never terminates
    /// the loop on its own.
    fn generate_for_statement(&mut self, for_stmt: &ForStatement) -> Result<()> {
        match &for_stmt.init {
            Some(ForInit::Declaration(decl)) => self.generate_variable_declaration(decl)?,
            Some(ForInit::Expression(expr)) => self.generate_expression_statement(expr)?,
            None => {}
        }

        self.write_indent();
        self.write("while ");
        match &for_stmt.test {
            Some(test) => self.generate_expression(test)?,
            None => self.write("true"),
        }
        self.writeln(" do");
        self.indent();
        self.generate_nested(&for_stmt.body)?;
        if let Some(update) = &for_stmt.update {
            self.generate_expression_statement(update)?;
        }
        self.dedent();
        self.write_indent();
        self.writeln("end");
        Ok(())
    }

    fn generate_block(&mut self, block: &Block) -> Result<()> {
        for statement in &block.statements {
            self.generate_statement(statement)?;
        }
        Ok(())
    }

    /// Generate a statement used as a loop or branch body. A block is
    /// flattened into its children; anything else generates as itself.
    fn generate_nested(&mut self, stmt: &Statement) -> Result<()> {
        match &stmt.kind {
            StatementKind::Block(block) => self.generate_block(block),
            _ => self.generate_statement(stmt),
        }
    }

    fn generate_parameter_list(&mut self, parameters: &[Pattern]) -> Result<()> {
        for (i, parameter) in parameters.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.generate_pattern(parameter)?;
        }
        Ok(())
    }

    fn generate_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        match pattern {
            Pattern::Identifier(ident) => {
                self.write(&ident.node);
                Ok(())
            }
            Pattern::Array(array) => {
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.generate_pattern(element)?;
                }
                Ok(())
            }
            // No vararg spreading; the rest element binds its name directly.
            Pattern::Rest(rest) => {
                self.write(&rest.argument.node);
                Ok(())
            }
        }
    }

    fn generate_expression(&mut self, expr: &Expression) -> Result<()> {
        match &expr.kind {
            ExpressionKind::Identifier(name) => {
                self.write(name);
                Ok(())
            }
            ExpressionKind::Literal(literal) => {
                self.generate_literal(literal);
                Ok(())
            }
            ExpressionKind::Binary(op, left, right) => {
                let token = operators::resolve_binary(
                    *op,
                    left.is_string_literal(),
                    right.is_string_literal(),
                    expr.span,
                )?;
                self.generate_operand(left)?;
                self.write(" ");
                self.write(token);
                self.write(" ");
                self.generate_operand(right)
            }
            ExpressionKind::Unary(op, argument) => {
                match operators::resolve_unary(*op, expr.span)? {
                    operators::UnaryLowering::Prefix(token) => {
                        self.write(token);
                        self.generate_operand(argument)
                    }
                    operators::UnaryLowering::TypeOfCall => {
                        self.write("type(");
                        self.generate_expression(argument)?;
                        self.write(")");
                        Ok(())
                    }
                    operators::UnaryLowering::Dropped => self.generate_operand(argument),
                }
            }
            ExpressionKind::Update {
                op,
                argument,
                prefix,
            } => self.generate_update_expression(*op, argument, *prefix),
            ExpressionKind::Assignment(left, right) => {
                self.generate_assignment_expression(left, right)
            }
            ExpressionKind::Call(callee, arguments) => {
                self.generate_operand(callee)?;
                self.write("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.generate_expression(argument)?;
                }
                self.write(")");
                Ok(())
            }
            ExpressionKind::Member {
                object,
                property,
                computed,
            } => {
                self.generate_operand(object)?;
                if *computed {
                    self.write("[");
                    self.generate_expression(property)?;
                    self.write("]");
                    Ok(())
                } else {
                    match &property.kind {
                        ExpressionKind::Identifier(name) => {
                            self.write(".");
                            self.write(name);
                            Ok(())
                        }
                        _ => Err(TranspileError::MalformedInput {
                            reason: format!(
                                "non-identifier property in member expression at {}",
                                property.span
                            ),
                        }),
                    }
                }
            }
            ExpressionKind::Object(properties) => {
                if properties.is_empty() {
                    self.write("{}");
                    return Ok(());
                }
                self.write("{ ");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&property.key.node);
                    self.write(" = ");
                    self.generate_expression(&property.value)?;
                }
                self.write(" }");
                Ok(())
            }
            ExpressionKind::Arrow(arrow) => self.generate_arrow_function(arrow),
        }
    }

    /// Parenthesize compound operands so the emitted text cannot rebind
    /// precedence; leaves stay bare. Unary operands must be wrapped too:
    /// an adjacent pair of `-` tokens would otherwise lex as a Lua comment.
    fn generate_operand(&mut self, expr: &Expression) -> Result<()> {
        match expr.kind {
            ExpressionKind::Binary(..)
            | ExpressionKind::Assignment(..)
            | ExpressionKind::Unary(..) => {
                self.write("(");
                self.generate_expression(expr)?;
                self.write(")");
                Ok(())
            }
            _ => self.generate_expression(expr),
        }
    }

    fn generate_literal(&mut self, literal: &Literal) {
        match literal.value {
            LiteralValue::Null => self.write("nil"),
            _ => self.write(&literal.raw),
        }
    }

    /// Update expression in expression position.
    ///
    /// Prefix (`++x`) evaluates to the new value: mutate, then return the
    /// argument. Postfix (`x++`) evaluates to the old value: snapshot into a
    /// fresh temp, mutate, then return the snapshot. Both wrap the mutation
    /// in an immediately-invoked function so the whole thing has a single
    /// value.
    fn generate_update_expression(
        &mut self,
        op: UpdateOp,
        argument: &Expression,
        prefix: bool,
    ) -> Result<()> {
        let token = operators::update_token(op);

        self.writeln("((function()");
        self.indent();
        if prefix {
            self.write_indent();
            self.generate_expression(argument)?;
            self.write(" = ");
            self.generate_expression(argument)?;
            self.write(" ");
            self.write(token);
            self.writeln(" 1");
            self.write_indent();
            self.write("return ");
            self.generate_expression(argument)?;
            self.writeln("");
        } else {
            let temp = self.ctx.next_temp();
            self.write_indent();
            self.write("local ");
            self.write(&temp);
            self.write(" = ");
            self.generate_expression(argument)?;
            self.writeln("");
            self.write_indent();
            self.generate_expression(argument)?;
            self.write(" = ");
            self.generate_expression(argument)?;
            self.write(" ");
            self.write(token);
            self.writeln(" 1");
            self.write_indent();
            self.write("return ");
            self.write(&temp);
            self.writeln("");
        }
        self.dedent();
        self.write_indent();
        self.write("end)())");
        Ok(())
    }

    /// Assignment in expression position. Lua assignment is statement-only,
    /// so this uses the same IIFE device as update expressions and returns
    /// the assigned target.
    fn generate_assignment_expression(
        &mut self,
        left: &Expression,
        right: &Expression,
    ) -> Result<()> {
        self.writeln("((function()");
        self.indent();
        self.write_indent();
        self.generate_expression(left)?;
        self.write(" = ");
        self.generate_expression(right)?;
        self.writeln("");
        self.write_indent();
        self.write("return ");
        self.generate_expression(left)?;
        self.writeln("");
        self.dedent();
        self.write_indent();
        self.write("end)())");
        Ok(())
    }

    fn generate_arrow_function(&mut self, arrow: &ArrowFunction) -> Result<()> {
        self.write("function(");
        self.generate_parameter_list(&arrow.parameters)?;
        match &arrow.body {
            ArrowBody::Expression(expr) => {
                self.write(") return ");
                self.generate_expression(expr)?;
                self.write(" end");
            }
            ArrowBody::Block(block) => {
                self.writeln(")");
                self.indent();
                self.generate_block(block)?;
                self.dedent();
                self.write_indent();
                self.write("end");
            }
        }
        Ok(())
    }
}
