use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jslua_core::ast::expression::{Expression, ExpressionKind, Literal};
use jslua_core::ast::statement::{
    Block, Statement, StatementKind, TryStatement, VariableDeclaration, VariableDeclarator,
    VariableKind,
};
use jslua_core::ast::{Program, Spanned};
use jslua_core::span::Span;
use jslua_core::{
    CollectingEventSink, LuaTarget, Parser, TranspileError, TranspileEvent, TranspileOptions,
    Transpiler,
};

// ============================================================================
// Fixture parser
// ============================================================================

/// Maps exact source strings to pre-built ASTs and counts how often it runs,
/// so tests can tell cache hits from recompiles.
struct FixtureParser {
    fixtures: HashMap<String, Program>,
    calls: AtomicUsize,
}

impl FixtureParser {
    fn new(fixtures: Vec<(&str, Program)>) -> Self {
        Self {
            fixtures: fixtures
                .into_iter()
                .map(|(source, program)| (source.to_string(), program))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Parser for FixtureParser {
    fn parse(&self, source: &str, _filename: &str) -> Result<Program, TranspileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fixtures
            .get(source)
            .cloned()
            .ok_or_else(|| TranspileError::MalformedInput {
                reason: format!("unexpected token in: {source}"),
            })
    }
}

// ============================================================================
// AST builders
// ============================================================================

fn sp() -> Span {
    Span::default()
}

fn num(raw: &str) -> Expression {
    Expression::new(
        ExpressionKind::Literal(Literal::number(raw.parse().unwrap(), raw)),
        sp(),
    )
}

fn let_decl(name: &str, init: Expression) -> Statement {
    Statement::new(
        StatementKind::Variable(VariableDeclaration {
            kind: VariableKind::Let,
            declarators: vec![VariableDeclarator {
                id: Spanned::new(name.to_string(), sp()),
                init: Some(init),
                span: sp(),
            }],
            span: sp(),
        }),
        sp(),
    )
}

fn simple_program() -> Program {
    Program::new(vec![let_decl("x", num("5"))], sp())
}

fn failing_program() -> Program {
    let try_stmt = TryStatement {
        block: Block {
            statements: vec![],
            span: sp(),
        },
        handler: None,
        finalizer: None,
        span: sp(),
    };
    Program::new(
        vec![Statement::new(
            StatementKind::Try(Box::new(try_stmt)),
            sp(),
        )],
        sp(),
    )
}

fn setup(fixtures: Vec<(&str, Program)>) -> (Arc<FixtureParser>, Arc<CollectingEventSink>, Transpiler) {
    let parser = Arc::new(FixtureParser::new(fixtures));
    let sink = Arc::new(CollectingEventSink::new());
    let transpiler = Transpiler::new(parser.clone()).with_events(sink.clone());
    (parser, sink, transpiler)
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_transpile_produces_code_and_stats() {
    let source = "let x = 5;";
    let (_, _, transpiler) = setup(vec![(source, simple_program())]);

    let entry = transpiler
        .transpile(source, "input.js", &TranspileOptions::default())
        .unwrap();

    assert_eq!(entry.code, "local x = 5");
    assert_eq!(entry.stats.original_size, source.len());
    assert_eq!(entry.stats.transpiled, entry.code.len());
    assert_eq!(entry.stats.filename, "input.js");
}

#[test]
fn test_source_map_follows_option() {
    let source = "let x = 5;";
    let (_, _, transpiler) = setup(vec![(source, simple_program())]);

    let with_map = transpiler
        .transpile(source, "input.js", &TranspileOptions::default())
        .unwrap();
    let map = with_map.source_map.expect("source map requested");
    assert_eq!(map.sources, vec!["input.js".to_string()]);

    let options = TranspileOptions {
        source_map: false,
        ..Default::default()
    };
    let without_map = transpiler.transpile(source, "input.js", &options).unwrap();
    assert!(without_map.source_map.is_none());
}

#[test]
fn test_repeat_transpile_hits_cache() {
    let source = "let x = 5;";
    let (parser, sink, transpiler) = setup(vec![(source, simple_program())]);
    let options = TranspileOptions::default();

    let first = transpiler.transpile(source, "input.js", &options).unwrap();
    let second = transpiler.transpile(source, "input.js", &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(parser.calls(), 1);
    assert_eq!(sink.cache_hits(), 1);
}

#[test]
fn test_option_change_is_a_cache_miss() {
    let source = "let x = 5;";
    let (parser, sink, transpiler) = setup(vec![(source, simple_program())]);

    transpiler
        .transpile(source, "input.js", &TranspileOptions::default())
        .unwrap();
    let options = TranspileOptions {
        optimize: false,
        ..Default::default()
    };
    transpiler.transpile(source, "input.js", &options).unwrap();

    assert_eq!(parser.calls(), 2);
    assert_eq!(sink.cache_hits(), 0);
    assert_eq!(transpiler.cache().len(), 2);
}

#[test]
fn test_target_change_is_a_cache_miss() {
    let source = "let x = 5;";
    let (parser, _, transpiler) = setup(vec![(source, simple_program())]);

    transpiler
        .transpile(source, "input.js", &TranspileOptions::default())
        .unwrap();
    let options = TranspileOptions {
        target: LuaTarget::Lua51,
        ..Default::default()
    };
    transpiler.transpile(source, "input.js", &options).unwrap();

    assert_eq!(parser.calls(), 2);
}

#[test]
fn test_clear_forces_recompute() {
    let source = "let x = 5;";
    let (parser, _, transpiler) = setup(vec![(source, simple_program())]);
    let options = TranspileOptions::default();

    transpiler.transpile(source, "input.js", &options).unwrap();
    transpiler.cache().clear();
    transpiler.transpile(source, "input.js", &options).unwrap();

    assert_eq!(parser.calls(), 2);
    assert_eq!(transpiler.cache().len(), 1);
}

// ============================================================================
// Failure paths
// ============================================================================

#[test]
fn test_parse_error_surfaces_and_fires_event() {
    let (_, sink, transpiler) = setup(vec![]);

    let err = transpiler
        .transpile("let x = ;", "broken.js", &TranspileOptions::default())
        .unwrap_err();

    assert!(matches!(err, TranspileError::MalformedInput { .. }));
    assert!(sink
        .events()
        .iter()
        .any(|event| matches!(event, TranspileEvent::CompileError { .. })));
    assert!(transpiler.cache().is_empty());
}

#[test]
fn test_failed_compile_is_never_cached() {
    let source = "try {} finally {}";
    let (parser, _, transpiler) = setup(vec![(source, failing_program())]);
    let options = TranspileOptions::default();

    let first = transpiler.transpile(source, "input.js", &options);
    let second = transpiler.transpile(source, "input.js", &options);

    assert!(matches!(
        first,
        Err(TranspileError::UnsupportedNode {
            kind: "TryStatement",
            ..
        })
    ));
    assert_eq!(first, second);
    assert_eq!(parser.calls(), 2);
    assert!(transpiler.cache().is_empty());
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_fresh_compile_event_order() {
    let source = "let x = 5;";
    let (_, sink, transpiler) = setup(vec![(source, simple_program())]);

    transpiler
        .transpile(source, "input.js", &TranspileOptions::default())
        .unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], TranspileEvent::CompileStart { filename } if filename == "input.js"));
    assert!(matches!(&events[1], TranspileEvent::CompileComplete { .. }));
}
