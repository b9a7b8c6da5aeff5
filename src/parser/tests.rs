#![cfg(test)]

use crate::language::DEFAULT_MAX_PARSE_DEPTH;
use crate::lexer::LexerBuilder;
use crate::runtime::Value;
use crate::parser::{Parser, ParserOptions, ParserErrorKind, parse_expression, parse_expression_strict};
use crate::parser::expr::Expr;
use crate::parser::operator::CompareOp;


fn parse_literal(source: &str) -> String {
    parse_expression(source).unwrap().literal()
}

fn parse_error_kind(source: &str) -> ParserErrorKind {
    parse_expression(source).unwrap_err().kind().clone()
}

// `depth` levels of nesting, counting the outermost expression
fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth - 1), ")".repeat(depth - 1))
}


#[test]
fn parser_parses_literals() {
    let out = parse_expression("42").unwrap();
    assert!(matches!(out, Expr::Scalar(ref scalar) if *scalar.value() == Value::Integer(42)), "unexpected output: {:?}", out);

    let out = parse_expression("'text'").unwrap();
    assert!(matches!(out.value(), Some(Value::String(s)) if s == "text"), "unexpected output: {:?}", out);

    let out = parse_expression("0.5").unwrap();
    assert!(matches!(out.value(), Some(Value::Float(v)) if *v == 0.5), "unexpected output: {:?}", out);
}

#[test]
fn parser_empty_input_is_nil_scalar() {
    let out = parse_expression("").unwrap();
    assert!(matches!(out.value(), Some(Value::Nil)), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "");
}

#[test]
fn parser_precedence() {
    assert_eq!(parse_literal("a || b && c"), "(a || (b && c))");
    assert_eq!(parse_literal("a && b || c"), "((a && b) || c)");
    assert_eq!(parse_literal("a == b && c != d"), "((a == b) && (c != d))");
    assert_eq!(parse_literal("a + b == c"), "((a + b) == c)");
    assert_eq!(parse_literal("x == 1 ? y : z"), "((x == 1) ? y : z)");
}

#[test]
fn parser_logical_operators_are_right_recursive() {
    assert_eq!(parse_literal("a || b || c"), "(a || (b || c))");
    assert_eq!(parse_literal("a && b && c"), "(a && (b && c))");
    assert_eq!(parse_literal("'a' + 'b' + 'c'"), "('a' + ('b' + 'c'))");
}

#[test]
fn parser_conditional_is_right_associative() {
    let out = parse_expression("a ? b : c ? d : e").unwrap();
    assert!(matches!(out, Expr::Conditional(ref cond) if matches!(cond.right, Expr::Conditional(..))), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "(a ? b : (c ? d : e))");
}

#[test]
fn parser_comparison_operators() {
    let ops = [
        ("==", CompareOp::EQ), ("!=", CompareOp::NE),
        (">=", CompareOp::GE), (">", CompareOp::GT),
        ("<=", CompareOp::LE), ("<", CompareOp::LT),
    ];

    for (symbol, expected) in ops {
        let out = parse_expression(&format!("1 {} 2", symbol)).unwrap();
        assert!(matches!(out, Expr::Compare(op, _) if op == expected), "unexpected output: {:?}", out);
    }
}

#[test]
fn parser_keyword_operators() {
    let out = parse_expression("name like 'a*'").unwrap();
    assert!(matches!(out, Expr::Like(..)), "unexpected output: {:?}", out);

    let out = parse_expression("'lunch' in ['breakfast', 'lunch']").unwrap();
    assert!(matches!(out, Expr::In(ref operands) if matches!(operands.1, Expr::List(ref list) if list.len() == 2)), "unexpected output: {:?}", out);
}

#[test]
fn parser_comparison_does_not_chain() {
    // the second comparator is left unconsumed
    assert_eq!(parse_literal("1 == 1 == 1"), "(1 == 1)");

    let error = parse_expression_strict("1 == 1 == 1").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::TrailingInput);
    assert!(matches!(error.partial(), Some(Expr::Compare(..))), "unexpected output: {:?}", error);
}

#[test]
fn parser_groups() {
    assert_eq!(parse_literal("true && (true && true)"), "(true && (true && true))");
    assert_eq!(parse_literal("(false || true) && (false || true)"), "((false || true) && (false || true))");
    assert_eq!(parse_literal("((1))"), "1");
}

#[test]
fn parser_accepts_unclosed_group_at_end() {
    assert_eq!(parse_literal("(a && b"), "(a && b)");
}

#[test]
fn parser_rejects_bad_group_close() {
    let error = parse_expression("(a ]").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::ExpectedCloseParen);
    assert_eq!(error.location().map(|span| span.index), Some(3));
}

#[test]
fn parser_parses_lists() {
    let out = parse_expression("[]").unwrap();
    assert!(matches!(out, Expr::List(ref list) if list.is_empty()), "unexpected output: {:?}", out);

    let out = parse_expression("[1, 'two', [3]]").unwrap();
    assert!(matches!(out, Expr::List(ref list) if list.len() == 3), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "[1, 'two', [3]]");

    assert_eq!(parse_literal("[1, 2,]"), "[1, 2]");
}

#[test]
fn parser_unterminated_list() {
    for source in ["[", "[1", "[1, 2", "[1,"] {
        let error = parse_expression(source).unwrap_err();
        assert_eq!(error.kind(), &ParserErrorKind::UnterminatedList, "source: {}", source);
    }

    let error = parse_expression("[1, 2").unwrap_err();
    assert!(matches!(error.partial(), Some(Expr::List(list)) if list.len() == 2), "unexpected output: {:?}", error);
}

#[test]
fn parser_list_requires_separators() {
    assert_eq!(parse_error_kind("[1 2]"), ParserErrorKind::UnexpectedToken);
}

#[test]
fn parser_parses_symbols() {
    let out = parse_expression("a.b.c").unwrap();
    assert!(matches!(out, Expr::Symbol(ref symbol) if symbol.name() == "c" && symbol.scope().map(|s| s.literal()) == Some("a.b".to_string())), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "a.b.c");
}

#[test]
fn parser_parses_calls() {
    let out = parse_expression("print('hello', 1)").unwrap();
    assert!(matches!(out, Expr::Call(ref call) if call.args().len() == 2 && matches!(call.callee(), Expr::Symbol(..))), "unexpected output: {:?}", out);

    let out = parse_expression("f()").unwrap();
    assert!(matches!(out, Expr::Call(ref call) if call.args().is_empty()), "unexpected output: {:?}", out);

    assert_eq!(parse_literal("f(a, (b || c))"), "f(a, (b || c))");
}

#[test]
fn parser_parses_scoped_calls() {
    let out = parse_expression("a.b(x)").unwrap();
    assert!(matches!(out, Expr::ScopedCall(ref call) if call.name() == "b" && call.qualified_name() == "a.b"), "unexpected output: {:?}", out);

    let out = parse_expression("a.b.c(x, y)").unwrap();
    assert!(matches!(out, Expr::ScopedCall(ref call) if call.qualified_name() == "a.b.c" && call.args().len() == 2), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "a.b.c(x, y)");
}

#[test]
fn parser_chains_calls() {
    let out = parse_expression("a.b(x).c()").unwrap();
    assert!(matches!(out, Expr::ScopedCall(ref call) if matches!(call.scope(), Expr::ScopedCall(..))), "unexpected output: {:?}", out);
    assert_eq!(out.literal(), "a.b(x).c()");

    if let Expr::ScopedCall(call) = out {
        assert_eq!(call.qualified_name(), "a.b.c");
    }

    let out = parse_expression("f(1).g(2)").unwrap();
    assert!(matches!(out, Expr::ScopedCall(ref call) if call.qualified_name() == "f.g"), "unexpected output: {:?}", out);
}

#[test]
fn parser_rejects_member_access_on_call() {
    let error = parse_expression("f(1).g").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::InvalidScopeTarget);
    assert!(matches!(error.partial(), Some(Expr::Call(..))), "unexpected output: {:?}", error);
}

#[test]
fn parser_rejects_missing_identifier() {
    assert_eq!(parse_error_kind("a."), ParserErrorKind::ExpectedIdentifier);
    assert_eq!(parse_error_kind("a.1"), ParserErrorKind::ExpectedIdentifier);
}

#[test]
fn parser_call_at_end_of_input() {
    assert_eq!(parse_literal("f(1, 2"), "f(1, 2)");
    assert_eq!(parse_literal("f("), "f()");
}

#[test]
fn parser_rejects_bad_arg_separator() {
    let error = parse_expression("f(1 2)").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::ExpectedArgSeparator);
    assert!(matches!(error.partial(), Some(Expr::Symbol(..))), "unexpected output: {:?}", error);
}

#[test]
fn parser_conditional_requires_colon() {
    let error = parse_expression("a ? b").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::ExpectedColon);
    assert!(matches!(error.partial(), Some(Expr::Symbol(..))), "unexpected output: {:?}", error);

    assert_eq!(parse_error_kind("a ? b ]"), ParserErrorKind::ExpectedColon);
}

#[test]
fn parser_rejects_stray_operators() {
    assert_eq!(parse_error_kind(")"), ParserErrorKind::UnexpectedOperator);
    assert_eq!(parse_error_kind("1 + *"), ParserErrorKind::UnexpectedOperator);
}

#[test]
fn parser_reports_lexer_errors() {
    let error = parse_expression("a == 'open").unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::LexerError);
    assert!(error.lexer_error().is_some());
    assert_eq!(error.location().map(|span| span.index), Some(5));
}

#[test]
fn parser_strict_accepts_complete_input() {
    let out = parse_expression_strict("  a == b  ").unwrap();
    assert!(matches!(out, Expr::Compare(CompareOp::EQ, _)), "unexpected output: {:?}", out);
}

#[test]
fn parser_limits_nesting() {
    let source = format!("{}1", "(".repeat(100));
    let lexer = LexerBuilder::new().build(&source);
    let mut parser = Parser::with_options(lexer, ParserOptions { max_depth: 50 });

    let error = parser.parse().unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::NestingTooDeep);

    let source = format!("{}1", "(".repeat(40));
    let lexer = LexerBuilder::new().build(&source);
    let mut parser = Parser::with_options(lexer, ParserOptions { max_depth: 50 });
    assert!(parser.parse().is_ok());
}

#[test]
fn parser_default_nesting_limit() {
    let out = parse_expression(&nested_parens(DEFAULT_MAX_PARSE_DEPTH)).unwrap();
    assert!(matches!(out, Expr::Scalar(ref scalar) if *scalar.value() == Value::Integer(1)), "unexpected output: {:?}", out);

    let error = parse_expression(&nested_parens(DEFAULT_MAX_PARSE_DEPTH + 1)).unwrap_err();
    assert_eq!(error.kind(), &ParserErrorKind::NestingTooDeep);
}

#[test]
fn parser_nesting_limit_counts_every_rule() {
    // right-recursive chains and argument lists share the same budget
    let chain = vec!["'a'"; DEFAULT_MAX_PARSE_DEPTH + 1].join(" + ");
    assert_eq!(parse_error_kind(&chain), ParserErrorKind::NestingTooDeep);

    let calls = format!("{}1{}", "f(".repeat(DEFAULT_MAX_PARSE_DEPTH), ")".repeat(DEFAULT_MAX_PARSE_DEPTH));
    assert_eq!(parse_error_kind(&calls), ParserErrorKind::NestingTooDeep);

    let chain = vec!["'a'"; DEFAULT_MAX_PARSE_DEPTH].join(" + ");
    assert!(parse_expression(&chain).is_ok());
}
