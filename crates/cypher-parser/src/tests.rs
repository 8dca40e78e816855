//! Crate-level tests: end-to-end scenarios, structural invariants over
//! whole parse results, and the printed form.

use crate::{AstNode, Colorization, Kind, Operator, ParseResult, Parser};
use expect_test::expect;
use pretty_assertions::assert_eq;
use std::io;
use std::io::Read;
use std::ops::ControlFlow;

fn parse(input: &str) -> ParseResult {
    Parser::new(input).parse().unwrap()
}

fn all_nodes(result: &ParseResult) -> Vec<&AstNode> {
    let mut nodes = Vec::new();
    for root in result.roots() {
        collect(root, &mut nodes);
    }
    nodes
}

fn collect<'a>(node: &'a AstNode, into: &mut Vec<&'a AstNode>) {
    into.push(node);
    for child in node.children() {
        collect(child, into);
    }
}

// --- boundary behaviors ------------------------------------------------

#[test]
fn empty_input() {
    let result = parse("");
    assert_eq!(result.ndirectives(), 0);
    assert_eq!(result.nerrors(), 0);
    assert_eq!(result.eof_position().offset(), 0);
    assert_eq!(result.eof_position().line(), 1);
    assert_eq!(result.eof_position().column(), 1);
}

#[test]
fn comments_only() {
    let result = parse("/* a */ // b");
    assert_eq!(result.ndirectives(), 0);
    assert_eq!(result.nerrors(), 0);
    let texts: Vec<&str> = result.comments().filter_map(|c| c.text()).collect();
    assert_eq!(texts, vec![" a ", " b"]);
}

#[test]
fn unterminated_block_comment_is_a_lex_error() {
    let result = parse("/* forever");
    assert_eq!(result.ndirectives(), 0);
    assert_eq!(result.nerrors(), 1);
    assert_eq!(result.error(0).unwrap().message(), "unterminated block comment");
}

#[test]
fn lone_semicolon_is_discarded() {
    let result = parse(";");
    assert_eq!(result.ndirectives(), 0);
    assert_eq!(result.nerrors(), 0);
}

// --- concrete scenarios ------------------------------------------------

#[test]
fn return_one() {
    let result = parse("RETURN 1;");
    assert_eq!(result.nerrors(), 0);
    assert_eq!(result.ndirectives(), 1);

    let statement = result.directive(0).unwrap();
    assert_eq!(statement.kind(), Kind::Statement);
    let query = statement.statement_body().unwrap();
    assert_eq!(query.kind(), Kind::Query);
    let ret = query.query_clauses().next().unwrap();
    assert_eq!(ret.kind(), Kind::Return);
    let projection = ret.projections().next().unwrap();
    let value = projection.expression().unwrap();
    assert_eq!(value.kind(), Kind::Integer);
    assert_eq!(value.text(), Some("1"));
}

#[test]
fn match_where_return() {
    let result = parse("MATCH (n:Person) WHERE n.age > 30 RETURN n.name");
    assert_eq!(result.nerrors(), 0, "{:?}", result.errors());
    assert_eq!(result.ndirectives(), 1);

    let query = result.directive(0).unwrap().statement_body().unwrap();
    let m = query.query_clauses().next().unwrap();
    assert_eq!(m.kind(), Kind::Match);
    let predicate = m.predicate().unwrap();
    assert_eq!(predicate.kind(), Kind::Where);
    let comparison = predicate.expression().unwrap();
    assert_eq!(comparison.kind(), Kind::Comparison);
    assert_eq!(comparison.comparison_operators(), &[Operator::GreaterThan]);
    let mut operands = comparison.comparison_operands();
    let property = operands.next().unwrap();
    assert_eq!(property.kind(), Kind::PropertyOperator);
    assert_eq!(property.expression().unwrap().text(), Some("n"));
    assert_eq!(property.prop_name().unwrap().text(), Some("age"));
    assert_eq!(operands.next().unwrap().text(), Some("30"));
}

#[test]
fn unique_constraint_directive() {
    let result = parse("CREATE CONSTRAINT ON (n:Person) ASSERT n.email IS UNIQUE;");
    assert_eq!(result.nerrors(), 0, "{:?}", result.errors());
    assert_eq!(result.ndirectives(), 1);
    let body = result.directive(0).unwrap().statement_body().unwrap();
    assert_eq!(body.kind(), Kind::CreateUniqueNodePropConstraint);
    assert!(body.instance_of(Kind::SchemaCommand));
    assert_eq!(body.identifier().unwrap().text(), Some("n"));
    assert_eq!(body.label().unwrap().text(), Some("Person"));
    assert_eq!(body.expression().unwrap().kind(), Kind::PropertyOperator);
}

#[test]
fn broken_projection_recovers_into_an_error_node() {
    let result = parse("RETURN 1 +");
    assert_eq!(result.ndirectives(), 1);
    assert_eq!(result.nerrors(), 1);
    let error = result.error(0).unwrap();
    assert_eq!(error.position().line(), 1);
    assert_eq!(error.position().column(), 10);

    let ret = result
        .directive(0)
        .unwrap()
        .statement_body()
        .unwrap()
        .query_clauses()
        .next()
        .unwrap()
        .clone();
    assert_eq!(ret.kind(), Kind::Return);
    let mut found_error = false;
    let _ = ret.walk(&mut |node, _| {
        if node.kind() == Kind::Error {
            found_error = true;
        }
        ControlFlow::Continue(())
    });
    assert!(found_error, "{}", result.ast_string(0));
}

#[test]
fn leading_line_comment() {
    let result = parse("// hi\nRETURN 1;");
    assert_eq!(result.nerrors(), 0);
    assert_eq!(result.ndirectives(), 1);
    let comment = result.comments().next().unwrap();
    assert_eq!(comment.kind(), Kind::LineComment);
    assert_eq!(comment.text(), Some(" hi"));
    assert_eq!(result.eof_position().line(), 2);
}

#[test]
fn string_concatenation_unescapes() {
    let result = parse(r#"RETURN "a\n" + "b""#);
    assert_eq!(result.nerrors(), 0, "{:?}", result.errors());
    let ret = result
        .directive(0)
        .unwrap()
        .statement_body()
        .unwrap()
        .query_clauses()
        .next()
        .unwrap()
        .clone();
    let sum = ret.projections().next().unwrap().expression().unwrap();
    assert_eq!(sum.kind(), Kind::BinaryOperator);
    assert_eq!(sum.operator(), Some(Operator::Plus));
    assert_eq!(sum.left().unwrap().string_value(), Some("a\n"));
    assert_eq!(sum.right().unwrap().string_value(), Some("b"));
    assert_eq!(sum.left().unwrap().string_quote(), Some('"'));
}

// --- invariants over whole results -------------------------------------

#[test]
fn ordinals_are_dense_and_monotone() {
    let result = parse("// a\nRETURN 1; /* b */ MATCH (n)-[:X*1..2]->(m) RETURN n, m;");
    let nodes = all_nodes(&result);
    assert_eq!(nodes.len(), result.node_count());
    for (expected, node) in nodes.iter().enumerate() {
        assert_eq!(node.ordinal(), expected);
    }
}

#[test]
fn node_ranges_contain_their_children() {
    let inputs = [
        "MATCH (n:Person {name: 'x'})-[r:KNOWS*2..3]->(m) WHERE n.a > 1 RETURN n, count(*) AS c ORDER BY c SKIP 1 LIMIT 2;",
        "MERGE (n:X) ON MATCH SET n.a = 1 ON CREATE SET n += {b: 2} RETURN CASE WHEN n.a THEN [x IN [1,2] | x] ELSE NULL END;",
        "CREATE CONSTRAINT ON (n:Person) ASSERT n.email IS UNIQUE;",
    ];
    for input in inputs {
        let result = parse(input);
        assert_eq!(result.nerrors(), 0, "{input}: {:?}", result.errors());
        for node in all_nodes(&result) {
            for child in node.children() {
                assert!(
                    node.range().contains(&child.range()),
                    "{input}: {:?} does not contain {:?}",
                    node,
                    child
                );
            }
        }
    }
}

#[test]
fn roots_cover_the_input() {
    let input = "// a\nRETURN 1; /* b */ RETURN 2;";
    let result = parse(input);
    let mut covered = vec![false; input.len()];
    for root in result.roots() {
        for flag in covered
            .iter_mut()
            .take(root.range().end().offset())
            .skip(root.range().start().offset())
        {
            *flag = true;
        }
    }
    for (i, byte) in input.bytes().enumerate() {
        if byte.is_ascii_whitespace() || byte == b';' {
            continue;
        }
        assert!(covered[i], "byte {i} ({:?}) not covered", byte as char);
    }
}

#[test]
fn leaf_ranges_map_back_to_the_source() {
    let input = "RETURN 'a\\n', `weird name`, 0x1F";
    let result = parse(input);
    assert_eq!(result.nerrors(), 0, "{:?}", result.errors());
    let ret = result
        .directive(0)
        .unwrap()
        .statement_body()
        .unwrap()
        .query_clauses()
        .next()
        .unwrap()
        .clone();
    let projected: Vec<&AstNode> = ret.projections().filter_map(|p| p.expression()).collect();

    let string = projected[0];
    let range = string.range();
    assert_eq!(&input[range.start().offset()..range.end().offset()], "'a\\n'");
    assert_eq!(string.string_value(), Some("a\n"));

    let ident = projected[1];
    let range = ident.range();
    assert_eq!(
        &input[range.start().offset()..range.end().offset()],
        "`weird name`"
    );
    assert_eq!(ident.text(), Some("weird name"));

    let hex = projected[2];
    let range = hex.range();
    assert_eq!(&input[range.start().offset()..range.end().offset()], "0x1F");
    assert_eq!(hex.text(), Some("0x1F"));
}

// --- the printed form --------------------------------------------------

#[test]
fn printed_ast_for_a_tiny_query() {
    let result = parse("RETURN 1;");
    let expected = expect![[r#"
        @0 statement @0..8  body=@1  @1
        @1 query @0..8  clauses=[@2]  @2
        @2 return @0..8  projections=[@3]  @3
        @3 projection @7..8  expression=@4  @4
        @4 integer @7..8  1
    "#]];
    expected.assert_eq(&result.ast_string(0));
}

#[test]
fn printed_lines_have_the_columnar_shape() {
    let result = parse(
        "MATCH (n:Person)-[:KNOWS]->(m) WHERE n.age > 30 \
         RETURN n.name AS name ORDER BY name;",
    );
    let printed = result.ast_string(0);
    assert!(!printed.is_empty());
    for line in printed.lines() {
        if line.starts_with(' ') {
            // A wrapped continuation.
            continue;
        }
        let mut words = line.split_whitespace();
        let ordinal = words.next().unwrap();
        assert!(ordinal.starts_with('@'), "{line}");
        assert!(ordinal[1..].chars().all(|c| c.is_ascii_digit()), "{line}");
        let kind = words.next().unwrap();
        assert!(kind.chars().all(|c| c.is_ascii_lowercase() || c == '-'), "{line}");
        let range = words.next().unwrap();
        assert!(range.starts_with('@'), "{line}");
        let dots = range.find("..").unwrap();
        assert!(range[1..dots].chars().all(|c| c.is_ascii_digit()), "{line}");
    }
}

#[test]
fn colorized_errors_wrap_the_position() {
    let result = parse("RETURN 1 +");
    let rendered = result.error(0).unwrap().format(&Colorization::ansi());
    assert!(rendered.contains("\x1b[1;31m("));
    assert!(rendered.ends_with('^'));
}

// --- error recovery ----------------------------------------------------

#[test]
fn recovery_resumes_at_the_next_clause() {
    let result = parse("MATCH (n:Person RETURN n;");
    assert_eq!(result.ndirectives(), 1);
    assert_eq!(result.nerrors(), 1);
    let query = result.directive(0).unwrap().statement_body().unwrap();
    let kinds: Vec<Kind> = query.query_clauses().map(|c| c.kind()).collect();
    assert_eq!(kinds, vec![Kind::Error, Kind::Return]);
}

#[test]
fn recovery_resumes_at_the_next_statement() {
    let result = parse("THIS IS NOT CYPHER; RETURN 1;");
    assert_eq!(result.ndirectives(), 1);
    assert!(result.nerrors() >= 1);
    assert_eq!(
        result.directive(0).unwrap().statement_body().unwrap().kind(),
        Kind::Query
    );
}

#[test]
fn cascading_errors_are_suppressed() {
    let result = parse("RETURN , , ,;");
    assert_eq!(result.nerrors(), 1, "{:?}", result.errors());
    assert_eq!(result.ndirectives(), 1);
}

#[test]
fn unterminated_string_is_one_error() {
    let result = parse("RETURN 'abc");
    assert_eq!(result.nerrors(), 1);
    assert_eq!(result.error(0).unwrap().message(), "unterminated string");
    assert_eq!(result.ndirectives(), 1);
}

#[test]
fn errors_carry_context_snippets() {
    let result = parse("MATCH (n) WHERE n.age > RETURN n");
    assert!(result.nerrors() >= 1);
    let error = result.error(0).unwrap();
    assert!(!error.context().is_empty());
    assert!(error.context_offset() <= error.context().chars().count());
    let caret_char = error.context().chars().nth(error.context_offset());
    assert_eq!(caret_char, Some('R'));
}

// --- driving and flags -------------------------------------------------

#[test]
fn single_stops_after_one_directive() {
    let result = Parser::new("RETURN 1; RETURN 2;")
        .single(true)
        .parse()
        .unwrap();
    assert_eq!(result.ndirectives(), 1);
}

#[test]
fn only_statements_requires_a_terminator() {
    let result = Parser::new("RETURN 1")
        .only_statements(true)
        .parse()
        .unwrap();
    assert_eq!(result.ndirectives(), 1);
    assert_eq!(result.nerrors(), 1);

    let result = Parser::new("RETURN 1;")
        .only_statements(true)
        .parse()
        .unwrap();
    assert_eq!(result.nerrors(), 0);
}

#[test]
fn trailing_directive_without_terminator_is_accepted() {
    let result = parse("RETURN 1; RETURN 2");
    assert_eq!(result.ndirectives(), 2);
    assert_eq!(result.nerrors(), 0);
}

#[test]
fn directive_callback_sees_each_boundary() {
    let mut ranges = Vec::new();
    let result = Parser::new("RETURN 1;\nRETURN 22;")
        .on_directive(|range| ranges.push((range.start().offset(), range.end().offset())))
        .parse()
        .unwrap();
    assert_eq!(result.ndirectives(), 2);
    assert_eq!(ranges, vec![(0, 8), (10, 19)]);
}

/// Hands out one byte per read call, so every buffer refill path runs.
struct OneByteReader<'a> {
    data: &'a [u8],
    at: usize,
}

impl<'a> Read for OneByteReader<'a> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.at == self.data.len() || out.is_empty() {
            return Ok(0);
        }
        out[0] = self.data[self.at];
        self.at += 1;
        Ok(1)
    }
}

#[test]
fn streaming_matches_in_memory_parsing() {
    let input = "// header\nMATCH (n:Person {name: 'Ünïcodé'}) WHERE n.age > 30 RETURN n;\n\
                 CREATE INDEX ON :Person(name);\nRETURN 'last';";
    let in_memory = parse(input);
    let streamed = Parser::from_reader(OneByteReader {
        data: input.as_bytes(),
        at: 0,
    })
    .parse()
    .unwrap();

    assert_eq!(in_memory.ndirectives(), streamed.ndirectives());
    assert_eq!(in_memory.nerrors(), streamed.nerrors());
    assert_eq!(in_memory.node_count(), streamed.node_count());
    assert_eq!(in_memory.ast_string(0), streamed.ast_string(0));
}

#[test]
fn io_errors_abort_the_parse() {
    struct FailingReader;
    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"))
        }
    }
    let outcome = Parser::from_reader(FailingReader).parse();
    assert_eq!(
        outcome.unwrap_err().kind(),
        io::ErrorKind::ConnectionReset
    );
}

#[test]
fn recursion_limit_reports_once() {
    let mut input = String::from("RETURN ");
    input.push_str(&"(".repeat(200));
    input.push('1');
    input.push_str(&")".repeat(200));
    let result = Parser::new(&input).recursion_limit(20).parse().unwrap();
    assert_eq!(result.nerrors(), 1);
    assert_eq!(
        result.error(0).unwrap().message(),
        "parser recursion limit reached"
    );
    assert!(result.recursion_limit().high > 20);
}

#[test]
fn version_matches_the_manifest() {
    assert_eq!(crate::version(), env!("CARGO_PKG_VERSION"));
}
