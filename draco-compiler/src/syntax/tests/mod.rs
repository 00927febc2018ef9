use std::sync::Arc;

use proptest::{prop_assert_eq, proptest};

use super::ast::{AstNode, CompilationUnit, Declaration, Expression, FunctionBody, Statement};
use super::{parse, Kind, ParseOptions, SyntaxTree};
use crate::source::Source;


proptest! {
    #[test]
    fn tree_text_is_the_source(s in r"(.|\n)*") {
        let tree = parse(&s, "test.draco");
        prop_assert_eq!(&s, &tree.text());
    }
}

#[test]
fn diagnostics_are_located() {
    let text = "func f( { }";
    let tree = parse(text, "test.draco");
    let diagnostics: Vec<_> = tree.diagnostics().into_iter().collect();

    let mut messages: Vec<_> = diagnostics.iter().map(|d| d.message()).collect();
    messages.sort();
    assert_eq!(vec!["expected `)`", "expected a parameter"], messages);

    for diagnostic in &diagnostics {
        assert_eq!(tree.source().id, diagnostic.at.source);
        assert_eq!((8, 8), (diagnostic.at.start, diagnostic.at.end));
    }
}

#[test]
fn heritage_diagnostic_covers_the_operator() {
    let text = "func f() = a || b;";
    let tree = parse(text, "test.draco");
    let diagnostics: Vec<_> = tree.diagnostics().into_iter().collect();

    assert_eq!(1, diagnostics.len());
    let at = diagnostics[0].at;
    assert_eq!("||", &text[at.start..at.end]);
    assert_eq!("`||` is not an operator, use `or` instead", diagnostics[0].message());
}

#[test]
fn streaming_and_array_agree() {
    let text = "func main() { val x = f<int32>(1 < 2 < 3); print(\"\\{x}\"); }";
    let array = parse(text, "test.draco");
    let streaming = SyntaxTree::parse_with(
        Arc::new(Source::new("test.draco", text)),
        ParseOptions::new().streaming(),
        array.cache().clone(),
    );

    assert_eq!(array.green(), streaming.green());
}

#[test]
fn edits_share_unchanged_subtrees() {
    let text = "func f() { return 1; }\nfunc g() { return 2; }\n";
    let tree = parse(text, "test.draco");

    let at = text.find('2').unwrap();
    let edited = tree.with_edit(at..at + 1, "3");
    assert_eq!("func f() { return 1; }\nfunc g() { return 3; }\n", edited.text());

    let tokens = |tree: &SyntaxTree| -> Vec<_> {
        tree.root().tokens().map(|token| token.green().clone()).collect()
    };

    let before = tokens(&tree);
    let after = tokens(&edited);
    assert_eq!(before.len(), after.len());

    let changed: Vec<_> = before
        .iter()
        .zip(&after)
        .filter(|(a, b)| !a.ptr_eq(b))
        .map(|(_, b)| b.as_token().unwrap().text().to_string())
        .collect();
    assert_eq!(vec!["3"], changed);
}

#[test]
fn typed_views() {
    let tree = parse(
        "func max(a: int32, b: int32): int32 { if (a > b) { return a; } return b; }\nval zero = 0;",
        "test.draco",
    );

    let unit = CompilationUnit::cast(tree.root().clone()).unwrap();
    let declarations: Vec<_> = unit.declarations().unwrap().iter().collect();
    assert_eq!(2, declarations.len());

    let Declaration::FunctionDeclaration(function) = &declarations[0] else {
        panic!("expected a function, got {declarations:?}");
    };

    assert_eq!("max", function.name().unwrap().text());
    let parameters = function.parameters().unwrap().parameters().unwrap();
    let names: Vec<_> = parameters.iter().map(|p| p.name().unwrap().text().to_string()).collect();
    assert_eq!(vec!["a", "b"], names);
    assert_eq!(1, parameters.separators().count());

    let Some(FunctionBody::BlockFunctionBody(body)) = function.body() else {
        panic!("expected a block body");
    };

    let statements = body.statements().unwrap();
    assert_eq!(2, statements.len());

    let Some(Statement::ExpressionStatement(first)) = statements.get(0) else {
        panic!("expected an expression statement");
    };

    let Some(Expression::IfExpression(branch)) = first.expression() else {
        panic!("expected an if expression");
    };

    assert!(matches!(branch.condition(), Some(Expression::RelationalExpression(_))));
    assert!(matches!(branch.then(), Some(Expression::BlockExpression(_))));
    assert!(branch.else_clause().is_none());

    let Declaration::VariableDeclaration(zero) = &declarations[1] else {
        panic!("expected a variable");
    };

    assert!(zero.is_immutable());
    assert_eq!(Kind::KeywordVal, zero.keyword().unwrap().kind());
}

#[test]
fn relational_chain_view() {
    let tree = parse("func f() = a < b < c;", "test.draco");
    let relational = tree
        .root()
        .descendants()
        .find_map(super::ast::RelationalExpression::cast)
        .unwrap();

    let comparisons = relational.comparisons().unwrap();
    assert_eq!(2, comparisons.len());
    assert_eq!("a", relational.left().unwrap().syntax().text().trim());

    let operators: Vec<_> = comparisons
        .iter()
        .map(|comparison| comparison.operator().unwrap().kind())
        .collect();
    assert_eq!(vec![Kind::LessThan, Kind::LessThan], operators);
}

#[test]
fn string_values() {
    let tree = parse("func f() = \"a\\tb\\u{41}\";", "test.draco");
    let part = tree
        .root()
        .descendants()
        .find_map(super::ast::TextStringPart::cast)
        .unwrap();

    assert_eq!("a\tbA", part.value());
}
