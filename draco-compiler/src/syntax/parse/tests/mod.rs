use super::{parse_green, ParseOptions};
use crate::syntax::green::{GreenCache, Node};
use crate::syntax::Kind;


/// Render a green tree as an s-expression of node kinds and token texts,
/// leaving out trivia. Missing tokens are written as `!Kind`, and the end of
/// input as `$`.
fn shape(node: &Node) -> String {
    let mut out = String::new();
    write_shape(node, &mut out);
    out
}

fn write_shape(node: &Node, out: &mut String) {
    match node.as_token() {
        Some(_) if node.is_missing() => out.push_str(&format!("!{:?}", node.kind())),
        Some(_) if node.kind() == Kind::EndOfInput => out.push('$'),
        Some(token) => out.push_str(token.text()),
        None => {
            out.push_str(&format!("({:?}", node.kind()));
            for child in node.children() {
                out.push(' ');
                write_shape(child, out);
            }
            out.push(')');
        }
    }
}

fn parse(text: &str) -> Node {
    parse_green(text, &ParseOptions::new(), &GreenCache::new())
}

/// The shape of the value of `func f() = <expr>;`.
fn expression(text: &str) -> String {
    let root = parse(&format!("func f() = {text};"));
    let function = &root.children()[0].children()[0];
    let body = function.children().last().unwrap();
    assert_eq!(Kind::InlineFunctionBody, body.kind());
    shape(&body.children()[1])
}

/// The shapes of the statements in `func f() { <stmts> }`.
fn statements(text: &str) -> Vec<String> {
    let root = parse(&format!("func f() {{ {text} }}"));
    let function = &root.children()[0].children()[0];
    let body = function.children().last().unwrap();
    assert_eq!(Kind::BlockFunctionBody, body.kind());
    body.children()[1].children().iter().map(shape).collect()
}

#[test]
fn empty_unit() {
    assert_eq!("(CompilationUnit (List) $)", shape(&parse("")));
    assert_eq!("(CompilationUnit (List) $)", shape(&parse("  // nothing\n")));
}

#[test]
fn function_declaration() {
    let expected = "(CompilationUnit (List (FunctionDeclaration func main \
                    (ParameterList ( (SeparatedList) )) \
                    (BlockFunctionBody { (List) }))) $)";
    assert_eq!(expected, shape(&parse("func main() {}")));
}

#[test]
fn parameters_and_return_type() {
    let expected = "(CompilationUnit (List (FunctionDeclaration func add \
                    (ParameterList ( (SeparatedList \
                    (Parameter a (TypeSpecifier : (NameType int32))) , \
                    (Parameter ... b (TypeSpecifier : (NameType int32)))) )) \
                    (TypeSpecifier : (NameType int32)) \
                    (InlineFunctionBody = (BinaryExpression (NameExpression a) + (NameExpression b)) ;))) $)";
    assert_eq!(expected, shape(&parse("func add(a: int32, ...b: int32): int32 = a + b;")));
}

#[test]
fn generic_function() {
    let expected = "(CompilationUnit (List (FunctionDeclaration func id \
                    (GenericParameterList < (SeparatedList (GenericParameter T)) >) \
                    (ParameterList ( (SeparatedList (Parameter x (TypeSpecifier : (NameType T)))) )) \
                    (TypeSpecifier : (NameType T)) \
                    (InlineFunctionBody = (NameExpression x) ;))) $)";
    assert_eq!(expected, shape(&parse("func id<T>(x: T): T = x;")));
}

#[test]
fn global_variables() {
    let expected = "(CompilationUnit (List \
                    (VariableDeclaration val x (ValueSpecifier = (LiteralExpression 1)) ;) \
                    (VariableDeclaration var y (TypeSpecifier : (NameType int32)) ;)) $)";
    assert_eq!(expected, shape(&parse("val x = 1; var y: int32;")));
}

#[test]
fn relational_chain_is_one_node() {
    assert_eq!(
        "(RelationalExpression (NameExpression a) (List \
         (Comparison < (NameExpression b)) \
         (Comparison < (NameExpression c))))",
        expression("a < b < c")
    );
}

#[test]
fn precedence() {
    assert_eq!(
        "(BinaryExpression (LiteralExpression 1) + \
         (BinaryExpression (LiteralExpression 2) * (LiteralExpression 3)))",
        expression("1 + 2 * 3")
    );

    assert_eq!(
        "(BinaryExpression (BinaryExpression (LiteralExpression 1) - (LiteralExpression 2)) - \
         (LiteralExpression 3))",
        expression("1 - 2 - 3")
    );

    assert_eq!(
        "(OrExpression (NameExpression a) or \
         (AndExpression (UnaryExpression not (NameExpression b)) and (NameExpression c)))",
        expression("a or not b and c")
    );
}

#[test]
fn relational_binds_looser_than_arithmetic() {
    assert_eq!(
        "(RelationalExpression (BinaryExpression (NameExpression a) + (LiteralExpression 1)) \
         (List (Comparison == (UnaryExpression - (NameExpression b)))))",
        expression("a + 1 == -b")
    );
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(
        "(AssignmentExpression (NameExpression a) = \
         (AssignmentExpression (NameExpression b) += (LiteralExpression 1)))",
        expression("a = b += 1")
    );
}

#[test]
fn postfix_chains() {
    assert_eq!(
        "(CallExpression (MemberExpression (NameExpression a) . b) \
         (ArgumentList ( (SeparatedList (LiteralExpression 1) , (LiteralExpression 2)) )))",
        expression("a.b(1, 2)")
    );
}

#[test]
fn generic_call() {
    assert_eq!(
        "(CallExpression (GenericExpression (NameExpression f) \
         (GenericArgumentList < (SeparatedList (NameType int32) , (NameType T)) >)) \
         (ArgumentList ( (SeparatedList (NameExpression x)) )))",
        expression("f<int32, T>(x)")
    );
}

#[test]
fn less_than_without_call_is_a_comparison() {
    assert_eq!(
        "(RelationalExpression (NameExpression a) (List \
         (Comparison < (NameExpression b)) \
         (Comparison > (NameExpression c))))",
        expression("a < b > c")
    );

    assert_eq!(
        "(RelationalExpression (NameExpression a) (List (Comparison < (LiteralExpression 1))))",
        expression("a < 1")
    );
}

#[test]
fn control_flow_expressions() {
    assert_eq!(
        "(IfExpression if ( (NameExpression c) ) (LiteralExpression 1) \
         (ElseClause else (LiteralExpression 2)))",
        expression("if (c) 1 else 2")
    );

    assert_eq!(
        "(WhileExpression while ( (NameExpression c) ) (BlockExpression { (List) }))",
        expression("while (c) {}")
    );
}

#[test]
fn block_value() {
    assert_eq!(
        "(BlockExpression { (List (DeclarationStatement \
         (VariableDeclaration val x (ValueSpecifier = (LiteralExpression 1)) ;))) \
         (NameExpression x) })",
        expression("{ val x = 1; x }")
    );
}

#[test]
fn statements_in_function_bodies() {
    assert_eq!(
        vec![
            "(EmptyStatement ;)",
            "(DeclarationStatement (LabelDeclaration start :))",
            "(ExpressionStatement (CallExpression (NameExpression print) \
             (ArgumentList ( (SeparatedList (LiteralExpression 1)) ))) ;)",
            "(ExpressionStatement (IfExpression if ( (NameExpression c) ) \
             (BlockExpression { (List (ExpressionStatement (GotoExpression goto start) ;)) })))",
            "(ExpressionStatement (ReturnExpression return) ;)",
        ],
        statements("; start: print(1); if (c) { goto start; } return;")
    );
}

#[test]
fn trailing_expression_in_function_body_needs_semicolon() {
    assert_eq!(
        vec!["(ExpressionStatement (NameExpression x) !Semicolon)"],
        statements("x")
    );
}

#[test]
fn strings() {
    assert_eq!(
        "(StringExpression \" (List (TextStringPart a ) \
         (InterpolationStringPart \\{ (NameExpression b) }) (TextStringPart !)) \")",
        expression(r#""a \{b}!""#)
    );
}

#[test]
fn heritage_operators_become_keywords() {
    assert_eq!(
        "(AndExpression (NameExpression a) && (NameExpression b))",
        expression("a && b")
    );

    let root = parse("func f() = a % b;");
    assert_eq!(vec!["DS0011"], codes(&root));
}

/// The codes of every message in the tree, in preorder.
fn codes(node: &Node) -> Vec<&'static str> {
    let mut found: Vec<_> = node.messages().iter().map(|m| m.template.code).collect();
    for child in node.children() {
        found.extend(codes(child));
    }
    found
}
