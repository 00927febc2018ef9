use std::sync::Arc;

use crate::semantic::{
    BinaryOperator, BoundStatement, Compilation, ExprNode, Literal, Symbol, SymbolKind, Type,
};
use crate::syntax::{Kind, SyntaxNode};

fn compile(text: &str) -> Compilation {
    let _ = pretty_env_logger::try_init();
    Compilation::parse(text, "test.draco")
}

/// The codes of every binding diagnostic, after checking there are no syntax
/// errors.
fn binding_codes(text: &str) -> Vec<&'static str> {
    let compilation = compile(text);
    assert!(compilation.syntax_diagnostics().is_empty(), "{text:?} has syntax errors");

    let diagnostics = compilation.binding_diagnostics();
    diagnostics.iter().map(|diagnostic| diagnostic.template.code).collect()
}

fn member<'a>(compilation: &'a Compilation, name: &str) -> Symbol<'a> {
    compilation.module().member(name).expect("member is declared")
}

/// The first node of `kind` whose text, trivia excluded, starts at `offset`.
fn node(compilation: &Compilation, kind: Kind, offset: usize) -> SyntaxNode {
    compilation
        .syntax_tree()
        .root()
        .descendants()
        .find(|node| node.kind() == kind && node.span().start == offset)
        .expect("node exists")
}

#[test]
fn recovered_parameter_lists_still_bind() {
    let compilation = compile("func f( { }");
    assert_eq!(2, compilation.syntax_diagnostics().len());
    assert!(compilation.binding_diagnostics().is_empty());
    assert!(member(&compilation, "f").parameters().is_empty());
}

#[test]
fn module_is_named_after_the_file() {
    let compilation = Compilation::parse("", "src/hello.draco");
    assert_eq!("hello", compilation.module().name());
    assert_eq!(SymbolKind::Module, compilation.module().kind());
}

#[test]
fn module_members_in_order() {
    let compilation = compile("func f() {} var g = 1; val h: int32;");
    let members = compilation.module().members();

    let names: Vec<_> = members.iter().map(|member| member.name()).collect();
    assert_eq!(vec!["f", "g", "h"], names);

    let kinds: Vec<_> = members.iter().map(|member| member.kind()).collect();
    assert_eq!(vec![SymbolKind::Function, SymbolKind::Global, SymbolKind::Global], kinds);

    assert!(member(&compilation, "g").is_mutable());
    assert!(!member(&compilation, "h").is_mutable());
    assert!(members.iter().all(|member| member.container() == Some(compilation.module())));
}

#[test]
fn duplicate_definitions() {
    assert_eq!(vec!["DB0004"], binding_codes("func f() {} func f() {}"));
    assert_eq!(vec!["DB0004"], binding_codes("val x = 1; func x() {}"));
}

#[test]
fn first_definition_wins() {
    let compilation = compile("func f() {} val f = 1;");
    assert_eq!(SymbolKind::Function, member(&compilation, "f").kind());
    assert_eq!(2, compilation.module().members().len());
}

#[test]
fn undefined_references() {
    let compilation = compile("func f() { print(y); }");
    let diagnostics = compilation.binding_diagnostics();

    assert_eq!(1, diagnostics.len());
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!("DB0001", diagnostic.template.code);
    assert_eq!("undefined reference to `y`", diagnostic.message());
}

#[test]
fn every_later_duplicate_parameter_is_reported() {
    let text = "func f(a: int32, a: int32, a: int32) {}";
    let compilation = compile(text);
    let diagnostics = compilation.binding_diagnostics();

    let starts: Vec<_> = diagnostics.iter().map(|diagnostic| diagnostic.at.start).collect();
    assert_eq!(vec![17, 27], starts);
    assert!(diagnostics.iter().all(|diagnostic| diagnostic.template.code == "DB0002"));
    assert!(diagnostics.iter().all(|diagnostic| diagnostic.labels[0].1.start == 7));
}

#[test]
fn duplicate_generic_parameters() {
    assert_eq!(vec!["DB0002"], binding_codes("func f<T, T>() {}"));
    assert!(binding_codes("func f<T>(T: int32) {}").is_empty());
}

#[test]
fn variadic_parameter_must_be_last() {
    assert_eq!(vec!["DB0003"], binding_codes("func f(...a: int32, b: int32) {}"));
    assert!(binding_codes("func f(a: int32, ...b: int32) {}").is_empty());
}

#[test]
fn immutable_assignments() {
    assert_eq!(vec!["DB0005"], binding_codes("func f(a: int32) { a = 1; }"));
    assert_eq!(vec!["DB0005"], binding_codes("val g = 1; func f() { g = 2; }"));
    assert_eq!(vec!["DB0005"], binding_codes("func f() { f = 1; }"));
    assert!(binding_codes("var g = 1; func f() { g = 2; }").is_empty());
}

#[test]
fn only_names_can_be_assigned() {
    assert_eq!(vec!["DB0006"], binding_codes("func f() { 1 = 2; }"));
}

#[test]
fn jumps_need_a_loop() {
    assert_eq!(vec!["DB0007", "DB0007"], binding_codes("func f() { break; continue; }"));
    assert!(binding_codes("func f() { while (true) { break; continue; } }").is_empty());
}

#[test]
fn loops_declare_labels_for_their_jumps() {
    let compilation = compile("func f() { while (true) { break; } }");
    let body = member(&compilation, "f").body().unwrap();
    assert_eq!(2, body.labels.len());

    let ExprNode::Block(statements, _) = &body.root.node else {
        panic!("block bodies are blocks");
    };

    let BoundStatement::Expression(looping) = &statements[0] else {
        panic!("the loop is an expression statement");
    };

    let ExprNode::While { body: inner, break_label, .. } = &looping.node else {
        panic!("the loop is bound as a loop");
    };

    let ExprNode::Block(statements, _) = &inner.node else {
        panic!("the loop body is a block");
    };

    let BoundStatement::Expression(jump) = &statements[0] else {
        panic!("the break is an expression statement");
    };

    assert_eq!(ExprNode::Goto(*break_label), jump.node);
}

#[test]
fn labels() {
    assert!(binding_codes("func f() { goto end; end: }").is_empty());
    assert_eq!(vec!["DB0001"], binding_codes("func f() { goto nowhere; }"));
    assert_eq!(vec!["DB0004"], binding_codes("func f() { a: a: }"));
}

#[test]
fn labels_of_nested_functions_are_separate() {
    assert_eq!(vec!["DB0001"], binding_codes("func f() { goto inner; func g() { inner: } }"));
}

#[test]
fn integer_literals() {
    let compilation = compile("val a = 1_000; val b = 0xff_ff; val c = 0b101;");
    let value = |name| match member(&compilation, name).body().unwrap().root.node {
        ExprNode::Literal(Literal::Integer(value)) => value,
        ref other => panic!("{other:?} is not an integer"),
    };

    assert_eq!(1000, value("a"));
    assert_eq!(0xffff, value("b"));
    assert_eq!(5, value("c"));

    assert_eq!(vec!["DB0008"], binding_codes("val x = 99999999999999999999;"));
}

#[test]
fn types_and_values_are_distinct() {
    assert_eq!(vec!["DB0009"], binding_codes("func f(x: print) {}"));
    assert_eq!(vec!["DB0010"], binding_codes("func f() { int32; }"));
    assert_eq!(vec!["DB0010"], binding_codes("func f<T>() { T; }"));
}

#[test]
fn globals_need_a_type_or_a_value() {
    assert_eq!(vec!["DB0011"], binding_codes("val g;"));
    assert!(binding_codes("val g: int32;").is_empty());
    assert!(binding_codes("func f() { val x; }").is_empty());
}

#[test]
fn nested_functions_see_only_the_module() {
    let text = "func f() { val x = 1; func g() { print(x); h(); } } func h() {}";
    assert_eq!(vec!["DB0001"], binding_codes(text));
}

#[test]
fn locals_are_scoped_to_their_block() {
    assert_eq!(vec!["DB0001"], binding_codes("func f() { { val x = 1; } print(x); }"));
    assert!(binding_codes("func f() { val x = 1; { val x = x; print(x); } }").is_empty());
}

#[test]
fn initializers_cannot_see_their_own_variable() {
    assert_eq!(vec!["DB0001"], binding_codes("func f() { val x = x; }"));
}

#[test]
fn signatures() {
    let compilation = compile("func f<T>(a: T, ...rest: int32): T = a;");
    let function = member(&compilation, "f");
    let signature = function.signature().unwrap();

    let generics = function.generic_parameters();
    assert_eq!(1, generics.len());
    assert_eq!(SymbolKind::TypeParameter, generics[0].kind());
    assert_eq!(Type::Named(generics[0].id()), signature.return_type);

    let parameters = function.parameters();
    let names: Vec<_> = parameters.iter().map(|parameter| parameter.name()).collect();
    assert_eq!(vec!["a", "rest"], names);
    assert_eq!(Some(Type::Named(generics[0].id())), parameters[0].ty());
    assert!(parameters[1].is_variadic());
    assert!(function.is_variadic());

    let int32 = compilation.intrinsic("int32").unwrap();
    assert_eq!(Some(Type::Named(int32.id())), parameters[1].ty());
}

#[test]
fn missing_return_type_is_unit() {
    let compilation = compile("func f() {}");
    let unit = compilation.intrinsic("unit").unwrap();
    assert_eq!(Some(Type::Named(unit.id())), member(&compilation, "f").return_type());
}

#[test]
fn global_types() {
    let compilation = compile("val a: int32 = 1; val b = 2; val c: Missing;");
    let int32 = compilation.intrinsic("int32").unwrap();

    assert_eq!(Some(Type::Named(int32.id())), member(&compilation, "a").ty());
    assert_eq!(Some(Type::Unknown), member(&compilation, "b").ty());
    assert_eq!(Some(Type::Error), member(&compilation, "c").ty());
    assert_eq!(None, member(&compilation, "c").body().map(|_| ()));
}

#[test]
fn intrinsics() {
    let compilation = compile("");
    let print = compilation.intrinsic("print").unwrap();

    assert!(print.is_intrinsic());
    assert!(print.is_variadic());
    assert_eq!(SymbolKind::Function, print.kind());
    assert_eq!(None, print.declaration());
    assert_eq!(None, print.span());
    assert!(print.body().is_none());

    assert_eq!(SymbolKind::Type, compilation.intrinsic("string").unwrap().kind());
    assert!(compilation.intrinsic("nonsense").is_none());
}

#[test]
fn module_members_shadow_intrinsics() {
    let compilation = compile("func print() {} func f() { print(); }");
    let body = member(&compilation, "f").body().unwrap();
    let ExprNode::Block(statements, _) = &body.root.node else {
        panic!("block bodies are blocks");
    };

    let BoundStatement::Expression(call) = &statements[0] else {
        panic!("the call is an expression statement");
    };

    let ExprNode::Call(function, _) = &call.node else {
        panic!("the call is bound as a call");
    };

    assert_eq!(ExprNode::Reference(member(&compilation, "print").id()), function.node);
}

#[test]
fn borrowed_operators_still_bind() {
    let compilation = compile("func f() = 5 % 2;");
    assert_eq!(1, compilation.syntax_diagnostics().len());

    let body = member(&compilation, "f").body().unwrap();
    let ExprNode::Binary(operator, _) = &body.root.node else {
        panic!("the body is a binary expression");
    };

    assert_eq!(BinaryOperator::Remainder, *operator);
}

#[test]
fn strings_bind_their_parts() {
    let compilation = compile(r#"val name = "world"; val s = "hello \{name}!";"#);
    let body = member(&compilation, "s").body().unwrap();

    let ExprNode::String(parts) = &body.root.node else {
        panic!("the initializer is a string");
    };

    assert_eq!(3, parts.len());
    assert!(compilation.binding_diagnostics().is_empty());
}

#[test]
fn bodies_are_bound_once() {
    let compilation = compile("func f() { val x = 1; }");
    let function = member(&compilation, "f");

    let first = function.body().unwrap();
    let second = function.body().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.locals, function.body().unwrap().locals);
}

#[test]
fn function_members() {
    let compilation = compile("func f<T>(a: T) { val b = 1; c: func d() {} }");
    let members = member(&compilation, "f").members();

    let kinds: Vec<_> = members.iter().map(|member| member.kind()).collect();
    let expected = vec![
        SymbolKind::TypeParameter,
        SymbolKind::Parameter,
        SymbolKind::Local,
        SymbolKind::Label,
        SymbolKind::Function,
    ];
    assert_eq!(expected, kinds);

    let function = member(&compilation, "f");
    assert!(members.iter().all(|member| member.container() == Some(function)));
}

#[test]
fn declared_and_referenced_symbols() {
    let text = "func f(a: int32): int32 { val b = a; return b; }";
    let compilation = compile(text);
    let model = compilation.semantic_model();

    let function = member(&compilation, "f");
    let declaration = node(&compilation, Kind::FunctionDeclaration, 0);
    assert_eq!(Some(function), model.declared_symbol(&declaration));

    let parameter = function.parameters()[0];
    let a = node(&compilation, Kind::Parameter, text.find("a:").unwrap());
    assert_eq!(Some(parameter), model.declared_symbol(&a));

    let use_of_a = node(&compilation, Kind::NameExpression, text.find("a;").unwrap());
    assert_eq!(Some(parameter), model.referenced_symbol(&use_of_a));

    let b = node(&compilation, Kind::VariableDeclaration, text.find("val").unwrap());
    let local = model.declared_symbol(&b).expect("`b` is declared");
    assert_eq!(SymbolKind::Local, local.kind());

    let use_of_b = node(&compilation, Kind::NameExpression, text.find("b;").unwrap());
    assert_eq!(Some(local), model.referenced_symbol(&use_of_b));

    let int32 = node(&compilation, Kind::NameType, text.find("int32").unwrap());
    assert_eq!(compilation.intrinsic("int32"), model.referenced_symbol(&int32));
}

#[test]
fn symbols_at_positions() {
    let text = "val g = 1; val h = g; func f() { goto end; end: }";
    let compilation = compile(text);
    let model = compilation.semantic_model();

    let g = member(&compilation, "g");
    assert_eq!(Some(g), model.symbol_at(text.find("= g").unwrap() + 2));
    assert_eq!(Some(g), model.symbol_at(text.find("g =").unwrap()));

    let label = model.symbol_at(text.find("end:").unwrap()).expect("the label is declared");
    assert_eq!(SymbolKind::Label, label.kind());
    assert_eq!(Some(label), model.symbol_at(text.find("end;").unwrap()));

    let root = compilation.syntax_tree().root();
    assert_eq!(Some(compilation.module()), model.declared_symbol(root));
    assert_eq!(Kind::CompilationUnit, model.node_at(text.len()).kind());
}

#[test]
fn nested_declarations_in_the_model() {
    let text = "func f() { func g(x: int32) { print(x); } }";
    let compilation = compile(text);
    let model = compilation.semantic_model();

    let g = node(&compilation, Kind::FunctionDeclaration, text.find("func g").unwrap());
    let g = model.declared_symbol(&g).expect("`g` is declared");
    assert_eq!(Some(member(&compilation, "f")), g.container());

    let x = model.symbol_at(text.find("x)").unwrap()).expect("`x` is referenced");
    assert_eq!(SymbolKind::Parameter, x.kind());
    assert_eq!(Some(g), x.container());
}

#[test]
fn concurrent_binding_agrees() {
    let text = "
        func f(a: int32): int32 { val b = a; return b + g(); }
        func g(): int32 { return missing; }
        val h = f(1);
    ";
    let compilation = compile(text);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let codes: Vec<_> = compilation
                        .diagnostics()
                        .iter()
                        .map(|diagnostic| diagnostic.template.code)
                        .collect();
                    let f = member(&compilation, "f");
                    (codes, f.id(), f.body().unwrap().locals.clone())
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(vec!["DB0001"], results[0].0);
}
