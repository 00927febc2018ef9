use std::collections::BTreeSet;
use std::sync::Arc;

use crate::flow::{
    analyze, build, DefiniteAssignment, Graph, OperationId, Payload, ReturnsLattice,
};
use crate::semantic::{BoundBody, Compilation, CompilationOptions, SymbolKind};

fn compile(text: &str) -> Compilation {
    let _ = pretty_env_logger::try_init();
    Compilation::parse(text, "test.draco")
}

fn body(compilation: &Compilation, function: &str) -> Arc<BoundBody> {
    let function = compilation.module().member(function).expect("function is declared");
    function.body().expect("function has a body")
}

/// The codes of every flow diagnostic, after checking there are no others.
fn flow_codes(text: &str) -> Vec<&'static str> {
    let compilation = compile(text);
    assert!(compilation.syntax_diagnostics().is_empty(), "{text:?} has syntax errors");
    assert!(compilation.binding_diagnostics().is_empty(), "{text:?} has binding errors");

    let diagnostics = compilation.flow_diagnostics();
    diagnostics.iter().map(|diagnostic| diagnostic.template.code).collect()
}

fn reaches(graph: &Graph<'_>, from: OperationId, to: OperationId) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<_> = graph.get(from).successors.iter().copied().collect();

    while let Some(id) = stack.pop() {
        if id == to {
            return true;
        }

        if seen.insert(id) {
            stack.extend(graph.get(id).successors.iter().copied());
        }
    }

    false
}

#[test]
fn uninitialized_use_is_reported_once() {
    let compilation = compile("func f() { val x; print(x); }");
    let diagnostics = compilation.flow_diagnostics();

    assert_eq!(1, diagnostics.len());
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!("DF0002", diagnostic.template.code);
    assert_eq!("`x` is used before it is initialized", diagnostic.message());
}

#[test]
fn initialized_use_is_fine() {
    assert!(flow_codes("func f() { val x = 1; print(x); }").is_empty());
}

#[test]
fn initialization_on_one_branch_is_not_enough() {
    let one = "func f(c: bool) { var x: int32; if (c) { x = 1; } print(x); }";
    assert_eq!(vec!["DF0002"], flow_codes(one));

    let both = "func f(c: bool) { var x: int32; if (c) { x = 1; } else { x = 2; } print(x); }";
    assert!(flow_codes(both).is_empty());
}

#[test]
fn loops_may_not_run() {
    let text = "func f(c: bool) { var x: int32; while (c) { x = 1; } print(x); }";
    assert_eq!(vec!["DF0002"], flow_codes(text));
}

#[test]
fn short_circuits_may_skip_their_right_side() {
    let text = "func f(c: bool) { var x: int32; val b = c and { x = 1; true }; print(x); }";
    assert_eq!(vec!["DF0002"], flow_codes(text));
}

#[test]
fn compound_assignment_reads_its_target() {
    assert_eq!(vec!["DF0002"], flow_codes("func f() { var x: int32; x += 1; }"));
    assert!(flow_codes("func f() { var x = 0; x += 1; }").is_empty());
}

#[test]
fn val_is_assigned_at_most_once() {
    assert!(flow_codes("func f() { val x: int32; x = 1; print(x); }").is_empty());
    assert_eq!(vec!["DF0003"], flow_codes("func f() { val x: int32; x = 1; x = 2; }"));
    assert_eq!(vec!["DF0003"], flow_codes("func f() { val x = 1; x = 2; }"));
}

#[test]
fn val_declared_in_a_loop_is_fresh_every_iteration() {
    assert!(flow_codes("func f(c: bool) { while (c) { val x: int32; x = 1; } }").is_empty());
}

#[test]
fn falling_off_the_end_is_reported() {
    let text = "func f(c: bool): int32 { if (c) { return 1; } }";
    assert_eq!(vec!["DF0001"], flow_codes(text));

    let text = "func f(c: bool): int32 { if (c) { return 1; } else { return 2; } }";
    assert!(flow_codes(text).is_empty());
}

#[test]
fn does_not_return_points_at_the_function_name() {
    let text = "func answer(): int32 { }";
    let compilation = compile(text);
    let diagnostics = compilation.flow_diagnostics();

    let diagnostic = diagnostics.iter().next().expect("a diagnostic is reported");
    assert_eq!("DF0001", diagnostic.template.code);
    assert_eq!("answer", &text[diagnostic.at.start..diagnostic.at.end]);
}

#[test]
fn only_declared_return_types_must_return() {
    assert!(flow_codes("func f() { }").is_empty());
    assert!(flow_codes("func f(): unit { }").is_empty());
    assert!(flow_codes("func f(): int32 = 1;").is_empty());
}

#[test]
fn unreachable_code_is_not_checked() {
    let text = "func f(): int32 { return 1; val x; print(x); }";
    assert!(flow_codes(text).is_empty());
}

#[test]
fn nested_functions_are_checked_separately() {
    let text = "func f() { func g(): int32 { } val x; print(x); }";
    let mut codes = flow_codes(text);
    codes.sort();
    assert_eq!(vec!["DF0001", "DF0002"], codes);
}

#[test]
fn analyses_can_be_turned_off() {
    let text = "func f(): int32 { val x; print(x); }";
    let tree = crate::syntax::parse(text, "test.draco");
    let options = CompilationOptions::new().with_returns(false);
    let compilation = Compilation::with_options(tree, options);

    let diagnostics = compilation.flow_diagnostics();
    let codes: Vec<_> = diagnostics.iter().map(|d| d.template.code).collect();
    assert_eq!(vec!["DF0002"], codes);

    let tree = crate::syntax::parse(text, "test.draco");
    let options = CompilationOptions::new().with_definite_assignment(false);
    let compilation = Compilation::with_options(tree, options);

    let diagnostics = compilation.flow_diagnostics();
    let codes: Vec<_> = diagnostics.iter().map(|d| d.template.code).collect();
    assert_eq!(vec!["DF0001"], codes);
}

#[test]
fn returns_are_exits() {
    let compilation = compile("func f(c: bool): int32 { if (c) { return 1; } return 2; }");
    let body = body(&compilation, "f");
    let graph = build(&body);

    let exits = graph.exits();
    assert_eq!(2, exits.len());
    for exit in exits {
        assert!(matches!(graph.get(exit).payload, Payload::Expression(_)));
    }
}

#[test]
fn no_placeholders_are_left() {
    let compilation = compile("func f() { goto done; done: goto done; }");
    let body = body(&compilation, "f");
    let graph = build(&body);

    assert!(graph.operations().all(|(_, operation)| operation.payload != Payload::Placeholder));
}

const GOTO_CYCLE: &str = "
func f() {
    var i = 0;
    top:
    if (i < 10) { goto bottom; }
    return;
    bottom:
    i += 1;
    goto top;
}
";

#[test]
fn goto_before_label_makes_a_cycle() {
    let compilation = compile(GOTO_CYCLE);
    assert!(compilation.diagnostics().is_empty());

    let body = body(&compilation, "f");
    let bottom = body
        .labels
        .iter()
        .copied()
        .find(|label| compilation.symbol(*label).name() == "bottom")
        .expect("`bottom` is declared");

    let graph = build(&body);
    let (label, _) = graph
        .operations()
        .find(|(_, operation)| operation.payload == Payload::Label(bottom))
        .expect("`bottom` has an operation");

    let (goto, _) = graph
        .operations()
        .find(|(_, operation)| operation.successors.contains(&label))
        .expect("something jumps to `bottom`");

    assert!(reaches(&graph, label, goto));
    assert!(reaches(&graph, goto, label));
}

#[test]
fn analysis_is_deterministic() {
    let compilation = compile(GOTO_CYCLE);
    let body = body(&compilation, "f");
    let graph = build(&body);

    let returns = analyze(&ReturnsLattice, &graph);
    assert_eq!(returns, analyze(&ReturnsLattice, &graph));

    let lattice = DefiniteAssignment::new(&body);
    let mut first = analyze(&lattice, &graph);
    let mut second = analyze(&lattice, &graph);
    first.clear_dirty();
    second.clear_dirty();
    assert_eq!(first, second);
}

#[test]
fn acyclic_graphs_converge_quickly() {
    let compilation = compile("func f(c: bool) { var x = 1; if (c) { x = 2; } print(x); }");
    let body = body(&compilation, "f");
    let graph = build(&body);

    assert_eq!(2, analyze(&DefiniteAssignment::new(&body), &graph).passes());
}

#[test]
fn locals_are_tracked_in_declaration_order() {
    let compilation = compile("func f() { val a = 1; { val b = 2; } val c = 3; }");
    let body = body(&compilation, "f");

    let names: Vec<_> = body.locals.iter().map(|id| compilation.symbol(*id).name()).collect();
    assert_eq!(vec!["a", "b", "c"], names);
    assert!(body.locals.iter().all(|id| compilation.symbol(*id).kind() == SymbolKind::Local));
}
