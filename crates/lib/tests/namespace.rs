use std::sync::Arc;

use slate::{
    sass_value::{ArgumentResult, QuoteKind, Value},
    Binding, Builtin, Calculator, ExpressionCache, Mixin, Namespace, Options, Visitor,
};

fn one(_: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    Ok(Value::String("one".to_owned(), QuoteKind::None))
}

fn many(_: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    Ok(Value::String("many".to_owned(), QuoteKind::None))
}

fn compile(namespace: &Namespace, text: &str) -> String {
    let options = Options::default();
    let cache = ExpressionCache::new();
    Calculator::new(namespace, &options, &cache)
        .compile(text)
        .unwrap()
}

fn is_value(binding: Option<Binding>, expected: &Value) -> bool {
    matches!(binding, Some(Binding::Value(ref value)) if value == expected)
}

#[test]
fn derived_namespace_sees_outer_variables() {
    let outer = Namespace::new();
    outer.set_source_variable("$gutter", "10px");

    let inner = outer.derive();
    assert!(inner.has_variable("$gutter"));
    assert_eq!(compile(&inner, "$gutter * 2"), "20px");
}

#[test]
fn assignment_updates_the_defining_scope() {
    let outer = Namespace::new();
    outer.set_variable("$x", Value::True);

    let inner = outer.derive();
    inner.set_variable("$x", Value::False);

    assert!(is_value(outer.variable("$x"), &Value::False));
    assert!(is_value(inner.variable("$x"), &Value::False));
}

#[test]
fn new_variables_stay_local() {
    let outer = Namespace::new();
    let inner = outer.derive();
    inner.set_variable("$local", Value::Null);

    assert!(inner.has_variable("$local"));
    assert!(!outer.has_variable("$local"));
    assert!(outer.variable("$local").is_none());
}

#[test]
fn variable_names_ignore_dollar_and_underscores() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$main_color", "red");

    assert!(namespace.has_variable("main-color"));
    assert!(namespace.has_variable("$main-color"));
    assert_eq!(compile(&namespace, "$main-color"), "red");
}

#[test]
fn derive_from_prefers_earlier_namespaces() {
    let first = Namespace::new();
    let second = Namespace::new();
    first.set_source_variable("$x", "1");
    second.set_source_variable("$x", "2");
    second.set_source_variable("$y", "3");

    let merged = Namespace::derive_from(&[&first, &second]);
    assert_eq!(compile(&merged, "$x $y"), "1 3");

    merged.set_source_variable("$z", "4");
    assert!(!first.has_variable("$z"));
    assert!(!second.has_variable("$z"));
}

#[test]
fn functions_are_found_by_arity() {
    let namespace = Namespace::new();
    namespace.set_function("pick", Some(1), Builtin::new(one));
    namespace.set_function("pick", None, Builtin::new(many));

    assert_ne!(namespace.function("pick", 1), namespace.function("pick", 2));
    assert_eq!(namespace.function("pick", 2), namespace.function("pick", 0));
    assert_eq!(compile(&namespace, "pick(a) pick(a, b)"), "one many");
}

#[test]
fn functions_without_wildcard_need_exact_arity() {
    let namespace = Namespace::new();
    namespace.set_function("pick", Some(1), Builtin::new(one));

    assert!(namespace.function("pick", 1).is_some());
    assert!(namespace.function("pick", 2).is_none());
}

#[test]
fn core_functions_are_visible_and_can_be_replaced() {
    let namespace = Namespace::new();
    assert!(namespace.function("darken", 2).is_some());
    assert!(namespace.function("adjust_hue", 2).is_some());

    let inner = namespace.derive();
    inner.set_function("darken", Some(2), Builtin::new(one));
    assert_eq!(compile(&inner, "darken(#fff, 10%)"), "one");
    assert_eq!(compile(&namespace, "darken(#fff, 10%)"), "one");
}

#[test]
fn functions_defined_in_a_child_stay_local() {
    let outer = Namespace::new();
    let inner = outer.derive();
    inner.set_function("pick", None, Builtin::new(many));

    assert!(inner.function("pick", 3).is_some());
    assert!(outer.function("pick", 3).is_none());
}

#[test]
fn mixins_are_found_by_arity() {
    let namespace = Namespace::new();
    namespace.set_mixin(
        "border",
        Some(1),
        Mixin {
            params: vec![("$width".to_owned(), None)],
            body: Arc::from("border: $width solid;"),
        },
    );

    let mixin = namespace.mixin("border", 1).unwrap();
    assert_eq!(mixin.params.len(), 1);
    assert_eq!(&*mixin.body, "border: $width solid;");
    assert!(namespace.mixin("border", 2).is_none());
    assert!(namespace.derive().mixin("border", 1).is_some());
}

#[test]
fn depth_counts_scopes() {
    let outer = Namespace::new();
    let inner = outer.derive();
    let innermost = inner.derive();

    assert_eq!(outer.depth(), 1);
    assert_eq!(inner.depth(), 2);
    assert_eq!(innermost.depth(), 3);
    assert_eq!(Namespace::derive_from(&[&outer, &inner]).depth(), 4);
}
