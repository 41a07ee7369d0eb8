#[macro_use]
mod macros;

use std::sync::Arc;

use macros::TestLogger;
use slate::{
    sass_value::{Color, Number, QuoteKind, SassNumber, Unit, Value},
    Calculator, ExpressionCache, Namespace, Options,
};

fn px(n: f64) -> Value {
    Value::Dimension(SassNumber::new_with_unit(n, Unit::Px))
}

#[test]
fn variables_hold_values_or_source() {
    let namespace = Namespace::new();
    namespace.set_variable("$width", px(100.0));
    namespace.set_source_variable("$gutter", "$width / 10");

    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("$width - $gutter * 2").unwrap(), "80px");
    assert_eq!(calculator.calculate("$gutter").unwrap(), px(10.0));
}

#[test]
fn interpolation_happens_before_evaluation() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$size", "10");

    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("#{$size}px * 2").unwrap(), "20px");
    assert_eq!(calculator.do_glob_math("#{1 + 2}px").unwrap(), "3px");
    assert_eq!(calculator.do_glob_math("a #{null} b").unwrap(), "a  b");
    assert_eq!(
        calculator.do_glob_math("#{\"quoted\"}-suffix").unwrap(),
        "quoted-suffix"
    );
    assert_eq!(calculator.do_glob_math("no interpolation").unwrap(), "no interpolation");
}

#[test]
fn unparseable_values_fall_back_to_substitution() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$border", "1px solid");

    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(
        calculator.compile("$border !important").unwrap(),
        "1px solid !important"
    );
    assert_eq!(
        calculator.calculate("$border !important").unwrap(),
        Value::String("1px solid !important".to_owned(), QuoteKind::None)
    );
    assert_eq!(calculator.evaluate_expression("1 +").unwrap(), None);
}

#[test]
fn undefined_variables_are_left_as_written() {
    let namespace = Namespace::new();
    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("$nope + 1").unwrap(), "$nope + 1");
}

#[test]
fn strict_mode_fails_instead() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$border", "1px solid");

    let options = Options::default().strict(true);
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_err!(
        "Error: Unexpected \"!\".",
        calculator.compile("$border !important")
    );
    assert_err!("Error: Undefined variable.", calculator.compile("$nope + 1"));
    assert!(calculator.evaluate_expression("1 +").is_err());
}

#[test]
fn errors_are_located() {
    let namespace = Namespace::new();
    let options = Options::default().unicode_error_messages(false);
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    let err = calculator.compile("1px + 1s").unwrap_err();
    assert_eq!(err.kind(), slate::ErrorKind::Type);
    assert_eq!(err.message(), "Incompatible units px and s.");

    let location = err.location().expect("error is located");
    assert_eq!(location.begin.line, 0);
    assert!(err.to_string().contains("1 | 1px + 1s"));
}

#[test]
fn apply_vars_substitutes_text() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$gutter", "10px");
    namespace.set_variable("$name", Value::String("hello".to_owned(), QuoteKind::Double));
    namespace.set_variable("$off", Value::False);
    namespace.set_variable("$none", Value::Null);

    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.apply_vars("$gutter").unwrap(), "10px");
    assert_eq!(calculator.apply_vars("a $gutter b").unwrap(), "a 10px b");
    assert_eq!(
        calculator.apply_vars("#{$name} $name").unwrap(),
        "hello \"hello\""
    );
    assert_eq!(calculator.apply_vars("$off $none").unwrap(), "$off $none");
    assert_eq!(calculator.apply_vars("$missing").unwrap(), "$missing");
    assert_eq!(
        calculator.apply_vars("url($gutter) #{1 + 1}").unwrap(),
        "url(10px) 2"
    );
}

#[test]
fn self_reference_hits_the_depth_limit() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$a", "$b");
    namespace.set_source_variable("$b", "$a");

    let options = Options::default().max_depth(8);
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    let err = calculator.compile("$a").unwrap_err();
    assert_eq!(err.kind(), slate::ErrorKind::RecursionLimit);
    assert_eq!(err.message(), "Maximum evaluation depth of 8 exceeded.");
}

#[test]
fn interpolate_evaluates_a_variable() {
    let namespace = Namespace::new();
    namespace.set_source_variable("$sum", "1px + 2px");
    namespace.set_source_variable("$raw", "a !b");

    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.interpolate("$sum").unwrap(), px(3.0));
    assert_eq!(
        calculator.interpolate("$raw").unwrap(),
        Value::String("a !b".to_owned(), QuoteKind::None)
    );
    assert_err!("Error: Undefined variable.", calculator.interpolate("$nope"));
}

#[test]
fn call_function_by_name() {
    let namespace = Namespace::new();
    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    let red = Value::Color(Arc::new(Color::from_rgba(
        Number(255.0),
        Number(0.0),
        Number(0.0),
        Number(1.0),
    )));
    let blue = Value::Color(Arc::new(Color::from_rgba(
        Number(0.0),
        Number(0.0),
        Number(255.0),
        Number(1.0),
    )));

    let mixed = calculator
        .call_function(
            "mix",
            vec![red, blue],
            vec![(
                "weight",
                Value::Dimension(SassNumber::new_with_unit(25.0, Unit::Percent)),
            )],
        )
        .unwrap();

    let expected = Value::Color(Arc::new(Color::from_rgba(
        Number(63.75),
        Number(0.0),
        Number(191.25),
        Number(1.0),
    )));
    assert_eq!(mixed, expected);

    assert_err!(
        "Error: Undefined function nope() with 1 arguments.",
        calculator.call_function("nope", vec![Value::Null], Vec::new())
    );
}

#[test]
fn call_function_needs_a_registered_arity() {
    let namespace = Namespace::new();
    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    let channel = || Value::Dimension(SassNumber::new_unitless(0.0));

    let black = calculator
        .call_function("rgb", vec![channel(), channel(), channel()], Vec::new())
        .unwrap();
    assert_eq!(
        black,
        Value::Color(Arc::new(Color::from_rgba(
            Number(0.0),
            Number(0.0),
            Number(0.0),
            Number(1.0),
        )))
    );

    let err = calculator
        .call_function("rgba", vec![channel(), channel(), channel()], Vec::new())
        .unwrap_err();
    assert_eq!(err.kind(), slate::ErrorKind::UndefinedFunction);
    assert_eq!(err.message(), "Undefined function rgba() with 3 arguments.");
}

#[test]
fn cache_is_shared_between_calculators() {
    let options = Options::default();
    let cache = ExpressionCache::new();

    let outer = Namespace::new();
    outer.set_variable("$x", px(1.0));
    let inner = outer.derive();
    inner.set_variable("$y", px(5.0));

    assert_eq!(
        Calculator::new(&outer, &options, &cache).compile("$x + 1px").unwrap(),
        "2px"
    );

    // assigning an existing variable updates the scope that defines it
    inner.set_variable("$x", px(2.0));
    assert_eq!(
        Calculator::new(&inner, &options, &cache).compile("$x + 1px").unwrap(),
        "3px"
    );
    assert_eq!(
        Calculator::new(&outer, &options, &cache).compile("$x + 1px").unwrap(),
        "3px"
    );
    assert!(!outer.has_variable("$y"));

    assert_eq!(cache.len(), 1);
    assert!(cache.contains("$x + 1px"));
}

#[test]
fn parse_expression_is_cached() {
    let namespace = Namespace::new();
    let options = Options::default();
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    let first = calculator.parse_expression("1px + 2px").unwrap();
    let second = calculator.parse_expression("1px + 2px").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(calculator.parse_expression("1px +").is_err());
    assert_eq!(cache.len(), 1);
}

#[test]
fn capacity_limit_still_evaluates() {
    let namespace = Namespace::new();
    let options = Options::default();
    let cache = ExpressionCache::with_capacity_limit(1);
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("1 + 1").unwrap(), "2");
    assert_eq!(calculator.compile("2 + 2").unwrap(), "4");
    assert_eq!(calculator.compile("2 + 2").unwrap(), "4");
    assert_eq!(cache.len(), 1);
}

#[test]
fn full_cache_still_locates_errors() {
    let namespace = Namespace::new();
    let options = Options::default().unicode_error_messages(false);
    let cache = ExpressionCache::with_capacity_limit(1);
    let calculator = Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("1 + 1").unwrap(), "2");

    for _ in 0..3 {
        let err = calculator.compile("1px + 1s").unwrap_err();
        assert_eq!(err.location().expect("error is located").begin.line, 0);
        assert!(err.to_string().contains("1 | 1px + 1s"));
    }

    assert_eq!(calculator.compile("1 + 1").unwrap(), "2");
    assert_eq!(cache.len(), 1);
}

#[test]
fn verbose_logs_fallbacks() {
    let logger = TestLogger::default();
    let namespace = Namespace::new();
    let options = Options::default().logger(&logger).verbose(true);
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    calculator.compile("a !b").unwrap();

    let messages = logger.debug_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].ends_with("Treating `a !b` as plain text."));
}

#[test]
fn fallbacks_are_silent_by_default() {
    let logger = TestLogger::default();
    let namespace = Namespace::new();
    let options = Options::default().logger(&logger);
    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, &options, &cache);

    calculator.compile("a !b").unwrap();

    assert!(logger.debug_messages().is_empty());
}
