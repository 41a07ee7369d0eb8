#[macro_use]
mod macros;

use std::sync::atomic::{AtomicUsize, Ordering};

use macros::TestLogger;
use slate::{
    sass_value::{ArgumentResult, SassNumber, Value},
    Builtin, Visitor,
};

fn double(mut args: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;
    Ok(Value::Dimension(SassNumber::new_unitless(number.num() * 2.0)))
}

fn count(args: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    Ok(Value::Dimension(SassNumber::new_unitless(args.len())))
}

fn always_black(_: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    Ok(Value::String("black".to_owned(), slate::sass_value::QuoteKind::None))
}

static TICKS: AtomicUsize = AtomicUsize::new(0);

fn tick(mut args: ArgumentResult, _: &mut Visitor) -> slate::Result<Value> {
    TICKS.fetch_add(1, Ordering::SeqCst);
    args.get_err(0, "value")
}

test!(plain_css_function, "translate(10px, 20px)", "translate(10px, 20px)");
test!(
    vendor_prefixed_function,
    "-webkit-linear-gradient(top, red, blue)",
    "-webkit-linear-gradient(top, red, blue)"
);
test!(unknown_function_evaluates_arguments, "foo(1 + 2, a)", "foo(3, a)");
test!(
    unknown_function_compressed,
    "foo(1, 2)",
    "foo(1,2)",
    slate::Options::default().style(slate::OutputStyle::Compressed)
);
test!(unregistered_arity_passes_through, "rgba(1, 2, 3)", "rgba(1, 2, 3)");
test!(unparseable_argument_passes_through, "url(foo.png)", "url(foo.png)");
test!(function_names_keep_case, "translateX(1px)", "translateX(1px)");
test!(
    function_in_list,
    "1px solid darken(#fff, 10%)",
    "1px solid #e6e6e6"
);
test!(nested_calls, "lighten(darken(#800000, 20%), 20%)", "maroon");
test!(
    custom_function,
    "double(3)",
    "6",
    slate::Options::default().add_custom_fn("double", Some(1), Builtin::new(double))
);
test!(
    custom_function_any_arity,
    "count(a, b, c)",
    "3",
    slate::Options::default().add_custom_fn("count", None, Builtin::new(count))
);
test!(
    custom_function_exact_arity_only,
    "double(3, 4)",
    "double(3, 4)",
    slate::Options::default()
        .quiet(true)
        .add_custom_fn("double", Some(1), Builtin::new(double))
);
test!(
    custom_function_overrides_builtin,
    "darken(#fff, 10%)",
    "black",
    slate::Options::default().add_custom_fn("darken", Some(2), Builtin::new(always_black))
);
test!(
    exact_arity_preferred_over_any,
    "count(1) count(1, 2)",
    "2 2",
    slate::Options::default()
        .add_custom_fn("count", None, Builtin::new(count))
        .add_custom_fn("count", Some(1), Builtin::new(double))
);
test!(
    underscores_and_hyphens_are_the_same_function,
    "adjust_hue(#f00, 120)",
    "lime"
);

#[test]
fn unknown_function_warns() {
    let logger = TestLogger::default();
    let css = slate::evaluate("foo(1)", &slate::Options::default().logger(&logger)).unwrap();

    assert_eq!(css, "foo(1)");
    assert_eq!(
        logger.warning_messages(),
        vec!["Unknown function foo(), emitting it as plain CSS.".to_owned()]
    );
}

#[test]
fn css_functions_do_not_warn() {
    let logger = TestLogger::default();
    let options = slate::Options::default().logger(&logger);

    slate::evaluate("url(a)", &options).unwrap();
    slate::evaluate("-moz-calc(1px)", &options).unwrap();
    slate::evaluate("rotateZ(45deg)", &options).unwrap();

    assert!(logger.warning_messages().is_empty());
}

#[test]
fn quiet_silences_warnings() {
    let logger = TestLogger::default();
    let options = slate::Options::default().logger(&logger).quiet(true);

    assert_eq!(slate::evaluate("foo(1)", &options).unwrap(), "foo(1)");
    assert!(logger.warning_messages().is_empty());
}

#[test]
fn core_library_lookup() {
    let library = slate::FunctionLibrary::core();

    assert!(library.get("darken", 2).is_some());
    assert!(library.get("darken", 3).is_none());
    assert!(library.get("max", 7).is_some());
    assert_eq!(library.get("fade-out", 2), library.get("transparentize", 2));
    assert!(slate::FunctionLibrary::new().is_empty());
}

#[test]
fn logical_operators_evaluate_every_operand() {
    let options = slate::Options::default().add_custom_fn("tick", Some(1), Builtin::new(tick));

    assert_eq!(
        slate::evaluate("tick(false) and tick(true) and tick(true)", &options).unwrap(),
        "false"
    );
    assert_eq!(TICKS.load(Ordering::SeqCst), 3);

    assert_eq!(
        slate::evaluate("tick(true) or tick(false)", &options).unwrap(),
        "true"
    );
    assert_eq!(TICKS.load(Ordering::SeqCst), 5);
}
