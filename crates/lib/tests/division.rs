#[macro_use]
mod macros;

test!(slash_between_literals_is_kept, "1 / 3", "1 / 3");
test!(font_shorthand, "12px/1.5", "12px / 1.5");
test!(
    font_shorthand_in_list,
    "italic 12px/30px Georgia, serif",
    "italic 12px / 30px Georgia, serif"
);
test!(parentheses_divide, "(1 / 3)", "0.33333");
test!(same_units_cancel, "(10px / 2px)", "5");
test!(unitless_divisor_keeps_unit, "(10px / 2)", "5px");
test!(division_inside_arithmetic, "1 + 4 / 2", "3");
test!(division_then_multiplication, "6 / 3 * 2", "4");
test!(division_in_function_argument, "round(10px / 3)", "3px");
test!(slash_between_strings, "a / b", "a / b");
test!(strings_concatenate_with_slash, "(a / b)", "a/b");
error!(divide_by_zero, "(1 / 0)", "Error: Division by zero.");
error!(divide_by_zero_with_units, "(1px / 0px)", "Error: Division by zero.");
error!(
    divide_number_by_string,
    "(1 / a)", "Error: Undefined operation \"1 / a\"."
);

#[test]
fn variable_operand_divides() {
    let namespace = slate::Namespace::new();
    namespace.set_source_variable("$width", "100px");

    let options = slate::Options::default();
    let cache = slate::ExpressionCache::new();
    let calculator = slate::Calculator::new(&namespace, &options, &cache);

    assert_eq!(calculator.compile("$width / 4").unwrap(), "25px");
    assert_eq!(calculator.compile("$width/4").unwrap(), "25px");
}
