use crate::builtin::builtin_imports::*;

pub(crate) fn type_of(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let value = args.get_err(0, "value")?;
    Ok(Value::String(value.kind().to_owned(), QuoteKind::None))
}

pub(crate) fn unit(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;

    Ok(Value::String(number.unit_string(), QuoteKind::Double))
}

pub(crate) fn unitless(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;

    Ok(Value::bool(number.is_unitless()))
}

/// Whether two numbers could be added or compared, i.e. whether their units
/// convert into one another
pub(crate) fn comparable(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();
    let number1 = args
        .get_err(0, "number1")?
        .assert_number_with_name("number1", span)?;
    let number2 = args
        .get_err(1, "number2")?
        .assert_number_with_name("number2", span)?;

    Ok(Value::bool(number1.is_comparable_to(&number2)))
}

/// Both branches have already been evaluated by the time `if()` is called
pub(crate) fn if_(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    let condition = args.get_err(0, "condition")?;
    let if_true = args.get_err(1, "if-true")?;
    let if_false = args.default_arg(2, "if-false", Value::Null);

    Ok(if condition.is_truthy() {
        if_true
    } else {
        if_false
    })
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["type-of"], Some(1), type_of);
    f.declare(&["unit"], Some(1), unit);
    f.declare(&["unitless"], Some(1), unitless);
    f.declare(&["comparable"], Some(2), comparable);
    f.declare(&["if"], Some(2), if_);
    f.declare(&["if"], Some(3), if_);
}
