use crate::builtin::builtin_imports::*;

pub(crate) fn percentage(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let num = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;
    num.assert_no_units("number", args.span())?;

    Ok(Value::Dimension(SassNumber::new_with_unit(
        num.num() * 100.0,
        Unit::Percent,
    )))
}

/// Apply `transform` to the magnitude of a number, keeping its units
fn numeric_wrapper(mut args: ArgumentResult, transform: fn(f64) -> f64) -> SassResult<Value> {
    args.max_args(1)?;
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;

    Ok(Value::Dimension(number.with_num(transform(number.num()))))
}

pub(crate) fn round(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    numeric_wrapper(args, f64::round)
}

pub(crate) fn ceil(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    numeric_wrapper(args, f64::ceil)
}

pub(crate) fn floor(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    numeric_wrapper(args, f64::floor)
}

pub(crate) fn abs(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    numeric_wrapper(args, f64::abs)
}

/// Trigonometric functions read unitless numbers as radians and convert
/// any other angle
fn trig(mut args: ArgumentResult, function: fn(f64) -> f64) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", span)?;

    match number.magnitude_in(Unit::Rad) {
        Some(radians) => Ok(Value::Dimension(SassNumber::new_unitless(function(
            radians,
        )))),
        None => Err((
            format!(
                "$number: Expected {}{} to be an angle.",
                number.num.to_string(false),
                number.unit_string()
            ),
            span,
        )
            .into()),
    }
}

pub(crate) fn sin(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    trig(args, f64::sin)
}

pub(crate) fn cos(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    trig(args, f64::cos)
}

pub(crate) fn tan(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    trig(args, f64::tan)
}

pub(crate) fn sqrt(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let number = args
        .get_err(0, "number")?
        .assert_number_with_name("number", args.span())?;
    number.assert_no_units("number", args.span())?;

    if number.num() < 0.0 {
        return Err((
            ErrorKind::Domain,
            format!(
                "$number: Expected {} to be at least 0.",
                number.num.to_string(false)
            ),
            args.span(),
        )
            .into());
    }

    Ok(Value::Dimension(SassNumber::new_unitless(number.num.sqrt())))
}

/// A random unitless number between 0 and 1
#[cfg(feature = "random")]
pub(crate) fn random(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(0)?;
    let mut rng = thread_rng();

    Ok(Value::Dimension(SassNumber::new_unitless(
        rng.gen_range(0.0..1.0),
    )))
}

/// A random integer between 1 and `$limit`, inclusive
#[cfg(feature = "random")]
pub(crate) fn random_int(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();
    let limit = args
        .get_err(0, "limit")?
        .assert_number_with_name("limit", span)?;
    let limit_int = limit.assert_int_with_name("limit", span)?;

    if limit_int < 1 {
        return Err((
            ErrorKind::Domain,
            format!("$limit: Must be greater than 0, was {}.", limit_int),
            span,
        )
            .into());
    }

    let mut rng = thread_rng();
    Ok(Value::Dimension(SassNumber::new_unitless(
        rng.gen_range(0..limit_int) + 1,
    )))
}

/// The numbers `min()` and `max()` choose from, where a single list
/// argument is unpacked
fn extremum_candidates(args: ArgumentResult, span: Span) -> SassResult<Vec<SassNumber>> {
    let mut values = args.get_variadic()?;

    if values.len() == 1 {
        values = values.remove(0).as_list();
    }

    if values.is_empty() {
        return Err(("At least one argument must be passed.", span).into());
    }

    values
        .into_iter()
        .map(|value| value.assert_number(span))
        .collect()
}

/// The first of `numbers` that no other compares as `preferred` to
fn extremum(numbers: Vec<SassNumber>, preferred: Ordering, span: Span) -> SassResult<Value> {
    let mut numbers = numbers.into_iter();
    let mut best = match numbers.next() {
        Some(number) => number,
        None => unreachable!("candidates are never empty"),
    };

    for number in numbers {
        if number.compare(&best, span)? == preferred {
            best = number;
        }
    }

    Ok(Value::Dimension(best))
}

pub(crate) fn min(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let span = args.span();
    extremum(extremum_candidates(args, span)?, Ordering::Less, span)
}

pub(crate) fn max(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let span = args.span();
    extremum(extremum_candidates(args, span)?, Ordering::Greater, span)
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["percentage"], Some(1), percentage);
    f.declare(&["round"], Some(1), round);
    f.declare(&["ceil"], Some(1), ceil);
    f.declare(&["floor"], Some(1), floor);
    f.declare(&["abs"], Some(1), abs);
    f.declare(&["sin"], Some(1), sin);
    f.declare(&["cos"], Some(1), cos);
    f.declare(&["tan"], Some(1), tan);
    f.declare(&["sqrt"], Some(1), sqrt);
    f.declare(&["min"], None, min);
    f.declare(&["max"], None, max);
    #[cfg(feature = "random")]
    f.declare(&["random"], Some(0), random);
    #[cfg(feature = "random")]
    f.declare(&["random"], Some(1), random_int);
}
