use crate::builtin::builtin_imports::*;

/// `length(a b c)` measures the list, while `length(a, b, c)` counts its
/// arguments
pub(crate) fn length(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let mut elems = args.get_variadic()?;

    let len = if elems.len() == 1 {
        elems.remove(0).as_list().len()
    } else {
        elems.len()
    };

    Ok(Value::Dimension(SassNumber::new_unitless(len)))
}

/// The 0-based position of the 1-based, possibly negative, index `n` into a
/// list of `len` elements
fn list_position(n: Value, len: usize, span: Span) -> SassResult<usize> {
    let index = match n {
        Value::String(s, ..) if s == "first" => 1,
        Value::String(s, ..) if s == "last" => -1,
        v => {
            let number = v.assert_number_with_name("n", span)?;
            number.assert_int_with_name("n", span)?
        }
    };

    if index == 0 {
        return Err((ErrorKind::Domain, "$n: List index may not be 0.", span).into());
    }

    if index.unsigned_abs() as usize > len {
        return Err((
            ErrorKind::Domain,
            format!("$n: Invalid index {} for a list with {} elements.", index, len),
            span,
        )
            .into());
    }

    Ok(if index > 0 {
        index as usize - 1
    } else {
        len - index.unsigned_abs() as usize
    })
}

pub(crate) fn nth(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();
    let mut list = args.get_err(0, "list")?.as_list();
    let position = list_position(args.get_err(1, "n")?, list.len(), span)?;

    Ok(list.swap_remove(position))
}

fn parse_separator(value: Option<Value>, span: Span) -> SassResult<Option<ListSeparator>> {
    let value = match value {
        Some(value) => value,
        None => return Ok(None),
    };

    if let Value::String(s, ..) = &value {
        match s.as_str() {
            "auto" => return Ok(None),
            "comma" => return Ok(Some(ListSeparator::Comma)),
            "space" => return Ok(Some(ListSeparator::Space)),
            _ => {}
        }
    }

    Err((
        ErrorKind::Domain,
        "$separator: Must be \"space\", \"comma\", or \"auto\".",
        span,
    )
        .into())
}

/// The separator of `value` when it is a list of at least two elements
fn established_separator(value: &Value) -> Option<ListSeparator> {
    match value {
        Value::List(elems, sep) if elems.len() >= 2 => Some(*sep),
        _ => None,
    }
}

pub(crate) fn join(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    let span = args.span();

    let list1 = args.get_err(0, "list1")?;
    let list2 = args.get_err(1, "list2")?;
    let sep = match parse_separator(args.get(2, "separator").map(|v| v.node), span)? {
        Some(sep) => sep,
        None => established_separator(&list1)
            .or_else(|| established_separator(&list2))
            .unwrap_or(ListSeparator::Space),
    };

    let mut elems = list1.as_list();
    elems.extend(list2.as_list());

    Ok(Value::List(elems, sep))
}

pub(crate) fn append(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    let span = args.span();

    let list = args.get_err(0, "list")?;
    let val = args.get_err(1, "val")?;
    let sep = match parse_separator(args.get(2, "separator").map(|v| v.node), span)? {
        Some(sep) => sep,
        None => established_separator(&list).unwrap_or(ListSeparator::Space),
    };

    let mut elems = list.as_list();
    elems.push(val);

    Ok(Value::List(elems, sep))
}

pub(crate) fn index(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(2)?;
    let list = args.get_err(0, "list")?.as_list();
    let value = args.get_err(1, "value")?;

    Ok(match list.iter().position(|v| *v == value) {
        Some(idx) => Value::Dimension(SassNumber::new_unitless(idx + 1)),
        None => Value::False,
    })
}

/// `zip(1px 2px, a b c)` is `1px a, 2px b`
pub(crate) fn zip(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let lists = args
        .get_variadic()?
        .into_iter()
        .map(Value::as_list)
        .collect::<Vec<_>>();

    let len = lists.iter().map(Vec::len).min().unwrap_or(0);

    let zipped = (0..len)
        .map(|idx| {
            Value::List(
                lists.iter().map(|list| list[idx].clone()).collect(),
                ListSeparator::Space,
            )
        })
        .collect();

    Ok(Value::List(zipped, ListSeparator::Comma))
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["length", "-compass-list-size"], None, length);
    f.declare(&["nth", "-compass-nth"], Some(2), nth);
    f.declare(&["join"], Some(2), join);
    f.declare(&["join"], Some(3), join);
    f.declare(&["append"], Some(2), append);
    f.declare(&["append"], Some(3), append);
    f.declare(&["index"], Some(2), index);
    f.declare(&["zip"], None, zip);
}
