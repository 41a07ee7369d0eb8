use crate::builtin::builtin_imports::*;

/// The text of every argument joined by spaces, where strings contribute
/// their contents without quotes
fn joined_text(args: ArgumentResult, visitor: &Visitor) -> SassResult<String> {
    let span = args.span();
    let texts = args
        .get_variadic()?
        .into_iter()
        .map(|value| match value {
            Value::String(s, ..) => Ok(s),
            v => v.to_css_string(span, visitor.is_compressed()),
        })
        .collect::<SassResult<Vec<_>>>()?;

    Ok(texts.join(" "))
}

pub(crate) fn quote(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    Ok(Value::String(joined_text(args, visitor)?, QuoteKind::Double))
}

/// Also known as `e()` and `escape()`
pub(crate) fn unquote(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    Ok(Value::String(joined_text(args, visitor)?, QuoteKind::None))
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["quote"], None, quote);
    f.declare(&["unquote"], None, unquote);
    f.declare(&["e", "escape"], Some(1), unquote);
}
