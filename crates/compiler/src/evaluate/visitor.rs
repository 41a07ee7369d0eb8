use codemap::{Span, Spanned};
use indexmap::IndexMap;

use crate::{
    ast::{ArgumentResult, AstExpr, BinaryOpExpr, FunctionCallExpr},
    calculator::ExpressionCache,
    common::{BinaryOp, Identifier, ListSeparator, QuoteKind, UnaryOp},
    error::{ErrorKind, SassError, SassResult},
    utils::is_plain_css_function,
    value::Value,
    Options,
};

use super::{
    bin_op::{add, cmp, div, mul, slash_separated, sub},
    env::{Binding, Namespace},
};

/// Whether `source` is nothing but a `$variable`
fn is_variable_name(source: &str) -> bool {
    match source.strip_prefix('$') {
        Some(name) => {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        }
        None => false,
    }
}

/// Evaluates parsed expressions against a [`Namespace`]
///
/// A `/` between two literals is kept as the CSS separator it usually is
/// (`12px/1.5`), unless it is inside parentheses or part of a larger
/// arithmetic expression, in which case it divides. Every operator evaluates
/// its operands with division forced; lists pass the setting through.
#[derive(Debug)]
pub struct Visitor<'a> {
    namespace: &'a Namespace,
    pub(crate) options: &'a Options<'a>,
    cache: &'a ExpressionCache,
    /// How many variables holding source we are evaluating inside of
    depth: usize,
}

impl<'a> Visitor<'a> {
    pub fn new(
        namespace: &'a Namespace,
        options: &'a Options<'a>,
        cache: &'a ExpressionCache,
    ) -> Self {
        Self {
            namespace,
            options,
            cache,
            depth: 0,
        }
    }

    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    pub fn options(&self) -> &'a Options<'a> {
        self.options
    }

    pub(crate) fn is_compressed(&self) -> bool {
        self.options.is_compressed()
    }

    pub fn emit_warning(&self, message: &str, span: Span) {
        if self.options.quiet {
            return;
        }

        let loc = self.cache.look_up_span(span);
        self.options.logger.warning(loc, message);
    }

    pub(crate) fn emit_debug(&self, message: &str, span: Span) {
        if !self.options.verbose {
            return;
        }

        let loc = self.cache.look_up_span(span);
        self.options.logger.debug(loc, message);
    }

    /// Evaluate `expr` as a complete expression
    pub fn visit_expr(&mut self, expr: &AstExpr) -> SassResult<Value> {
        self.eval(expr, false)
    }

    fn eval(&mut self, expr: &AstExpr, divide: bool) -> SassResult<Value> {
        match expr {
            AstExpr::Literal(value) => Ok(value.node.clone()),
            AstExpr::Variable(name) => self.visit_variable(*name),
            AstExpr::UnaryOp(op, operand, span) => self.visit_unary_op(*op, operand, *span),
            AstExpr::BinaryOp(bin_op) => self.visit_bin_op(bin_op, divide),
            AstExpr::Any(operands, ..) => {
                let values = self.eval_all(operands)?;
                Ok(Value::bool(values.iter().any(Value::is_truthy)))
            }
            AstExpr::All(operands, ..) => {
                let values = self.eval_all(operands)?;
                Ok(Value::bool(values.iter().all(Value::is_truthy)))
            }
            AstExpr::Not(operand, ..) => Ok(self.eval(operand, true)?.unary_not()),
            AstExpr::Paren(inner, ..) => self.eval(inner, true),
            AstExpr::FunctionCall(call) => self.visit_function_call(call),
            AstExpr::List(list) => {
                let elems = list
                    .elems
                    .iter()
                    .map(|elem| self.eval(elem, divide))
                    .collect::<SassResult<Vec<_>>>()?;

                Ok(Value::List(elems, list.separator))
            }
        }
    }

    /// Logical operators don't short circuit
    fn eval_all(&mut self, operands: &[AstExpr]) -> SassResult<Vec<Value>> {
        operands
            .iter()
            .map(|operand| self.eval(operand, true))
            .collect()
    }

    fn visit_variable(&mut self, name: Spanned<Identifier>) -> SassResult<Value> {
        match self.namespace.get_var(name)? {
            Binding::Value(value) => Ok(value),
            Binding::Source(source) => Ok(match self.evaluate_source(&source, name.span)? {
                Some(value) => value,
                None => Value::String(source.to_string(), QuoteKind::None),
            }),
        }
    }

    /// Parse and evaluate expression source
    ///
    /// Source that is exactly the name of a variable evaluates to that
    /// variable without parsing. Outside of strict mode, `None` means the
    /// source could not be parsed.
    pub(crate) fn evaluate_source(&mut self, source: &str, span: Span) -> SassResult<Option<Value>> {
        if self.depth >= self.options.max_depth {
            return Err((
                ErrorKind::RecursionLimit,
                format!(
                    "Maximum evaluation depth of {} exceeded.",
                    self.options.max_depth
                ),
                span,
            )
                .into());
        }

        self.depth += 1;
        let result = self.evaluate_source_inner(source, span);
        self.depth -= 1;

        result
    }

    fn evaluate_source_inner(&mut self, source: &str, span: Span) -> SassResult<Option<Value>> {
        if is_variable_name(source) {
            match self.namespace.variable(source) {
                Some(Binding::Value(value)) => return Ok(Some(value)),
                Some(Binding::Source(inner)) => return self.evaluate_source(&inner, span),
                None => {}
            }
        }

        let ast = match self.cache.parse(source) {
            Ok(ast) => ast,
            Err(err) if err.kind().is_parse_failure() && !self.options.strict => {
                self.log_parse_failure(&err, source);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        self.visit_expr(&ast).map(Some)
    }

    pub(crate) fn log_parse_failure(&self, err: &SassError, source: &str) {
        if let Some(span) = err.span() {
            self.emit_debug(
                &format!(
                    "{} Treating `{}` as plain text.",
                    err.message(),
                    source
                ),
                span,
            );
        }
    }

    fn visit_unary_op(&mut self, op: UnaryOp, operand: &AstExpr, span: Span) -> SassResult<Value> {
        let operand = self.eval(operand, true)?;

        match op {
            UnaryOp::Plus => operand.unary_plus(self.is_compressed(), span),
            UnaryOp::Neg => operand.unary_neg(self.is_compressed(), span),
        }
    }

    fn visit_bin_op(&mut self, bin_op: &BinaryOpExpr, divide: bool) -> SassResult<Value> {
        let left = self.eval(&bin_op.lhs, true)?;
        let right = self.eval(&bin_op.rhs, true)?;
        let span = bin_op.span;

        match bin_op.op {
            BinaryOp::Div if !divide && bin_op.lhs.is_literal() && bin_op.rhs.is_literal() => {
                slash_separated(&left, &right, self.options, span)
            }
            BinaryOp::Equal => Ok(Value::bool(left == right)),
            BinaryOp::NotEqual => Ok(Value::bool(left != right)),
            BinaryOp::GreaterThan
            | BinaryOp::GreaterThanEqual
            | BinaryOp::LessThan
            | BinaryOp::LessThanEqual => cmp(&left, &right, span, bin_op.op),
            BinaryOp::Plus => add(left, right, self.options, span),
            BinaryOp::Minus => sub(left, right, self.options, span),
            BinaryOp::Mul => mul(left, right, self.options, span),
            BinaryOp::Div => div(left, right, self.options, span),
        }
    }

    fn visit_function_call(&mut self, call: &FunctionCallExpr) -> SassResult<Value> {
        let mut evaluated = Vec::with_capacity(call.arguments.len());
        for arg in &call.arguments.args {
            evaluated.push((arg.name.as_deref(), self.eval(&arg.value, true)?));
        }

        let func = match self.namespace.get_fn(call.name, evaluated.len()) {
            Some(func) => func,
            None => return self.visit_plain_css_call(call, evaluated),
        };

        let mut positional = Vec::new();
        let mut named = IndexMap::new();

        for (name, value) in evaluated {
            match name {
                Some(name) => {
                    named.insert(Identifier::from(name), value);
                }
                None => positional.push(value),
            }
        }

        func.call(ArgumentResult::new(positional, named, call.span), self)
    }

    /// A call to a function nobody defined is emitted as written, with its
    /// arguments evaluated
    fn visit_plain_css_call(
        &mut self,
        call: &FunctionCallExpr,
        evaluated: Vec<(Option<&str>, Value)>,
    ) -> SassResult<Value> {
        if !is_plain_css_function(&call.original_name) {
            self.emit_warning(
                &format!(
                    "Unknown function {}(), emitting it as plain CSS.",
                    call.original_name
                ),
                call.span,
            );
        }

        let mut buffer = format!("{}(", call.original_name);

        for (idx, (name, value)) in evaluated.into_iter().enumerate() {
            if idx != 0 {
                buffer.push_str(ListSeparator::Comma.as_str(self.is_compressed()));
            }

            if let Some(name) = name {
                buffer.push_str(name);
                buffer.push_str(": ");
            }

            buffer.push_str(&value.to_css_string(call.span, self.is_compressed())?);
        }

        buffer.push(')');

        Ok(Value::String(buffer, QuoteKind::None))
    }

    /// Call the function registered for `name` with `args`, failing if there
    /// is none
    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: ArgumentResult,
    ) -> SassResult<Value> {
        let span = args.span();
        let func = self
            .namespace
            .require_fn(Identifier::from(name), args.len(), span)?;

        func.call(args, self)
    }
}
