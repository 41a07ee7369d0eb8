//! The entry points an external rule processor drives: evaluate a property
//! value, interpolate `#{}`, or substitute `$variables` into text that isn't
//! a valid expression.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use codemap::{CodeMap, Pos, Span, SpanLoc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    ast::{ArgumentResult, AstExpr},
    common::QuoteKind,
    error::{ErrorKind, SassError, SassResult},
    evaluate::{Binding, Namespace, Visitor},
    parse::parse_expression,
    utils::dequote,
    value::Value,
    Options,
};

static INTERPOLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\{(.*?)\}").expect("interpolation pattern is valid"));

static VARIABLE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\{\s*(\$[-\w]+)\s*\}|(\$[-\w]+)").expect("variable pattern is valid")
});

static WHOLE_VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$[-\w]+$").expect("variable pattern is valid"));

/// Parsed expressions keyed by their exact source text
///
/// Entries are inserted once and never evicted. With a capacity limit, once
/// `limit` source texts are remembered new expressions are still parsed and
/// evaluated, just not remembered.
///
/// The cache also owns the [`CodeMap`] that every span produced while
/// parsing points into, which is how errors are located. Text seen after the
/// cache is full gets its spans from a scratch codemap instead, which is
/// dropped between top-level evaluations once it grows too large.
pub struct ExpressionCache {
    map: RefCell<CodeMap>,
    /// Every position handed out by `map`
    extent: Cell<Option<Span>>,
    asts: RefCell<HashMap<String, Arc<AstExpr>>>,
    spans: RefCell<HashMap<String, Span>>,
    limit: Option<usize>,
    scratch: RefCell<Option<Scratch>>,
    /// How many top-level evaluations are running
    sessions: Cell<usize>,
}

/// Source bytes the scratch codemap may hold before it is replaced
pub(crate) const SCRATCH_LIMIT: usize = 64 * 1024;

/// Files for text the cache had no room to remember
///
/// The first file pads the map out to the end of the main codemap, so
/// scratch spans never collide with cached ones.
struct Scratch {
    map: CodeMap,
    spans: HashMap<String, Span>,
    /// Positions after this belong to the scratch map
    start: Option<Pos>,
    len: usize,
}

impl Scratch {
    fn new(extent: Option<Span>) -> Self {
        let mut map = CodeMap::new();
        let start = extent.map(|extent| {
            map.add_file(String::new(), " ".repeat(extent.len() as usize))
                .span
                .high()
        });

        Self {
            map,
            spans: HashMap::new(),
            start,
            len: 0,
        }
    }

    fn owns(&self, span: Span) -> bool {
        self.start.map_or(true, |start| span.low() > start)
    }

    fn add_file(&mut self, name: &str, text: &str) -> Span {
        self.len += text.len();
        self.map.add_file(name.to_owned(), text.to_owned()).span
    }
}

/// Held for the duration of a top-level evaluation
pub(crate) struct Session<'a>(&'a ExpressionCache);

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.0.sessions.set(self.0.sessions.get() - 1);
    }
}

impl fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionCache")
            .field("len", &self.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self {
            map: RefCell::new(CodeMap::new()),
            extent: Cell::new(None),
            asts: RefCell::new(HashMap::new()),
            spans: RefCell::new(HashMap::new()),
            limit: None,
            scratch: RefCell::new(None),
            sessions: Cell::new(0),
        }
    }

    /// A cache that stops remembering expressions after `limit` of them
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.asts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, text: &str) -> bool {
        self.asts.borrow().contains_key(text)
    }

    fn is_full(&self) -> bool {
        self.limit
            .map_or(false, |limit| self.spans.borrow().len() >= limit)
    }

    /// Add `text` to the codemap as a file named `name`
    pub fn add_file(&self, name: &str, text: &str) -> Span {
        if self.is_full() {
            return self.with_scratch(|scratch| scratch.add_file(name, text));
        }

        let span = self
            .map
            .borrow_mut()
            .add_file(name.to_owned(), text.to_owned())
            .span;

        self.extent
            .set(Some(self.extent.get().map_or(span, |extent| extent.merge(span))));

        span
    }

    fn with_scratch<T>(&self, f: impl FnOnce(&mut Scratch) -> T) -> T {
        let mut scratch = self.scratch.borrow_mut();
        f(scratch.get_or_insert_with(|| Scratch::new(self.extent.get())))
    }

    /// The span covering all of `text`, reusing the file of a previous
    /// expression with the same text
    pub(crate) fn span_for(&self, text: &str) -> Span {
        if let Some(span) = self.spans.borrow().get(text) {
            return *span;
        }

        if self.is_full() {
            return self.with_scratch(|scratch| {
                if let Some(span) = scratch.spans.get(text) {
                    return *span;
                }

                let span = scratch.add_file("expression", text);
                scratch.spans.insert(text.to_owned(), span);
                span
            });
        }

        let span = self.add_file("expression", text);
        self.spans.borrow_mut().insert(text.to_owned(), span);
        span
    }

    /// Parse `text`, or return the tree from when it was last parsed
    pub(crate) fn parse(&self, text: &str) -> SassResult<Arc<AstExpr>> {
        if let Some(ast) = self.asts.borrow().get(text) {
            return Ok(Arc::clone(ast));
        }

        let ast = Arc::new(parse_expression(text, self.span_for(text))?);

        if self.spans.borrow().contains_key(text) {
            self.asts
                .borrow_mut()
                .insert(text.to_owned(), Arc::clone(&ast));
        }

        Ok(ast)
    }

    /// Start a top-level evaluation
    ///
    /// Spans into the scratch codemap only live as long as the evaluation
    /// that created them, so an oversized scratch map is dropped here.
    pub(crate) fn session(&self) -> Session<'_> {
        if self.sessions.get() == 0 {
            let mut scratch = self.scratch.borrow_mut();
            if scratch.as_ref().map_or(false, |s| s.len > SCRATCH_LIMIT) {
                *scratch = None;
            }
        }

        self.sessions.set(self.sessions.get() + 1);
        Session(self)
    }

    pub fn look_up_span(&self, span: Span) -> SpanLoc {
        if let Some(scratch) = &*self.scratch.borrow() {
            if scratch.owns(span) {
                return scratch.map.look_up_span(span);
            }
        }

        self.map.borrow().look_up_span(span)
    }

    /// Attach source locations to an error raised while evaluating an
    /// expression from this cache
    pub fn locate(&self, err: Box<SassError>, unicode: bool) -> Box<SassError> {
        match err.span() {
            Some(span) => err.located(self.look_up_span(span), unicode),
            None => err,
        }
    }
}

/// Evaluates expression source against a [`Namespace`]
///
/// ```
/// # use slate_compiler::{Calculator, ExpressionCache, Namespace, Options};
/// let namespace = Namespace::new();
/// namespace.set_source_variable("$gutter", "10px");
///
/// let options = Options::default();
/// let cache = ExpressionCache::new();
/// let calculator = Calculator::new(&namespace, &options, &cache);
///
/// assert_eq!(calculator.compile("$gutter * 2").unwrap(), "20px");
/// assert_eq!(calculator.do_glob_math("width-#{1 + 1}").unwrap(), "width-2");
/// assert_eq!(calculator.apply_vars("a $gutter b").unwrap(), "a 10px b");
/// ```
#[derive(Debug)]
pub struct Calculator<'a> {
    namespace: &'a Namespace,
    options: &'a Options<'a>,
    cache: &'a ExpressionCache,
}

impl<'a> Calculator<'a> {
    pub fn new(
        namespace: &'a Namespace,
        options: &'a Options<'a>,
        cache: &'a ExpressionCache,
    ) -> Self {
        Self {
            namespace,
            options,
            cache,
        }
    }

    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    fn visitor(&self) -> Visitor<'a> {
        Visitor::new(self.namespace, self.options, self.cache)
    }

    fn locate<T>(&self, result: SassResult<T>) -> SassResult<T> {
        result.map_err(|err| self.cache.locate(err, self.options.unicode_error_messages))
    }

    fn recursion_limit(&self, span: Span) -> Box<SassError> {
        (
            ErrorKind::RecursionLimit,
            format!(
                "Maximum evaluation depth of {} exceeded.",
                self.options.max_depth
            ),
            span,
        )
            .into()
    }

    /// Evaluate `text` as an expression
    ///
    /// Outside of strict mode, text that does not parse gives `None`.
    pub fn evaluate_expression(&self, text: &str) -> SassResult<Option<Value>> {
        let _session = self.cache.session();
        let span = self.cache.span_for(text);
        self.locate(self.visitor().evaluate_source(text, span))
    }

    /// Evaluate a property value
    ///
    /// `#{}` is interpolated first. If the result is not an expression, or
    /// refers to a variable that does not exist, the original text is
    /// returned with its variables substituted instead.
    pub fn calculate(&self, text: &str) -> SassResult<Value> {
        let _session = self.cache.session();
        self.locate(self.calculate_inner(text, 0))
    }

    fn calculate_inner(&self, text: &str, depth: usize) -> SassResult<Value> {
        let interpolated = self.glob_math_inner(text, depth)?;
        let span = self.cache.span_for(&interpolated);

        let mut visitor = self.visitor();
        match visitor.evaluate_source(&interpolated, span) {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(err) if err.kind() == ErrorKind::UndefinedVariable && !self.options.strict => {
                visitor.log_parse_failure(&err, &interpolated);
            }
            Err(err) => return Err(err),
        }

        Ok(Value::String(
            self.apply_vars_inner(text, depth)?,
            QuoteKind::None,
        ))
    }

    /// Evaluate a property value and render it as CSS
    pub fn compile(&self, text: &str) -> SassResult<String> {
        let _session = self.cache.session();
        self.locate(self.calculate_inner(text, 0).and_then(|value| {
            value.to_css_string(self.cache.span_for(text), self.options.is_compressed())
        }))
    }

    /// Replace every `#{expr}` in `text` with the rendered, unquoted value of
    /// `expr`
    ///
    /// The replacement is final text and is not evaluated again.
    pub fn do_glob_math(&self, text: &str) -> SassResult<String> {
        let _session = self.cache.session();
        self.locate(self.glob_math_inner(text, 0))
    }

    fn glob_math_inner(&self, text: &str, depth: usize) -> SassResult<String> {
        if !text.contains("#{") {
            return Ok(text.to_owned());
        }

        if depth >= self.options.max_depth {
            return Err(self.recursion_limit(self.cache.span_for(text)));
        }

        replace_all(&INTERPOLATION, text, |caps| {
            let inner = &caps[1];
            let span = self.cache.span_for(inner);

            match self.visitor().evaluate_source(inner, span)? {
                Some(value) => self.interpolated_text(&value, span),
                None => self.apply_vars_inner(inner, depth + 1),
            }
        })
    }

    /// How a value reads inside `#{}`
    fn interpolated_text(&self, value: &Value, span: Span) -> SassResult<String> {
        Ok(match value {
            Value::String(s, ..) => s.clone(),
            Value::Null => String::new(),
            v => dequote(&v.to_css_string(span, self.options.is_compressed())?).to_owned(),
        })
    }

    /// Substitute the values of `$variables` and `#{$variables}` into text,
    /// then interpolate any remaining `#{}`
    ///
    /// References to variables that are undefined or falsy are left as they
    /// were written.
    pub fn apply_vars(&self, text: &str) -> SassResult<String> {
        let _session = self.cache.session();
        self.locate(self.apply_vars_inner(text, 0))
    }

    fn apply_vars_inner(&self, text: &str, depth: usize) -> SassResult<String> {
        if !text.contains('$') {
            return self.glob_math_inner(text, depth);
        }

        if WHOLE_VARIABLE.is_match(text) {
            if let Some(binding) = self.namespace.variable(text) {
                let substituted = self.binding_text(&binding, self.cache.span_for(text))?;
                return self.glob_math_inner(&substituted, depth + 1);
            }
        }

        let substituted = replace_all(&VARIABLE_REFERENCE, text, |caps| {
            let (name, interpolated) = match (caps.get(1), caps.get(2)) {
                (Some(name), _) => (name.as_str(), true),
                (None, Some(name)) => (name.as_str(), false),
                (None, None) => unreachable!("one alternative always matches"),
            };

            let binding = match self.namespace.variable(name) {
                Some(binding) if binding_is_truthy(&binding) => binding,
                _ => return Ok(caps[0].to_owned()),
            };

            let value = self.binding_text(&binding, self.cache.span_for(name))?;
            Ok(if interpolated {
                dequote(&value).to_owned()
            } else {
                value
            })
        })?;

        self.glob_math_inner(&substituted, depth + 1)
    }

    fn binding_text(&self, binding: &Binding, span: Span) -> SassResult<String> {
        match binding {
            Binding::Value(value) => value.to_css_string(span, self.options.is_compressed()),
            Binding::Source(source) => Ok(source.to_string()),
        }
    }

    /// The value of the variable `name`, evaluating it if it holds source
    ///
    /// Source that does not parse is returned as an unquoted string.
    pub fn interpolate(&self, name: &str) -> SassResult<Value> {
        let _session = self.cache.session();
        let span = self.cache.span_for(name);
        let binding = self.locate(self.namespace.get_var(codemap::Spanned {
            node: name.into(),
            span,
        }))?;

        match binding {
            Binding::Value(value) => Ok(value),
            Binding::Source(source) => Ok(match self.evaluate_expression(&source)? {
                Some(value) => value,
                None => Value::String(source.to_string(), QuoteKind::None),
            }),
        }
    }

    /// Parse `text` through the cache without evaluating it
    pub fn parse_expression(&self, text: &str) -> SassResult<Arc<AstExpr>> {
        let _session = self.cache.session();
        self.locate(self.cache.parse(text))
    }

    /// Call the function registered in the namespace as `name` with
    /// positional and named arguments
    pub fn call_function(
        &self,
        name: &str,
        positional: Vec<Value>,
        named: Vec<(&str, Value)>,
    ) -> SassResult<Value> {
        let _session = self.cache.session();
        let span = self.cache.span_for(name);
        let named = named
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect::<IndexMap<_, _>>();

        self.locate(
            self.visitor()
                .call_function(name, ArgumentResult::new(positional, named, span)),
        )
    }
}

fn binding_is_truthy(binding: &Binding) -> bool {
    match binding {
        Binding::Value(value) => value.is_truthy(),
        Binding::Source(source) => !source.is_empty(),
    }
}

/// [`Regex::replace_all`] with a fallible replacement
fn replace_all(
    re: &Regex,
    text: &str,
    mut replacement: impl FnMut(&Captures) -> SassResult<String>,
) -> SassResult<String> {
    let mut buffer = String::with_capacity(text.len());
    let mut last_match = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always participates");
        buffer.push_str(&text[last_match..whole.start()]);
        buffer.push_str(&replacement(&caps)?);
        last_match = whole.end();
    }

    buffer.push_str(&text[last_match..]);
    Ok(buffer)
}
