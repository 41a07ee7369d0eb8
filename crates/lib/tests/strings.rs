#[macro_use]
mod macros;

test!(double_quoted, "\"a b\"", "\"a b\"");
test!(single_quoted, "'a b'", "'a b'");
test!(bareword, "sans-serif", "sans-serif");
test!(quoted_plus_bareword, "\"a\" + b", "\"ab\"");
test!(bareword_plus_quoted, "a + \"b\"", "ab");
test!(number_plus_bareword, "1 + a", "1a");
test!(number_plus_quoted, "1 + \"a\"", "1a");
test!(bareword_minus_bareword, "a - b", "a-b");
test!(bool_plus_bareword, "true + a", "truea");
test!(strings_compare_by_text, "a == \"a\"", "true");
test!(quote, "quote(a)", "\"a\"");
test!(quote_list, "quote(a b)", "\"a b\"");
test!(quote_arguments, "quote(a, b)", "\"a b\"");
test!(unquote, "unquote(\"a b\")", "a b");
test!(unquote_single, "unquote('a')", "a");
test!(e, "e(\"progid:foo\")", "progid:foo");
test!(escape, "escape('a')", "a");
test!(unquote_number, "unquote(1px)", "1px");
