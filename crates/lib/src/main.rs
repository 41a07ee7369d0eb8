use std::io::{stdin, stdout, BufRead, Write};

use clap::{builder::PossibleValue, value_parser, Arg, ArgAction, Command, ValueEnum};

use slate::{Calculator, ExpressionCache, Namespace, Options, OutputStyle};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Style {
    Expanded,
    Compressed,
}

impl ValueEnum for Style {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Expanded, Self::Compressed]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Expanded => PossibleValue::new("expanded"),
            Self::Compressed => PossibleValue::new("compressed"),
        })
    }
}

/// A `name=value` pair given to `--define`
#[derive(Debug, Clone)]
struct Define {
    name: String,
    value: String,
}

fn parse_define(arg: &str) -> Result<Define, String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok(Define {
            name: name.trim().to_owned(),
            value: value.trim().to_owned(),
        }),
        _ => Err(format!("expected `name=value`, found `{}`", arg)),
    }
}

fn cli() -> Command {
    Command::new("slate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Evaluate SCSS expressions")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .action(ArgAction::Version)
                .long("version")
                .short('v')
                .global(true)
        )
        .arg(
            Arg::new("STDIN")
                .action(ArgAction::SetTrue)
                .long("stdin")
                .help("Evaluate each non-empty line of stdin"),
        )
        .arg(
            Arg::new("DEFINE")
                .short('D')
                .long("define")
                .help("Define a variable as `name=value`. May be passed multiple times.")
                .action(ArgAction::Append)
                .value_parser(parse_define)
                .num_args(1)
        )
        .arg(
            Arg::new("STYLE")
                // this is required for compatibility with ruby sass
                .short_alias('t')
                .short('s')
                .long("style")
                .help("Minified or expanded output")
                .default_value("expanded")
                .ignore_case(true)
                .num_args(1)
                .value_parser(value_parser!(Style)),
        )
        .arg(
            Arg::new("STRICT")
                .action(ArgAction::SetTrue)
                .long("strict")
                .help("Fail on values that are not valid expressions instead of passing them through."),
        )
        .arg(
            Arg::new("NO_UNICODE")
                .action(ArgAction::SetTrue)
                .long("no-unicode")
                .help("Whether to use Unicode characters for messages.")
        )
        .arg(
            Arg::new("QUIET")
                .action(ArgAction::SetTrue)
                .short('q')
                .long("quiet")
                .help("Don't print warnings."),
        )
        .arg(
            Arg::new("EXPRESSION")
                .value_parser(value_parser!(String))
                .action(ArgAction::Append)
                .required_unless_present("STDIN")
                .help("Expressions to evaluate"),
        )
}

fn main() -> std::io::Result<()> {
    let matches = cli().get_matches();

    let style = match matches.get_one::<Style>("STYLE") {
        Some(Style::Compressed) => OutputStyle::Compressed,
        Some(Style::Expanded) | None => OutputStyle::Expanded,
    };

    let options = &Options::default()
        .style(style)
        .strict(matches.get_flag("STRICT"))
        .quiet(matches.get_flag("QUIET"))
        .unicode_error_messages(!matches.get_flag("NO_UNICODE"));

    let namespace = Namespace::from_options(options);
    if let Some(defines) = matches.get_many::<Define>("DEFINE") {
        for define in defines {
            namespace.set_source_variable(&define.name, define.value.as_str());
        }
    }

    let cache = ExpressionCache::new();
    let calculator = Calculator::new(&namespace, options, &cache);

    let mut expressions = matches
        .get_many::<String>("EXPRESSION")
        .map_or_else(Vec::new, |vals| vals.cloned().collect());

    if matches.get_flag("STDIN") {
        for line in stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                expressions.push(line);
            }
        }
    }

    let mut out = stdout().lock();
    for expression in &expressions {
        let css = calculator.compile(expression).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1)
        });
        writeln!(out, "{}", css)?;
    }

    Ok(())
}
