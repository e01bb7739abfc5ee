mod debug_report;

use cragfinder::{Corpus, Grade, GradeMatchOptions, Resolver, SearchOptions};
use debug_report::GradeQuery;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const CORPUS_ENV: &str = "CRAGFINDER_CORPUS";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let corpus = match Corpus::load(&config.corpus) {
        Ok(corpus) => corpus,
        Err(err) => {
            eprintln!("error: failed to load corpus '{}': {err}", config.corpus.display());
            std::process::exit(1);
        }
    };

    let resolver = Resolver::new(&corpus);
    let run = resolver.search_verbose(config.input.trim(), &config.options);
    debug_report::print_run(&run, resolver.index(), config.grade.as_ref(), config.color);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false).compact())
        .init();
}

struct CliConfig {
    input: String,
    corpus: PathBuf,
    options: SearchOptions,
    grade: Option<GradeQuery>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut corpus: Option<PathBuf> = std::env::var_os(CORPUS_ENV).map(PathBuf::from);
    let mut options = SearchOptions::default();
    let mut grade: Option<Grade> = None;
    let mut grade_options = GradeMatchOptions::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("cragfinder {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--only-routes" => options.only_routes = true,
            "--only-areas" => options.only_areas = true,
            "--allow-range" => grade_options.allow_range = true,
            "--allow-base" => grade_options.allow_base_only = true,
            "--corpus" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --corpus expects a value".to_string())?;
                corpus = Some(PathBuf::from(value));
            }
            "--location" | "-l" => {
                let value = args.next().ok_or_else(|| "error: --location expects a value".to_string())?;
                options.specific_location = Some(value);
            }
            "--grade" | "-g" => {
                let value = args.next().ok_or_else(|| "error: --grade expects a value".to_string())?;
                grade = Some(parse_grade(&value)?);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--corpus=") => {
                corpus = Some(PathBuf::from(arg.trim_start_matches("--corpus=")));
            }
            _ if arg.starts_with("--location=") => {
                options.specific_location = Some(arg.trim_start_matches("--location=").to_string());
            }
            _ if arg.starts_with("--grade=") => {
                grade = Some(parse_grade(arg.trim_start_matches("--grade="))?);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    if options.only_routes && options.only_areas {
        return Err("error: --only-routes and --only-areas are mutually exclusive".to_string());
    }

    let corpus =
        corpus.ok_or_else(|| format!("error: no corpus given (use --corpus or {CORPUS_ENV})\n\n{}", help_text()))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let grade = grade.map(|grade| GradeQuery { grade, options: grade_options });
    Ok(CliConfig { input, corpus, options, grade, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_grade(value: &str) -> Result<Grade, String> {
    value.parse::<Grade>().map_err(|err| format!("error: invalid --grade '{value}': {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "cragfinder {version}

Resolve free text to a climbing area or route.

Usage:
  cragfinder --corpus <file> [OPTIONS] [--] <query...>

Options:
  -c, --corpus <file>        JSON corpus of root areas. Default: ${corpus_env}
  -l, --location <text>      Only accept matches under an area matching <text>.
                             The query is not split into subject and location.
  --only-routes              Only return routes.
  --only-areas               Only return areas.
  -g, --grade <SYSTEM:VALUE> Check the result's grades, e.g. YDS:5.10a or V:v4-5.
  --allow-range              Let a grade match a range or +/- grade covering it.
  --allow-base               Let a grade match on its base alone (5.10, V4).
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

The query is read from stdin when no arguments are given.
Set RUST_LOG=cragfinder=debug to trace decomposition and ranking.

Exit codes:
  0  Success.
  1  Corpus could not be loaded.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        corpus_env = CORPUS_ENV
    )
}
