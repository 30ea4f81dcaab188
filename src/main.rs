//! hilite - highlight source files as HTML or terminal text

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use crossterm::queue;
use crossterm::style::PrintStyledContent;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use hilite::blocks;
use hilite::config::{Config, OutputFormat};
use hilite::syntax::{Highlighter, Language, Span};
use hilite::{HighlightError, Result};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    lang: Option<String>,
    format: Option<OutputFormat>,
    decorate: bool,
    pre: bool,
    list: bool,
    help: bool,
    version: bool,
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` directives, falling back to warnings when unset or empty
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    if args.help {
        print_usage();
        return Ok(());
    }
    if args.version {
        print_version();
        return Ok(());
    }

    let mut config = Config::load()?;
    if args.decorate {
        config.decorate_colors = true;
    }
    if args.pre {
        config.wrap_in_pre = true;
    }
    let format = args.format.unwrap_or(config.format);
    let highlighter = config.highlighter();

    if args.list {
        for name in highlighter.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let source = read_source(args.file.as_ref())?;

    if format == OutputFormat::Blocks {
        for token in blocks::tokenize_text(&source) {
            println!("{:?}", token);
        }
        return Ok(());
    }

    let language = resolve_language(&highlighter, &args)?;
    debug!(language = language.name(), ?format, "highlighting");

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Html => {
            writeln!(stdout, "{}", highlighter.highlight_language(&source, language))?;
        }
        OutputFormat::Ansi => print_ansi(&mut stdout, &config, &language.lex(&source))?,
        OutputFormat::Spans => {
            for span in language.lex(&source) {
                writeln!(stdout, "{}\t{:?}", span.class.name(), span.raw_text())?;
            }
        }
        OutputFormat::Blocks => {}
    }
    stdout.flush()?;
    Ok(())
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--help" | "-h" => args.help = true,
            "--version" | "-V" => args.version = true,
            "--list" => args.list = true,
            "--decorate" => args.decorate = true,
            "--pre" => args.pre = true,
            "--lang" | "-l" => {
                let tag = argv
                    .next()
                    .ok_or_else(|| HighlightError::Usage(format!("{} needs a language", arg)))?;
                args.lang = Some(tag);
            }
            "--format" | "-f" => {
                let name = argv
                    .next()
                    .ok_or_else(|| HighlightError::Usage(format!("{} needs a format", arg)))?;
                let format = OutputFormat::from_name(&name)
                    .ok_or_else(|| HighlightError::Usage(format!("unknown format: {}", name)))?;
                args.format = Some(format);
            }
            "-" => args.file = None,
            _ if arg.starts_with('-') => {
                return Err(HighlightError::Usage(format!("unknown option: {}", arg)));
            }
            _ => {
                if args.file.is_some() {
                    return Err(HighlightError::Usage("only one input file".to_string()));
                }
                args.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(args)
}

fn read_source(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn resolve_language(highlighter: &Highlighter, args: &Args) -> Result<Language> {
    if let Some(tag) = &args.lang {
        return highlighter.resolve(tag);
    }
    args.file
        .as_deref()
        .and_then(|path| highlighter.detect_language(path))
        .ok_or_else(|| HighlightError::Usage("cannot detect language, use --lang".to_string()))
}

fn print_ansi(out: &mut impl Write, config: &Config, spans: &[Span]) -> Result<()> {
    for span in spans {
        let style = config.style_for(span.class).to_content_style();
        queue!(out, PrintStyledContent(style.apply(span.raw_text())))?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_usage() {
    println!("hilite {} - syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hilite [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or standard input when no file is given.");
    println!();
    println!("Options:");
    println!("  -l, --lang TAG      Language tag (bash, css, html, js, json, ...)");
    println!("  -f, --format FMT    Output format: html, ansi, spans, blocks");
    println!("      --decorate      Add swatches after hex colours");
    println!("      --pre           Wrap HTML in <pre><code>");
    println!("      --list          List supported languages");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!();
    println!("Settings are read from ~/.hilite.toml");
    println!("Set RUST_LOG=debug to trace language resolution");
}

fn print_version() {
    println!("hilite {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["-l", "sh", "--format", "ansi", "--pre", "run.sh"]).unwrap();
        assert_eq!(parsed.lang.as_deref(), Some("sh"));
        assert_eq!(parsed.format, Some(OutputFormat::Ansi));
        assert!(parsed.pre);
        assert!(!parsed.decorate);
        assert_eq!(parsed.file, Some(PathBuf::from("run.sh")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(args(&["--lang"]), Err(HighlightError::Usage(_))));
        assert!(matches!(args(&["-f", "pdf"]), Err(HighlightError::Usage(_))));
        assert!(matches!(args(&["--bogus"]), Err(HighlightError::Usage(_))));
        assert!(matches!(args(&["a", "b"]), Err(HighlightError::Usage(_))));
    }

    #[test]
    fn test_resolve_language_from_extension() {
        let highlighter = Highlighter::new();
        let parsed = args(&["style.css"]).unwrap();
        assert_eq!(resolve_language(&highlighter, &parsed).unwrap(), Language::Css);
        let parsed = args(&["notes"]).unwrap();
        assert!(resolve_language(&highlighter, &parsed).is_err());
    }

    #[test]
    fn test_log_filter_honours_directives() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("hilite=trace")).max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_print_ansi_keeps_text() {
        let mut out = Vec::new();
        let spans = Language::Bash.lex("echo <b>");
        print_ansi(&mut out, &Config::default(), &spans).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("echo"));
        assert!(text.contains('<'));
        assert!(!text.contains("&lt;"));
        assert!(text.ends_with('\n'));
    }
}
