//! codefocus - walk through code one highlighted step at a time

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use codefocus::{Config, Engine, Painter, Result, SyntaxManager, Tutorial};
use log::info;

/// Parsed command line
struct Args {
    tutorial: PathBuf,
    dim_background: Option<bool>,
    /// 1-based chapter filter
    chapter: Option<usize>,
    /// 1-based step filter within each chapter
    step: Option<usize>,
}

fn main() {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => return,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try `codefocus --help` for usage");
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Parse arguments; `Ok(None)` means help or version was printed
fn parse_args(args: impl Iterator<Item = String>) -> std::result::Result<Option<Args>, String> {
    let mut tutorial = None;
    let mut dim_background = None;
    let mut chapter = None;
    let mut step = None;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--no-dim" => dim_background = Some(false),
            "--step" => step = Some(parse_number(&arg, args.next())?),
            "--chapter" => chapter = Some(parse_number(&arg, args.next())?),
            _ if arg.starts_with('-') => return Err(format!("unknown option `{}`", arg)),
            _ if tutorial.is_some() => return Err(format!("unexpected argument `{}`", arg)),
            _ => tutorial = Some(PathBuf::from(arg)),
        }
    }

    let tutorial = tutorial.ok_or_else(|| "no tutorial file given".to_string())?;
    Ok(Some(Args {
        tutorial,
        dim_background,
        chapter,
        step,
    }))
}

/// Parse the 1-based number following `flag`
fn parse_number(flag: &str, value: Option<String>) -> std::result::Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} needs a number", flag))?;
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("{} expects a number from 1, got `{}`", flag, value)),
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load();
    let dim_background = args.dim_background.unwrap_or(config.dim_background);

    let tutorial = Tutorial::load(&args.tutorial, &config.defaults)?;
    info!(
        "{} chapters, {} steps",
        tutorial.chapters.len(),
        tutorial.step_count()
    );

    let syntax = SyntaxManager::new()?;
    let engine = Engine::new(&syntax, &syntax, config.defaults.background);
    let stdout = io::stdout();
    let mut painter = Painter::new(stdout.lock(), config.tab_width);

    if let Some(title) = &tutorial.title {
        painter.caption(title)?;
        painter.line("")?;
    }

    for (ci, chapter) in tutorial.chapters.iter().enumerate() {
        if args.chapter.is_some_and(|n| n != ci + 1) {
            continue;
        }
        painter.caption(&format!("{}. {}", ci + 1, chapter.title))?;

        for (si, step) in chapter.steps.iter().enumerate() {
            if args.step.is_some_and(|n| n != si + 1) {
                continue;
            }
            let rendering = engine.render(&chapter.code, &step.focuses, dim_background)?;
            painter.caption(&format!("[{}/{}] {}", si + 1, chapter.steps.len(), step.description))?;
            painter.paint(&chapter.code, &rendering)?;
            painter.line("")?;
        }
    }

    painter.flush()
}

fn print_usage() {
    println!("codefocus {} - step-by-step code highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codefocus [OPTIONS] TUTORIAL.toml");
    println!();
    println!("Options:");
    println!("  -h, --help       Show this help message");
    println!("  -V, --version    Show version information");
    println!("      --no-dim     Do not dim text outside the focus");
    println!("      --chapter N  Only show chapter N");
    println!("      --step N     Only show step N of each chapter");
    println!();
    println!("Settings are read from ~/.codefocus.conf; set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("codefocus {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> std::result::Result<Option<Args>, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--no-dim", "--step", "2", "tour.toml"]).unwrap().unwrap();
        assert_eq!(parsed.tutorial, PathBuf::from("tour.toml"));
        assert_eq!(parsed.dim_background, Some(false));
        assert_eq!(parsed.step, Some(2));
        assert_eq!(parsed.chapter, None);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["--step"]).is_err());
        assert!(args(&["--chapter", "0", "t.toml"]).is_err());
        assert!(args(&["--bogus", "t.toml"]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
    }
}
