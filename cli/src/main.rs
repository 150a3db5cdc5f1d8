mod config;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use fgscript::{Options, TranslateError};

use crate::config::Config;

const SUBCOMMANDS: &[&str] = &["build", "test", "help"];

#[derive(Parser)]
#[command(name = "fgscript", version, about = "FGScript to Flowgorithm translator")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Trace each stage to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate an FGScript file into a Flowgorithm document
    Build(BuildArgs),

    /// Run .test.fgs test files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// FGScript source file
    file: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Translate only, don't write output (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the tokens of every non-blank line
    #[arg(long)]
    tokens: bool,

    /// Accept inputs written for looser revisions of the notation
    #[arg(long)]
    lenient: bool,

    /// Config file (defaults to fgscript.toml next to the source)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.fgs file or directory containing them
    path: PathBuf,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // `fgscript file.fgs` works like `fgscript build file.fgs`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args
        .iter()
        .skip(1)
        .position(|a| !a.starts_with('-'))
        .map(|i| i + 1)
    {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "build".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Build(build_args) => do_build(build_args, cli.no_color, cli.verbose),
        Command::Test(test_args) => {
            if test_args.list_categories {
                test_runner::list_categories(&test_args.path);
                return;
            }
            let exit_code =
                test_runner::run_tests(&test_args.path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn do_build(args: BuildArgs, no_color: bool, verbose: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let display_name = args.file.display().to_string();

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", display_name, e);
            process::exit(1);
        }
    };

    // --tokens: dump and exit
    if args.tokens {
        for (line, tokens) in fgscript::tokenize_source(&source) {
            println!("{}: {:?}", line, tokens);
        }
        return;
    }

    let options = if args.lenient {
        Options::lenient()
    } else {
        match Config::discover(args.config.as_deref(), &args.file) {
            Ok((config, path)) => {
                if verbose {
                    match &path {
                        Some(path) => eprintln!("config: {}", path.display()),
                        None => eprintln!("config: defaults"),
                    }
                }
                config.compat.into()
            }
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    };
    if verbose {
        eprintln!("options: {:?}", options);
    }

    let mut files = SimpleFiles::new();
    let file_id = files.add(display_name.clone(), source.clone());

    let document = match fgscript::translate(&source, file_id, &options) {
        Ok(document) => document,
        Err(error) => {
            emit_translate_error(color_choice, &files, &error);
            process::exit(1);
        }
    };

    if verbose {
        eprintln!(
            "translated {} line(s) into {} byte(s)",
            source.lines().count(),
            document.len()
        );
    }

    // --check: translation succeeded, exit
    if args.check {
        eprintln!("ok: {} translated successfully", display_name);
        return;
    }

    if let Err(e) = write_output(args.output.as_deref(), &document) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn write_output(path: Option<&Path>, document: &str) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, document)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e)),
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("cannot write output: {}", e))
        }
    }
}

fn emit_translate_error(
    color_choice: ColorChoice,
    files: &SimpleFiles<String, String>,
    error: &TranslateError,
) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let diagnostic = error.to_diagnostic();
    if term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic).is_err() {
        eprintln!("error: {}", error);
    }
}
