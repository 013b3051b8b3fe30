//! gradfs CLI - Main binary entry point

use gradfs::cli::args::{CatArgs, CleanArgs, Command, ListArgs, TailArgs, WalkArgs, parse_args};
use gradfs::cli::output::{format_json, format_node};
use gradfs::services::clean::CleanFile;
use gradfs::services::lines::{LineSource, rstrip, strip_both, tail};
use gradfs::services::sink::{Init, SinkConfig, auto_save};
use gradfs::{Error, Node, list_children, walk};
use std::io::{self, Write};
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug gradfs walk .
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let exit_code = match &cli_args.command {
        Command::Ls(ls_args) => handle_ls(ls_args),
        Command::Walk(walk_args) => handle_walk(walk_args),
        Command::Cat(cat_args) => handle_cat(cat_args),
        Command::Tail(tail_args) => handle_tail(tail_args),
        Command::Clean(clean_args) => handle_clean(clean_args),
    };

    process::exit(exit_code);
}

fn exit_code_for(e: &Error) -> i32 {
    match e {
        Error::Validation(_) => 2,
        _ => 4,
    }
}

fn report(e: &Error) -> i32 {
    eprintln!("Error: {e}");
    exit_code_for(e)
}

/// Pull every node, reporting errors as they come. Returns the error count.
fn drain<I>(iter: I, nodes: &mut Vec<Node>) -> usize
where
    I: Iterator<Item = gradfs::Result<Node>>,
{
    let mut errors = 0;
    for item in iter {
        match item {
            Ok(node) => nodes.push(node),
            Err(e) => {
                eprintln!("Warning: {e}");
                errors += 1;
            }
        }
    }
    errors
}

fn traversal_exit_code(nodes: usize, errors: usize) -> i32 {
    match (nodes, errors) {
        (_, 0) => 0,
        (0, _) => 4, // nothing readable at all, most likely a bad root
        _ => 3,      // partial failure
    }
}

fn print_nodes(root: &str, nodes: &[Node], errors: usize, json: bool) {
    if json {
        println!("{}", format_json(root, nodes, errors));
    } else {
        for node in nodes {
            println!("{}", format_node(node));
        }
    }
}

fn handle_ls(args: &ListArgs) -> i32 {
    let children = match list_children(&args.path, args.filter.yield_filter()) {
        Ok(c) => c,
        Err(e) => return report(&e),
    };

    let mut nodes = Vec::new();
    let errors = drain(children, &mut nodes);
    print_nodes(&args.path, &nodes, errors, args.json);
    traversal_exit_code(nodes.len(), errors)
}

fn handle_walk(args: &WalkArgs) -> i32 {
    let walker = match walk(
        &args.path,
        args.filter.yield_filter(),
        args.filter.descend_filter(),
    ) {
        Ok(w) => w,
        Err(e) => return report(&e),
    };

    let Some(out) = args.out.as_deref() else {
        let mut nodes = Vec::new();
        let errors = drain(walker, &mut nodes);
        print_nodes(&args.path, &nodes, errors, args.json);
        return traversal_exit_code(nodes.len(), errors);
    };

    let config: SinkConfig<Vec<Node>> = if args.json {
        SinkConfig::json_pretty(Init::default())
    } else {
        SinkConfig::new(Init::default(), format_node)
    };

    let result = auto_save(out, config, |nodes: &mut Vec<Node>| -> gradfs::Result<_> {
        let errors = drain(walker, nodes);
        Ok((nodes.len(), errors))
    });

    match result {
        Ok((count, errors)) => {
            eprintln!("Saved {count} entries to {out}");
            traversal_exit_code(count, errors)
        }
        Err(e) => report(&e),
    }
}

fn write_lines<I>(lines: I) -> gradfs::Result<()>
where
    I: Iterator<Item = gradfs::Result<String>>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line?)?;
    }
    Ok(())
}

fn handle_cat(args: &CatArgs) -> i32 {
    let source = match LineSource::open(&args.path) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };
    let source = if args.strip_both {
        source.with_transform(strip_both)
    } else {
        source.with_transform(rstrip)
    };

    let result = if args.skip_blank {
        write_lines(source.select(|line: String| (!line.is_empty()).then_some(line)))
    } else {
        write_lines(source)
    };

    match result {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn handle_tail(args: &TailArgs) -> i32 {
    match tail(&args.path, args.lines) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Err(e) => report(&e),
    }
}

fn handle_clean(args: &CleanArgs) -> i32 {
    let strip = args.strip_both;
    let mapfn = move |line: String| {
        if strip {
            strip_both(&line)
        } else {
            rstrip(&line)
        }
    };

    let cleaned = match CleanFile::open(&args.path, &args.options, mapfn) {
        Ok(c) => c,
        Err(e) => return report(&e),
    };

    let destination = cleaned.destination().map(|d| d.display().to_string());
    match destination {
        Some(dest) => {
            let count = cleaned.lines().len();
            match cleaned.close() {
                Ok(()) => {
                    eprintln!("Saved {count} lines to {dest}");
                    0
                }
                Err(e) => report(&e),
            }
        }
        None => {
            for line in cleaned.lines() {
                println!("{line}");
            }
            0
        }
    }
}

fn print_help() {
    println!("gradfs - Walk directories, read lines and save results");
    println!();
    println!("USAGE:");
    println!("    gradfs ls <DIR> [OPTIONS]");
    println!("    gradfs walk <DIR> [OPTIONS]");
    println!("    gradfs cat <FILE> [OPTIONS]");
    println!("    gradfs tail <FILE> [-n <N>]");
    println!("    gradfs clean <FILE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ls        List the immediate children of a directory");
    println!("    walk      List a directory tree breadth-first");
    println!("    cat       Print the lines of a file");
    println!("    tail      Print the last lines of a file");
    println!("    clean     Trim, sort or dedupe the lines of a file");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("LS / WALK OPTIONS:");
    println!("    --ext <EXT>               Only yield files with this extension (repeatable)");
    println!("    --files-only              Only yield files");
    println!("    --dirs-only               Only yield directories");
    println!("    --json                    Emit machine-readable output");
    println!();
    println!("WALK OPTIONS:");
    println!("    --skip-dir <NAME>         Never descend into directories named NAME (repeatable)");
    println!("    --out <FILE>              Save the entries to FILE instead of printing them");
    println!();
    println!("CAT OPTIONS:");
    println!("    --strip-both              Strip leading as well as trailing whitespace");
    println!("    --skip-blank              Omit lines that are empty after stripping");
    println!();
    println!("CLEAN OPTIONS:");
    println!("    --in-place                Write the cleaned lines back to FILE");
    println!("    --save-to <FILE>          Write the cleaned lines to another file");
    println!("    --sort                    Sort the lines");
    println!("    --dedupe                  Drop repeated lines");
    println!("    --drop-blank              Drop blank lines");
    println!("    --strip-both              Strip leading as well as trailing whitespace");
    println!();
    println!("EXAMPLES:");
    println!("    gradfs walk src --ext rs --skip-dir target");
    println!("    gradfs walk . --files-only --out files.txt");
    println!("    gradfs clean words.txt --sort --dedupe --in-place");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("gradfs {VERSION}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
