//! CLI argument parsing

use crate::services::clean::CleanOptions;
use crate::{FilterOptions, KindFilter};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Ls(ListArgs),
    Walk(WalkArgs),
    Cat(CatArgs),
    Tail(TailArgs),
    Clean(CleanArgs),
}

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub path: String,
    pub filter: FilterOptions,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WalkArgs {
    pub path: String,
    pub filter: FilterOptions,
    pub out: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CatArgs {
    pub path: String,
    pub strip_both: bool,
    pub skip_blank: bool,
}

#[derive(Debug, Clone)]
pub struct TailArgs {
    pub path: String,
    pub lines: usize,
}

impl Default for TailArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            lines: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanArgs {
    pub path: String,
    pub options: CleanOptions,
    pub strip_both: bool,
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let rest = &args[2..];
    let command = match args[1].as_str() {
        "ls" => Command::Ls(parse_list_args(rest)?),
        "walk" => Command::Walk(parse_walk_args(rest)?),
        "cat" => Command::Cat(parse_cat_args(rest)?),
        "tail" => Command::Tail(parse_tail_args(rest)?),
        "clean" => Command::Clean(parse_clean_args(rest)?),
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn set_positional(slot: &mut String, arg: &str) -> Result<(), String> {
    if slot.is_empty() {
        *slot = arg.to_string();
        Ok(())
    } else {
        Err(format!("Unexpected argument: {arg}"))
    }
}

/// Handle a filter flag shared by `ls` and `walk`. Returns false if `args[*i]`
/// is not a filter flag.
fn parse_filter_flag(
    args: &[String],
    i: &mut usize,
    filter: &mut FilterOptions,
    allow_skip_dir: bool,
) -> Result<bool, String> {
    match args[*i].as_str() {
        "--ext" => {
            let ext = take_value(args, i, "--ext")?;
            filter.extensions.push(ext.to_string());
        }
        "--files-only" | "--dirs-only" => {
            let kind = if args[*i] == "--files-only" {
                KindFilter::FilesOnly
            } else {
                KindFilter::DirsOnly
            };
            if filter.kind != KindFilter::Any && filter.kind != kind {
                return Err("--files-only and --dirs-only are mutually exclusive".to_string());
            }
            filter.kind = kind;
        }
        "--skip-dir" if allow_skip_dir => {
            let name = take_value(args, i, "--skip-dir")?;
            filter.skip_dirs.push(name.to_string());
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_list_args(args: &[String]) -> Result<ListArgs, String> {
    let mut list_args = ListArgs::default();
    let mut i = 0;

    while i < args.len() {
        if parse_filter_flag(args, &mut i, &mut list_args.filter, false)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--json" => list_args.json = true,
            arg if !arg.starts_with("--") => set_positional(&mut list_args.path, arg)?,
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if list_args.path.is_empty() {
        return Err("Missing required argument: DIR".to_string());
    }

    Ok(list_args)
}

fn parse_walk_args(args: &[String]) -> Result<WalkArgs, String> {
    let mut walk_args = WalkArgs::default();
    let mut i = 0;

    while i < args.len() {
        if parse_filter_flag(args, &mut i, &mut walk_args.filter, true)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--json" => walk_args.json = true,
            "--out" => walk_args.out = Some(take_value(args, &mut i, "--out")?.to_string()),
            arg if !arg.starts_with("--") => set_positional(&mut walk_args.path, arg)?,
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if walk_args.path.is_empty() {
        return Err("Missing required argument: DIR".to_string());
    }

    Ok(walk_args)
}

fn parse_cat_args(args: &[String]) -> Result<CatArgs, String> {
    let mut cat_args = CatArgs::default();

    for arg in args {
        match arg.as_str() {
            "--strip-both" => cat_args.strip_both = true,
            "--skip-blank" => cat_args.skip_blank = true,
            arg if !arg.starts_with("--") => set_positional(&mut cat_args.path, arg)?,
            _ => return Err(format!("Unknown option: {arg}")),
        }
    }

    if cat_args.path.is_empty() {
        return Err("Missing required argument: FILE".to_string());
    }

    Ok(cat_args)
}

fn parse_tail_args(args: &[String]) -> Result<TailArgs, String> {
    let mut tail_args = TailArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--lines" => {
                tail_args.lines = take_value(args, &mut i, "-n")?
                    .parse()
                    .map_err(|_| "-n must be a number".to_string())?;
            }
            arg if !arg.starts_with('-') => set_positional(&mut tail_args.path, arg)?,
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if tail_args.path.is_empty() {
        return Err("Missing required argument: FILE".to_string());
    }

    Ok(tail_args)
}

fn parse_clean_args(args: &[String]) -> Result<CleanArgs, String> {
    let mut clean_args = CleanArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--save-to" => {
                let dest = take_value(args, &mut i, "--save-to")?;
                clean_args.options.save_to = Some(PathBuf::from(dest));
                clean_args.options.save_back = true;
            }
            "--in-place" => clean_args.options.save_back = true,
            "--sort" => clean_args.options.sort = true,
            "--dedupe" => clean_args.options.dedupe = true,
            "--drop-blank" => clean_args.options.drop_blank = true,
            "--strip-both" => clean_args.strip_both = true,
            arg if !arg.starts_with("--") => set_positional(&mut clean_args.path, arg)?,
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if clean_args.path.is_empty() {
        return Err("Missing required argument: FILE".to_string());
    }

    Ok(clean_args)
}
