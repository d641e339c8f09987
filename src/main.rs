//! Sumsheet - apply cell assignments to a sheet and print display updates.

use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};
use sumsheet_core::{CellKind, CellRef, Sheet, SheetConfig, SheetError};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: sumsheet [OPTIONS] [CELL=INPUT]...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [CELL=INPUT]              Assignment applied in order, e.g. A1=5 B1==A1+2");
    eprintln!("                            An empty INPUT clears the cell");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>       Load sheet settings from a TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  --rows <N>                Number of rows");
    eprintln!("  --cols <N>                Number of columns (max 26)");
    eprintln!("  --max-depth <N>           Recalculation depth limit");
    eprintln!("  -d, --dump                Print every non-blank cell's text at the end");
    eprintln!("  -h, --help                Print help");
}

#[derive(Default)]
struct Options {
    config_file: Option<PathBuf>,
    no_config: bool,
    rows: Option<usize>,
    cols: Option<usize>,
    max_depth: Option<usize>,
    dump: bool,
    assignments: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut opts = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--config" => opts.config_file = Some(PathBuf::from(value(args, &mut i)?)),
            "--no-config" => opts.no_config = true,
            "--rows" => opts.rows = Some(number(args, &mut i)?),
            "--cols" => opts.cols = Some(number(args, &mut i)?),
            "--max-depth" => opts.max_depth = Some(number(args, &mut i)?),
            "-d" | "--dump" => opts.dump = true,
            arg if arg.starts_with('-') => bail!("Unknown option: {}", arg),
            arg => opts.assignments.push(arg.to_string()),
        }
        i += 1;
    }
    Ok(Some(opts))
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn number(args: &[String], i: &mut usize) -> Result<usize> {
    let flag = args[*i].clone();
    let raw = value(args, i)?;
    raw.parse()
        .with_context(|| format!("{} expects a number, got '{}'", flag, raw))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sumsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

fn load_config(opts: &Options) -> Result<SheetConfig> {
    let mut config = match &opts.config_file {
        Some(path) => load_file(path)?,
        None => match user_config_path().filter(|p| !opts.no_config && p.exists()) {
            Some(path) => load_file(&path)?,
            None => SheetConfig::default(),
        },
    };
    if let Some(rows) = opts.rows {
        config.rows = rows;
    }
    if let Some(cols) = opts.cols {
        config.cols = cols;
    }
    if let Some(max_depth) = opts.max_depth {
        config.max_depth = max_depth;
    }
    config.validate()?;
    Ok(config)
}

fn load_file(path: &Path) -> Result<SheetConfig> {
    SheetConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn parse_assignment(assignment: &str) -> Result<(CellRef, &str)> {
    let (name, input) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected CELL=INPUT, got '{}'", assignment))?;
    let cell: CellRef = name.parse().map_err(SheetError::InvalidCellRef)?;
    Ok((cell, input))
}

fn run(opts: Options) -> Result<()> {
    let config = load_config(&opts)?;
    tracing::debug!(rows = config.rows, cols = config.cols, "sheet configured");

    let mut sheet = Sheet::with_sink(config, |cell: &CellRef, text: &str| {
        println!("{}\t{}", cell, text)
    })?;

    for assignment in &opts.assignments {
        let (cell, input) = parse_assignment(assignment)?;
        sheet.set_cell(cell, Some(input));
    }

    if opts.dump {
        let cells: Vec<CellRef> = sheet
            .grid()
            .iter()
            .filter(|(_, c)| c.kind() != CellKind::Blank)
            .map(|(cell_ref, _)| cell_ref)
            .collect();
        for cell in cells {
            println!("{}\t{}", cell, sheet.get_text(&cell));
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
