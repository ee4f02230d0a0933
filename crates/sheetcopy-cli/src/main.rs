//! sheetcopy CLI - copy and inspect XLSX workbooks

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetcopy::CopyOptions;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "sheetcopy")]
#[command(author, version, about = "Copy and inspect XLSX workbooks")]
struct Cli {
    /// Configuration file (default: ./sheetcopy.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory relative document paths are resolved against
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy every sheet of a workbook into a new file
    Copy {
        /// Existing workbook to copy from
        source: PathBuf,

        /// New workbook to create (overwritten if it exists)
        destination: PathBuf,

        /// Copy shared-text indices as-is when the source has no shared string table
        #[arg(long)]
        lenient: bool,
    },

    /// Print the value of one cell
    Get {
        /// Input workbook
        input: PathBuf,

        /// Sheet name
        sheet: String,

        /// Cell address (e.g. B7)
        address: String,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },

    /// Print every cell of a sheet in document order
    Read {
        /// Input workbook
        input: PathBuf,

        /// Sheet name
        sheet: String,
    },

    /// Create a new workbook with a single empty sheet
    Create {
        /// Workbook to create
        output: PathBuf,
    },

    /// Append a new sheet to a workbook
    AddSheet {
        /// Workbook to modify
        input: PathBuf,
    },

    /// Write text values into a sheet
    Insert {
        /// Workbook to modify
        input: PathBuf,

        /// Sheet name
        sheet: String,

        /// Cells as ADDRESS=VALUE (e.g. B7=hello)
        #[arg(required = true)]
        cells: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.dir {
        config.directory = Some(dir);
    }

    match cli.command {
        Commands::Copy {
            source,
            destination,
            lenient,
        } => copy(
            &config.resolve_path(&source),
            &config.resolve_path(&destination),
            lenient || config.lenient_shared_text,
        ),
        Commands::Get {
            input,
            sheet,
            address,
        } => get(&config.resolve_path(&input), &sheet, &address),
        Commands::Sheets { input } => list_sheets(&config.resolve_path(&input)),
        Commands::Read { input, sheet } => read(&config.resolve_path(&input), &sheet),
        Commands::Create { output } => create(&config.resolve_path(&output)),
        Commands::AddSheet { input } => add_sheet(&config.resolve_path(&input)),
        Commands::Insert {
            input,
            sheet,
            cells,
        } => insert(&config.resolve_path(&input), &sheet, &cells),
    }
}

fn copy(source: &Path, destination: &Path, lenient: bool) -> Result<()> {
    let options = CopyOptions {
        lenient_shared_text: lenient,
    };
    let stats = sheetcopy::copy_workbook_with(destination, source, &options).with_context(|| {
        format!("Failed to copy '{}' to '{}'", source.display(), destination.display())
    })?;

    eprintln!(
        "Copied {} sheets ({} cells) to '{}'",
        stats.sheets,
        stats.cells,
        destination.display()
    );
    Ok(())
}

fn get(input: &Path, sheet: &str, address: &str) -> Result<()> {
    let value = sheetcopy::get_cell(input, sheet, address)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    match value {
        Some(value) => println!("{}", value),
        None => eprintln!("{}!{} is empty", sheet, address),
    }
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let sheets = sheetcopy::list_sheets(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (id, name) in sheets {
        println!("{}\t{}", id, name);
    }
    Ok(())
}

fn read(input: &Path, sheet: &str) -> Result<()> {
    let cells = sheetcopy::read_cells(input, sheet)
        .with_context(|| format!("Failed to read sheet '{}' of '{}'", sheet, input.display()))?;

    for (reference, value) in cells {
        println!("{}\t{}", reference, value);
    }
    Ok(())
}

fn create(output: &Path) -> Result<()> {
    sheetcopy::create_workbook(output)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;
    eprintln!("Created '{}'", output.display());
    Ok(())
}

fn add_sheet(input: &Path) -> Result<()> {
    let (id, name) = sheetcopy::add_worksheet(input)
        .with_context(|| format!("Failed to add a sheet to '{}'", input.display()))?;
    println!("{}\t{}", id, name);
    Ok(())
}

fn insert(input: &Path, sheet: &str, cells: &[String]) -> Result<()> {
    let (addresses, values) = parse_assignments(cells)?;
    let written = sheetcopy::insert_values(input, sheet, &addresses, &values)
        .with_context(|| format!("Failed to write to '{}'", input.display()))?;
    eprintln!("Wrote {} cells to '{}'", written, sheet);
    Ok(())
}

/// Split `ADDRESS=VALUE` arguments into parallel address and value lists
fn parse_assignments(cells: &[String]) -> Result<(Vec<&str>, Vec<&str>)> {
    let mut addresses = Vec::with_capacity(cells.len());
    let mut values = Vec::with_capacity(cells.len());

    for cell in cells {
        let Some((address, value)) = cell.split_once('=') else {
            bail!("Expected ADDRESS=VALUE, got '{}'", cell);
        };
        addresses.push(address);
        values.push(value);
    }

    Ok((addresses, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignments() {
        let cells = vec!["B7=hello".to_string(), "A1=x=y".to_string(), "C2=".to_string()];
        let (addresses, values) = parse_assignments(&cells).unwrap();
        assert_eq!(addresses, ["B7", "A1", "C2"]);
        assert_eq!(values, ["hello", "x=y", ""]);

        assert!(parse_assignments(&["B7".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_copy() {
        let cli = Cli::try_parse_from([
            "sheetcopy",
            "--dir",
            "/data",
            "copy",
            "Hello.xlsx",
            "CopyOfHello.xlsx",
        ])
        .unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/data")));
        assert!(matches!(cli.command, Commands::Copy { lenient: false, .. }));
    }
}
