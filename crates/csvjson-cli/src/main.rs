use std::fs::File;
use std::io::{BufRead, BufReader, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "csvjson-cli",
    about = "Convert CSVJSON (comma-separated JSON literals) to JSON",
    version
)]
struct Args {
    /// Treat every line as data (no header row)
    #[arg(long)]
    headerless: bool,

    /// Allow arrays and objects as cell values
    #[arg(long)]
    containers: bool,

    /// Collect output into a single JSON array instead of JSON Lines
    #[arg(long)]
    array: bool,

    /// Pretty-print the output array (implies --array)
    #[arg(long)]
    pretty: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = csvjson::Options {
        header: !args.headerless,
        containers: args.containers,
    };

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(stdin())),
    };

    if args.array || args.pretty {
        let mut out = Vec::new();
        for entry in csvjson::documents(reader, &options) {
            out.push(serde_json::Value::from(entry?));
        }
        if args.pretty {
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{}", serde_json::to_string(&out)?);
        }
    } else {
        for entry in csvjson::documents(reader, &options) {
            println!("{}", serde_json::to_string(&serde_json::Value::from(entry?))?);
        }
    }

    Ok(())
}
