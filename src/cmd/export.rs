//! Export command: render the (optionally filtered) graph to a file or stdout.

use super::{load_snapshot, ConnectionArgs};
use crate::graph::OutputFormat;
use anyhow::Result;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

pub fn run(
    connection: ConnectionArgs,
    output: Option<PathBuf>,
    format: Option<String>,
    filter: String,
) -> Result<()> {
    let format = if let Some(ref f) = format {
        f.parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("{}", e))?
    } else if let Some(ref out) = output {
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    } else {
        OutputFormat::default()
    };

    let config = connection.resolve()?;
    let snapshot = load_snapshot(&config)?;
    let view = snapshot.view(&filter);
    let content = format.render(&view);

    match output {
        Some(ref out_path) => {
            let mut file = File::create(out_path)?;
            file.write_all(content.as_bytes())?;
            eprintln!(
                "Wrote {} ({} tables, {} relationships) to {}",
                format,
                view.table_count(),
                view.edge_count(),
                out_path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
