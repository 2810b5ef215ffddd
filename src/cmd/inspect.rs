//! Inspect command: print the detail and related-tables panels for one table.

use super::{load_snapshot, ConnectionArgs};
use crate::ui::{format_related_tables, format_table_details};
use anyhow::{bail, Result};

pub fn run(connection: ConnectionArgs, table: String) -> Result<()> {
    let config = connection.resolve()?;
    let snapshot = load_snapshot(&config)?;

    let Some(found) = snapshot.table(&table) else {
        bail!("unknown table: {}", table);
    };

    println!("{}", format_table_details(found));
    println!();
    println!("Related tables");
    println!("==============");
    println!("{}", format_related_tables(&snapshot, &found.name));
    Ok(())
}
