// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List diary entries

use anyhow::Result;

use crate::client::DaemonClient;
use crate::output::{print_json, OutputFormat};

#[derive(clap::Args)]
pub struct ListArgs {
    /// Only the entry for this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn handle(client: &DaemonClient, token: &str, args: ListArgs) -> Result<()> {
    let entries = client.list_entries(token, args.date).await?;

    match args.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No entries");
            } else {
                println!("{:<12} TITLE", "DATE");
                for entry in &entries {
                    println!("{:<12} {}", entry.date, entry.title);
                }
            }
        }
    }

    Ok(())
}
