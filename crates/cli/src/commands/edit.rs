// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edit an existing entry (same-day only)

use anyhow::Result;

use crate::client::DaemonClient;

#[derive(clap::Args)]
pub struct EditArgs {
    /// Entry date (YYYY-MM-DD, default: today)
    pub date: Option<String>,

    /// New title
    #[arg(short, long)]
    pub title: String,

    /// New content (markdown); read from stdin when omitted
    #[arg(short, long)]
    pub message: Option<String>,
}

pub async fn handle(client: &DaemonClient, token: &str, args: EditArgs) -> Result<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
    let content = super::read_content(args.message)?;

    let entry = client
        .update_entry(token, &date, &args.title, &content)
        .await?;
    println!("Updated entry for {}", entry.date);

    Ok(())
}
