// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write today's diary entry

use anyhow::Result;

use crate::client::DaemonClient;

#[derive(clap::Args)]
pub struct WriteArgs {
    /// Entry title
    #[arg(short, long)]
    pub title: String,

    /// Entry content (markdown); read from stdin when omitted
    #[arg(short, long)]
    pub message: Option<String>,

    /// Entry date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
}

pub async fn handle(client: &DaemonClient, token: &str, args: WriteArgs) -> Result<()> {
    let content = super::read_content(args.message)?;

    let entry = client
        .create_entry(token, &args.title, &content, args.date)
        .await?;
    println!("Saved entry for {}", entry.date);

    let streak = client.streak(token).await?;
    match streak.current_streak {
        1 => println!("Streak: 1 day"),
        n => println!("Streak: {} days", n),
    }

    Ok(())
}
