// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Show the writing streak

use anyhow::Result;

use crate::client::DaemonClient;
use crate::output::{print_json, OutputFormat};

#[derive(clap::Args)]
pub struct StreakArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn handle(client: &DaemonClient, token: &str, args: StreakArgs) -> Result<()> {
    let streak = client.streak(token).await?;

    match args.format {
        OutputFormat::Json => print_json(&streak)?,
        OutputFormat::Text => {
            println!("Current streak: {}", days(streak.current_streak));
            println!("Longest streak: {}", days(streak.longest_streak));
            match &streak.last_entry_date {
                Some(date) => println!("Last entry: {}", date),
                None => println!("Last entry: -"),
            }
        }
    }

    Ok(())
}

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
