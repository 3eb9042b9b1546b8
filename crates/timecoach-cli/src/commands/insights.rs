use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InsightsArgs {
    /// Learning blob path override
    #[arg(long)]
    pub learning: Option<PathBuf>,
    /// Emit insights as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InsightsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(args.learning)?;
    let adjuster = super::load_adjuster(&store);
    let insights = adjuster.productivity_insights();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("No insights yet. Track a few completions first.");
        return Ok(());
    }
    for insight in insights {
        println!("- {}", insight.message);
    }
    Ok(())
}
