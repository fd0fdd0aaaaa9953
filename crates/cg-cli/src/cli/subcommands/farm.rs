use clap::{Args, Subcommand};

/// Farm commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FarmCommands {
    /// Register a farm under the logged-in account.
    Add(FarmAddArgs),
}

#[derive(Clone, Debug, Args)]
pub struct FarmAddArgs {
    /// Crop grown on the farm.
    #[arg(long)]
    pub crop_type: String,
    /// Sowing date, YYYY-MM-DD.
    #[arg(long)]
    pub sow_date: String,
    /// Where the farm is.
    #[arg(long, default_value = "")]
    pub location: String,
}
