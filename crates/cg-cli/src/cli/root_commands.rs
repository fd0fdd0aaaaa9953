use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, FarmCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, register, log out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Upload leaf images and print the diagnosis for each.
    Predict(PredictArgs),
    /// Register the farms your predictions come from.
    Farm {
        #[command(subcommand)]
        action: FarmCommands,
    },
    /// Show the preview reference for an image without uploading it.
    Preview(PreviewArgs),
    /// List alerts raised by your past predictions.
    Alerts,
    /// Check that the backend is reachable.
    Health,
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// Image files, submitted one after another.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
    /// Crop the leaf came from.
    #[arg(long, default_value = "")]
    pub crop_type: String,
    /// Where the crop is grown.
    #[arg(long, default_value = "")]
    pub location: String,
    /// Also write the diagnosed results as an HTML page to this file.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct PreviewArgs {
    /// Image file to preview.
    pub image: PathBuf,
    /// Open the image in the system viewer.
    #[arg(long)]
    pub open: bool,
}
