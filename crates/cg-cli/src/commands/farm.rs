use cg_core::farm::{self, FarmForm};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FarmCommands;
use crate::cli::subcommands::farm::FarmAddArgs;
use crate::commands::shared::{require_session, shown};
use crate::context::AppContext;
use crate::output::output_text;
use crate::progress::Progress;

/// Handle `cropguard farm <subcommand>`.
pub async fn handle(action: &FarmCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FarmCommands::Add(args) => add(args, ctx, flags).await,
    }
}

async fn add(args: &FarmAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let marker = require_session(ctx)?;
    let request = farm::validate(Some(marker.email.as_str()), form(args)).map_err(|error| shown(&error))?;

    let spinner = Progress::spinner("Saving farm...");
    let result = ctx.client().add_farm(&request).await;
    spinner.finish_clear();

    let status = result.map_err(|error| shown(&error))?;
    let text = format!("Farm added: {} sown {}", request.crop_type, request.sow_date);
    output_text(&status, &text, flags.format)
}

fn form(args: &FarmAddArgs) -> FarmForm {
    FarmForm {
        crop_type: args.crop_type.clone(),
        sow_date: args.sow_date.clone(),
        location: args.location.clone(),
    }
}
