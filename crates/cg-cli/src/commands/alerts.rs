use crate::cli::GlobalFlags;
use crate::commands::shared::{require_session, shown};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let marker = require_session(ctx)?;

    let spinner = Progress::spinner("Fetching alerts...");
    let result = ctx.client().alerts(&marker.email).await;
    spinner.finish_clear();

    let alerts = result.map_err(|error| shown(&error))?;
    output(&alerts, flags.format)
}
