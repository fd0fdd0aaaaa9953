use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::shown;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct HealthResponse {
    base_url: String,
    variant: String,
    status: String,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client();
    let spinner = Progress::spinner("Checking backend...");
    let result = client.health().await;
    spinner.finish_clear();
    let health = result.map_err(|error| shown(&error))?;

    output(
        &HealthResponse {
            base_url: client.base_url().to_string(),
            variant: client.variant().to_string(),
            status: health.status,
        },
        flags.format,
    )
}
