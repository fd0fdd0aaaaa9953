use std::path::Path;

use anyhow::Context;
use cg_client::{PredictFlow, load_image};
use cg_core::render::{html_report, result_card};
use cg_core::{Diagnosis, PredictForm, PredictPanel, RecentResults};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::PredictArgs;
use crate::commands::shared::require_session;
use crate::context::AppContext;
use crate::output::{output, output_text};
use crate::progress::Progress;

#[derive(Serialize)]
struct PredictResponse<'a> {
    image: String,
    diagnosis: &'a Diagnosis,
}

pub async fn handle(args: &PredictArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let marker = require_session(ctx)?;
    let flow = PredictFlow::new(ctx.client());
    let mut panel = PredictPanel::new(RecentResults::new(ctx.config().general.recent_limit));
    let total = args.images.len();
    let mut failed = 0usize;
    let mut diagnosed = Vec::new();

    for path in &args.images {
        match submit_one(&flow, &mut panel, &marker.email, args, path).await {
            Ok(diagnosis) => {
                print_diagnosis(path, &diagnosis, total > 1, flags)?;
                diagnosed.push((path.display().to_string(), diagnosis));
            }
            Err(message) => {
                if total == 1 {
                    anyhow::bail!("{message}");
                }
                eprintln!("{}: {message}", path.display());
                failed += 1;
            }
        }
    }

    if total > 1 {
        if flags.format == OutputFormat::Table {
            println!("\nRecent results");
        }
        output(&panel.recent().to_vec(), flags.format)?;
    }

    if let Some(report) = &args.html
        && !diagnosed.is_empty()
    {
        write_report(report, &diagnosed)?;
        if !flags.quiet {
            eprintln!("HTML report written to {}", report.display());
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {total} predictions failed");
    }
    Ok(())
}

/// Load and submit one image. Failures come back as the message to show for
/// that image so the rest of the batch still runs.
async fn submit_one(
    flow: &PredictFlow<'_>,
    panel: &mut PredictPanel,
    session_email: &str,
    args: &PredictArgs,
    path: &Path,
) -> Result<Diagnosis, String> {
    let image =
        load_image(path).map_err(|e| format!("cannot read image {}: {e}", path.display()))?;
    panel.select_image(Some(&image));

    let form = PredictForm {
        email: String::new(),
        crop_type: args.crop_type.clone(),
        location: args.location.clone(),
        image: Some(image),
    };

    let spinner = Progress::spinner(&format!(
        "{} {}",
        panel.control().busy_label(),
        path.display()
    ));
    let result = flow.submit(panel, Some(session_email), form).await;
    spinner.finish_clear();

    result.map_err(|error| {
        panel
            .error()
            .unwrap_or_else(|| error.user_message())
            .to_string()
    })
}

fn write_report(report: &Path, diagnosed: &[(String, Diagnosis)]) -> anyhow::Result<()> {
    let page = html_report(diagnosed.iter().map(|(image, d)| (image.as_str(), d)));
    std::fs::write(report, page)
        .with_context(|| format!("cannot write HTML report {}", report.display()))
}

fn print_diagnosis(
    path: &Path,
    diagnosis: &Diagnosis,
    with_heading: bool,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let image = path.display().to_string();
    let card = if with_heading {
        format!("== {image} ==\n{}\n", result_card(diagnosis))
    } else {
        result_card(diagnosis)
    };
    output_text(&PredictResponse { image, diagnosis }, &card, flags.format)
}
