use anyhow::Context;
use cg_client::load_image;
use cg_core::PreviewState;
use cg_core::predict::preview_image;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PreviewArgs;
use crate::output::output;

#[derive(Serialize)]
struct PreviewResponse {
    image: String,
    mime_type: &'static str,
    bytes: usize,
    preview: PreviewState,
}

pub fn handle(args: &PreviewArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = std::fs::canonicalize(&args.image)
        .with_context(|| format!("cannot read image {}", args.image.display()))?;
    let image =
        load_image(&path).with_context(|| format!("cannot read image {}", path.display()))?;

    if args.open {
        open::that(&path).with_context(|| format!("failed to open {}", path.display()))?;
    }

    output(
        &PreviewResponse {
            image: image.file_name(),
            mime_type: image.mime_type,
            bytes: image.bytes.len(),
            preview: preview_image(Some(&image)),
        },
        flags.format,
    )
}
