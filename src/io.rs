use std::path::Path;

use crate::ops::imaging::trim_white;
use crate::viewport::{DisplaySurface, ViewportController};

/// Render the export composite and write it as PNG.
/// Returns the band index the export was taken at.
pub fn export_png<S: DisplaySurface>(
    controller: &ViewportController<S>,
    path: &Path,
    trim: bool,
) -> Result<usize, String> {
    let (canvas, band) = controller.export();
    let canvas = if trim { trim_white(&canvas) } else { canvas };
    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| format!("could not write '{}': {}", path.display(), e))?;
    log_info!("exported '{}' at band {} to {}", controller.name(), band, path.display());
    Ok(band)
}
