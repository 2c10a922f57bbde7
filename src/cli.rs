// ============================================================================
// SpectralView CLI: window options and headless export
// ============================================================================
//
// Usage examples:
//   spectralview                                   (open the viewer on the demo scene)
//   spectralview --bands 64 --size 256x192 --band 20
//   spectralview --export grid.png --band 40       (no window; write the false-colour grid)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::config::{ViewerSettings, MAX_MARGIN};
use crate::demo::demo_tiles;
use crate::io::export_png;
use crate::ops::text::load_overlay_font;
use crate::overlay::{Overlay, OverlayStyle};
use crate::viewport::{create_view, HeadlessSurface, ViewOptions};

/// Multi-band tile viewer with band scrubbing and point annotations.
#[derive(Parser, Debug, Clone)]
#[command(name = "spectralview", about = "Multi-band image grid viewer")]
pub struct CliArgs {
    /// Tile size as WIDTHxHEIGHT.
    #[arg(long, default_value = "192x160", value_parser = parse_size)]
    pub size: (usize, usize),

    /// Number of spectral bands in the demo scene.
    #[arg(long, default_value_t = 200)]
    pub bands: usize,

    /// Starting band (clamped to the available range).
    #[arg(long)]
    pub band: Option<usize>,

    /// Separator width between tiles in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_MARGIN as i64))]
    pub margin: Option<u32>,

    /// Settings file to use instead of the per-user one.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the false-colour export grid to FILE and exit without a window.
    #[arg(long, value_name = "FILE.png")]
    pub export: Option<PathBuf>,
}

impl CliArgs {
    /// The settings file in use: `--config` if given, else the per-user one.
    pub fn settings_file(&self) -> Option<PathBuf> {
        self.config.clone().or_else(ViewerSettings::settings_path)
    }

    /// Settings from [`settings_file`](Self::settings_file) with CLI overrides applied.
    pub fn settings(&self) -> ViewerSettings {
        let mut settings = match self.settings_file() {
            Some(path) => ViewerSettings::load_from(&path),
            None => ViewerSettings::default(),
        };
        if let Some(band) = self.band {
            settings.initial_band = band;
        }
        if let Some(margin) = self.margin {
            settings.margin = margin;
        }
        settings
    }
}

fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: usize = w.trim().parse().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let h: usize = h.trim().parse().map_err(|e| format!("bad height '{}': {}", h, e))?;
    if w == 0 || h == 0 {
        return Err("tile size must be non-zero".to_string());
    }
    Ok((w, h))
}

/// Build the view off-screen, write the export PNG, and report the result.
pub fn run_export(args: &CliArgs, path: &std::path::Path) -> ExitCode {
    let settings = args.settings();
    let (w, h) = args.size;
    let overlay = Overlay::new(
        OverlayStyle::from_settings(&settings),
        load_overlay_font(&settings.font_family),
    );
    let options = ViewOptions::from_settings(&settings).with_overlay(overlay);

    let view = match create_view("SpectralView", demo_tiles(h, w, args.bands), HeadlessSurface::default(), options) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {}", e);
            log_err!("headless view failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match export_png(&view, path, settings.trim_export) {
        Ok(band) => {
            println!("exported band {} -> {}", band, path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            log_err!("{}", e);
            ExitCode::FAILURE
        }
    }
}
