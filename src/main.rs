use clap::Parser;
use eframe::egui;

use spectralview::app::ViewerApp;
use spectralview::cli::{self, CliArgs};
use spectralview::demo::demo_tiles;
use spectralview::ops::text::load_overlay_font;
use spectralview::surface::EguiSurface;
use spectralview::{create_view, log_info, Overlay, OverlayStyle, ViewOptions};

fn main() -> std::process::ExitCode {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    spectralview::logger::init();

    // -- Headless export -----------------------------------------------
    if let Some(path) = args.export.clone() {
        return cli::run_export(&args, &path);
    }

    // -- GUI mode -------------------------------------------------------
    let settings = args.settings();
    let settings_file = args.settings_file();
    let (w, h) = args.size;
    let overlay = Overlay::new(
        OverlayStyle::from_settings(&settings),
        load_overlay_font(&settings.font_family),
    );
    if !overlay.has_font() {
        eprintln!("warning: no system font found; titles and labels will not be drawn");
    }
    let options = ViewOptions::from_settings(&settings)
        .with_overlay(overlay)
        .with_pointer_hook(|event, update| {
            if let (true, Some(id), Some(pos)) = (event.confirm, &update.id, update.position) {
                println!("{} {} {}", id, pos.x, pos.y);
            }
        });

    let controller = match create_view("SpectralView", demo_tiles(h, w, args.bands), EguiSurface::new(), options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let (cw, ch) = controller.layout().canvas_size();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([cw as f32 + 32.0, ch as f32 + 96.0])
        .with_title(controller.surface().title());
    if settings.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    let native = eframe::NativeOptions { viewport, ..Default::default() };

    log_info!("starting GUI");
    let result = eframe::run_native(
        "SpectralView",
        native,
        Box::new(move |cc| Box::new(ViewerApp::new(cc, controller, settings, settings_file))),
    );
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
