use std::path::PathBuf;

use eframe::egui;

use crate::config::ViewerSettings;
use crate::error::ViewError;
use crate::io::export_png;
use crate::surface::{EguiSurface, SurfaceEvent};
use crate::viewport::{PointerEvent, ViewportController};

/// Host loop: forwards surface input to the controller and shows status.
pub struct ViewerApp {
    controller: ViewportController<EguiSurface>,
    settings: ViewerSettings,
    /// Where toggled settings are written back; `None` disables saving.
    settings_path: Option<PathBuf>,
    /// Last message for the status bar (placements, errors, exports).
    status: String,
}

impl ViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        controller: ViewportController<EguiSurface>,
        settings: ViewerSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self::with_controller(controller, settings, settings_path)
    }

    pub fn with_controller(
        controller: ViewportController<EguiSurface>,
        settings: ViewerSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self { controller, settings, settings_path, status: String::new() }
    }

    pub fn set_trim_export(&mut self, trim: bool) {
        self.settings.trim_export = trim;
        self.persist_settings();
    }

    /// Takes effect on the next launch.
    pub fn set_always_on_top(&mut self, on_top: bool) {
        self.settings.always_on_top = on_top;
        self.persist_settings();
    }

    /// Write the toggles back without baking command-line overrides into the file.
    fn persist_settings(&mut self) {
        let Some(path) = &self.settings_path else { return };
        let mut on_disk = ViewerSettings::load_from(path);
        on_disk.trim_export = self.settings.trim_export;
        on_disk.always_on_top = self.settings.always_on_top;
        match on_disk.save_to(path) {
            Ok(()) => {
                log_info!("settings saved to {}", path.display());
                self.status = "Settings saved".to_string();
            }
            Err(e) => {
                log_err!("could not save settings to {}: {}", path.display(), e);
                self.status = format!("Could not save settings: {}", e);
            }
        }
    }

    fn dispatch(&mut self, event: SurfaceEvent) {
        let wrap = self.controller.wrap_padding();
        let result = match event {
            SurfaceEvent::BandChanged(i) => self.controller.band_slider_changed(i).map(|_| None),
            SurfaceEvent::PointerMoved(raw) => self
                .controller
                .handle_pointer(PointerEvent { wrap_padding: wrap, ..PointerEvent::hover(raw) })
                .map(|_| None),
            SurfaceEvent::PointerClicked(raw) => self
                .controller
                .handle_pointer(PointerEvent { wrap_padding: wrap, ..PointerEvent::click(raw) })
                .map(Some),
        };

        match result {
            Ok(Some(update)) => {
                if let (Some(id), Some(pos)) = (update.id, update.position) {
                    self.status = format!("Placed cursor {} at ({}, {})", id, pos.x, pos.y);
                }
            }
            Ok(None) => {}
            Err(ViewError::PoolExhausted) => {
                log_warn!("click ignored: all cursor identifiers are in use");
                self.status = "All cursor identifiers are in use".to_string();
            }
            Err(e) => {
                log_err!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    fn export_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("spectralview_export.png")
            .save_file()
        else {
            return;
        };
        self.status = match export_png(&self.controller, &path, self.settings.trim_export) {
            Ok(band) => format!("Exported band {} to {}", band, path.display()),
            Err(e) => {
                log_err!("{}", e);
                e
            }
        };
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Band {} / {}",
                    self.controller.band(),
                    self.controller.depth().saturating_sub(1)
                ));
                ui.separator();
                ui.label(format!(
                    "Cursors {} ({} left)",
                    self.controller.cursors().len(),
                    self.controller.remaining_ids()
                ));
                ui.separator();
                if ui.button("Export PNG").clicked() {
                    self.export_dialog();
                }
                let mut trim = self.settings.trim_export;
                if ui.checkbox(&mut trim, "Trim").changed() {
                    self.set_trim_export(trim);
                }
                let mut on_top = self.settings.always_on_top;
                if ui
                    .checkbox(&mut on_top, "On top")
                    .on_hover_text("Applies on next launch")
                    .changed()
                {
                    self.set_always_on_top(on_top);
                }
                ui.separator();
                ui.label(self.status.as_str());
            });
        });

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::both()
                    .show(ui, |ui| self.controller.surface_mut().show(ui))
                    .inner
            })
            .inner;

        if !events.is_empty() {
            for event in events {
                self.dispatch(event);
            }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_tiles;
    use crate::viewport::{create_view, ViewOptions};

    fn app(settings_path: Option<PathBuf>) -> ViewerApp {
        let controller =
            create_view("app", demo_tiles(8, 10, 4), EguiSurface::new(), ViewOptions::default()).unwrap();
        ViewerApp::with_controller(controller, ViewerSettings::default(), settings_path)
    }

    #[test]
    fn toggles_are_written_to_the_settings_file() {
        let path = std::env::temp_dir()
            .join(format!("spectralview_app_{}", std::process::id()))
            .join("settings.cfg");
        let mut app = app(Some(path.clone()));
        // A command-line override that must not leak into the file.
        app.settings.margin = 2;

        app.set_trim_export(false);
        app.set_always_on_top(false);
        assert_eq!(app.status, "Settings saved");

        let saved = ViewerSettings::load_from(&path);
        assert!(!saved.trim_export);
        assert!(!saved.always_on_top);
        assert_eq!(saved.margin, ViewerSettings::default().margin);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn without_a_settings_file_toggles_stay_in_memory() {
        let mut app = app(None);
        app.set_trim_export(false);
        assert!(!app.settings.trim_export);
        assert_eq!(app.status, "");
    }

    #[test]
    fn exhausted_pool_is_reported_in_the_status_line() {
        let mut app = app(None);
        for i in 0..26 {
            app.dispatch(SurfaceEvent::PointerClicked((i % 10, i / 10)));
        }
        assert!(app.status.starts_with("Placed cursor A"));
        app.dispatch(SurfaceEvent::PointerClicked((1, 1)));
        assert_eq!(app.status, "All cursor identifiers are in use");
        assert_eq!(app.controller.cursors().len(), 26);
    }
}
