use std::path::{Path, PathBuf};

/// Widest separator strip accepted from settings files and the command line.
pub const MAX_MARGIN: u32 = 4096;

/// Viewer settings that persist across sessions.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerSettings {
    /// Width of the white separator strips between tiles, in pixels.
    pub margin: u32,
    /// Requested starting band; clamped to the available range at creation.
    pub initial_band: usize,
    /// Fold pointer coordinates modulo (tile + margin) so every quadrant maps
    /// onto the same tile-local frame.
    pub wrap_padding: bool,
    /// Full length of each cross-marker arm pair, in pixels.
    pub marker_size: u32,
    pub marker_thickness: u32,
    /// Pixel height used for titles and cursor labels.
    pub label_font_px: f32,
    /// Distance of the title baseline from the tile's left and bottom edges.
    pub title_inset: u32,
    /// Cursor label offset: +x, -y from the marker centre.
    pub label_offset: i32,
    /// System font family for overlay text. Empty = built-in fallback list.
    pub font_family: String,
    /// Crop the white border off exported canvases.
    pub trim_export: bool,
    pub always_on_top: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            margin: 16,
            initial_band: 150,
            wrap_padding: true,
            marker_size: 12,
            marker_thickness: 1,
            label_font_px: 14.0,
            title_inset: 10,
            label_offset: 5,
            font_family: String::new(),
            trim_export: true,
            always_on_top: true,
        }
    }
}

impl ViewerSettings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/spectralview/spectralview_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\SpectralView\spectralview_settings.cfg
    /// On macOS:   ~/Library/Application Support/SpectralView/spectralview_settings.cfg
    pub fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()?;
            return Some(PathBuf::from(appdata).join("SpectralView").join("spectralview_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").ok()?;
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("SpectralView")
                    .join("spectralview_settings.cfg"),
            );
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
                .ok()?;
            Some(config_dir.join("spectralview").join("spectralview_settings.cfg"))
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_config_string())
    }

    pub fn to_config_string(&self) -> String {
        format!(
            "margin={}\n\
             initial_band={}\n\
             wrap_padding={}\n\
             marker_size={}\n\
             marker_thickness={}\n\
             label_font_px={}\n\
             title_inset={}\n\
             label_offset={}\n\
             font_family={}\n\
             trim_export={}\n\
             always_on_top={}\n",
            self.margin,
            self.initial_band,
            self.wrap_padding,
            self.marker_size,
            self.marker_thickness,
            self.label_font_px,
            self.title_inset,
            self.label_offset,
            self.font_family,
            self.trim_export,
            self.always_on_top,
        )
    }

    /// Parse `key=value` lines. Unknown keys are skipped, bad values keep the default.
    pub fn parse(content: &str) -> Self {
        let mut s = Self::default();
        let d = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let val = val.trim();
            match key.trim() {
                "margin" => {
                    s.margin = val.parse().ok().filter(|m| *m <= MAX_MARGIN).unwrap_or(d.margin)
                }
                "initial_band" => s.initial_band = val.parse().unwrap_or(d.initial_band),
                "wrap_padding" => s.wrap_padding = val == "true",
                "marker_size" => s.marker_size = val.parse().unwrap_or(d.marker_size),
                "marker_thickness" => {
                    s.marker_thickness = val.parse().unwrap_or(d.marker_thickness).max(1)
                }
                "label_font_px" => {
                    s.label_font_px = val
                        .parse::<f32>()
                        .ok()
                        .filter(|v| v.is_finite() && *v > 0.0)
                        .unwrap_or(d.label_font_px)
                }
                "title_inset" => s.title_inset = val.parse().unwrap_or(d.title_inset),
                "label_offset" => s.label_offset = val.parse().unwrap_or(d.label_offset),
                "font_family" => s.font_family = val.to_string(),
                "trim_export" => s.trim_export = val == "true",
                "always_on_top" => s.always_on_top = val == "true",
                _ => {}
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_string_parses_back_to_same_settings() {
        let mut s = ViewerSettings::default();
        s.margin = 8;
        s.wrap_padding = false;
        s.font_family = "DejaVu Sans".to_string();
        assert_eq!(ViewerSettings::parse(&s.to_config_string()), s);
    }

    #[test]
    fn saved_file_loads_back() {
        let path = std::env::temp_dir()
            .join(format!("spectralview_cfg_{}", std::process::id()))
            .join("settings.cfg");
        let mut s = ViewerSettings::default();
        s.trim_export = false;
        s.marker_size = 20;
        s.save_to(&path).unwrap();
        assert_eq!(ViewerSettings::load_from(&path), s);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/spectralview/settings.cfg");
        assert_eq!(ViewerSettings::load_from(path), ViewerSettings::default());
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let s = ViewerSettings::parse("margin=wide\nlabel_font_px=-3\nmystery=1\n# margin=2\n");
        assert_eq!(s.margin, 16);
        assert_eq!(s.label_font_px, 14.0);
    }

    #[test]
    fn oversized_margin_falls_back_to_default() {
        assert_eq!(ViewerSettings::parse("margin=4294967295").margin, 16);
        assert_eq!(ViewerSettings::parse("margin=4097").margin, 16);
        assert_eq!(ViewerSettings::parse("margin=4096").margin, MAX_MARGIN);
    }

    #[test]
    fn thickness_is_at_least_one() {
        let s = ViewerSettings::parse("marker_thickness=0");
        assert_eq!(s.marker_thickness, 1);
    }
}
