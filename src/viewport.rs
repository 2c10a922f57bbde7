// ============================================================================
// VIEWPORT CONTROLLER: owns selector, registry and display surface
// ============================================================================

use image::RgbImage;

use crate::band::BandSelector;
use crate::config::ViewerSettings;
use crate::cursor::{Cursor, CursorPos, CursorRegistry, IdentifierPool};
use crate::error::ViewError;
use crate::grid::{self, GridLayout};
use crate::ops::spectral::{default_spectral_map, SpectralMap};
use crate::overlay::{Overlay, OverlayStyle};
use crate::tile::{GridSpec, Tile};

/// Slider range handed to the surface when the view opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderSpec {
    pub max: usize,
    pub value: usize,
}

/// Where rendered frames go. Implemented by the egui window and by
/// [`HeadlessSurface`].
pub trait DisplaySurface {
    /// Called once while the view is created.
    fn open(&mut self, title: &str, slider: SliderSpec);
    /// Called on every render with a fresh composite.
    fn present(&mut self, frame: RgbImage, band: usize);
}

/// Keeps the last presented frame in memory.
#[derive(Default)]
pub struct HeadlessSurface {
    pub title: String,
    pub slider: Option<SliderSpec>,
    pub frames_presented: usize,
    pub last_frame: Option<RgbImage>,
    pub last_band: Option<usize>,
}

impl DisplaySurface for HeadlessSurface {
    fn open(&mut self, title: &str, slider: SliderSpec) {
        self.title = title.to_string();
        self.slider = Some(slider);
    }

    fn present(&mut self, frame: RgbImage, band: usize) {
        self.frames_presented += 1;
        self.last_frame = Some(frame);
        self.last_band = Some(band);
    }
}

/// Hover state derived from the preview marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Hovering(CursorPos),
}

/// Outcome of a pointer update: the identifier issued (on confirmation) and
/// the normalized in-bounds position, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorUpdate {
    pub id: Option<String>,
    pub position: Option<CursorPos>,
}

/// Pointer input as the surface reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    /// Canvas pixel coordinate; `None` when the pointer left the image.
    pub raw: Option<(i32, i32)>,
    pub confirm: bool,
    pub wrap_padding: bool,
}

impl PointerEvent {
    pub fn hover(raw: Option<(i32, i32)>) -> Self {
        Self { raw, confirm: false, wrap_padding: true }
    }

    pub fn click(raw: (i32, i32)) -> Self {
        Self { raw: Some(raw), confirm: true, wrap_padding: true }
    }
}

/// Observer run after every successfully handled pointer event.
pub type PointerHook = Box<dyn FnMut(&PointerEvent, &CursorUpdate)>;

/// Construction parameters for [`create_view`].
pub struct ViewOptions {
    pub margin: u32,
    pub initial_band: usize,
    pub wrap_padding: bool,
    pub identifier_pool: IdentifierPool,
    /// Band count for grids made only of producer tiles.
    pub depth_hint: Option<usize>,
    pub overlay: Overlay,
    pub spectral_map: SpectralMap,
    pub pointer_hook: Option<PointerHook>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_settings(&ViewerSettings::default())
    }
}

impl ViewOptions {
    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self {
            margin: settings.margin,
            initial_band: settings.initial_band,
            wrap_padding: settings.wrap_padding,
            identifier_pool: IdentifierPool::alphabet(),
            depth_hint: None,
            overlay: Overlay::new(OverlayStyle::from_settings(settings), None),
            spectral_map: default_spectral_map(),
            pointer_hook: None,
        }
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_identifier_pool(mut self, pool: IdentifierPool) -> Self {
        self.identifier_pool = pool;
        self
    }

    pub fn with_depth_hint(mut self, depth: usize) -> Self {
        self.depth_hint = Some(depth);
        self
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_spectral_map(mut self, map: impl Fn(&crate::tile::BandCube) -> RgbImage + 'static) -> Self {
        self.spectral_map = Box::new(map);
        self
    }

    pub fn with_pointer_hook(mut self, hook: impl FnMut(&PointerEvent, &CursorUpdate) + 'static) -> Self {
        self.pointer_hook = Some(Box::new(hook));
        self
    }
}

/// Validate `tiles`, open `surface` with a band slider, and draw the first frame.
pub fn create_view<S: DisplaySurface>(
    name: &str,
    tiles: Vec<Tile>,
    mut surface: S,
    options: ViewOptions,
) -> Result<ViewportController<S>, ViewError> {
    let grid = GridSpec::new(tiles, options.depth_hint)?;
    let layout = GridLayout::new(grid.width(), grid.height(), options.margin)?;
    let selector = BandSelector::new(grid.depth(), options.initial_band);

    surface.open(name, SliderSpec { max: selector.max(), value: selector.get() });
    log_info!(
        "view '{}' opened: 4 tiles {}x{}, {} bands, margin {}, starting band {}",
        name,
        grid.width(),
        grid.height(),
        grid.depth(),
        options.margin,
        selector.get()
    );

    let mut controller = ViewportController {
        name: name.to_string(),
        grid,
        layout,
        registry: CursorRegistry::new(options.identifier_pool),
        selector,
        surface,
        overlay: options.overlay,
        spectral_map: options.spectral_map,
        wrap_padding: options.wrap_padding,
        pointer_hook: options.pointer_hook,
    };
    controller.present();
    Ok(controller)
}

/// Event-driven owner of the viewer's interaction state.
///
/// All mutation goes through `&mut self`, so callers on several threads must
/// serialize access themselves.
pub struct ViewportController<S: DisplaySurface> {
    name: String,
    grid: GridSpec,
    layout: GridLayout,
    registry: CursorRegistry,
    selector: BandSelector,
    surface: S,
    overlay: Overlay,
    spectral_map: SpectralMap,
    wrap_padding: bool,
    pointer_hook: Option<PointerHook>,
}

impl<S: DisplaySurface> ViewportController<S> {
    // ---- embedding contract -------------------------------------------------

    /// Composite the current band (or the false-colour export when `export`).
    /// The band is returned only in export mode.
    pub fn rasterize(&self, export: bool) -> (RgbImage, Option<usize>) {
        grid::rasterize(
            &self.grid,
            &self.layout,
            self.selector.get(),
            export,
            &self.spectral_map,
            &self.overlay,
            self.registry.confirmed(),
            self.registry.preview(),
        )
    }

    /// Redraw, optionally selecting band `index` first.
    pub fn render(&mut self, index: Option<usize>) -> Result<(), ViewError> {
        if let Some(i) = index {
            self.selector.set(i)?;
        }
        self.present();
        Ok(())
    }

    /// Slider callback.
    pub fn band_slider_changed(&mut self, index: usize) -> Result<(), ViewError> {
        self.selector.set(index)?;
        log_info!("band -> {}", index);
        self.present();
        Ok(())
    }

    /// Move the preview to `raw` (normalized with `wrap_padding`) and, when
    /// `confirm` is set and the point lands inside a tile, place a cursor there.
    ///
    /// A confirmation with no identifiers left fails with `PoolExhausted`
    /// before anything is changed or redrawn.
    pub fn update_cursor(
        &mut self,
        raw: Option<(i32, i32)>,
        confirm: bool,
        wrap_padding: bool,
    ) -> Result<CursorUpdate, ViewError> {
        let inside = raw
            .map(|p| self.layout.normalize(p, wrap_padding))
            .and_then(|(x, y)| self.layout.contains(x, y));

        let mut id = None;
        if let Some(pos) = inside
            && confirm
        {
            let issued = self.registry.confirm(pos)?;
            log_info!("cursor {} confirmed at ({}, {})", issued, pos.x, pos.y);
            id = Some(issued);
        }
        self.registry.set_preview(inside);
        self.present();

        Ok(CursorUpdate { id, position: inside })
    }

    /// [`update_cursor`](Self::update_cursor) with the view's default wrap mode.
    pub fn pointer_move(&mut self, raw: Option<(i32, i32)>, confirm: bool) -> Result<CursorUpdate, ViewError> {
        self.update_cursor(raw, confirm, self.wrap_padding)
    }

    /// Apply a surface pointer event and notify the pointer hook.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<CursorUpdate, ViewError> {
        let update = self.update_cursor(event.raw, event.confirm, event.wrap_padding)?;
        if let Some(hook) = self.pointer_hook.as_mut() {
            hook(&event, &update);
        }
        Ok(update)
    }

    /// False-colour composite plus the band index at the time of the call.
    /// Nothing visible on the surface changes.
    pub fn export(&self) -> (RgbImage, usize) {
        let band = self.selector.get();
        let (canvas, _) = self.rasterize(true);
        log_info!("export at band {} ({}x{})", band, canvas.width(), canvas.height());
        (canvas, band)
    }

    // ---- state queries ------------------------------------------------------

    pub fn interaction(&self) -> Interaction {
        match self.registry.preview() {
            Some(pos) => Interaction::Hovering(pos),
            None => Interaction::Idle,
        }
    }

    pub fn cursors(&self) -> &[Cursor] {
        self.registry.confirmed()
    }

    pub fn preview(&self) -> Option<CursorPos> {
        self.registry.preview()
    }

    pub fn remaining_ids(&self) -> usize {
        self.registry.remaining()
    }

    pub fn band(&self) -> usize {
        self.selector.get()
    }

    pub fn depth(&self) -> usize {
        self.selector.depth()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrap_padding(&self) -> bool {
        self.wrap_padding
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn present(&mut self) {
        let (frame, _) = self.rasterize(false);
        self.surface.present(frame, self.selector.get());
    }
}
