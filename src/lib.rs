//! Interactive viewer for multi-band image tiles: a 2×2 composite, band
//! scrubbing, and labelled point annotations placed with the mouse.
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

#[macro_use]
pub mod logger;
pub mod app;
pub mod band;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod demo;
pub mod error;
pub mod grid;
pub mod io;
pub mod ops;
pub mod overlay;
pub mod surface;
pub mod tile;
pub mod viewport;

pub use band::BandSelector;
pub use config::ViewerSettings;
pub use cursor::{Cursor, CursorPos, CursorRegistry, IdentifierPool};
pub use error::ViewError;
pub use grid::GridLayout;
pub use overlay::{Overlay, OverlayStyle};
pub use tile::{BandCube, GridSpec, Tile, TileSource};
pub use viewport::{
    create_view, CursorUpdate, DisplaySurface, HeadlessSurface, Interaction, PointerEvent,
    ViewOptions, ViewportController,
};
