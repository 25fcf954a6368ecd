//! # qidots
//!
//! A Rust library for drawing the modules of a QR code as stylized vector shapes.
//!
//! `qidots` takes an already encoded module matrix and decides, module by module, which outline
//! to draw: a plain square, a circle, a shape with rounded sides or corners facing away from its
//! dark neighbors, or "morse" dashes that join straight runs of modules. The result is a list of
//! SVG-ready elements that can be serialized as an SVG document or rasterized into an image.
//!
//! ## Features
//!
//! - Seven dot styles: `dots`, `square`, `rounded`, `extra-rounded`, `classy`, `classy-rounded`
//!   and `morse`.
//! - Scale factor for spacing between modules, clamped to `0.1..=1.0`.
//! - Morse dashes with a write-once decision cache and an injectable random tie-break.
//! - Render to SVG strings, in-memory image buffers, or files.
//! - TOML configuration.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qidots = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Draw a single module:
//!
//! ```rust
//! use qidots::dot::{DotOptions, DotRenderer, DotType};
//! use qidots::grid::ModuleGrid;
//! use qidots::morse::Cell;
//!
//! let grid = ModuleGrid::from_rows(&["##.", "#..", "..."]).unwrap();
//! let mut renderer = DotRenderer::new(DotOptions::new(DotType::ExtraRounded).with_scale(0.9));
//!
//! let cell = Cell::new(0, 0);
//! let element = renderer.draw(0.0, 0.0, 10.0, &grid.neighbors(cell), Some(cell));
//! println!("{}", element.to_svg());
//! ```
//!
//! Render a whole matrix:
//!
//! ```rust
//! use qidots::config::RenderConfig;
//! use qidots::dot::DotType;
//! use qidots::grid::ModuleGrid;
//! use qidots::helper::{to_image_buffer, to_svg_string};
//!
//! let grid = ModuleGrid::from_rows(&["#.#", ".#.", "###"]).unwrap();
//! let mut config = RenderConfig::with_dot_type(DotType::Morse);
//! config.dots.seed = Some(7);
//!
//! let svg = to_svg_string(&grid, &config);
//! assert!(svg.ends_with("</svg>\n"));
//!
//! let img = to_image_buffer(&grid, &config);
//! assert_eq!(img.dimensions(), (110, 110));
//! ```
//!
//! ## Modules
//!
//! - [`dot`]: Style dispatch and the module renderer.
//! - [`morse`]: Line decisions for the morse style.
//! - [`figure`]: Elements and basic shape primitives.
//! - [`helper`]: Utilities for rendering whole matrices in various formats.
//! - [`config`]: TOML configuration.

#![forbid(unsafe_code)]

pub mod config;
pub mod document;
pub mod dot;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod grid;
pub mod helper;
pub mod morse;
pub mod neighbors;
pub mod path;
pub mod raster;

pub use error::{Error, Result};
