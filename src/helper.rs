use crate::config::RenderConfig;
use crate::document::{Document, SvgDocument};
use crate::dot::DotRenderer;
use crate::error::Result;
use crate::figure::Element;
use crate::grid::ModuleGrid;
use crate::raster::rasterize;

use image::{ImageBuffer, Luma};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Side length of the rendered image in pixels, border included.
///
/// Saturates at `u32::MAX` for settings that bypassed
/// [`OutputConfig::validate`](crate::config::OutputConfig::validate).
pub fn image_size(grid: &ModuleGrid, config: &RenderConfig) -> u32 {
	let size = u32::try_from(grid.size()).unwrap_or(u32::MAX);
	let modules = size.saturating_add(config.output.border.saturating_mul(2));
	modules.saturating_mul(config.output.module_size)
}

/// Draws every dark module of the grid with a fresh renderer.
///
/// Modules are visited in row-major order, which the morse style relies on
/// to commit each dash from its leftmost or topmost module.
///
/// # Arguments
///
/// * `grid` - The module matrix to draw.
/// * `config` - Dot style and output geometry.
///
/// # Returns
///
/// One element per dark module, in pixel coordinates of the bordered image.
pub fn render_elements(grid: &ModuleGrid, config: &RenderConfig) -> Vec<Element> {
	let options = config.dots.options();
	let mut renderer = match config.dots.seed {
		Some(seed) => DotRenderer::with_seed(options, seed),
		None => DotRenderer::new(options),
	};
	let size = f64::from(config.output.module_size);
	let border = f64::from(config.output.border);

	let mut elements: Vec<Element> = Vec::new();
	for cell in grid.dark_cells() {
		let x = (f64::from(cell.col) + border) * size;
		let y = (f64::from(cell.row) + border) * size;
		renderer.draw_into(&mut elements, x, y, size, &grid.neighbors(cell), Some(cell));
	}
	debug!(
		"rendered {} modules as {} dots ({} line decisions)",
		elements.len(),
		renderer.dot_type(),
		renderer.decisions().len()
	);
	elements
}

/// Returns a string of SVG code for an image depicting the given grid.
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Example
///
/// ```
/// use qidots::config::RenderConfig;
/// use qidots::dot::DotType;
/// use qidots::grid::ModuleGrid;
/// use qidots::helper::to_svg_string;
///
/// let grid = ModuleGrid::from_rows(&["#.", "##"]).unwrap();
/// let svg = to_svg_string(&grid, &RenderConfig::with_dot_type(DotType::Rounded));
/// assert!(svg.contains("<path d="));
/// ```
pub fn to_svg_string(grid: &ModuleGrid, config: &RenderConfig) -> String {
	let side = f64::from(image_size(grid, config));
	let mut document = SvgDocument::new(side, side);
	for element in render_elements(grid, config) {
		document.attach(element);
	}
	document.to_svg_string()
}

/// Rasterizes the grid into an in-memory grayscale image.
///
/// # Returns
///
/// An `ImageBuffer` with dark modules in black on a white background.
pub fn to_image_buffer(grid: &ModuleGrid, config: &RenderConfig) -> ImageBuffer<Luma<u8>, Vec<u8>> {
	let side = image_size(grid, config);
	let elements = render_elements(grid, config);
	rasterize(&elements, side, side, config.output.supersample)
}

// Resolves the output path, creating the directory if it doesn't exist.
fn output_path(
	config: &RenderConfig,
	directory: Option<&str>,
	filename: Option<&str>,
	extension: &str,
) -> Result<PathBuf> {
	let directory = directory.unwrap_or(&config.output.directory);
	let filename = match filename {
		Some(name) => name.to_string(),
		None => {
			let since_the_epoch = SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.unwrap_or_default();
			format!("{}", since_the_epoch.as_millis())
		}
	};

	if !Path::new(directory).exists() {
		fs::create_dir_all(directory)?;
	}
	Ok(Path::new(directory).join(format!("{}.{}", filename, extension)))
}

/// Renders the grid to an SVG file and saves it.
///
/// # Arguments
///
/// * `grid` - The module matrix to draw.
/// * `config` - Dot style and output geometry.
/// * `directory` - Optional. Falls back to `config.output.directory`.
/// * `filename` - Optional, without extension. A timestamp is used if not provided.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn save_svg(
	grid: &ModuleGrid,
	config: &RenderConfig,
	directory: Option<&str>,
	filename: Option<&str>,
) -> Result<PathBuf> {
	let path = output_path(config, directory, filename, "svg")?;
	fs::write(&path, to_svg_string(grid, config))?;
	info!("saved {}", path.display());
	Ok(path)
}

/// Renders the grid to a PNG image and saves it.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created, or an
/// `image::ImageError` if encoding or writing the image fails.
pub fn save_png(
	grid: &ModuleGrid,
	config: &RenderConfig,
	directory: Option<&str>,
	filename: Option<&str>,
) -> Result<PathBuf> {
	let path = output_path(config, directory, filename, "png")?;
	to_image_buffer(grid, config).save(&path)?;
	info!("saved {}", path.display());
	Ok(path)
}

// Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::dot::DotType;
	use crate::figure::Shape;

	fn finder_like() -> ModuleGrid {
		ModuleGrid::from_rows(&[
			"#####..",
			"#...#.#",
			"#.#.#..",
			"#...#.#",
			"#####.#",
			"......#",
			"##.#..#",
		])
		.unwrap()
	}

	fn seeded(dot_type: DotType) -> RenderConfig {
		let mut config = RenderConfig::with_dot_type(dot_type);
		config.dots.seed = Some(1234);
		config
	}

	#[test]
	fn test_image_size_includes_border() {
		let config = RenderConfig::default();
		assert_eq!(image_size(&finder_like(), &config), (7 + 8) * 10);
	}

	#[test]
	fn test_image_size_saturates_on_unchecked_settings() {
		let mut config = RenderConfig::default();
		config.output.border = 2_147_483_648;
		assert_eq!(image_size(&finder_like(), &config), u32::MAX);

		config.output.border = 4;
		config.output.module_size = u32::MAX;
		assert_eq!(image_size(&finder_like(), &config), u32::MAX);
	}

	#[test]
	fn test_render_elements_one_per_dark_module() {
		let grid = finder_like();
		for dot_type in DotType::ALL {
			let elements = render_elements(&grid, &seeded(dot_type));
			assert_eq!(elements.len(), grid.dark_cells().count(), "{}", dot_type);
		}
	}

	#[test]
	fn test_square_elements_are_offset_by_border() {
		let grid = ModuleGrid::from_rows(&["#.", ".."]).unwrap();
		let elements = render_elements(&grid, &RenderConfig::default());
		assert_eq!(elements, vec![Element::rect(40.0, 40.0, 10.0, 10.0)]);
	}

	#[test]
	fn test_seeded_morse_is_reproducible() {
		let grid = finder_like();
		let config = seeded(DotType::Morse);
		assert_eq!(render_elements(&grid, &config), render_elements(&grid, &config));
	}

	#[test]
	fn test_to_svg_string() {
		let svg = to_svg_string(&finder_like(), &seeded(DotType::Dots));

		assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
		assert!(svg.contains("viewBox=\"0 0 150 150\""));
		assert_eq!(svg.matches("<circle ").count(), finder_like().dark_cells().count());
	}

	#[test]
	fn test_morse_svg_has_no_rotations() {
		let svg = to_svg_string(&finder_like(), &seeded(DotType::Morse));
		assert!(!svg.contains("transform="));
	}

	#[test]
	fn test_to_image_buffer() {
		let grid = finder_like();
		let mut config = seeded(DotType::Square);
		config.output.module_size = 2;
		config.output.supersample = 1;
		let img = to_image_buffer(&grid, &config);

		assert_eq!(img.dimensions(), (30, 30));
		// Border stays white, the top-left module is black.
		assert_eq!(img.get_pixel(0, 0)[0], 255);
		assert_eq!(img.get_pixel(8, 8)[0], 0);
		assert_eq!(img.get_pixel(10, 10)[0], 255);
	}

	#[test]
	fn test_dots_image_rounds_module_corners() {
		let grid = ModuleGrid::from_rows(&["#"]).unwrap();
		let mut config = seeded(DotType::Dots);
		config.output.border = 0;
		config.output.supersample = 1;
		let img = to_image_buffer(&grid, &config);
		assert_eq!(img.get_pixel(0, 0)[0], 255);
		assert_eq!(img.get_pixel(5, 5)[0], 0);

		let elements = render_elements(&grid, &config);
		assert!(matches!(elements[0].shape, Shape::Circle { .. }));
	}

	#[test]
	fn test_save_svg_and_png() {
		let _ = env_logger::builder().is_test(true).try_init();
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("out");
		let nested = nested.to_str().unwrap();
		let grid = finder_like();
		let config = seeded(DotType::ClassyRounded);

		let svg_path = save_svg(&grid, &config, Some(nested), Some("styled")).unwrap();
		assert_eq!(svg_path, Path::new(nested).join("styled.svg"));
		let contents = fs::read_to_string(&svg_path).unwrap();
		assert!(contents.ends_with("</svg>\n"));

		let png_path = save_png(&grid, &config, Some(nested), None).unwrap();
		assert_eq!(png_path.extension().and_then(|e| e.to_str()), Some("png"));
		let decoded = image::open(&png_path).unwrap();
		assert_eq!(decoded.width(), image_size(&grid, &config));
	}
}
