//! Decoded, box-fitted preview images.
//!
//! Previews are plain straight-alpha RGBA8 buffers so the UI can upload them as a texture
//! without knowing anything about the source format.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// File extensions offered by the image picker.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Does `path` look like an image we can preview (by extension, case-insensitive)?
pub fn is_supported(path: &Path) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)))
}

/// Largest size with the same aspect ratio as `width`×`height` that fits in `max_width`×`max_height`.
///
/// Small images are scaled up, large ones down. Neither side is ever 0.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
	let (width, height) = (width.max(1) as f64, height.max(1) as f64);
	let (max_width, max_height) = (max_width.max(1), max_height.max(1));
	let scale = (max_width as f64 / width).min(max_height as f64 / height);

	let fit = |v: f64, max: u32| ((v * scale).round() as u32).clamp(1, max);
	(fit(width, max_width), fit(height, max_height))
}

/// RGBA8 image already scaled into its preview box.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
	width: u32,
	height: u32,
	rgba: Vec<u8>,
}

impl Preview {
	/// Decode an encoded image (PNG, JPEG, BMP) and scale it into `max_width`×`max_height`.
	pub fn from_bytes(bytes: &[u8], max_width: u32, max_height: u32) -> Result<Self> {
		let decoded = image::load_from_memory(bytes).context("decode image")?.to_rgba8();
		let (width, height) = decoded.dimensions();
		if width == 0 || height == 0 {
			bail!("image has no pixels ({width}x{height})");
		}

		let (dst_width, dst_height) = fit_within(width, height, max_width, max_height);
		if (dst_width, dst_height) == (width, height) {
			return Ok(Self {
				width,
				height,
				rgba: decoded.into_raw(),
			});
		}

		let src = fast_image_resize::images::Image::from_vec_u8(
			width,
			height,
			decoded.into_raw(),
			fast_image_resize::PixelType::U8x4,
		)
		.context("wrap decoded pixels")?;
		let mut dst = fast_image_resize::images::Image::new(dst_width, dst_height, fast_image_resize::PixelType::U8x4);

		let options = fast_image_resize::ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
			fast_image_resize::FilterType::CatmullRom,
		));
		fast_image_resize::Resizer::new()
			.resize(&src, &mut dst, &options)
			.context("resize preview")?;

		Ok(Self {
			width: dst_width,
			height: dst_height,
			rgba: dst.into_vec(),
		})
	}

	pub fn from_path(path: impl AsRef<Path>, max_width: u32, max_height: u32) -> Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
		Self::from_bytes(&bytes, max_width, max_height).with_context(|| format!("preview {}", path.display()))
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Tightly packed `width * height * 4` bytes.
	pub fn rgba(&self) -> &[u8] {
		&self.rgba
	}

	pub fn size(&self) -> [usize; 2] {
		[self.width as usize, self.height as usize]
	}
}

impl std::fmt::Debug for Preview {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Preview")
			.field("width", &self.width)
			.field("height", &self.height)
			.finish_non_exhaustive()
	}
}
