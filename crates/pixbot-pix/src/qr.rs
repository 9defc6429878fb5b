// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! QR rendering of payloads as PNG images.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::PixError;

/// Default side length in pixels.
pub const DEFAULT_WIDTH: u32 = 300;

/// Renders `payload` as a square black-on-white PNG at least `width` pixels wide.
///
/// Modules are scaled by whole pixels, so the image may come out slightly
/// larger than requested.
pub fn render_qr_png(payload: &str, width: u32) -> Result<Vec<u8>, PixError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| PixError::Render(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(width, width)
        .quiet_zone(true)
        .build();

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| PixError::Render(e.to_string()))?;

    tracing::debug!(
        side = image.width(),
        bytes = png.get_ref().len(),
        "rendered QR code"
    );
    Ok(png.into_inner())
}
