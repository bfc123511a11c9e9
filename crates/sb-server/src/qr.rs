//! QR code rendering for the landing page.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use sb_core::{Error, Result};

/// Pixel size of one QR module.
const MODULE_PX: u32 = 10;

/// Render `data` as a black-on-white PNG QR code with a standard quiet zone.
pub fn qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|e| Error::Internal(format!("QR encoding failed: {e}")))?;

    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(true)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| Error::Internal(format!("PNG encoding failed: {e}")))?;
    Ok(png)
}

/// Render `data` as a QR code and wrap it in a `data:image/png;base64,` URL.
pub fn qr_data_url(data: &str) -> Result<String> {
    let png = qr_png(data)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}
