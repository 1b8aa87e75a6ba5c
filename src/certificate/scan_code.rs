use super::config::ScanCodeConfig;
use image::{DynamicImage, GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{Color, QrCode};
use thiserror::Error;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Largest raster side, in pixels, that will be allocated for a scan code
pub const MAX_SCAN_CODE_SIDE: u32 = 8192;

#[derive(Error, Debug)]
pub enum ScanCodeError {
    #[error("Failed to encode scan code: {0}")]
    Encode(QrError),
    #[error("Scan code raster would be too large ({modules} modules, quiet zone {quiet_zone}, {module_pixels} px per module)")]
    TooLarge {
        modules: u32,
        quiet_zone: u32,
        module_pixels: u32,
    },
}

/// Encode `data` as a black-on-white QR code raster.
///
/// Each module is `module_pixels` square and the code is surrounded by a light
/// quiet zone `quiet_zone` modules wide. Fails when the data doesn't fit in the
/// largest code at the configured error correction level, or when the raster
/// would be more than [`MAX_SCAN_CODE_SIDE`] pixels across.
pub fn encode_scan_code(
    data: &str,
    config: &ScanCodeConfig,
) -> Result<DynamicImage, ScanCodeError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), config.error_correction.into())
        .map_err(ScanCodeError::Encode)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = config.module_pixels.max(1);
    let side = config
        .quiet_zone
        .checked_mul(2)
        .and_then(|border| border.checked_add(module_count))
        .and_then(|span| span.checked_mul(scale))
        .filter(|side| *side <= MAX_SCAN_CODE_SIDE)
        .ok_or(ScanCodeError::TooLarge {
            modules: module_count,
            quiet_zone: config.quiet_zone,
            module_pixels: config.module_pixels,
        })?;
    let mut img = GrayImage::from_pixel(side, side, LIGHT);

    for (i, colour) in modules.iter().enumerate() {
        if *colour != Color::Dark {
            continue;
        }
        let x = (i as u32 % module_count + config.quiet_zone) * scale;
        let y = (i as u32 / module_count + config.quiet_zone) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x + dx, y + dy, DARK);
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}
