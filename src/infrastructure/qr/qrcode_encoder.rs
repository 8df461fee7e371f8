//! [`QrEncoder`] implementation using the `qrcode` crate.

use qrcode::{Color, QrCode};

use crate::domain::qr_matrix::{EcLevel, ModuleMatrix, QrEncoder, QrError};

/// Encodes text into a module matrix with the smallest fitting QR version.
///
/// The matrix excludes the quiet zone; the renderer adds its own margin.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrCodeEncoder;

impl QrCodeEncoder {
    pub fn new() -> Self {
        Self
    }
}

fn to_qrcode_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::Low => qrcode::EcLevel::L,
        EcLevel::Medium => qrcode::EcLevel::M,
        EcLevel::Quartile => qrcode::EcLevel::Q,
        EcLevel::High => qrcode::EcLevel::H,
    }
}

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<ModuleMatrix, QrError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), to_qrcode_level(level))
            .map_err(|e| QrError::Encode(e.to_string()))?;

        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        ModuleMatrix::new(size, modules)
    }
}
