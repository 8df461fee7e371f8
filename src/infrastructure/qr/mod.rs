//! QR encoding backed by the `qrcode` crate.

mod qrcode_encoder;

pub use qrcode_encoder::QrCodeEncoder;
