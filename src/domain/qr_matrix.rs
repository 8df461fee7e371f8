//! QR module matrix and the encoder contract.
//!
//! Encoding (Reed–Solomon, masking, version selection) happens outside this
//! crate's logic; the renderer only consumes the resulting grid.

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    Low,
    Medium,
    Quartile,
    High,
}

/// Errors raised while producing a module matrix.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("Module matrix of size {size} needs {expected} cells, got {actual}")]
    InvalidMatrix {
        size: usize,
        expected: usize,
        actual: usize,
    },
}

/// Square grid of QR modules, row-major. `true` marks a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Wraps a row-major module vector.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidMatrix`] if `modules.len() != size * size`.
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self, QrError> {
        let expected = size * size;
        if modules.len() != expected {
            return Err(QrError::InvalidMatrix {
                size,
                expected,
                actual: modules.len(),
            });
        }
        Ok(Self { size, modules })
    }

    /// Builds a matrix by evaluating `dark(row, col)` for every cell.
    pub fn from_fn(size: usize, dark: impl Fn(usize, usize) -> bool) -> Self {
        let modules = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .map(|(row, col)| dark(row, col))
            .collect();
        Self { size, modules }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over the coordinates of every dark module in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(|(i, _)| (i / self.size, i % self.size))
    }
}

/// Produces a module matrix for a piece of text.
///
/// # Implementations
///
/// - [`crate::infrastructure::qr::QrCodeEncoder`] - backed by the `qrcode` crate
#[cfg_attr(test, mockall::automock)]
pub trait QrEncoder: Send + Sync {
    fn encode(&self, text: &str, level: EcLevel) -> Result<ModuleMatrix, QrError>;
}
