//! OCR provider trait

use crate::error::Result;

/// Trait for optical character recognition over image bytes.
///
/// Implementations:
/// - `TesseractOcr`: the tesseract CLI, piped through stdin/stdout
pub trait OcrProvider: Send + Sync {
    /// Run OCR over an encoded image and return whatever text the engine
    /// finds. Recognition quality is entirely delegated; no preprocessing.
    fn extract_text(&self, image: &[u8]) -> Result<String>;

    /// Check if the engine is installed and usable
    fn is_available(&self) -> bool;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
