//! OCR via the tesseract CLI

use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::OcrConfig;
use crate::error::{Error, Result};

use super::ocr::OcrProvider;

/// OCR provider backed by the `tesseract` binary.
///
/// Image bytes are piped through stdin/stdout, no temp files. Tesseract
/// decodes the image itself (PNG/JPEG and friends).
pub struct TesseractOcr {
    config: OcrConfig,
}

impl TesseractOcr {
    /// Create a new tesseract-backed OCR provider
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }
}

impl OcrProvider for TesseractOcr {
    fn extract_text(&self, image: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.config.tesseract_bin)
            .args(["stdin", "stdout", "-l", self.config.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ocr(format!("Failed to spawn tesseract: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image)
                .map_err(|e| Error::ocr(format!("Failed to write image to tesseract: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::ocr(format!("Failed to read tesseract output: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.config.tesseract_bin)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
