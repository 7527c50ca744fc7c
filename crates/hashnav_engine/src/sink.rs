/// The content region could not be located; the document is assumed
/// corrupted and only the static crash page remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("content region not found in document")]
pub struct RenderTargetMissingError;

/// The single content region pages render into.
pub trait ContentSink {
    /// Replaces everything in the region.
    fn replace(&mut self, html: &str) -> Result<(), RenderTargetMissingError>;
    /// Appends one block to the region.
    fn append(&mut self, html: &str) -> Result<(), RenderTargetMissingError>;
}

/// In-memory content region: the shipping implementation for the terminal
/// shell, and the double router tests render into.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    blocks: Vec<String>,
    detached: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the render target disappearing from the document.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn html(&self) -> String {
        self.blocks.join("\n")
    }

    fn target(&mut self) -> Result<&mut Vec<String>, RenderTargetMissingError> {
        if self.detached {
            Err(RenderTargetMissingError)
        } else {
            Ok(&mut self.blocks)
        }
    }
}

impl ContentSink for MemorySink {
    fn replace(&mut self, html: &str) -> Result<(), RenderTargetMissingError> {
        let blocks = self.target()?;
        blocks.clear();
        if !html.is_empty() {
            blocks.push(html.to_string());
        }
        Ok(())
    }

    fn append(&mut self, html: &str) -> Result<(), RenderTargetMissingError> {
        self.target()?.push(html.to_string());
        Ok(())
    }
}
