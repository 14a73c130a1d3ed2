//! Configuration options for rendering

/// Options shared by all output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Render soft line breaks as hard line breaks
    pub hardbreaks: bool,

    /// Never break lines: disables wrapping and renders soft breaks as spaces
    pub nobreaks: bool,
}

impl Options {
    pub fn with_hardbreaks(mut self) -> Self {
        self.hardbreaks = true;
        self
    }

    pub fn with_nobreaks(mut self) -> Self {
        self.nobreaks = true;
        self
    }
}
