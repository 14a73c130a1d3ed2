//! ManService - the main entry point for Markdown to man page conversion.

use groffdown_core::{render_man, Document, Options};
use tracing::debug;

#[cfg(feature = "markdown")]
use crate::markdown::ParseOptions;
#[cfg(feature = "markdown")]
use crate::Result;

/// Options for ManService
#[derive(Debug, Clone, Default)]
pub struct ManOptions {
    /// Wrap width; 0 disables wrapping and keeps source line breaks
    pub width: usize,

    /// Render soft line breaks as hard line breaks
    pub hardbreaks: bool,

    /// Join all lines: no wrapping, soft breaks become spaces
    pub nobreaks: bool,

    /// Produce typographic quotes and dashes from their ASCII forms
    pub smart_punctuation: bool,

    /// Turn a leading `# name(section) -- description` heading into a
    /// `.TH` header and a `NAME` section
    pub detect_title: bool,

    /// Date field of the `.TH` header
    pub date: Option<String>,

    /// Source field of the `.TH` header (e.g. "groffdown 0.1")
    pub source: Option<String>,

    /// Manual field of the `.TH` header (e.g. "User Commands")
    pub manual: Option<String>,
}

impl ManOptions {
    /// Options for the core renderer
    pub fn render_options(&self) -> Options {
        Options {
            hardbreaks: self.hardbreaks,
            nobreaks: self.nobreaks,
        }
    }

    #[cfg(feature = "markdown")]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            smart_punctuation: self.smart_punctuation,
        }
    }
}

/// The main service for converting Markdown to groff man pages
pub struct ManService {
    options: ManOptions,
}

impl ManService {
    /// Create a new ManService with default options
    pub fn new() -> Self {
        Self {
            options: ManOptions::default(),
        }
    }

    /// Create a ManService with custom options
    pub fn with_options(options: ManOptions) -> Self {
        Self { options }
    }

    /// Convert Markdown to a man page
    #[cfg(feature = "markdown")]
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut events = crate::markdown::markdown_events(markdown, &self.options.parse_options());

        let mut header = None;
        if self.options.detect_title {
            if let Some(title) = crate::markdown::take_title(&mut events) {
                tracing::trace!(name = %title.name, section = %title.section, "detected page title");
                header = Some(title.header(
                    self.options.date.as_deref(),
                    self.options.source.as_deref(),
                    self.options.manual.as_deref(),
                )?);
                events.splice(0..0, crate::markdown::name_section(&title));
            }
        }

        let document = crate::markdown::build_document(events);
        let body = self.render_document(&document);

        Ok(match header {
            Some(header) => format!("{header}\n{body}"),
            None => body,
        })
    }

    /// Convert an already built document tree to a man page
    pub fn render_document(&self, document: &Document) -> String {
        let output = render_man(
            document,
            &self.options.render_options(),
            self.options.width,
        );
        debug!(
            width = self.options.width,
            nodes = document.len(),
            bytes = output.len(),
            "rendered man page"
        );
        output
    }

    /// Get the current options
    pub fn options(&self) -> &ManOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ManOptions {
        &mut self.options
    }
}

impl Default for ManService {
    fn default() -> Self {
        Self::new()
    }
}
