//! Man page title handling.
//!
//! A Markdown page may open with a level-1 heading such as
//! `# ls(1) -- list directory contents`. That heading names the page; it is
//! turned into the `.TH` header line and a conventional `NAME` section.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{GroffdownError, Result};

/// Matches `name(section)` optionally followed by `-- description`; the
/// dash may already be typographic after smart punctuation
static TITLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_.:+-]+)\(([0-9A-Za-z]+)\)(?:\s+(?:-{1,2}|–|—)\s+(.*?))?\s*$").unwrap()
});

/// Identity of a man page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    pub name: String,
    pub section: String,
    pub description: Option<String>,
}

impl PageTitle {
    /// Parse a title line like `grep(1) -- print lines that match patterns`
    pub fn parse(line: &str) -> Option<Self> {
        let caps = TITLE_LINE.captures(line)?;
        Some(Self {
            name: caps[1].to_string(),
            section: caps[2].to_string(),
            description: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .filter(|d| !d.is_empty()),
        })
    }

    /// Text of the `NAME` section paragraph
    pub fn name_line(&self) -> String {
        match &self.description {
            Some(description) => format!("{} - {}", self.name, description),
            None => self.name.clone(),
        }
    }

    /// The `.TH` header line, without a trailing newline.
    ///
    /// Empty trailing fields are omitted so groff falls back to its defaults.
    pub fn header(
        &self,
        date: Option<&str>,
        source: Option<&str>,
        manual: Option<&str>,
    ) -> Result<String> {
        let mut fields = vec![self.name.to_uppercase(), self.section.clone()];
        let extra = [date, source, manual];
        let used = extra.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        fields.extend(
            extra[..used]
                .iter()
                .map(|f| f.unwrap_or_default().to_string()),
        );

        let mut line = String::from(".TH");
        for field in &fields {
            if field.contains('\n') {
                return Err(GroffdownError::InvalidInput(format!(
                    "title field {field:?} contains a newline"
                )));
            }
            line.push_str(" \"");
            line.push_str(&field.replace('"', "\"\""));
            line.push('"');
        }
        Ok(line)
    }
}
