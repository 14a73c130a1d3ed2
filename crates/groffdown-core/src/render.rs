//! Generic output engine
//!
//! The engine owns the output buffer and the line state (column, pending
//! newlines, begin-of-line flag, last break opportunity) and performs word
//! wrapping. Output formats plug in through [`Format`]: one callback decides
//! how each code point of escaped text is written, the other renders a node
//! on every traversal event.

use crate::ast::{Document, NodeRef};
use crate::iter::{EventType, Iter, Traverse};
use crate::options::Options;

/// How text passed to [`Output::out`] is escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// Written as-is
    Literal,
    /// Ordinary document text
    Normal,
    /// Text inside a URL
    Url,
}

/// The capabilities a format uses to produce output
pub trait Output {
    /// Write `text`, breaking lines at spaces if `wrap` is set and escaping
    /// each code point according to `escaping`
    fn out(&mut self, text: &str, wrap: bool, escaping: Escaping);

    /// Write `text` unescaped and unwrapped
    fn lit(&mut self, text: &str) {
        self.out(text, false, Escaping::Literal);
    }

    /// Make sure the next output starts on a fresh line
    fn cr(&mut self);

    /// Make sure the next output is preceded by a blank line
    fn blankline(&mut self);

    /// Append ASCII text directly. Must not contain newlines.
    fn render_ascii(&mut self, s: &str);

    /// Append a single code point directly
    fn render_code_point(&mut self, c: char);

    /// True when nothing has been written on the current line yet
    fn begin_line(&self) -> bool;

    /// Configured wrap width; 0 disables wrapping
    fn width(&self) -> usize;
}

/// An output format
pub trait Format {
    /// Write one code point of escaped text. `next` is the following code
    /// point of the same text run, if any.
    fn outc(&self, out: &mut dyn Output, escaping: Escaping, c: char, next: Option<char>);

    /// Render `node` for one traversal event
    fn render_node(
        &self,
        out: &mut dyn Output,
        node: NodeRef<'_>,
        event: EventType,
        options: &Options,
    ) -> Traverse;
}

/// String-accumulating [`Output`] implementation
pub struct Renderer<'f> {
    format: &'f dyn Format,
    buffer: String,
    width: usize,
    column: usize,
    need_cr: u8,
    last_breakable: Option<usize>,
    begin_line: bool,
    no_linebreaks: bool,
}

impl<'f> Renderer<'f> {
    pub fn new(format: &'f dyn Format, options: &Options, width: usize) -> Self {
        Self {
            format,
            buffer: String::with_capacity(4096),
            width,
            column: 0,
            need_cr: 0,
            last_breakable: None,
            begin_line: true,
            no_linebreaks: options.nobreaks,
        }
    }

    /// Output written so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Take the output, terminated by a newline
    pub fn finish(mut self) -> String {
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }

    /// Emit pending newlines, counting ones already at the end of the buffer.
    /// Nothing is emitted at the very start of the output.
    fn flush_newlines(&mut self) {
        let mut k = self.buffer.len();
        while self.need_cr > 0 {
            if k == 0 || self.buffer.as_bytes()[k - 1] == b'\n' {
                k = k.saturating_sub(1);
            } else {
                self.buffer.push('\n');
            }
            self.column = 0;
            self.last_breakable = None;
            self.begin_line = true;
            self.need_cr -= 1;
        }
    }

    /// Break the current line at the last break opportunity
    fn break_line(&mut self, at: usize) {
        let remainder = self.buffer.split_off(at + 1);
        self.buffer.truncate(at);
        self.buffer.push('\n');
        self.column = remainder.chars().count();
        self.buffer.push_str(&remainder);
        self.last_breakable = None;
        self.begin_line = false;
    }
}

impl Output for Renderer<'_> {
    fn out(&mut self, text: &str, wrap: bool, escaping: Escaping) {
        let wrap = wrap && !self.no_linebreaks;
        self.flush_newlines();

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ' ' && wrap {
                if !self.begin_line {
                    let last_nonspace = self.buffer.len();
                    self.buffer.push(' ');
                    self.column += 1;
                    while chars.next_if_eq(&' ').is_some() {}
                    self.last_breakable = Some(last_nonspace);
                }
            } else if c == '\n' {
                self.buffer.push('\n');
                self.column = 0;
                self.begin_line = true;
                self.last_breakable = None;
            } else if escaping == Escaping::Literal {
                self.render_code_point(c);
                self.begin_line = false;
            } else {
                let next = chars.peek().copied();
                let format = self.format;
                format.outc(self, escaping, c, next);
                self.begin_line = false;
            }

            if self.width > 0 && self.column > self.width && !self.begin_line {
                if let Some(at) = self.last_breakable.take() {
                    if can_start_line(&self.buffer[at + 1..]) {
                        self.break_line(at);
                    }
                }
            }
        }
    }

    fn cr(&mut self) {
        self.need_cr = self.need_cr.max(1);
    }

    fn blankline(&mut self) {
        self.need_cr = self.need_cr.max(2);
    }

    fn render_ascii(&mut self, s: &str) {
        self.buffer.push_str(s);
        self.column += s.len();
    }

    fn render_code_point(&mut self, c: char) {
        self.buffer.push(c);
        self.column += 1;
    }

    fn begin_line(&self) -> bool {
        self.begin_line
    }

    fn width(&self) -> usize {
        self.width
    }
}

/// A wrapped line must not start with a digit or a troff control character.
/// The escaper only sees line starts as they are written, so a break that
/// would move `.` or `'` to column 0 is not taken.
fn can_start_line(rest: &str) -> bool {
    !rest.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '\'')
}

/// Render a whole document with `format`
pub fn render(doc: &Document, format: &dyn Format, options: &Options, width: usize) -> String {
    let mut renderer = Renderer::new(format, options, width);
    let mut iter = Iter::new(doc, doc.root());

    while let Some((event, node)) = iter.next() {
        let traverse = format.render_node(&mut renderer, node, event, options);
        if event == EventType::Enter && traverse == Traverse::SkipChildren {
            iter.reset(node.id(), EventType::Exit);
        }
    }

    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeValue;

    /// Writes text unchanged, upper-casing in URL mode
    struct Plain;

    impl Format for Plain {
        fn outc(&self, out: &mut dyn Output, escaping: Escaping, c: char, _next: Option<char>) {
            match escaping {
                Escaping::Url => out.render_code_point(c.to_ascii_uppercase()),
                _ => out.render_code_point(c),
            }
        }

        fn render_node(
            &self,
            out: &mut dyn Output,
            node: NodeRef<'_>,
            event: EventType,
            _options: &Options,
        ) -> Traverse {
            match (node.value(), event) {
                (NodeValue::Paragraph, _) => out.cr(),
                (NodeValue::Text(t), EventType::Enter) => out.out(t, true, Escaping::Normal),
                (NodeValue::Link { .. }, EventType::Enter) => return Traverse::SkipChildren,
                (NodeValue::Link { url, .. }, EventType::Exit) => out.out(url, false, Escaping::Url),
                _ => {}
            }
            Traverse::Continue
        }
    }

    fn renderer(width: usize) -> Renderer<'static> {
        Renderer::new(&Plain, &Options::default(), width)
    }

    #[test]
    fn test_no_leading_newline() {
        let mut r = renderer(0);
        r.cr();
        r.lit("x");
        assert_eq!(r.finish(), "x\n");
    }

    #[test]
    fn test_cr_collapses() {
        let mut r = renderer(0);
        r.lit("a");
        r.cr();
        r.cr();
        r.lit("b\n");
        r.cr();
        r.lit("c");
        assert_eq!(r.finish(), "a\nb\nc\n");
    }

    #[test]
    fn test_blankline() {
        let mut r = renderer(0);
        r.lit("a");
        r.blankline();
        r.lit("b\n");
        r.blankline();
        r.lit("c");
        assert_eq!(r.buffer(), "a\n\nb\n\nc");
    }

    #[test]
    fn test_begin_line_tracking() {
        let mut r = renderer(0);
        assert!(r.begin_line());
        r.lit("abc");
        assert!(!r.begin_line());
        r.lit("\n");
        assert!(r.begin_line());
        r.out("x", true, Escaping::Normal);
        assert!(!r.begin_line());
        r.cr();
        r.out("", true, Escaping::Normal);
        assert!(r.begin_line());
    }

    #[test]
    fn test_wrap_breaks_at_last_space() {
        let mut r = renderer(10);
        r.out("aaaa bbbb cccc dddd", true, Escaping::Normal);
        assert_eq!(r.buffer(), "aaaa bbbb\ncccc dddd");
    }

    #[test]
    fn test_wrap_collapses_spaces_and_drops_leading() {
        let mut r = renderer(0);
        r.out("  a   b", true, Escaping::Normal);
        assert_eq!(r.buffer(), "a b");
    }

    #[test]
    fn test_no_wrap_keeps_spaces() {
        let mut r = renderer(5);
        r.out("  a   b c d e", false, Escaping::Normal);
        assert_eq!(r.buffer(), "  a   b c d e");
    }

    #[test]
    fn test_wrap_never_starts_line_with_digit() {
        let mut r = renderer(6);
        r.out("abc 12345", true, Escaping::Normal);
        assert_eq!(r.buffer(), "abc 12345");
    }

    #[test]
    fn test_wrap_never_moves_control_character_to_line_start() {
        let mut r = renderer(8);
        r.out("abc .defgh", true, Escaping::Normal);
        assert_eq!(r.buffer(), "abc .defgh");

        let mut r = renderer(8);
        r.out("abc ", true, Escaping::Normal);
        r.out("'quoted", true, Escaping::Normal);
        assert_eq!(r.buffer(), "abc 'quoted");
    }

    #[test]
    fn test_wrap_break_checked_across_runs() {
        let mut r = renderer(6);
        r.out("abc ", true, Escaping::Normal);
        r.out("12345", true, Escaping::Normal);
        assert_eq!(r.buffer(), "abc 12345");

        let mut r = renderer(6);
        r.out("abc ", true, Escaping::Normal);
        r.out("defgh", true, Escaping::Normal);
        assert_eq!(r.buffer(), "abc\ndefgh");
    }

    #[test]
    fn test_nobreaks_disables_wrap() {
        let options = Options::default().with_nobreaks();
        let mut r = Renderer::new(&Plain, &options, 10);
        r.out("aaaa bbbb cccc dddd", true, Escaping::Normal);
        assert_eq!(r.buffer(), "aaaa bbbb cccc dddd");
    }

    #[test]
    fn test_render_skip_children_and_final_newline() {
        let mut doc = Document::new();
        let p = doc.append(doc.root(), NodeValue::Paragraph);
        doc.append(p, NodeValue::text("see "));
        let link = doc.append(p, NodeValue::link("x.org"));
        doc.append(link, NodeValue::text("hidden"));

        let out = render(&doc, &Plain, &Options::default(), 0);
        assert_eq!(out, "see X.ORG\n");
    }

    #[test]
    fn test_render_empty_document() {
        let doc = Document::new();
        assert_eq!(render(&doc, &Plain, &Options::default(), 0), "\n");
    }
}
