//! Markdown parsing support.
//!
//! This module turns pulldown-cmark's event stream into the document tree
//! used by groffdown-core.

use groffdown_core::{Document, ListData, NodeId, NodeValue};
use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, HeadingLevel, Options as CmarkOptions, Parser, Tag, TagEnd,
};

use crate::title::PageTitle;

/// Options for Markdown parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Convert straight quotes and `--`/`---` into typographic characters
    pub smart_punctuation: bool,
}

/// Parse a Markdown string into a document tree.
///
/// # Example
///
/// ```rust
/// use groffdown::{parse_markdown, ParseOptions};
/// use groffdown_core::{render_man, Options};
///
/// let doc = parse_markdown("# NAME\n\nHello *world*", &ParseOptions::default());
/// let man = render_man(&doc, &Options::default(), 0);
/// assert!(man.contains("Hello \\f[I]world\\f[]"));
/// ```
pub fn parse_markdown(markdown: &str, options: &ParseOptions) -> Document {
    build_document(markdown_events(markdown, options))
}

/// Run the Markdown parser and collect its events
pub(crate) fn markdown_events<'a>(markdown: &'a str, options: &ParseOptions) -> Vec<Event<'a>> {
    let mut cmark_options = CmarkOptions::empty();
    if options.smart_punctuation {
        cmark_options.insert(CmarkOptions::ENABLE_SMART_PUNCTUATION);
    }
    Parser::new_ext(markdown, cmark_options).collect()
}

/// Build a document tree from Markdown events
pub(crate) fn build_document<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Document {
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.push(event);
    }
    builder.doc
}

/// Remove a leading `# name(section)` heading and return its title
pub(crate) fn take_title(events: &mut Vec<Event<'_>>) -> Option<PageTitle> {
    if !matches!(
        events.first(),
        Some(Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            ..
        }))
    ) {
        return None;
    }

    let mut text = String::new();
    let mut end = None;
    for (i, event) in events.iter().enumerate().skip(1) {
        match event {
            Event::Text(t) => text.push_str(t),
            Event::End(TagEnd::Heading(_)) => {
                end = Some(i);
                break;
            }
            _ => return None,
        }
    }

    let title = PageTitle::parse(&text)?;
    events.drain(..=end?);
    Some(title)
}

/// Events for the `NAME` section standing in for the title heading
pub(crate) fn name_section<'a>(title: &PageTitle) -> Vec<Event<'a>> {
    vec![
        Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        }),
        Event::Text(CowStr::Borrowed("NAME")),
        Event::End(TagEnd::Heading(HeadingLevel::H1)),
        Event::Start(Tag::Paragraph),
        Event::Text(CowStr::from(title.name_line())),
        Event::End(TagEnd::Paragraph),
    ]
}

/// An open container on the builder stack
#[derive(Clone, Copy)]
struct Frame {
    id: NodeId,
    /// Paragraph created for the bare inline content of a tight list item
    implicit: bool,
}

struct TreeBuilder {
    doc: Document,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        let doc = Document::new();
        let root = Frame {
            id: doc.root(),
            implicit: false,
        };
        Self {
            doc,
            stack: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().map_or(self.doc.root(), |f| f.id)
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => match node_for_tag(tag) {
                Some(value) => {
                    let parent = if value.is_block() {
                        self.close_implicit()
                    } else {
                        self.inline_parent()
                    };
                    let id = self.doc.append(parent, value);
                    self.stack.push(Frame {
                        id,
                        implicit: false,
                    });
                }
                // containers without a counterpart pass their children through
                None => {
                    let id = self.current();
                    self.stack.push(Frame {
                        id,
                        implicit: false,
                    });
                }
            },

            Event::End(_) => {
                self.close_implicit();
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }

            Event::Text(text) => self.push_text(&text),

            Event::Code(code) => self.push_inline(NodeValue::code(code.into_string())),

            Event::Html(html) => {
                let parent = self.current();
                match self.doc.value_mut(parent) {
                    NodeValue::HtmlBlock(literal) => literal.push_str(&html),
                    _ => self.push_inline(NodeValue::HtmlInline(html.into_string())),
                }
            }

            Event::InlineHtml(html) => self.push_inline(NodeValue::HtmlInline(html.into_string())),

            Event::SoftBreak => self.push_inline(NodeValue::SoftBreak),

            Event::HardBreak => self.push_inline(NodeValue::LineBreak),

            Event::Rule => {
                let parent = self.close_implicit();
                self.doc.append(parent, NodeValue::ThematicBreak);
            }

            Event::TaskListMarker(checked) => {
                self.push_inline(NodeValue::text(if checked { "[x] " } else { "[ ] " }))
            }

            Event::FootnoteReference(label) => {
                self.push_inline(NodeValue::text(format!("[{label}]")))
            }

            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let parent = self.current();
        if let NodeValue::CodeBlock { literal, .. } | NodeValue::HtmlBlock(literal) =
            self.doc.value_mut(parent)
        {
            literal.push_str(text);
            return;
        }
        self.push_inline(NodeValue::text(text));
    }

    fn push_inline(&mut self, value: NodeValue) {
        let parent = self.inline_parent();
        self.doc.append(parent, value);
    }

    /// Parent for inline content, opening an implicit paragraph inside a
    /// list item whose text is not wrapped in one
    fn inline_parent(&mut self) -> NodeId {
        let current = self.current();
        if !matches!(self.doc.value(current), NodeValue::Item) {
            return current;
        }

        if let Some(list) = self.doc.parent(current) {
            if let NodeValue::List(data) = self.doc.value_mut(list) {
                data.tight = true;
            }
        }
        let id = self.doc.append(current, NodeValue::Paragraph);
        self.stack.push(Frame { id, implicit: true });
        id
    }

    /// Close implicit paragraphs and return the enclosing container
    fn close_implicit(&mut self) -> NodeId {
        while self.stack.last().is_some_and(|f| f.implicit) {
            self.stack.pop();
        }
        self.current()
    }
}

fn node_for_tag(tag: Tag<'_>) -> Option<NodeValue> {
    let value = match tag {
        Tag::Paragraph => NodeValue::Paragraph,
        Tag::Heading { level, .. } => NodeValue::Heading {
            level: heading_level(level),
        },
        Tag::BlockQuote(_) => NodeValue::BlockQuote,
        Tag::CodeBlock(kind) => {
            let info = match kind {
                CodeBlockKind::Fenced(info) => info.into_string(),
                CodeBlockKind::Indented => String::new(),
            };
            NodeValue::code_block(info, "")
        }
        Tag::HtmlBlock => NodeValue::HtmlBlock(String::new()),
        Tag::List(Some(start)) => NodeValue::List(ListData {
            tight: false,
            ..ListData::ordered(start)
        }),
        Tag::List(None) => NodeValue::List(ListData {
            tight: false,
            ..ListData::bullet()
        }),
        Tag::Item => NodeValue::Item,
        Tag::Emphasis => NodeValue::Emph,
        Tag::Strong => NodeValue::Strong,
        Tag::Link {
            dest_url, title, ..
        } => NodeValue::Link {
            url: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => NodeValue::Image {
            url: dest_url.into_string(),
            title: title.into_string(),
        },
        _ => return None,
    };
    Some(value)
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
