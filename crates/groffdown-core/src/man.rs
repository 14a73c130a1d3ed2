//! groff man page output
//!
//! Serializes a document tree into the `man` macro package of troff/groff.
//! Block constructs always start on a fresh line because macros are only
//! recognized at the beginning of a line.

use crate::ast::{Document, ListType, NodeRef, NodeValue};
use crate::iter::{EventType, Traverse};
use crate::options::Options;
use crate::render::{render, Escaping, Format, Output};

const FONT_RESET: &str = "\\f[]";
const HARD_BREAK: &str = ".PD 0\n.P\n.PD";

/// The groff man format
#[derive(Debug, Clone, Copy, Default)]
pub struct Man;

/// Render a document as a groff man page.
///
/// A `width` of 0 disables wrapping and turns soft breaks into newlines.
pub fn render_man(doc: &Document, options: &Options, width: usize) -> String {
    render(doc, &Man, options, width)
}

impl Format for Man {
    fn outc(&self, out: &mut dyn Output, escaping: Escaping, c: char, _next: Option<char>) {
        if escaping == Escaping::Literal {
            out.render_code_point(c);
            return;
        }

        match c {
            // a control character at column 0 would start a request
            '.' | '\'' if out.begin_line() => {
                out.render_ascii("\\&");
                out.render_code_point(c);
            }
            '-' => out.render_ascii("\\-"),
            '\\' => out.render_ascii("\\e"),
            '\u{2018}' => out.render_ascii("\\[oq]"),
            '\u{2019}' => out.render_ascii("\\[cq]"),
            '\u{201C}' => out.render_ascii("\\[lq]"),
            '\u{201D}' => out.render_ascii("\\[rq]"),
            '\u{2014}' => out.render_ascii("\\[em]"),
            '\u{2013}' => out.render_ascii("\\[en]"),
            _ => out.render_code_point(c),
        }
    }

    fn render_node(
        &self,
        out: &mut dyn Output,
        node: NodeRef<'_>,
        event: EventType,
        options: &Options,
    ) -> Traverse {
        let entering = event == EventType::Enter;
        let allow_wrap = out.width() > 0 && !options.nobreaks;

        match node.value() {
            NodeValue::Document | NodeValue::List(_) => {}

            NodeValue::BlockQuote => {
                out.cr();
                out.lit(if entering { ".RS" } else { ".RE" });
                out.cr();
            }

            NodeValue::Item => {
                out.cr();
                if entering {
                    out.lit(".IP ");
                    out.lit(&item_marker(node));
                    out.cr();
                }
            }

            NodeValue::Heading { level } => {
                out.cr();
                if entering {
                    out.lit(if *level == 1 { ".SH" } else { ".SS" });
                    out.cr();
                }
            }

            NodeValue::CodeBlock { literal, .. } => {
                if entering {
                    out.cr();
                    out.lit(".IP\n.nf\n\\f[C]\n");
                    out.out(literal, false, Escaping::Normal);
                    out.cr();
                    out.lit("\\f[]\n.fi");
                    out.cr();
                }
            }

            // raw HTML has no meaning in a man page
            NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => {}

            NodeValue::CustomBlock { on_enter, on_exit } => {
                out.cr();
                out.out(if entering { on_enter } else { on_exit }, false, Escaping::Literal);
                out.cr();
            }

            NodeValue::ThematicBreak => {
                if entering {
                    out.cr();
                    out.lit(".PP\n  *  *  *  *  *");
                    out.cr();
                }
            }

            NodeValue::Paragraph => {
                if entering {
                    if !is_first_in_item(node) {
                        out.cr();
                        out.lit(".PP");
                        out.cr();
                    }
                } else {
                    out.cr();
                }
            }

            NodeValue::Text(text) => {
                if entering {
                    out.out(text, true, Escaping::Normal);
                }
            }

            NodeValue::LineBreak => {
                if entering {
                    out.cr();
                    out.lit(HARD_BREAK);
                    out.cr();
                }
            }

            NodeValue::SoftBreak => {
                if entering {
                    if options.hardbreaks {
                        out.cr();
                        out.lit(HARD_BREAK);
                        out.cr();
                    } else if out.width() == 0 && !options.nobreaks {
                        out.cr();
                    } else {
                        out.out(" ", allow_wrap, Escaping::Literal);
                    }
                }
            }

            NodeValue::Code(code) => {
                if entering {
                    out.lit("\\f[C]");
                    out.out(code, true, Escaping::Normal);
                    out.lit(FONT_RESET);
                }
            }

            NodeValue::CustomInline { on_enter, on_exit } => {
                out.out(if entering { on_enter } else { on_exit }, false, Escaping::Literal);
            }

            NodeValue::Strong => out.lit(if entering { "\\f[B]" } else { FONT_RESET }),

            NodeValue::Emph => out.lit(if entering { "\\f[I]" } else { FONT_RESET }),

            NodeValue::Link { url, .. } => {
                if !entering {
                    out.lit(" (");
                    out.out(url, true, Escaping::Url);
                    out.lit(")");
                }
            }

            NodeValue::Image { .. } => out.lit(if entering { "[IMAGE: " } else { "]" }),
        }

        Traverse::Continue
    }
}

/// Argument string for the `.IP` of a list item.
///
/// Ordered items are numbered from the list's start by their position, so
/// gaps in the source numbering are not preserved.
fn item_marker(item: NodeRef<'_>) -> String {
    let list = item.parent();
    match list.and_then(|l| l.list_type()) {
        Some(ListType::Ordered) => {
            let start = list.and_then(|l| l.list_start()).unwrap_or(1);
            let position = std::iter::successors(item.prev(), |n| n.prev()).count() as u64;
            format!("\"{}.\" 4", start.saturating_add(position))
        }
        _ => "\\[bu] 2".to_string(),
    }
}

fn is_first_in_item(paragraph: NodeRef<'_>) -> bool {
    paragraph.prev().is_none()
        && paragraph
            .parent()
            .is_some_and(|p| matches!(p.value(), NodeValue::Item))
}
