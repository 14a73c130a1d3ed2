//! Depth-first traversal over a document tree
//!
//! Every node produces an `Enter` event before its children and an `Exit`
//! event after them. Nodes without children get both events back to back.

use crate::ast::{Document, NodeId, NodeRef};

/// Traversal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Enter,
    Exit,
}

/// Returned by node renderers to steer the traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traverse {
    Continue,
    /// Jump straight to the node's `Exit` event
    SkipChildren,
}

/// Event iterator over a subtree
pub struct Iter<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<(EventType, NodeId)>,
}

impl<'a> Iter<'a> {
    /// Iterate over `root` and all of its descendants
    pub fn new(doc: &'a Document, root: NodeId) -> Self {
        Self {
            doc,
            root,
            next: Some((EventType::Enter, root)),
        }
    }

    /// Continue the traversal from `node` with `event` as the next event
    pub fn reset(&mut self, node: NodeId, event: EventType) {
        self.next = Some((event, node));
    }

    fn successor(&self, event: EventType, node: NodeId) -> Option<(EventType, NodeId)> {
        match event {
            EventType::Enter => match self.doc.first_child(node) {
                Some(child) => Some((EventType::Enter, child)),
                None => Some((EventType::Exit, node)),
            },
            EventType::Exit if node == self.root => None,
            EventType::Exit => match self.doc.next(node) {
                Some(sibling) => Some((EventType::Enter, sibling)),
                None => self.doc.parent(node).map(|p| (EventType::Exit, p)),
            },
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EventType, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (event, node) = self.next?;
        self.next = self.successor(event, node);
        Some((event, self.doc.node(node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeValue;

    fn events(doc: &Document, root: NodeId) -> Vec<(EventType, String)> {
        Iter::new(doc, root)
            .map(|(ev, node)| {
                let name = match node.value() {
                    NodeValue::Text(t) => t.clone(),
                    other => format!("{other:?}"),
                };
                (ev, name)
            })
            .collect()
    }

    #[test]
    fn test_enter_exit_order() {
        let mut doc = Document::new();
        let p = doc.append(doc.root(), NodeValue::Paragraph);
        doc.append(p, NodeValue::text("a"));
        let em = doc.append(p, NodeValue::Emph);
        doc.append(em, NodeValue::text("b"));

        use EventType::{Enter, Exit};
        let expected = vec![
            (Enter, "Document".to_string()),
            (Enter, "Paragraph".to_string()),
            (Enter, "a".to_string()),
            (Exit, "a".to_string()),
            (Enter, "Emph".to_string()),
            (Enter, "b".to_string()),
            (Exit, "b".to_string()),
            (Exit, "Emph".to_string()),
            (Exit, "Paragraph".to_string()),
            (Exit, "Document".to_string()),
        ];
        assert_eq!(events(&doc, doc.root()), expected);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        let evs: Vec<EventType> = Iter::new(&doc, doc.root()).map(|(ev, _)| ev).collect();
        assert_eq!(evs, vec![EventType::Enter, EventType::Exit]);
    }

    #[test]
    fn test_subtree_stops_at_root() {
        let mut doc = Document::new();
        let first = doc.append(doc.root(), NodeValue::Paragraph);
        doc.append(first, NodeValue::text("inside"));
        let second = doc.append(doc.root(), NodeValue::Paragraph);
        doc.append(second, NodeValue::text("outside"));

        let names: Vec<String> = events(&doc, first).into_iter().map(|(_, n)| n).collect();
        assert!(names.contains(&"inside".to_string()));
        assert!(!names.contains(&"outside".to_string()));
    }

    #[test]
    fn test_reset_skips_children() {
        let mut doc = Document::new();
        let link = doc.append(doc.root(), NodeValue::link("https://example.com"));
        doc.append(link, NodeValue::text("hidden"));

        let mut iter = Iter::new(&doc, doc.root());
        let mut seen = Vec::new();
        while let Some((ev, node)) = iter.next() {
            if ev == EventType::Enter && matches!(node.value(), NodeValue::Link { .. }) {
                iter.reset(node.id(), EventType::Exit);
            }
            if let NodeValue::Text(t) = node.value() {
                seen.push(t.clone());
            }
        }
        assert!(seen.is_empty());
    }
}
