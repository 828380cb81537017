use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::de::{is_non_empty, loose_object, loose_string, lossy_vec};

/// Node kinds that count as content even without visible text.
const EMBED_NODE_TYPES: [&str; 3] = ["upload", "relationship", "block"];

/// A rich-text editor document: a root node with an ordered child tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextDocument {
    #[serde(default, deserialize_with = "loose_object")]
    pub root: Option<RichTextNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type", default, deserialize_with = "loose_string")]
    pub node_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lossy_vec")]
    pub children: Vec<RichTextNode>,
}

impl RichTextNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: Some("text".into()),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn element(node_type: impl Into<String>, children: Vec<RichTextNode>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            text: None,
            children,
        }
    }

    fn is_embed(&self) -> bool {
        self.node_type
            .as_deref()
            .is_some_and(|t| EMBED_NODE_TYPES.contains(&t))
    }
}

impl RichTextDocument {
    /// A document holding a single paragraph of `text`.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            root: Some(RichTextNode::element(
                "root",
                vec![RichTextNode::element(
                    "paragraph",
                    vec![RichTextNode::text(text)],
                )],
            )),
        }
    }

    /// True if any descendant of the root carries non-whitespace text or is
    /// an upload/relationship/block embed.
    ///
    /// Breadth-first over an explicit queue so nesting depth never grows
    /// the call stack.
    pub fn has_content(&self) -> bool {
        let Some(root) = &self.root else {
            return false;
        };

        let mut queue: VecDeque<&RichTextNode> = root.children.iter().collect();
        while let Some(node) = queue.pop_front() {
            if is_non_empty(node.text.as_deref()) || node.is_embed() {
                return true;
            }
            queue.extend(node.children.iter());
        }

        false
    }

    /// Concatenated text of every text node, in document order.
    pub fn plain_text(&self) -> String {
        let Some(root) = &self.root else {
            return String::new();
        };

        let mut out = String::new();
        let mut stack: Vec<&RichTextNode> = root.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if let Some(text) = node.text.as_deref() {
                out.push_str(text);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Convenience for optional rich-text fields.
pub fn has_rich_content(doc: Option<&RichTextDocument>) -> bool {
    doc.is_some_and(RichTextDocument::has_content)
}
