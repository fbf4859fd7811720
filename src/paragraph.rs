use serde::{Deserialize, Serialize};

/// A leaf run of rendered text carrying its own word boundary hints.
///
/// Offsets in `word_starts` / `word_ends` are char offsets relative to `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineTextNode {
    pub name: String,
    #[serde(default)]
    pub word_starts: Vec<usize>,
    #[serde(default)]
    pub word_ends: Vec<usize>,
    #[serde(default)]
    pub index_in_parent: usize,
}

impl InlineTextNode {
    pub fn new(name: impl Into<String>, index_in_parent: usize) -> Self {
        Self {
            name: name.into(),
            index_in_parent,
            ..Default::default()
        }
    }

    pub fn with_word_starts(mut self, starts: impl Into<Vec<usize>>) -> Self {
        self.word_starts = starts.into();
        self
    }

    pub fn with_word_ends(mut self, ends: impl Into<Vec<usize>>) -> Self {
        self.word_ends = ends.into();
        self
    }

    /// Length of `name` in chars.
    pub fn len(&self) -> usize {
        self.name.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticTextNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<InlineTextNode>,
}

impl StaticTextNode {
    pub fn new(name: impl Into<String>, children: Vec<InlineTextNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Children in `index_in_parent` order. Ties keep their insertion order.
    pub fn ordered_children(&self) -> Vec<&InlineTextNode> {
        let mut children: Vec<&InlineTextNode> = self.children.iter().collect();
        children.sort_by_key(|child| child.index_in_parent);
        children
    }
}

/// One static text node inside a paragraph, positioned at `start_char` within
/// the paragraph text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGroupItem {
    pub node: StaticTextNode,
    #[serde(default)]
    pub start_char: usize,
    #[serde(default)]
    pub has_inline_text: bool,
}

impl NodeGroupItem {
    pub fn new(node: StaticTextNode, start_char: usize) -> Self {
        Self {
            node,
            start_char,
            has_inline_text: true,
        }
    }

    /// The static text node, if its inline children can be trusted for word
    /// boundaries.
    pub fn inline_text(&self) -> Option<&StaticTextNode> {
        (self.has_inline_text && !self.node.children.is_empty()).then_some(&self.node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineTextHit<'a> {
    pub child: &'a InlineTextNode,
    /// Char offset of `child` within the parent's text.
    pub start_in_parent: usize,
}

/// Finds the inline child containing `char_index` (relative to the parent).
///
/// An index past the end of every child resolves to the last child.
pub fn find_inline_text_by_char_index(
    node: &StaticTextNode,
    char_index: usize,
) -> Option<InlineTextHit<'_>> {
    let children = node.ordered_children();
    let last = children.len().checked_sub(1)?;

    let mut remaining = char_index;
    let mut start_in_parent = 0usize;
    for (position, child) in children.into_iter().enumerate() {
        let len = child.len();
        if len > remaining || position == last {
            return Some(InlineTextHit {
                child,
                start_in_parent,
            });
        }
        remaining -= len;
        start_in_parent += len;
    }

    None
}

/// Sum of the text lengths of the children ordered before `position`.
pub fn start_char_index_in_parent(node: &StaticTextNode, position: usize) -> usize {
    node.ordered_children()
        .into_iter()
        .take(position)
        .map(InlineTextNode::len)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_children() -> StaticTextNode {
        StaticTextNode::new(
            "kitty cat is cute",
            vec![
                InlineTextNode::new("is cute", 1),
                InlineTextNode::new("kitty cat ", 0),
            ],
        )
    }

    #[test]
    fn finds_child_by_offset() {
        let node = two_children();

        let hit = find_inline_text_by_char_index(&node, 3).unwrap();
        assert_eq!(hit.child.name, "kitty cat ");
        assert_eq!(hit.start_in_parent, 0);

        let hit = find_inline_text_by_char_index(&node, 10).unwrap();
        assert_eq!(hit.child.name, "is cute");
        assert_eq!(hit.start_in_parent, 10);
    }

    #[test]
    fn offsets_past_the_end_resolve_to_last_child() {
        let node = two_children();
        let hit = find_inline_text_by_char_index(&node, 500).unwrap();
        assert_eq!(hit.child.name, "is cute");
    }

    #[test]
    fn no_children_means_no_hit() {
        let node = StaticTextNode::new("plain", Vec::new());
        assert!(find_inline_text_by_char_index(&node, 0).is_none());
    }

    #[test]
    fn start_in_parent_sums_previous_children() {
        let node = two_children();
        assert_eq!(start_char_index_in_parent(&node, 0), 0);
        assert_eq!(start_char_index_in_parent(&node, 1), 10);
        assert_eq!(start_char_index_in_parent(&node, 2), 17);
    }

    #[test]
    fn group_without_inline_text_has_no_hints() {
        let mut group = NodeGroupItem::new(two_children(), 0);
        assert!(group.inline_text().is_some());

        group.has_inline_text = false;
        assert!(group.inline_text().is_none());
    }
}
