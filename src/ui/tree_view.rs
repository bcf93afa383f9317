use ascii_tree::{Tree as AsciiTree, write_tree};

use crate::model::{Node, Stack, Split, Window};

const ICON_WINDOW: &str = "\u{eb7f}";
const ICON_STACK: &str = "\u{f51e}";
const ICON_VERTICAL: &str = "\u{eb56}";
const ICON_HORIZONTAL: &str = "\u{eb57}";

#[derive(Clone, Copy, Debug, Default)]
pub struct TreeStyle {
    pub nerd_font: bool,
}

/// Renders a reconstructed tree as an indented ASCII tree.
///
/// A stack with one member displays as its window at any depth; the
/// underlying tree is not rewritten, only the presentation collapses it.
pub fn render(tree: &Node, style: TreeStyle) -> String {
    let mut out = String::new();
    let _ = write_tree(&mut out, &build(tree, style));
    out
}

fn build(node: &Node, style: TreeStyle) -> AsciiTree {
    match node {
        Node::Stack(stack) if stack.windows.len() == 1 => window_leaf(&stack.windows[0], style),
        Node::Window(window) => window_leaf(window, style),
        Node::Stack(stack) => AsciiTree::Node(
            stack_label(stack, style),
            stack.windows.iter().map(|w| window_leaf(w, style)).collect(),
        ),
        Node::Split(split) => AsciiTree::Node(split_label(split, style), vec![
            build(&split.first_child, style),
            build(&split.second_child, style),
        ]),
    }
}

fn window_leaf(window: &Window, style: TreeStyle) -> AsciiTree {
    AsciiTree::Leaf(vec![window_label(window, style)])
}

fn window_label(window: &Window, style: TreeStyle) -> String {
    let Window { id, app, title, .. } = window;
    if style.nerd_font {
        format!("{ICON_WINDOW} {app}: {title} ({id})")
    } else {
        format!("{app}: {title} ({id})")
    }
}

fn stack_label(stack: &Stack, style: TreeStyle) -> String {
    let icon = if style.nerd_font { ICON_STACK } else { "stack" };
    format!("{icon} ({} windows)", stack.windows.len())
}

fn split_label(split: &Split, style: TreeStyle) -> String {
    if style.nerd_font {
        match split.split_type {
            crate::layout_engine::Orientation::Vertical => ICON_VERTICAL.to_string(),
            crate::layout_engine::Orientation::Horizontal => ICON_HORIZONTAL.to_string(),
        }
    } else {
        split.split_type.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::Orientation;
    use crate::model::tree::tests::{split, stack, window};

    #[test]
    fn single_member_stack_renders_as_its_window() {
        let as_stack = stack(&[7]);
        let as_window = Node::Window(window(7));
        assert_eq!(
            render(&as_stack, TreeStyle::default()),
            render(&as_window, TreeStyle::default())
        );
    }

    #[test]
    fn single_member_stack_collapses_below_the_root_too() {
        let with_stack = split(Orientation::Vertical, stack(&[1]), Node::Window(window(2)));
        let with_window = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            Node::Window(window(2)),
        );
        assert_eq!(
            render(&with_stack, TreeStyle::default()),
            render(&with_window, TreeStyle::default())
        );
    }

    #[test]
    fn split_and_stack_labels_appear() {
        let tree = split(Orientation::Horizontal, stack(&[1, 2]), Node::Window(window(3)));
        let out = render(&tree, TreeStyle::default());
        assert!(out.contains("horizontal"), "missing split label: {out}");
        assert!(out.contains("stack (2 windows)"), "missing stack label: {out}");
        assert!(out.contains("app3: title3 (3)"), "missing window label: {out}");
    }

    #[test]
    fn nerd_font_style_swaps_labels_for_icons() {
        let tree = stack(&[1, 2]);
        let out = render(&tree, TreeStyle { nerd_font: true });
        assert!(out.contains(ICON_STACK), "missing stack icon: {out}");
        assert!(out.contains(ICON_WINDOW), "missing window icon: {out}");
        assert!(!out.contains("stack ("), "plain label leaked: {out}");
    }
}
