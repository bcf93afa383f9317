use serde::{Deserialize, Serialize};

use crate::layout_engine::Orientation;
use crate::model::geometry::Frame;

/// A tiled window leaf. Identity lives in `id`; everything else is display
/// metadata captured at reconstruction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: u32,
    pub app: String,
    pub title: String,
    pub frame: Frame,
}

/// Windows occupying the identical frame, ordered by stack index.
///
/// A single-member stack is valid; display and query logic treat it as a
/// bare window without rewriting the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub windows: Vec<Window>,
    pub frame: Frame,
}

/// Binary internal node. `frame` is the bounding box of both children, which
/// are disjoint along `split_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub first_child: Box<Node>,
    pub second_child: Box<Node>,
    pub split_type: Orientation,
    pub frame: Frame,
}

/// Reconstructed BSP tree node. One root per space; rebuilt from scratch on
/// every query, so nodes carry no persistent identity of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Window(Window),
    Stack(Stack),
    Split(Split),
}

/// Where a window sits in a reconstructed tree.
///
/// `ancestors` lists the enclosing splits root-first, ending with the
/// closest parent. `is_first_child` is relative to that closest parent and
/// is `false` for windows with no split ancestor. `parent_stack` is set when
/// the window's immediate container is a stack.
#[derive(Clone, Debug)]
pub struct WindowLocation<'a> {
    pub window: &'a Window,
    pub ancestors: Vec<&'a Split>,
    pub is_first_child: bool,
    pub parent_stack: Option<&'a Stack>,
}

impl<'a> WindowLocation<'a> {
    fn at(window: &'a Window) -> Self {
        WindowLocation {
            window,
            ancestors: Vec::new(),
            is_first_child: false,
            parent_stack: None,
        }
    }
}

impl Node {
    pub fn frame(&self) -> &Frame {
        match self {
            Node::Window(w) => &w.frame,
            Node::Stack(s) => &s.frame,
            Node::Split(s) => &s.frame,
        }
    }

    /// All window ids beneath this node in pre-order, flattening stacks.
    pub fn window_ids(&self) -> Vec<u32> {
        match self {
            Node::Window(w) => vec![w.id],
            Node::Stack(s) => s.windows.iter().map(|w| w.id).collect(),
            Node::Split(s) => {
                let mut ids = s.first_child.window_ids();
                ids.extend(s.second_child.window_ids());
                ids
            }
        }
    }

    /// First window id found in pre-order, used as a fold target.
    pub fn first_window_id(&self) -> Option<u32> {
        match self {
            Node::Window(w) => Some(w.id),
            Node::Stack(s) => s.windows.first().map(|w| w.id),
            Node::Split(s) => {
                s.first_child.first_window_id().or_else(|| s.second_child.first_window_id())
            }
        }
    }

    pub fn contains_window(&self, window_id: u32) -> bool {
        match self {
            Node::Window(w) => w.id == window_id,
            Node::Stack(s) => s.windows.iter().any(|w| w.id == window_id),
            Node::Split(s) => {
                s.first_child.contains_window(window_id)
                    || s.second_child.contains_window(window_id)
            }
        }
    }

    /// Pre-order search for a window, reporting its full ancestor chain.
    ///
    /// Returns `None` when the id is absent; callers decide whether that is
    /// fatal. The ancestor list is assembled on the return path of the
    /// recursion, so no accumulator is shared across subtrees.
    pub fn find_window(&self, window_id: u32) -> Option<WindowLocation<'_>> {
        let mut location = self.locate(window_id)?;
        // `locate` pushes ancestors closest-parent first on the way back up.
        location.ancestors.reverse();
        Some(location)
    }

    fn locate(&self, window_id: u32) -> Option<WindowLocation<'_>> {
        match self {
            Node::Window(w) => (w.id == window_id).then(|| WindowLocation::at(w)),
            Node::Stack(s) => s.windows.iter().find(|w| w.id == window_id).map(|w| {
                let mut location = WindowLocation::at(w);
                location.parent_stack = Some(s);
                location
            }),
            Node::Split(split) => {
                if let Some(mut location) = split.first_child.locate(window_id) {
                    if location.ancestors.is_empty() {
                        location.is_first_child = true;
                    }
                    location.ancestors.push(split);
                    return Some(location);
                }
                let mut location = split.second_child.locate(window_id)?;
                location.ancestors.push(split);
                Some(location)
            }
        }
    }
}
