use crate::layout_engine::{LayoutError, Orientation};
use crate::model::{Node, Split, Window, WindowLocation};

/// Maximal run of windows sitting along one split axis around the located
/// window.
///
/// A stack is inherently one run, and a root window is a run of itself.
/// Otherwise the run is found by climbing to the highest ancestor sharing
/// the closest parent's axis and sweeping its subtree: same-axis splits are
/// descended, window and stack leaves join the current group, and a
/// perpendicular split closes the group without being entered. Perpendicular
/// sub-layouts change geometry in a way that breaks the "same visual
/// row/column" property, so they act as boundaries between runs.
pub fn consecutive_split_siblings<'a>(
    location: &WindowLocation<'a>,
) -> Result<Vec<&'a Window>, LayoutError> {
    if let Some(stack) = location.parent_stack {
        if stack.windows.len() > 1 {
            return Ok(stack.windows.iter().collect());
        }
    }

    let Some(closest) = location.ancestors.last() else {
        return Ok(vec![location.window]);
    };
    let axis = closest.split_type;
    let start = run_start(&location.ancestors, axis);

    let mut groups: Vec<Vec<&Window>> = Vec::new();
    let mut current: Vec<&Window> = Vec::new();
    sweep(&*start.first_child, axis, &mut groups, &mut current);
    sweep(&*start.second_child, axis, &mut groups, &mut current);
    if !current.is_empty() {
        groups.push(current);
    }

    if groups.len() == 1 {
        return Ok(groups.pop().unwrap_or_default());
    }
    groups
        .into_iter()
        .find(|group| group.iter().any(|w| w.id == location.window.id))
        .ok_or(LayoutError::InvariantViolation(location.window.id))
}

/// Highest ancestor reachable from the closest parent through splits that
/// all share `axis`. Expects a non-empty ancestor chain.
pub(crate) fn run_start<'a>(ancestors: &[&'a Split], axis: Orientation) -> &'a Split {
    let mut start = ancestors[ancestors.len() - 1];
    for ancestor in ancestors.iter().rev().skip(1) {
        if ancestor.split_type != axis {
            break;
        }
        start = ancestor;
    }
    start
}

fn sweep<'a>(
    node: &'a Node,
    axis: Orientation,
    groups: &mut Vec<Vec<&'a Window>>,
    current: &mut Vec<&'a Window>,
) {
    match node {
        Node::Window(w) => current.push(w),
        Node::Stack(s) => current.extend(s.windows.iter()),
        Node::Split(s) if s.split_type == axis => {
            sweep(&*s.first_child, axis, groups, current);
            sweep(&*s.second_child, axis, groups, current);
        }
        // Perpendicular sub-layout: close the run without entering it.
        Node::Split(_) => {
            if !current.is_empty() {
                groups.push(std::mem::take(current));
            }
        }
    }
}
