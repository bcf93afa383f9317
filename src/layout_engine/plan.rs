use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout_engine::siblings::{consecutive_split_siblings, run_start};
use crate::layout_engine::{InsertDirection, LayoutError, Orientation};
use crate::model::{Node, Split, Stack, WindowLocation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeEdge::Top => write!(f, "top"),
            ResizeEdge::Bottom => write!(f, "bottom"),
            ResizeEdge::Left => write!(f, "left"),
            ResizeEdge::Right => write!(f, "right"),
        }
    }
}

/// One atomic window-manager operation. Planners emit ordered sequences of
/// these; the yabai adapter maps each onto the real control surface. Later
/// operations assume the state left behind by earlier ones, so a plan is
/// only meaningful executed front to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WmOp {
    Focus {
        window: u32,
    },
    Warp {
        window: u32,
        target: u32,
        insert_direction: Option<InsertDirection>,
    },
    Stack {
        window: u32,
        target: u32,
    },
    ToggleFloat {
        window: u32,
    },
    Resize {
        window: u32,
        edge: ResizeEdge,
        dx: i32,
        dy: i32,
    },
    SetInsertDirection {
        window: u32,
        direction: InsertDirection,
    },
}

/// Collapses the located window's same-axis run into a single stack.
///
/// Starting from the highest same-axis ancestor, every same-axis split is
/// folded bottom-up: all windows of its first child are stacked onto the
/// first window found in its second child. Perpendicular splits are left
/// untouched, matching the sibling-run boundaries.
pub fn plan_fold(location: &WindowLocation) -> Result<Vec<WmOp>, LayoutError> {
    let closest = location
        .ancestors
        .last()
        .ok_or(LayoutError::NoParentSplit(location.window.id))?;
    let start = run_start(&location.ancestors, closest.split_type);

    let mut ops = Vec::new();
    fold_split(start, closest.split_type, &mut ops);
    debug!(window = location.window.id, ops = ops.len(), "planned fold");
    Ok(ops)
}

fn fold_split(split: &Split, axis: Orientation, ops: &mut Vec<WmOp>) {
    for child in [&split.first_child, &split.second_child] {
        if let Node::Split(inner) = child.as_ref() {
            if inner.split_type == axis {
                fold_split(inner, axis, ops);
            }
        }
    }
    let Some(target) = split.second_child.first_window_id() else {
        return;
    };
    for window in split.first_child.window_ids() {
        if window != target {
            ops.push(WmOp::Stack { window, target });
        }
    }
}

/// Unrolls a stack into a chain of binary splits perpendicular to
/// `parent_axis`, preserving stack order spatially.
///
/// yabai cannot warp a stacked window onto a member of its own stack, so
/// the first member is pulled out by cycling its float state, warped back
/// against the remainder on the start side, and every further member then
/// splits off the previously placed one.
pub fn plan_unroll(stack: &Stack, parent_axis: Orientation) -> Vec<WmOp> {
    if stack.windows.len() <= 1 {
        return Vec::new();
    }
    let start = parent_axis.opposite().start_direction();
    let append = start.opposite();
    let ids: Vec<u32> = stack.windows.iter().map(|w| w.id).collect();

    let mut ops = Vec::with_capacity(ids.len() + 2);
    ops.push(WmOp::ToggleFloat { window: ids[0] });
    ops.push(WmOp::ToggleFloat { window: ids[0] });
    ops.push(WmOp::Warp {
        window: ids[0],
        target: ids[1],
        insert_direction: Some(start.into()),
    });
    let mut previous = ids[0];
    for &id in &ids[1..] {
        ops.push(WmOp::Warp {
            window: id,
            target: previous,
            insert_direction: Some(append.into()),
        });
        previous = id;
    }
    ops
}

/// Stack toggle: a window inside a multi-member stack unrolls that stack
/// along its parent's axis (horizontal at the root, where no parent exists
/// to inherit from); any other window folds its same-axis run.
pub fn plan_toggle(location: &WindowLocation) -> Result<Vec<WmOp>, LayoutError> {
    match location.parent_stack {
        Some(stack) if stack.windows.len() > 1 => {
            let axis = location
                .ancestors
                .last()
                .map(|s| s.split_type)
                .unwrap_or(Orientation::Horizontal);
            Ok(plan_unroll(stack, axis))
        }
        _ => plan_fold(location),
    }
}

/// Recreates the located window's sibling run as a chain of splits along
/// the opposite axis, keeping window order. Runs of one window, a root
/// window included, have nothing to rechain and plan no operations.
pub fn plan_switch_split(location: &WindowLocation) -> Result<Vec<WmOp>, LayoutError> {
    let siblings = consecutive_split_siblings(location)?;
    if siblings.len() <= 1 {
        return Ok(Vec::new());
    }
    let axis = location
        .ancestors
        .last()
        .map(|s| s.split_type)
        .unwrap_or(Orientation::Horizontal);

    let append = axis.opposite().start_direction().opposite();
    let ids: Vec<u32> = siblings.iter().map(|w| w.id).collect();

    let mut ops = Vec::with_capacity(ids.len());
    // The first window swaps behind the second to seed the new chain, then
    // each remaining window splits off the chain tail in order.
    ops.push(WmOp::Warp {
        window: ids[0],
        target: ids[1],
        insert_direction: Some(append.into()),
    });
    let mut target = ids[0];
    for &id in &ids[1..] {
        ops.push(WmOp::Warp {
            window: id,
            target,
            insert_direction: Some(append.into()),
        });
        target = id;
    }
    Ok(ops)
}

/// Resize toward the split fence shared with the window's closest parent:
/// the first child drags its far edge outward, the second child drags its
/// near edge inward, so a positive increment always grows the window.
pub fn plan_resize(location: &WindowLocation, increment: i32) -> Result<WmOp, LayoutError> {
    let closest = location
        .ancestors
        .last()
        .ok_or(LayoutError::NoParentSplit(location.window.id))?;
    let window = location.window.id;
    let op = match (closest.split_type, location.is_first_child) {
        (Orientation::Vertical, true) => WmOp::Resize {
            window,
            edge: ResizeEdge::Right,
            dx: increment,
            dy: 0,
        },
        (Orientation::Vertical, false) => WmOp::Resize {
            window,
            edge: ResizeEdge::Left,
            dx: -increment,
            dy: 0,
        },
        (Orientation::Horizontal, true) => WmOp::Resize {
            window,
            edge: ResizeEdge::Bottom,
            dx: 0,
            dy: increment,
        },
        (Orientation::Horizontal, false) => WmOp::Resize {
            window,
            edge: ResizeEdge::Top,
            dx: 0,
            dy: -increment,
        },
    };
    Ok(op)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::layout_engine::Direction;
    use crate::model::tree::tests::{split, stack, window};

    #[test]
    fn fold_of_three_window_row_needs_two_stacks() {
        let tree = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            split(
                Orientation::Vertical,
                Node::Window(window(2)),
                Node::Window(window(3)),
            ),
        );
        let location = tree.find_window(2).unwrap();
        let ops = plan_fold(&location).unwrap();
        assert_eq!(ops, vec![
            WmOp::Stack { window: 2, target: 3 },
            WmOp::Stack { window: 1, target: 2 },
        ]);
    }

    #[test]
    fn fold_does_not_enter_perpendicular_subtrees() {
        let tree = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            split(
                Orientation::Horizontal,
                Node::Window(window(2)),
                Node::Window(window(3)),
            ),
        );
        let location = tree.find_window(1).unwrap();
        let ops = plan_fold(&location).unwrap();
        // The horizontal subtree is a boundary; only its first window is
        // used as the fold target, window 3 is never moved.
        assert_eq!(ops, vec![WmOp::Stack { window: 1, target: 2 }]);
    }

    #[test]
    fn fold_of_root_window_fails() {
        let tree = Node::Window(window(1));
        let location = tree.find_window(1).unwrap();
        assert_eq!(plan_fold(&location), Err(LayoutError::NoParentSplit(1)));
    }

    #[test]
    fn unroll_cycles_float_then_warps_in_stack_order() {
        let Node::Stack(s) = stack(&[1, 2, 3]) else {
            unreachable!()
        };
        let ops = plan_unroll(&s, Orientation::Vertical);

        // Perpendicular to a vertical parent: west to seed, east to append.
        let start: InsertDirection = Direction::West.into();
        let append: InsertDirection = Direction::East.into();
        assert_eq!(ops, vec![
            WmOp::ToggleFloat { window: 1 },
            WmOp::ToggleFloat { window: 1 },
            WmOp::Warp {
                window: 1,
                target: 2,
                insert_direction: Some(start)
            },
            WmOp::Warp {
                window: 2,
                target: 1,
                insert_direction: Some(append)
            },
            WmOp::Warp {
                window: 3,
                target: 2,
                insert_direction: Some(append)
            },
        ]);
    }

    #[test]
    fn unroll_of_single_member_stack_is_a_no_op() {
        let Node::Stack(s) = stack(&[1]) else { unreachable!() };
        assert_eq!(plan_unroll(&s, Orientation::Vertical), vec![]);
    }

    #[test]
    fn toggle_unrolls_inside_a_multi_member_stack() {
        let tree = split(
            Orientation::Vertical,
            stack(&[1, 2]),
            Node::Window(window(3)),
        );
        let location = tree.find_window(1).unwrap();
        let ops = plan_toggle(&location).unwrap();
        assert_eq!(ops[0], WmOp::ToggleFloat { window: 1 });
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn toggle_folds_outside_a_stack() {
        let tree = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            Node::Window(window(2)),
        );
        let location = tree.find_window(1).unwrap();
        let ops = plan_toggle(&location).unwrap();
        assert_eq!(ops, vec![WmOp::Stack { window: 1, target: 2 }]);
    }

    #[test]
    fn toggle_of_root_stack_defaults_to_horizontal_axis() {
        let tree = stack(&[1, 2]);
        let location = tree.find_window(1).unwrap();
        let ops = plan_toggle(&location).unwrap();
        // Horizontal parent axis unrolls north/south.
        assert_eq!(ops[2], WmOp::Warp {
            window: 1,
            target: 2,
            insert_direction: Some(InsertDirection::North),
        });
    }

    #[test]
    fn switch_split_rechains_the_run_along_the_opposite_axis() {
        let tree = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            split(
                Orientation::Vertical,
                Node::Window(window(2)),
                Node::Window(window(3)),
            ),
        );
        let location = tree.find_window(2).unwrap();
        let ops = plan_switch_split(&location).unwrap();
        let append: InsertDirection = Direction::East.into();
        assert_eq!(ops, vec![
            WmOp::Warp {
                window: 1,
                target: 2,
                insert_direction: Some(append)
            },
            WmOp::Warp {
                window: 2,
                target: 1,
                insert_direction: Some(append)
            },
            WmOp::Warp {
                window: 3,
                target: 2,
                insert_direction: Some(append)
            },
        ]);
    }

    #[test]
    fn switch_split_of_root_window_is_a_no_op() {
        let tree = Node::Window(window(1));
        let location = tree.find_window(1).unwrap();
        assert_eq!(plan_switch_split(&location).unwrap(), vec![]);
    }

    #[test]
    fn switch_split_with_no_siblings_is_a_no_op() {
        let tree = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            split(
                Orientation::Horizontal,
                Node::Window(window(2)),
                Node::Window(window(3)),
            ),
        );
        let location = tree.find_window(1).unwrap();
        assert_eq!(plan_switch_split(&location).unwrap(), vec![]);
    }

    #[test]
    fn resize_picks_the_edge_facing_the_split() {
        let vertical = split(
            Orientation::Vertical,
            Node::Window(window(1)),
            Node::Window(window(2)),
        );
        let horizontal = split(
            Orientation::Horizontal,
            Node::Window(window(3)),
            Node::Window(window(4)),
        );

        let op = plan_resize(&vertical.find_window(1).unwrap(), 20).unwrap();
        assert_eq!(op, WmOp::Resize {
            window: 1,
            edge: ResizeEdge::Right,
            dx: 20,
            dy: 0
        });

        let op = plan_resize(&vertical.find_window(2).unwrap(), 20).unwrap();
        assert_eq!(op, WmOp::Resize {
            window: 2,
            edge: ResizeEdge::Left,
            dx: -20,
            dy: 0
        });

        let op = plan_resize(&horizontal.find_window(3).unwrap(), 20).unwrap();
        assert_eq!(op, WmOp::Resize {
            window: 3,
            edge: ResizeEdge::Bottom,
            dx: 0,
            dy: 20
        });

        let op = plan_resize(&horizontal.find_window(4).unwrap(), 20).unwrap();
        assert_eq!(op, WmOp::Resize {
            window: 4,
            edge: ResizeEdge::Top,
            dx: 0,
            dy: -20
        });
    }

    #[test]
    fn resize_of_root_window_fails() {
        let tree = Node::Window(window(1));
        let location = tree.find_window(1).unwrap();
        assert_eq!(plan_resize(&location, 20), Err(LayoutError::NoParentSplit(1)));
    }
}
