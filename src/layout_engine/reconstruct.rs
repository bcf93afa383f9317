use tracing::debug;

use crate::layout_engine::{LayoutError, Orientation};
use crate::model::{Frame, Node, Split, Stack, Window};
use crate::sys::yabai::RawWindow;

/// Slack absorbed when comparing frame edges against a candidate split
/// line. yabai reports frames with sub-pixel rounding.
const SPLIT_TOLERANCE: f64 = 0.1;

/// Infers the BSP tree that produced a flat list of window frames.
///
/// yabai only exposes windows and their rectangles, not the tree that laid
/// them out, so the tree is rebuilt from geometry alone. The result is a
/// tree *consistent with* the observed frames; when several trees could
/// produce the same frames, the split with the widest center spread wins,
/// which tracks how yabai itself subdivides space closely enough for the
/// planned commands to behave predictably.
pub fn reconstruct_tree(windows: &[RawWindow]) -> Result<Node, LayoutError> {
    if windows.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    let refs: Vec<&RawWindow> = windows.iter().collect();
    Ok(build(&refs))
}

fn build(windows: &[&RawWindow]) -> Node {
    if let [only] = windows {
        return Node::Window(leaf(only));
    }

    let first_frame = windows[0].frame;
    if windows.iter().all(|w| w.frame == first_frame) {
        return stack_of(windows, first_frame);
    }

    let Some((orientation, line)) = find_best_split(windows) else {
        // Irregular geometry (overlapping or floating remnants). Degrade to
        // a stack over the bounding box rather than failing the whole query.
        debug!(
            windows = windows.len(),
            "no clean split line found, treating group as a stack"
        );
        return stack_of(windows, bounding(windows));
    };

    let (first, second) = partition(windows, orientation, line);
    Node::Split(Split {
        first_child: Box::new(build(&first)),
        second_child: Box::new(build(&second)),
        split_type: orientation,
        frame: bounding(windows),
    })
}

fn leaf(raw: &RawWindow) -> Window {
    Window {
        id: raw.id,
        app: raw.app.clone(),
        title: raw.title.clone(),
        frame: raw.frame,
    }
}

fn stack_of(windows: &[&RawWindow], frame: Frame) -> Node {
    let mut sorted = windows.to_vec();
    sorted.sort_by_key(|w| (w.stack_index.unwrap_or(0), w.id));
    Node::Stack(Stack {
        windows: sorted.into_iter().map(leaf).collect(),
        frame,
    })
}

fn bounding(windows: &[&RawWindow]) -> Frame {
    Frame::bounding(windows.iter().map(|w| w.frame))
}

/// Splits `windows` at `line` along `orientation`. A window lands on the
/// near side when it sits wholly before the line (within tolerance), on the
/// far side when wholly after; straddlers land on neither.
fn partition<'a>(
    windows: &[&'a RawWindow],
    orientation: Orientation,
    line: f64,
) -> (Vec<&'a RawWindow>, Vec<&'a RawWindow>) {
    let (near, far): (fn(&Frame) -> f64, fn(&Frame) -> f64) = match orientation {
        Orientation::Vertical => (Frame::right, Frame::left),
        Orientation::Horizontal => (Frame::bottom, Frame::top),
    };
    let before = windows
        .iter()
        .copied()
        .filter(|w| near(&w.frame) <= line + SPLIT_TOLERANCE)
        .collect();
    let after = windows
        .iter()
        .copied()
        .filter(|w| far(&w.frame) >= line - SPLIT_TOLERANCE)
        .collect();
    (before, after)
}

/// Searches every left/right x-line and top/bottom y-line for a clean
/// partition, keeping the candidate whose two sides have the widest
/// center-to-center spread. Lines are scanned coordinate-ascending with
/// vertical candidates first, and ties keep the first match, so the choice
/// is deterministic.
fn find_best_split(windows: &[&RawWindow]) -> Option<(Orientation, f64)> {
    let vertical_lines = candidate_lines(windows, |f| [f.left(), f.right()]);
    let horizontal_lines = candidate_lines(windows, |f| [f.top(), f.bottom()]);

    let mut best = None;
    let mut max_spread = -1.0f64;
    for (orientation, lines) in [
        (Orientation::Vertical, vertical_lines),
        (Orientation::Horizontal, horizontal_lines),
    ] {
        for &line in &lines {
            let (before, after) = partition(windows, orientation, line);
            let clean = !before.is_empty()
                && !after.is_empty()
                && before.len() + after.len() == windows.len();
            if !clean {
                continue;
            }
            let spread = match orientation {
                Orientation::Vertical => {
                    (bounding(&before).center_x() - bounding(&after).center_x()).abs()
                }
                Orientation::Horizontal => {
                    (bounding(&before).center_y() - bounding(&after).center_y()).abs()
                }
            };
            if spread > max_spread {
                max_spread = spread;
                best = Some((orientation, line));
            }
        }
    }
    best
}

fn candidate_lines(windows: &[&RawWindow], edges: impl Fn(&Frame) -> [f64; 2]) -> Vec<f64> {
    let mut lines: Vec<f64> = windows.iter().flat_map(|w| edges(&w.frame)).collect();
    lines.sort_by(f64::total_cmp);
    lines.dedup();
    lines
}
