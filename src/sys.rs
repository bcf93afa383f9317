pub mod yabai;

pub use yabai::{RawSpace, RawWindow, Yabai, YabaiError};
