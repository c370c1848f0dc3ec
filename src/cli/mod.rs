//! Terminal front end: stdin input sources, the board display and the
//! main menu helpers.

#![cfg(feature = "std")]

pub mod display;
pub mod input;
pub mod menu;

pub use display::{render_grid, wrap_text, TerminalDisplay, DESCRIPTION_WIDTH};
pub use input::{LineReader, StdinPlacement, StdinTargets};
pub use menu::{parse_choice, MenuChoice};
