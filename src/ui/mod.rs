//! Terminal UI: console seam, keystroke decoding, styling and preview rendering

pub mod input;
pub mod preview;
pub mod terminal;
pub mod theme;

pub use input::{Key, LineBuffer, LineEdit};
pub use preview::render_details;
pub use terminal::{Console, TerminalConsole};
pub use theme::Theme;
