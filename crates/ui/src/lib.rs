pub mod color;
pub mod page;
pub mod terminal;

pub use color::ColorMode;
pub use page::{CardNode, Page, ResultNode};
pub use terminal::{Command, TerminalView};

pub fn module_ready() -> bool {
    true
}
