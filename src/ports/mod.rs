// src/ports/mod.rs
pub mod dom;
pub mod html;
pub mod page;
pub mod terminal;

pub use dom::{Document, Element};
pub use html::HtmlPresenter;
pub use page::{PageController, PageSettings};
pub use terminal::TerminalPresenter;
