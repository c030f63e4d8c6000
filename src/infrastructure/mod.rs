// src/infrastructure/mod.rs
pub mod api;
pub mod questions;
pub mod renderer;

pub use api::ApiClient;
pub use questions::QuizResource;
pub use renderer::PageRenderer;
