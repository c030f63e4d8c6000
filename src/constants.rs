// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Milliseconds between two counter animation frames (roughly 60 FPS).
///
/// Also the divisor for the per-frame step: `step = target / (duration / FRAME_INTERVAL_MS)`.
///
/// Used in: `domain/counter.rs`, `lib.rs`
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Default wall-clock length of one counter animation.
///
/// Used in: `config.rs`
pub const DEFAULT_COUNTER_DURATION_MS: u64 = 2000;

/// Fraction of a counter element that must be visible before it starts animating.
///
/// Used in: `config.rs`
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.6;

/// Maximum number of questions sampled into one quiz session.
///
/// Used in: `config.rs`, `application/quiz_loader.rs`
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Catalog page size when the form leaves it empty.
///
/// Used in: `config.rs`, `domain/catalog.rs`
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the catalog endpoint accepts.
///
/// Used in: `domain/catalog.rs`
pub const MAX_PAGE_SIZE: u32 = 200;

/// Base URL of the catalog API when neither config nor flag set one.
///
/// Used in: `config.rs`
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Static message shown in the quiz container when the questions cannot be loaded.
///
/// Used in: `ports/page.rs`
pub const QUIZ_LOAD_ERROR_MESSAGE: &str = "Error loading the quiz.";

/// Message shown in place of the results table for an empty page.
///
/// Used in: `ports/html.rs`, `ports/terminal.rs`
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Placeholder for null or missing catalog cells.
///
/// Used in: `domain/catalog.rs`
pub const EMPTY_CELL: &str = "-";

/// Delay in milliseconds after launching the browser on a rendered page.
///
/// The page lives in a temporary directory that is removed when the renderer
/// is dropped; the browser needs a moment to read it first.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
