pub mod by_id;
pub mod history;
pub mod latest;
pub mod log;
pub mod save;

// Re-export handler functions for use in routing
pub use by_id::get_canvas_by_id;
pub use history::get_canvas_history;
pub use latest::get_canvas;
pub use log::get_log;
pub use save::save_canvas;
