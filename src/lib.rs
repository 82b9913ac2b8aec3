pub mod app;
pub mod categories;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod range;
pub mod state;
pub mod stats;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use loader::load_dataset;
pub use state::AppState;
