// Terminal user interface
mod app;
mod grid;

pub use app::App;
