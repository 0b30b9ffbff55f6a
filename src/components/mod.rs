pub mod app;
pub mod controls_panel;
pub mod grid_view;

pub use app::App;
