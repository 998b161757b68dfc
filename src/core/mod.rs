pub mod error;
pub mod form;
pub mod models;
pub mod presets;
pub mod settings;
