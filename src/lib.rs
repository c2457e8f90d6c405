pub mod dsl;
pub mod fields;
pub mod generation;
pub mod presets;
pub mod render_state;
