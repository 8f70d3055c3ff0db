pub mod export;
pub mod fallback;
pub mod presets;
