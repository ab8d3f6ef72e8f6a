pub mod progress;
pub mod styles;

pub use styles::Styles;
