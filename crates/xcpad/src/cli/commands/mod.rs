pub mod build;
pub mod clean;
pub mod config;
pub mod devices;
pub mod format;
pub mod run;
pub mod simulators;
pub mod tools;
