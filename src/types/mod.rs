// Passgen shared type definitions
// Each submodule defines types used across the application.

pub mod charset;
pub mod errors;
pub mod history;
pub mod password;
pub mod settings;
pub mod strength;
