// Presentation layer - Terminal rendering of the dashboard session
pub mod console;
pub mod render;
