//! Presentation layer: a function from session state to egui widgets.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
