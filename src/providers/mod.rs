//! Document-level providers: hover previews and color decoration

pub mod colors;
pub mod hover;
