//! Request handlers.

pub mod catalog;
pub mod health;
pub mod projects;
pub mod script;
pub mod usage;
pub mod video;

pub use catalog::*;
pub use health::*;
pub use projects::*;
pub use script::*;
pub use usage::*;
pub use video::*;
