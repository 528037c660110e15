pub mod catalog;
pub mod config;
pub mod copier;
pub mod error;
pub mod fs;
pub mod hooks;
pub mod install;
pub mod io;
pub mod layout;
pub mod manifest;
pub mod paths;
pub mod project;
pub mod report;
pub mod request;
pub mod template;

#[cfg(test)]
mod testing;

pub use error::{KitError, Result};
