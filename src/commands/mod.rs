//! CLI command implementations

pub mod clean;
pub mod generate;
pub mod images;
pub mod init;
pub mod list;
pub mod new;
