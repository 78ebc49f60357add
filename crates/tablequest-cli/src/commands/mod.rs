pub mod badges;
pub mod common;
pub mod config;
pub mod play;
pub mod profile;
pub mod stats;
pub mod tables;
