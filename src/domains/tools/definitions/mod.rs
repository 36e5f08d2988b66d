//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file.

pub mod common;
pub mod convert;
pub mod hobby;
pub mod weather;

pub use convert::{CToFParams, CToFTool};
pub use hobby::{HobbyParams, HobbyTool};
pub use weather::{TokyoWeatherParams, TokyoWeatherTool};
