pub mod config;
pub mod consent;
pub mod elevation;
pub mod installer;
pub mod logging;
pub mod paths;
pub mod registry;
pub mod shortcuts;
pub mod state;
