//! Terminal front end for the BILL-E eligibility engine.

pub mod config;
pub mod input;
pub mod interactive;
pub mod logging;
pub mod render;
pub mod replay;
