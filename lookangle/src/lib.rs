pub extern crate nalgebra as na;

pub use crate::error::Error;

pub mod config;
pub mod correction;
pub mod driver;
pub mod engine;
pub mod error;
pub mod output;
pub mod run;
