extern crate nalgebra as na;

pub mod look;
pub mod prelude;
pub mod site;
pub mod time;
pub mod tle;
