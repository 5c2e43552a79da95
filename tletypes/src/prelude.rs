pub use crate::look::{EciState, Topo};
pub use crate::site::GroundSite;
pub use crate::time::{Epoch, MinutesSinceEpoch, TimeWindow, Timestamp, WindowError};
pub use crate::tle::TwoLineElementSet;
