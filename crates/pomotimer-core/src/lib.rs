pub mod clock;
pub mod error;
pub mod models;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
