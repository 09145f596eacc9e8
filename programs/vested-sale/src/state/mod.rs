pub mod sale;
pub mod schedule;

pub use sale::*;
pub use schedule::*;
