pub mod roster;

pub use roster::{Activity, Roster};
