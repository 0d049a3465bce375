pub mod activities_api;

pub use activities_api::{HttpRosterStore, RosterApiError, RosterStore, SignupReceipt};
