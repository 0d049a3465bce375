pub mod models;
pub mod remote;
pub mod services;
pub mod view;
