pub mod gates;
pub mod loader_service;
pub mod notifier_service;
pub mod signup_service;
pub mod unregister_service;
