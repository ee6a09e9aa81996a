pub mod admin;
pub mod auth;
pub mod barangays;
pub mod posts;
pub mod public;
pub mod root;
pub mod service_requests;
pub mod users;
pub mod verifications;
