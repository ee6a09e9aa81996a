pub mod post;
pub mod user;
pub mod service_request;
pub mod verification;
pub mod barangay;

pub use post::*;
pub use user::*;
pub use service_request::*;
pub use verification::*;
pub use barangay::*;
