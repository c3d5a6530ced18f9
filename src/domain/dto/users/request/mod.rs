pub mod activate_user_request;
pub mod login_request;
pub mod register_user_request;

pub use activate_user_request::{ActivateUserRequest, ActivationKeyQuery};
pub use login_request::LoginRequest;
pub use register_user_request::RegisterUserRequest;
