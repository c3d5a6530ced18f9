pub mod user_response;

pub use user_response::{
    MessageResponse, RegisterUserResponse, RegisteredUser, UserPayload, UserPayloadResponse,
};
