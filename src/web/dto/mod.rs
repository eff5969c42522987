//! Data transfer objects for the Brasa Web API.

mod request;
mod response;
mod validation;

pub use request::{CreateReplyRequest, CreateThreadRequest, LoginRequest, RegisterRequest};
pub use response::{
    ApiResponse, AuthResponse, ImageInfo, MeResponse, ReplyResponse, ThreadResponse,
    ThreadSummaryResponse, UploadResponse,
};
pub use validation::ValidatedJson;
