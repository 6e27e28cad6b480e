pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse, ResourceError};
pub use handlers::{AppState, HealthResponse, ListResponse};
pub use routes::*;
