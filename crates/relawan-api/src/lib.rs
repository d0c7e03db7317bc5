//! # Relawan API
//! 
//! HTTP handlers, middleware, uploads and the response envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod upload;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
pub use upload::UploadStore;
