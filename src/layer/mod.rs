//! Tower Layer implementations for A2A protocol

pub mod auth;
pub mod session;
pub mod validation;

pub use auth::{AuthCredentials, AuthLayer, AuthService};
pub use session::{generate_session_id, SessionLayer, SessionService, SESSION_HEADER};
pub use validation::{A2AValidationLayer, A2AValidationService};
