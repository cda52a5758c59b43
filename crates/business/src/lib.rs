//! # Vantrack Business
//!
//! Business logic layer - Reporter, Operator, Reviewer operations plus
//! credential verification. Each service takes the acting [`Identity`]
//! explicitly; there is no session or current-user global.
//!
//! [`Identity`]: vantrack_core::Identity

pub mod auth;
pub mod error;
pub mod operator;
pub mod reporter;
pub mod reviewer;
pub mod services;

pub use auth::CredentialService;
pub use error::{BusinessError, BusinessResult};
pub use operator::OperatorService;
pub use reporter::ReporterService;
pub use reviewer::ReviewerService;
pub use services::ServiceContext;
