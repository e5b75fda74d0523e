pub mod auth;
pub mod gradebook;

pub use auth::AuthService;
pub use gradebook::GradebookService;
