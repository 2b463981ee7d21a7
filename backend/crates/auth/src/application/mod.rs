//! Application Layer
//!
//! Use cases and application services.

pub mod add_admin;
pub mod config;
pub mod credentials;
pub mod delete_admin;
pub mod edit_super_admin;
pub mod list_admins;
pub mod login;
pub mod token;

// Re-exports
pub use add_admin::{AddAdminInput, AddAdminOutput, AddAdminUseCase};
pub use config::AuthConfig;
pub use delete_admin::DeleteAdminUseCase;
pub use edit_super_admin::{EditSuperAdminInput, EditSuperAdminUseCase};
pub use list_admins::ListAdminsUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use token::{Claims, Identity, TokenService};
