//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod customer_repo;
pub mod drawing_repo;
pub mod library_template_repo;
pub mod project_repo;
pub mod revision_repo;
pub mod rfi_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use customer_repo::CustomerRepo;
pub use drawing_repo::DrawingRepo;
pub use library_template_repo::LibraryTemplateRepo;
pub use project_repo::ProjectRepo;
pub use revision_repo::RevisionRepo;
pub use rfi_repo::RfiRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
