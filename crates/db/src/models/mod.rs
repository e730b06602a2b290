//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod customer;
pub mod drawing;
pub mod library_template;
pub mod project;
pub mod revision;
pub mod rfi;
pub mod time_entry;
pub mod user;
