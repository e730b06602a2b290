//! Domain logic for the CastWorks design management system.
//!
//! This crate has no I/O: everything here is pure functions, constants,
//! and types shared by the repository and API layers. Anything that
//! touches the database lives in `castworks-db`; anything HTTP lives in
//! `castworks-api`.

pub mod contact;
pub mod error;
pub mod handoff;
pub mod numbering;
pub mod pagination;
pub mod products;
pub mod roles;
pub mod status;
pub mod timeclock;
pub mod types;
