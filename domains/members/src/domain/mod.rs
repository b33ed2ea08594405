//! Members domain: accounts, reconciliation, sessions

pub mod entities;
pub mod error;
pub mod reconcile;
pub mod sessions;
