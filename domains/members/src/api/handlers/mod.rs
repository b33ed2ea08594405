//! HTTP handlers for the Members domain

pub mod auth;
pub mod social;
