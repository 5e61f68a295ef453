//! Infrastructure layer - signing, session storage and services

pub mod conversation;
pub mod logging;
pub mod security;
pub mod services;
