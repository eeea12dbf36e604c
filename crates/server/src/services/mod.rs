//! Application services: everything between the HTTP handlers and the
//! external collaborators.

pub mod auth;
pub mod dashboard;
pub mod storage;
pub mod whatsapp;
