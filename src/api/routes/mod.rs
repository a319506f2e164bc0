//! API route modules.

pub mod action_items;
pub mod agenda;
pub mod decisions;
pub mod meeting;
pub mod suggestions;
pub mod transcript;
