/// Database models
///
/// This module contains the persistent entities of the TaskNest system:
///
/// - `user`: Account identities
/// - `task`: Per-user todo items (the core entity)
/// - `conversation`: Chat sessions (agent feature scaffolding)
/// - `message`: Individual chat messages (agent feature scaffolding)

pub mod conversation;
pub mod message;
pub mod task;
pub mod user;
