//! Domain layer - Core business objects and collaborator seams
//!
//! This layer contains:
//! - Entities: users, messages, commands, resolved targets
//! - Traits: the platform client and the collaborators the pipeline consumes

pub mod entities;
pub mod traits;
