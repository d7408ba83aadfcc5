//! Swarm state
//!
//! Candidates, the swarm that owns them, and the elitist archive.

pub mod archive;
pub mod candidate;
#[allow(clippy::module_inception)]
pub mod swarm;

pub mod prelude {
    pub use super::archive::{Archive, ArchiveDraw};
    pub use super::candidate::Candidate;
    pub use super::swarm::Swarm;
}
