//! Elitist archive reinjection
//!
//! After each movement sweep the whole swarm is offered to the archive and the
//! worst firefly is overwritten by a copy drawn from it.

use rand::Rng;
use tracing::debug;

use crate::firefly::config::FireflyConfig;
use crate::swarm::archive::{Archive, ArchiveDraw};
use crate::swarm::swarm::Swarm;

/// Archive plus draw policy for one run
#[derive(Clone, Debug)]
pub struct ElitistArchive {
    archive: Archive,
    draw: ArchiveDraw,
}

impl ElitistArchive {
    /// Create an empty archive sized from `config`
    pub fn from_config(config: &FireflyConfig) -> Self {
        Self::new(config.archive_size, config.archive_draw)
    }

    /// Create an empty archive
    pub fn new(capacity: usize, draw: ArchiveDraw) -> Self {
        Self {
            archive: Archive::new(capacity),
            draw,
        }
    }

    /// The underlying archive
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Archive the swarm without touching it
    pub fn record(&mut self, swarm: &Swarm) {
        self.archive.insert_batch(swarm.iter());
    }

    /// Archive the swarm and reinject into its worst slot
    ///
    /// Returns the index that was overwritten, or `None` when the archive
    /// holds nothing to draw from.
    pub fn apply<R: Rng>(&mut self, swarm: &mut Swarm, rng: &mut R) -> Option<usize> {
        self.record(swarm);

        let worst = swarm.worst_index()?;
        let drawn = self.archive.draw(self.draw, rng)?.clone();
        debug!(
            slot = worst,
            replaced = swarm[worst].fitness,
            reinjected = drawn.fitness,
            "elitist reinjection"
        );
        swarm[worst] = drawn;
        Some(worst)
    }
}
