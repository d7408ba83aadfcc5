//! Elitist archive
//!
//! A bounded pool of the best candidates seen so far, kept sorted by
//! ascending fitness.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::swarm::candidate::Candidate;

/// How a candidate is drawn from the archive for reinjection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveDraw {
    /// Uniformly at random among retained entries
    #[default]
    Uniform,
    /// Always the best retained entry
    Best,
}

/// Bounded archive of best-seen candidates
#[derive(Clone, Debug, PartialEq)]
pub struct Archive {
    entries: Vec<Candidate>,
    capacity: usize,
}

impl Archive {
    /// Create an empty archive holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries, best first
    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Best retained entry
    pub fn best(&self) -> Option<&Candidate> {
        self.entries.first()
    }

    /// Worst retained entry
    pub fn worst(&self) -> Option<&Candidate> {
        self.entries.last()
    }

    /// Insert copies of a batch of candidates, then sort and truncate
    ///
    /// Unevaluated candidates and exact duplicates of retained entries are
    /// skipped.
    pub fn insert_batch<'a, I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        for candidate in batch {
            if !candidate.is_evaluated() || self.entries.contains(candidate) {
                continue;
            }
            self.entries.push(candidate.clone());
        }
        self.entries.sort_by(|a, b| a.cmp_fitness(b));
        self.entries.truncate(self.capacity);
    }

    /// Pick an entry according to `policy`
    pub fn draw<R: Rng>(&self, policy: ArchiveDraw, rng: &mut R) -> Option<&Candidate> {
        if self.entries.is_empty() {
            return None;
        }
        match policy {
            ArchiveDraw::Best => self.entries.first(),
            ArchiveDraw::Uniform => {
                let idx = rng.gen_range(0..self.entries.len());
                self.entries.get(idx)
            }
        }
    }
}
