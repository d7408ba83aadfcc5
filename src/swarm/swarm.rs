//! Swarm container type
//!
//! A fixed-size ordered collection of candidates.

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::space::bounds::Bounds;
use crate::swarm::candidate::Candidate;

/// The population of fireflies
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Swarm {
    candidates: Vec<Candidate>,
}

impl Swarm {
    /// Create a swarm from existing candidates
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Draw `size` unevaluated candidates uniformly inside `bounds`
    pub fn random<R: Rng>(size: usize, dimension: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let candidates = (0..size)
            .map(|_| Candidate::new(bounds.sample_vec(dimension, rng)))
            .collect();
        Self { candidates }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the swarm is empty
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get a candidate by index
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Get an iterator over the candidates
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Get a mutable iterator over the candidates
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.candidates.iter_mut()
    }

    /// Borrow the candidates as a slice
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Index of the lowest fitness; ties go to the first encountered
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, c) in self.candidates.iter().enumerate() {
            match best {
                None => best = Some(i),
                Some(b) if c.fitness < self.candidates[b].fitness => best = Some(i),
                Some(_) => {}
            }
        }
        best
    }

    /// Index of the highest fitness; ties go to the first encountered
    pub fn worst_index(&self) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (i, c) in self.candidates.iter().enumerate() {
            match worst {
                None => worst = Some(i),
                Some(w) if c.fitness > self.candidates[w].fitness => worst = Some(i),
                Some(_) => {}
            }
        }
        worst
    }

    /// The candidate with the lowest fitness
    pub fn best(&self) -> Option<&Candidate> {
        self.best_index().map(|i| &self.candidates[i])
    }

    /// The candidate with the highest fitness
    pub fn worst(&self) -> Option<&Candidate> {
        self.worst_index().map(|i| &self.candidates[i])
    }

    /// Number of candidates that have been evaluated
    pub fn count_evaluated(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_evaluated()).count()
    }

    /// Mean fitness over evaluated candidates
    pub fn mean_fitness(&self) -> Option<f64> {
        let evaluated: Vec<f64> = self
            .candidates
            .iter()
            .filter(|c| c.is_evaluated())
            .map(|c| c.fitness)
            .collect();
        if evaluated.is_empty() {
            None
        } else {
            Some(evaluated.iter().sum::<f64>() / evaluated.len() as f64)
        }
    }

    /// Mean pairwise Euclidean distance
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        let mut count = 0;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.candidates[i].distance(&self.candidates[j]);
                count += 1;
            }
        }

        total_distance / count as f64
    }
}

impl Index<usize> for Swarm {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.candidates[index]
    }
}

impl IndexMut<usize> for Swarm {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.candidates[index]
    }
}
