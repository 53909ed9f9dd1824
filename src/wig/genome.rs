use std::collections::HashMap;

use crate::wig::chrom::Chromosome;
use crate::wig::WigError;

/// Name-keyed collection of [`Chromosome`] coverage stores plus the
/// free-form attributes captured from the track line.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    chromosomes: HashMap<String, Chromosome>,
    metadata: HashMap<String, String>,
}

impl Genome {
    pub fn new() -> Genome {
        Genome::default()
    }

    /// Adds `chrom`, replacing any existing chromosome with the same name.
    pub fn add(&mut self, chrom: Chromosome) {
        self.chromosomes.insert(chrom.name().to_owned(), chrom);
    }

    pub fn get(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Chromosome> {
        self.chromosomes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chromosomes.contains_key(name)
    }

    pub fn contains_chrom(&self, chrom: &Chromosome) -> bool {
        self.contains(chrom.name())
    }

    /// Removes and returns the named chromosome.
    pub fn remove(&mut self, name: &str) -> Result<Chromosome, WigError> {
        self.chromosomes
            .remove(name)
            .ok_or_else(|| WigError::ChromosomeNotFound(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.values()
    }

    /// The `key=value` attributes of the track line, if one was present.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub(crate) fn set_metadata(&mut self, metadata: HashMap<String, String>) {
        self.metadata = metadata;
    }
}
