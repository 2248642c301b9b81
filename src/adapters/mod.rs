// Adapters layer: concrete implementations of the domain ports.

pub mod local_corpus;

pub use local_corpus::LocalCorpus;
