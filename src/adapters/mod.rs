// Adapters layer: concrete implementations of the domain ports.

pub mod references;

pub use references::InMemoryReferences;
