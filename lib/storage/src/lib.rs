mod memory;

pub use memory::MemTripleStore;
