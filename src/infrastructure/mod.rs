pub mod audit;
pub mod in_memory;
pub mod invoice;
