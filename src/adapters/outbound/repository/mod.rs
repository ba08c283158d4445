/// Repository adapters serving descriptors and version listings
mod caching_descriptor_reader;
mod in_memory_repository;

pub use caching_descriptor_reader::CachingDescriptorReader;
pub use in_memory_repository::InMemoryRepository;
