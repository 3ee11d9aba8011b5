pub mod message_repo;

pub use message_repo::InMemoryMessageStore;
