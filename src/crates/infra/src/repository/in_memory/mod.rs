pub mod catalog;

pub use catalog::InMemoryCatalog;
