pub mod catalog;

pub use catalog::FixtureCatalog;
