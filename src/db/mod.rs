pub mod catalog;
pub mod loader;
pub mod similarity;

pub use catalog::Catalog;
pub use loader::load_data;
pub use similarity::SimilarityMatrix;
