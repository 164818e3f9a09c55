pub mod providers;
pub mod recommendations;

pub use recommendations::Recommender;
