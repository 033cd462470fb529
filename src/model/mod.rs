pub mod error;
pub mod forest;
pub mod rain;
pub mod step;
pub mod training_set;
pub mod tree;
