pub mod forecaster;
pub mod iterative;
pub mod timeline;
pub mod trained;
