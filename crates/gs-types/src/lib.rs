pub mod errors;
pub mod experiment;
pub mod search;

pub use errors::*;
pub use experiment::*;
pub use search::*;
