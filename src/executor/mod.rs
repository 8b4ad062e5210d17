pub mod flow;
pub mod strategy;

pub use flow::{Bootstrap, Outcome};
