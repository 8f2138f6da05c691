pub mod output;
pub mod spinner;

pub use output::OutputHandler;
