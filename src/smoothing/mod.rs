pub mod holt_winters;

pub use holt_winters::{holt_winters, HoltWintersConfig, HoltWintersMode, HoltWintersOutput};
