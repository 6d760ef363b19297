mod check;
mod generate;

pub use check::cmd_check;
pub use generate::{GenerateParams, cmd_generate};
