//! One handler per subcommand.

pub mod edit;
pub mod generate;
pub mod run;
