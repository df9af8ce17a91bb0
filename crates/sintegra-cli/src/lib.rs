//! Library components of the `sintegra` command-line tool.

pub mod batch;
pub mod layout;
pub mod logging;
