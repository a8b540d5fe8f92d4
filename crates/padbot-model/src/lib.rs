//! Domain types shared by the padbot client, core and API crates.
//!
//! Everything here is plain data: poses, action lifecycle states, provisioning
//! results and the operation records handed back to callers.

mod domain;
pub use domain::*;
