//! Auth-domain scope requests and token material.

pub mod scope;
pub mod token;

pub use scope::*;
pub use token::*;
