//! Command-line surface for the vmrc client.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cli;
