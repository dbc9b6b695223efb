//! mork-abook - read Thunderbird address books from the command line.
//!
//! This crate wraps the [`mork`] decoder with everything a host application
//! needs around it: locating the address book of the default Thunderbird
//! profile, loading it from disk, and rendering the contacts.

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
