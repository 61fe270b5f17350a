//! # sortd
//!
//! A smart file organizer for directory trees.
//!
//! sortd classifies files into categories (by extension or by
//! modification date) and detects byte-identical duplicates, then
//! relocates files accordingly. It features:
//!
//! - **Two-pass duplicate detection**: size buckets, then full SHA-256;
//!   the oldest copy of each set is kept, extras go to `_duplicates/`
//! - **Collision-safe moves**: destinations never overwrite an existing
//!   file; conflicting names get `_1`, `_2`, ... suffixes
//! - **Fixed pipeline order**: duplicates, then by-type, then by-date,
//!   so later stages always see each file's current location
//! - **Dry-run contract**: simulate a full run with zero mutation and a
//!   plan identical to what a live run would execute

pub mod cli;
pub mod common;
pub mod duplicates;
pub mod organizer;
pub mod scanner;
