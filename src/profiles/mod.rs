//! Reference profile library
//!
//! Learns one FeatureTuple per known fault from reference captures. Library
//! construction never fails: a reference that cannot be loaded is left out
//! and recorded, and the caller decides whether a partial library is usable.

pub mod library;

pub use library::{LibraryBuild, ProfileFailure, ProfileLibrary};
