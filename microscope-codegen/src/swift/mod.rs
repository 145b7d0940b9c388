//! Swift output model.
//!
//! Generated artifacts are assembled from these types and rendered through
//! their `Display` implementations.

pub mod file;
pub mod lens;

pub use file::MicroscopeFile;
pub use lens::{ArgumentSource, ConstructorArgument, LensDecl, Record};
