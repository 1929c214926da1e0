//! Port traits defining external boundaries.
//!
//! The synthesis core reaches files on disk, fresh document ids and the
//! method-body generator only through these traits. Implementations live
//! in `src/adapters/`.

pub mod body;
pub mod filesystem;
pub mod id_gen;

pub use body::{BodyFuture, BodyGenerator};
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
