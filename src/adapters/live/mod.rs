//! Live adapters backed by the real disk and random ids.

pub mod body;
pub mod filesystem;
pub mod id_gen;

pub use body::StubBodyGenerator;
pub use filesystem::LiveFileSystem;
pub use id_gen::LiveIdGenerator;
