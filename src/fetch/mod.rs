pub mod archive;
pub mod registry;
pub mod urls;

pub use archive::ArchiveFetcher;
