/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod local_cache_license_source;
mod pin_file;
mod snapshot_document;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use local_cache_license_source::LocalCacheLicenseSource;
