/// Filesystem adapters: dataset files, report files and host facts
mod dataset_file;
mod file_writer;
mod os_release;

pub use dataset_file::DatasetFile;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use os_release::OsReleaseHostInfo;
