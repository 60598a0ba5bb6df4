mod hostname_file;

pub use hostname_file::HostnameFileReader;
