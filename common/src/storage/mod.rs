// Storage module for the shared trending data file

pub mod data_file;

pub use data_file::DataFile;
