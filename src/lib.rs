// Declare all modules that are part of this library
pub mod config;
pub mod types {
    pub mod dataset;
    pub mod report;
}
pub mod normalize;
pub mod stats;
pub mod compare;
pub mod dataset_io;
pub mod catalog;
