pub mod backup;
pub mod bmi;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod handler;
pub mod recipes;
pub mod storage;
pub mod stores;
pub mod types;

pub mod metadata {
    include!(concat!(env!("OUT_DIR"), "/pkg_info.rs"));
}

pub use dashboard::Dashboard;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, SharedStorage};
