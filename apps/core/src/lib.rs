pub mod config;
pub mod contract;
pub mod controller;
pub mod core_service;
pub mod debounce;
pub mod engine;
pub mod logging;
pub mod model;
pub mod opener;
pub mod runtime;
pub mod search;
pub mod transport;
pub mod worker;
