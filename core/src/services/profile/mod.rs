//! Profile service module

mod service;


pub use service::ProfileService;
