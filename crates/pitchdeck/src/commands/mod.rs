pub mod completion;
pub mod config;
pub mod export;
pub mod idle;
pub mod projection;
pub mod roi;
pub mod session;
