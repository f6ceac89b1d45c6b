pub mod config;
pub mod logging;

pub mod control;
pub mod cookies;
pub mod fetch;
pub mod layout;
pub mod orchestrator;
pub mod syllabus;
pub mod transfer;
