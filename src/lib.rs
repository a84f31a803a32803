pub mod config;
pub mod controller;
pub mod observability;
pub mod page;
pub mod registry;
