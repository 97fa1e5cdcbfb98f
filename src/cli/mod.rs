pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod live;
pub mod output;
pub mod replay;
pub mod runtime;
pub mod schema;
