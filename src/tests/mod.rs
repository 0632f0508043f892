pub mod common;

mod auth_flow;
