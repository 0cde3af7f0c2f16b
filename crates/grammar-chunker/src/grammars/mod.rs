//! Built-in grammar tables, one module per grammar.

pub mod bash;
pub mod docker_compose;
pub mod dockerfile;
pub mod github_actions;
pub mod groovy;
pub mod hcl;
pub mod yaml;
