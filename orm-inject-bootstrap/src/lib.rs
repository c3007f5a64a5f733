//! Application bootstrapping for [orm_inject].
//!
//! Declarations made with [orm_inject] need a container, connections and, typically, some
//! supporting infrastructure like logging. This crate provides a single entrypoint doing all of
//! that in the form of [Bootstrap](bootstrap::Bootstrap), configured from the environment with
//! [BootstrapConfig](config::BootstrapConfig).

pub mod bootstrap;
pub mod config;
