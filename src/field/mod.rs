pub(crate) mod animator;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod particle;
