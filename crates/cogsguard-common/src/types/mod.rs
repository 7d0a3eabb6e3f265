//! Core identifier types

pub mod ids;
