//! # IO Module
//!
//! The interface layer that exposes the domain to clients. Today that is a
//! REST API served to the local web UI.

pub mod rest;
