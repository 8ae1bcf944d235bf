//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page-level helpers that connect the session core to routing. Pages call
//! these instead of wiring the guard themselves.

pub mod auth;
