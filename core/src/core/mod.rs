//! Time primitives for the session lifecycle.

pub mod countdown;
