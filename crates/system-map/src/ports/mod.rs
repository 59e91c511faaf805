//! Ports: the contracts collaborators implement to participate in a system.

pub mod component;
