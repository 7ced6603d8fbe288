//! This module defines the board geometry shared by every other component.

pub mod direction;
pub mod grid;
