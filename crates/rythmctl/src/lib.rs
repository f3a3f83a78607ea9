//! Rythm Control - terminal client for the Rythm wellness companion.

pub mod cli;
pub mod commands;
pub mod display;
