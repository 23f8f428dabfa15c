//! Slide navigation: the index store and its guard, the transition state
//! machine, and the panels and input mapping built on top of them.

pub mod dispatcher;
pub mod fullscreen;
pub mod guard;
pub mod input;
pub mod navigator;
pub mod overlay;
pub mod state;
