//! Page controllers and the particle overlay component.

pub mod contact_form;
pub mod hover;
pub mod navigation;
pub mod particle_field;
pub mod reveal;
pub mod scroll_fx;
pub mod theme;
pub mod typewriter;
