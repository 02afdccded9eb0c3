//! Decorative particle overlay.
//!
//! A fixed-size set of points drifts across a full-viewport canvas and wraps
//! around its edges. The overlay is only created on wide viewports; the
//! decision is made once at load time.
//!
//! # Example
//!
//! ```ignore
//! use folio_fx::components::particle_field::ParticleCanvas;
//!
//! view! { <ParticleCanvas config=ParticleConfig::default() /> }
//! ```

mod component;
mod particles;
mod render;

pub use component::{ParticleCanvas, ParticleField, particles_enabled, particles_enabled_for};
pub use particles::{Particle, ParticleSystem};
