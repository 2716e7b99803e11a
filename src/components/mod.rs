//! Page controllers. Each one wires itself to its own markup and no-ops when
//! that markup is missing.

pub mod animations;
pub mod links;
pub mod navigation;
pub mod particle_field;
pub mod preloader;
pub mod scrollspy;
pub mod theme;
pub mod typewriter;
