//! Search space definition

pub mod bounds;

pub mod prelude {
    pub use super::bounds::Bounds;
}
