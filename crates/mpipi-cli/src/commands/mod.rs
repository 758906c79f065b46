pub mod build;
pub mod debye;
pub mod slab_box;
