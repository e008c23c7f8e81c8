pub mod archive;
pub mod hasher;
pub mod loader;
