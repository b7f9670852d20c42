pub mod cleanup;
pub mod seed;
