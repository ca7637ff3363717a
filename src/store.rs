pub mod client_store;
pub mod seed;

pub use client_store::ClientStore;
