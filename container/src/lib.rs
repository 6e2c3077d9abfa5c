//! Loading of PKCS#12 (PFX) credential containers into owned key and
//! certificate objects.

mod errors;
pub use errors::Error;
pub use errors::Result;

mod decoder;

pub mod chain;
pub use chain::CaChain;

pub mod container;
pub use container::PfxContainer;
