//! Structural operations driven by the schemas: copy, comparison and
//! checksums.

// -----------------------------------------------------------------------------
// Modules

mod checksum;
mod copy;
mod equal;

// -----------------------------------------------------------------------------
// Exports

pub use checksum::ChecksumWriter;
pub use copy::copy_object;
pub use equal::values_equal;
