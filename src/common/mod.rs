pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod format;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bitstream::*;
pub use codec::*;
pub use ec::*;
pub use error::*;
pub use format::*;
pub use galois::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
