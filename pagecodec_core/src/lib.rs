pub mod buffer;
pub mod codec;
pub mod error;
pub mod options;

pub use buffer::{BufferPlacement, BufferView};
pub use codec::Compressor;
pub use error::{CodecError, ConfigurationError, Result};
pub use options::{parse_int_option, CompressorOptions};
