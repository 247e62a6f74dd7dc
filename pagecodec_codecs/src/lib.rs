mod zstd_compressor;

pub use zstd_compressor::{ZstdCompressor, COMPRESSION_LEVEL, DEFAULT_COMPRESSION_LEVEL};
