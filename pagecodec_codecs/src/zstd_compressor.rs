use std::collections::HashSet;

use pagecodec_core::{
    parse_int_option, BufferPlacement, BufferView, CodecError, Compressor, CompressorOptions,
    ConfigurationError, Result,
};
use zstd::zstd_safe;

pub const NAME: &str = "zstd";

/// Option key holding the zstd compression level.
pub const COMPRESSION_LEVEL: &str = "compression_level";
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 1;

/// Zstandard page compressor.
///
/// Each chunk is compressed as a standalone zstd frame at the configured
/// level. The binding only works against off-heap views; on-heap callers go
/// through [`Compressor::uncompress_bytes`], which stages their bytes into
/// off-heap views for the duration of the call.
///
/// The level is not range-checked here. The acceptable range depends on the
/// linked zstd version, so it is left to the library at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    pub const SUPPORTED_OPTIONS: &'static [&'static str] = &[COMPRESSION_LEVEL];

    /// Build a compressor from table options. Only `compression_level` is
    /// read; a missing key means [`DEFAULT_COMPRESSION_LEVEL`].
    pub fn create(options: &CompressorOptions) -> Result<Self, ConfigurationError> {
        let level = parse_int_option(options, COMPRESSION_LEVEL, DEFAULT_COMPRESSION_LEVEL)?;
        tracing::debug!(level, "created zstd compressor");
        Ok(Self { level })
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initial_compressed_buffer_length(&self, chunk_length: usize) -> usize {
        zstd_safe::compress_bound(chunk_length)
    }

    fn compress(&self, input: &mut BufferView, output: &mut BufferView) -> Result<()> {
        self.check_placement(input)?;
        self.check_placement(output)?;

        let consumed = input.remaining();
        let written = zstd::bulk::compress_to_buffer(
            input.remaining_slice(),
            output.remaining_slice_mut(),
            self.level,
        )
        .map_err(|e| CodecError::algorithm(NAME, e))?;

        input.advance(consumed)?;
        output.advance(written)?;
        tracing::trace!(codec = NAME, input = consumed, output = written, "compressed chunk");
        Ok(())
    }

    fn uncompress_into(&self, input: &mut BufferView, output: &mut BufferView) -> Result<usize> {
        self.check_placement(input)?;
        self.check_placement(output)?;

        let consumed = input.remaining();
        let written =
            zstd::bulk::decompress_to_buffer(input.remaining_slice(), output.remaining_slice_mut())
                .map_err(|e| CodecError::algorithm(NAME, e))?;

        input.advance(consumed)?;
        output.advance(written)?;
        tracing::trace!(codec = NAME, input = consumed, output = written, "uncompressed chunk");
        Ok(written)
    }

    fn preferred_buffer_placement(&self) -> BufferPlacement {
        BufferPlacement::OffHeap
    }

    fn supports(&self, placement: BufferPlacement) -> bool {
        placement == BufferPlacement::OffHeap
    }

    fn supported_options(&self) -> HashSet<&'static str> {
        Self::SUPPORTED_OPTIONS.iter().copied().collect()
    }
}
