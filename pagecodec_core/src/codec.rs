use std::collections::HashSet;

use crate::buffer::{BufferPlacement, BufferView};
use crate::error::{CodecError, Result};

/// Core compression abstraction used by the engine's page compression layer.
///
/// Each `Compressor` implementation:
/// - Is built once from its options and is immutable afterwards, so a single
///   instance can be shared across threads behind an `Arc`.
/// - Compresses and uncompresses independent chunks. No state is carried
///   between calls.
/// - Tells the engine how large an output buffer to allocate
///   ([`initial_compressed_buffer_length`]) and which buffer placement it
///   can work with ([`supports`]). The engine is expected to honour both
///   before calling in.
///
/// [`initial_compressed_buffer_length`]: Compressor::initial_compressed_buffer_length
/// [`supports`]: Compressor::supports
pub trait Compressor: Send + Sync {
    /// Short codec name for logs and error context.
    fn name(&self) -> &'static str;

    /// Worst-case compressed size for a chunk of `chunk_length` bytes.
    ///
    /// Never under-estimates: the engine sizes the output of
    /// [`compress`](Compressor::compress) from this value.
    fn initial_compressed_buffer_length(&self, chunk_length: usize) -> usize;

    /// Compress `input.remaining()` bytes into `output`.
    ///
    /// On success `input` is fully consumed and `output.position()` has moved
    /// forward by exactly the number of compressed bytes written.
    fn compress(&self, input: &mut BufferView, output: &mut BufferView) -> Result<()>;

    /// Uncompress `input.remaining()` bytes into `output`, returning the
    /// number of bytes written.
    ///
    /// On success `input` is fully consumed and `output.position()` has moved
    /// forward by exactly the returned count.
    fn uncompress_into(&self, input: &mut BufferView, output: &mut BufferView) -> Result<usize>;

    /// Uncompress `input.remaining()` bytes into `output`.
    ///
    /// On success `input` is fully consumed and `output.position()` is at its
    /// limit. The caller knows the uncompressed length and sizes `output`
    /// exactly for it.
    fn uncompress(&self, input: &mut BufferView, output: &mut BufferView) -> Result<()> {
        let available = output.remaining();
        let written = self.uncompress_into(input, output)?;
        if written != available {
            tracing::debug!(
                codec = self.name(),
                written,
                available,
                "uncompress output not sized to the chunk"
            );
        }
        output.set_position(output.limit())
    }

    /// Uncompress `input[input_offset..input_offset + input_length]` into
    /// `output` starting at `output_offset`, returning the bytes written.
    ///
    /// Both ranges are staged through temporary views of the preferred
    /// placement, so this works for any compressor whatever placement the
    /// caller's memory has. Only the decoded bytes are copied back; anything
    /// in `output` past them is left as it was. Callers that want to avoid
    /// the copies should use [`uncompress`](Compressor::uncompress) with
    /// supported views directly.
    fn uncompress_bytes(
        &self,
        input: &[u8],
        input_offset: usize,
        input_length: usize,
        output: &mut [u8],
        output_offset: usize,
    ) -> Result<usize> {
        let input_end = input_offset
            .checked_add(input_length)
            .filter(|&end| end <= input.len())
            .ok_or(CodecError::OutOfBounds {
                offset: input_offset,
                length: input_length,
                len: input.len(),
            })?;
        if output_offset > output.len() {
            return Err(CodecError::OutOfBounds {
                offset: output_offset,
                length: 0,
                len: output.len(),
            });
        }

        let placement = self.preferred_buffer_placement();
        let mut staged_input =
            BufferView::copy_from_slice(&input[input_offset..input_end], placement);
        let mut staged_output = BufferView::allocate(output.len() - output_offset, placement);
        let written = self.uncompress_into(&mut staged_input, &mut staged_output)?;

        staged_output.flip();
        let produced = staged_output.remaining_slice();
        output[output_offset..output_offset + written].copy_from_slice(produced);
        tracing::trace!(
            codec = self.name(),
            input = input_length,
            output = written,
            "uncompressed staged byte range"
        );
        Ok(written)
    }

    /// Placement the engine should allocate buffers with for this codec.
    fn preferred_buffer_placement(&self) -> BufferPlacement;

    fn supports(&self, placement: BufferPlacement) -> bool;

    /// Option names this compressor reads at creation time.
    fn supported_options(&self) -> HashSet<&'static str>;

    /// Reject a view whose placement this compressor has no call path for.
    fn check_placement(&self, view: &BufferView) -> Result<()> {
        if self.supports(view.placement()) {
            Ok(())
        } else {
            Err(CodecError::UnsupportedPlacement {
                codec: self.name(),
                placement: view.placement(),
            })
        }
    }
}
