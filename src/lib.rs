//! # ash0codec
//!
//! A codec for Nintendo's ASH0 container format: a Huffman+LZ77 hybrid
//! compression scheme, interleaving a symbol/length stream and a distance
//! stream, each independently Huffman-coded over a configurable alphabet
//! width.
//!
//! ## Buffer Example
//!
//! ```
//! use ash0codec::*;
//! let test_data = "This is the chaunt of the priests.  The chaunt of the priests of Mung.".as_bytes();
//! let packed = ash0::compress(test_data, &ash0::STD_OPTIONS).expect("compression failed");
//! let unpacked = ash0::decompress(&packed, &ash0::STD_OPTIONS).expect("decompression failed");
//! assert_eq!(unpacked, test_data);
//! ```

mod bitio;
pub mod huffman;
pub mod lz;
pub mod ash0;

/// Errors produced while framing, compressing, or decompressing an ASH0 container.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("bad magic number")]
    BadMagic,
    #[error("bit stream ended before the declared output size was reached")]
    TruncatedStream,
    #[error("back-reference points outside the window already produced")]
    InvalidReference,
    #[error("input exceeds the 24-bit size field")]
    InputTooLarge,
    #[error("output buffer allocation failed")]
    AllocFailure,
}
