//! The ASH0 container: header framing plus the compress/decompress drivers
//! that tie the bit streams, Huffman trees, and LZ77 tokenizer together.
//!
//! ```
//! use ash0codec::ash0::{compress, decompress, STD_OPTIONS};
//! let payload = b"the rain in spain falls mainly on the plain";
//! let packed = compress(payload, &STD_OPTIONS).expect("compression failed");
//! let restored = decompress(&packed, &STD_OPTIONS).expect("decompression failed");
//! assert_eq!(restored, payload);
//! ```

use crate::bitio::{BitReader, BitWriter, load_u32_be, store_u32_be};
use crate::huffman::{DecodeTree, EncodeTree};
use crate::lz::{retokenize, tokenize_greedy, Token};
use crate::Error;

const MAGIC: &[u8; 4] = b"ASH0";
const HEADER_SIZE: usize = 0x0C;

/// Parameters controlling the symbol and distance alphabet widths, and the
/// number of optimal-retokenization passes the compressor performs.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Width (bits) of the symbol/length alphabet, `S` in `[9, 16]`.
    pub sym_bits: u32,
    /// Width (bits) of the distance alphabet, `D` in `[1, 24]`.
    pub dist_bits: u32,
    /// Number of retokenize+retrain passes to run after the initial greedy pass.
    pub passes: u32,
}

pub const STD_OPTIONS: Options = Options { sym_bits: 9, dist_bits: 11, passes: 0 };

fn build_histograms(tokens: &[Token], sym_bits: u32, dist_bits: u32) -> (Vec<u64>, Vec<u64>) {
    let mut sym_hist = vec![0u64; 1usize << sym_bits];
    let mut dist_hist = vec![0u64; 1usize << dist_bits];
    for tok in tokens {
        match *tok {
            Token::Literal(c) => sym_hist[c as usize] += 1,
            Token::Reference { length, distance } => {
                sym_hist[256 + length - 3] += 1;
                dist_hist[distance - 1] += 1;
            }
        }
    }
    (sym_hist, dist_hist)
}

/// Compress `buf` into an ASH0 container per `opts`.
pub fn compress(buf: &[u8], opts: &Options) -> Result<Vec<u8>, Error> {
    if buf.len() > 0x00FF_FFFF {
        return Err(Error::InputTooLarge);
    }

    let mut tokens = tokenize_greedy(buf, opts.sym_bits, opts.dist_bits);
    let (mut sym_hist, mut dist_hist) = build_histograms(&tokens, opts.sym_bits, opts.dist_bits);
    let mut sym_tree = EncodeTree::build(&sym_hist, opts.sym_bits);
    let mut dist_tree = EncodeTree::build(&dist_hist, opts.dist_bits);

    for _ in 0..opts.passes {
        tokens = retokenize(buf, &sym_tree, &dist_tree, opts.sym_bits, opts.dist_bits);
        (sym_hist, dist_hist) = build_histograms(&tokens, opts.sym_bits, opts.dist_bits);
        sym_tree = EncodeTree::build(&sym_hist, opts.sym_bits);
        dist_tree = EncodeTree::build(&dist_hist, opts.dist_bits);
    }

    let mut sym_writer = BitWriter::new();
    sym_tree.serialize(&mut sym_writer);
    for tok in &tokens {
        match *tok {
            Token::Literal(c) => sym_tree.encode_symbol(c as usize, &mut sym_writer),
            Token::Reference { length, .. } => sym_tree.encode_symbol(256 + length - 3, &mut sym_writer),
        }
    }
    let sym_bytes = sym_writer.finish();

    let mut dist_writer = BitWriter::new();
    dist_tree.serialize(&mut dist_writer);
    for tok in &tokens {
        if let Token::Reference { distance, .. } = *tok {
            dist_tree.encode_symbol(distance - 1, &mut dist_writer);
        }
    }
    let dist_bytes = dist_writer.finish();

    let dist_offset = (HEADER_SIZE + sym_bytes.len()) as u32;
    let mut out = Vec::with_capacity(HEADER_SIZE + sym_bytes.len() + dist_bytes.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&store_u32_be(buf.len() as u32));
    out.extend_from_slice(&store_u32_be(dist_offset));
    out.extend_from_slice(&sym_bytes);
    out.extend_from_slice(&dist_bytes);
    Ok(out)
}

/// Decompress an ASH0 container per `opts` (the alphabet widths must match
/// the ones used to produce `buf`; there is nothing in the container itself
/// that records them).
pub fn decompress(buf: &[u8], opts: &Options) -> Result<Vec<u8>, Error> {
    if buf.len() < 4 {
        return Err(Error::TruncatedStream);
    }
    if &buf[0..4] != MAGIC {
        return Err(Error::BadMagic);
    }
    if buf.len() < HEADER_SIZE {
        return Err(Error::TruncatedStream);
    }

    let uncompressed_size = (load_u32_be(&buf[4..8]) & 0x00FF_FFFF) as usize;
    let dist_offset = load_u32_be(&buf[8..12]) as usize;

    let mut sym_reader = BitReader::new(buf, buf.len(), HEADER_SIZE)?;
    let mut dist_reader = BitReader::new(buf, buf.len(), dist_offset)?;

    let sym_tree = DecodeTree::deserialize(&mut sym_reader, opts.sym_bits)?;
    let dist_tree = DecodeTree::deserialize(&mut dist_reader, opts.dist_bits)?;

    let mut output: Vec<u8> = Vec::new();
    output.try_reserve(uncompressed_size).map_err(|_| Error::AllocFailure)?;

    while output.len() < uncompressed_size {
        let sym = sym_tree.decode_symbol(&mut sym_reader)?;
        if sym < 256 {
            output.push(sym as u8);
        } else {
            let dsym = dist_tree.decode_symbol(&mut dist_reader)?;
            let length = sym - 256 + 3;
            let distance = dsym + 1;
            if distance > output.len() || length > uncompressed_size - output.len() {
                return Err(Error::InvalidReference);
            }
            for _ in 0..length {
                let b = output[output.len() - distance];
                output.push(b);
            }
        }
    }
    Ok(output)
}
