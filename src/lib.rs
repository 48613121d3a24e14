//! # RLE Token Scheme
//!
//! A stream is a plain concatenation of tokens. The top bit of a token's
//! first byte selects its framing.
//!
//! ```text
//!          MSB
//!           │
//!           ▼
//!          0NNN NNNN  VVVV VVVV
//!          ▲
//! NOT_LIT──┘
//! ```
//!
//! Repeat token: N (1..=127) is the run length, V the byte the run repeats.
//! Decodes to V written N times.
//!
//! ```text
//!          MSB
//!           │
//!           ▼
//!          1NNN NNNN  <N raw bytes>
//!          ▲
//!  IS_LIT──┘
//! ```
//!
//! Literal token: N (1..=127) raw bytes follow the header and are copied
//! verbatim. Consecutive non-repeating bytes coalesce into one literal
//! token, so isolated bytes cost one header per 127 of them instead of a
//! repeat header each. This is the whole reason the literal framing exists;
//! the price is that one header bit is spent on the mode flag.
//!
//! A count field of zero is invalid in either framing and never emitted.
//! There is no magic number, version field or checksum; the decoder MUST
//! receive exactly the bytes the encoder produced.

#[macro_use]
extern crate log;

mod buf;
mod derle;
mod error;
mod rle;

pub use derle::decode;
pub use error::RleError;
pub use rle::encode;

/// longest run a single repeat token can carry
const MAX_REPEAT_RUN: usize = 0x7F;
const MAX_LITERAL_RUN: usize = 0x7F;
const LITERAL_FLAG: u8 = 0x80;

/// (raw, encoded) hex pairs, shared by the encoder and decoder tests.
#[cfg(test)]
pub(crate) const TEST_VECTOR: [(&str, &str); 12] = [
    ("", ""),
    ("41", "8141"),
    ("414141", "0341"),
    ("414243", "83414243"),
    ("414242", "81410242"),
    ("4142434343414142", "824142034302418142"),
    ("414243434341414242", "824142034302410242"),
    ("0000ffffff00", "020003ff8100"),
    ("48656c6c6f2c20776f726c6421", "824865026c896f2c20776f726c6421"),
    ("6161616161616161", "0861"),
    ("86610062006100", "8786610062006100"),
    ("ffffffff00000000ffffffff", "04ff040004ff"),
];
