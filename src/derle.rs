use crate::buf::ByteBuf;
use crate::error::RleError;
use crate::LITERAL_FLAG;

/// Decode a framed token stream back into the original bytes.
///
/// The stream is validated in full before any output space is reserved, so
/// a malformed input fails without allocating. An empty input decodes to an
/// empty output.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, RleError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    // First pass sized the output exactly, so the fill pass reserves once
    // and cannot run past the input.
    let total = scan(input)?;
    let mut out = ByteBuf::with_capacity(total)?;

    let mut i = 0;
    while i < input.len() {
        let header = input[i];
        if header & LITERAL_FLAG != 0 {
            let count = (header & !LITERAL_FLAG) as usize;
            trace!("offset {i}: literal token, {count} byte(s)");
            out.extend_from_slice(&input[i + 1..i + 1 + count])?;
            i += 1 + count;
        } else {
            let count = header as usize;
            trace!("offset {i}: repeat token, {count} x {:#04x}", input[i + 1]);
            out.push_repeat(input[i + 1], count)?;
            i += 2;
        }
    }
    debug_assert_eq!(total, out.len());

    Ok(out.into_vec())
}

/// Walk the token stream once, checking framing and summing the decoded
/// size without allocating.
fn scan(input: &[u8]) -> Result<usize, RleError> {
    let mut total = 0;
    let mut i = 0;
    while i < input.len() {
        let header = input[i];
        let (token_len, expansion) = if header & LITERAL_FLAG != 0 {
            let count = (header & !LITERAL_FLAG) as usize;
            (1 + count, count)
        } else {
            (2, header as usize)
        };
        if expansion == 0 {
            return Err(RleError::ZeroCount { offset: i });
        }
        let remaining = input.len() - i;
        if token_len > remaining {
            return Err(RleError::TruncatedInput {
                offset: i,
                needed: token_len - remaining,
            });
        }
        total += expansion;
        i += token_len;
    }
    Ok(total)
}
