use crate::buf::ByteBuf;
use crate::error::RleError;
use crate::{LITERAL_FLAG, MAX_LITERAL_RUN, MAX_REPEAT_RUN};

/// Encode `input` into the framed token stream.
///
/// The output is a fresh buffer owned by the caller. An empty input
/// encodes to an empty output. The only failure is an allocation refusal,
/// in which case nothing is returned.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, RleError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    // Worst case nothing repeats: every input byte is emitted verbatim and
    // every MAX_LITERAL_RUN of them costs one header byte. Reserving that
    // up front means emission itself can no longer fail.
    let worst = input.len() + input.len().div_ceil(MAX_LITERAL_RUN);
    let mut out = ByteBuf::with_capacity(worst)?;

    // pending literal span, input[lit_start..lit_start + lit_len]
    let mut lit_start = 0;
    let mut lit_len = 0;

    let mut i = 0;
    while i < input.len() {
        let run = run_length(&input[i..]);
        trace!("offset {i}: byte {:#04x}, run {run}", input[i]);
        if run < 2 {
            if lit_len == 0 {
                lit_start = i;
            }
            lit_len += 1;
            i += 1;
            if lit_len == MAX_LITERAL_RUN {
                flush_literal(&mut out, &input[lit_start..lit_start + lit_len])?;
                lit_len = 0;
            }
        } else {
            flush_literal(&mut out, &input[lit_start..lit_start + lit_len])?;
            lit_len = 0;
            emit_repeat(&mut out, input[i], run)?;
            i += run;
        }
    }
    flush_literal(&mut out, &input[lit_start..lit_start + lit_len])?;

    Ok(out.into_vec())
}

/// Length of the maximal run of identical bytes at the start of `rest`.
#[inline(always)]
fn run_length(rest: &[u8]) -> usize {
    let value = rest[0];
    rest.iter().take_while(|&&b| b == value).count()
}

/// Emit repeat tokens for a run, splitting it at the per-token cap.
fn emit_repeat(out: &mut ByteBuf, value: u8, mut count: usize) -> Result<(), RleError> {
    debug_assert!(count >= 2);
    while count > 0 {
        let chunk = count.min(MAX_REPEAT_RUN);
        trace!("repeat token: {chunk} x {value:#04x}");
        out.push(chunk as u8)?;
        out.push(value)?;
        count -= chunk;
    }
    Ok(())
}

fn flush_literal(out: &mut ByteBuf, span: &[u8]) -> Result<(), RleError> {
    if span.is_empty() {
        return Ok(());
    }
    debug_assert!(span.len() <= MAX_LITERAL_RUN);
    trace!("literal token: {} byte(s)", span.len());
    out.push(LITERAL_FLAG | span.len() as u8)?;
    out.extend_from_slice(span)
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::TEST_VECTOR;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Setup function that is only run once, even if called multiple times.
    fn setup() {
        INIT.call_once(|| {
            // the decoder tests race for the same global logger
            let _ = pretty_env_logger::try_init();
        });
    }

    #[test]
    fn test_encode_vectors() {
        setup();
        for (raw, expected) in TEST_VECTOR.into_iter() {
            let raw = hex::decode(raw).unwrap();
            let expected = hex::decode(expected).unwrap();
            assert_eq!(expected, encode(&raw).unwrap(), "raw {}", hex::encode(&raw));
        }
    }

    #[test]
    fn test_encode_empty() {
        setup();
        assert_eq!(Vec::<u8>::new(), encode(&[]).unwrap());
    }

    #[test]
    fn test_long_run_splits_at_cap() {
        setup();
        // lone 67, a 134-run of 65, four singletons, a 5-run of 66
        let mut data = vec![67];
        data.extend_from_slice(&[65; 134]);
        data.extend_from_slice(&[66, 67, 68, 69]);
        data.extend_from_slice(&[66; 5]);

        let expected = [
            0x81, 67, 0x7F, 65, 0x07, 65, 0x84, 66, 67, 68, 69, 0x05, 66,
        ];
        assert_eq!(expected.to_vec(), encode(&data).unwrap());
    }

    #[test]
    fn test_run_of_263_takes_three_tokens() {
        setup();
        let data = [0x58; 263];
        let expected = [0x7F, 0x58, 0x7F, 0x58, 0x09, 0x58];
        assert_eq!(expected.to_vec(), encode(&data).unwrap());
    }

    #[test]
    fn test_literal_span_splits_at_cap() {
        setup();
        // 130 strictly ascending bytes, nothing repeats
        let data: Vec<u8> = (0..130).map(|i| i as u8).collect();

        let mut expected = vec![0xFF];
        expected.extend(0..127u8);
        expected.push(0x83);
        expected.extend_from_slice(&[127, 128, 129]);
        assert_eq!(expected, encode(&data).unwrap());
    }

    #[test]
    fn test_literal_span_exactly_at_cap() {
        setup();
        let data: Vec<u8> = (0..127u8).collect();
        let mut expected = vec![0xFF];
        expected.extend(0..127u8);
        assert_eq!(expected, encode(&data).unwrap());

        // one more singleton spills into a second token
        let data: Vec<u8> = (0..128).map(|i| i as u8).collect();
        let mut expected = vec![0xFF];
        expected.extend(0..127u8);
        expected.extend_from_slice(&[0x81, 127]);
        assert_eq!(expected, encode(&data).unwrap());
    }

    #[test]
    fn test_singletons_coalesce() {
        setup();
        assert_eq!(vec![0x83, 65, 66, 67], encode(&[65, 66, 67]).unwrap());
    }

    #[test]
    fn test_run_interrupting_literal() {
        setup();
        // the byte before a run never merges into the run's token
        assert_eq!(vec![0x81, 65, 0x02, 66], encode(&[65, 66, 66]).unwrap());
    }
}
