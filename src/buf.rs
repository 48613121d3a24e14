use crate::error::RleError;

/// Growable output buffer with fallible growth.
///
/// `Vec` already grows geometrically; this wrapper routes every capacity
/// request through `try_reserve` so an exhausted allocator surfaces as
/// [`RleError::AllocationFailure`] instead of an abort. `try_reserve`
/// leaves the buffer untouched when it fails, so a failed growth step
/// cannot lose or duplicate bytes already appended.
pub(crate) struct ByteBuf {
    inner: Vec<u8>,
}

impl ByteBuf {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, RleError> {
        let mut buf = ByteBuf { inner: Vec::new() };
        buf.reserve(capacity)?;
        Ok(buf)
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, byte: u8) -> Result<(), RleError> {
        self.reserve(1)?;
        self.inner.push(byte);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), RleError> {
        self.reserve(bytes.len())?;
        self.inner.extend_from_slice(bytes);
        Ok(())
    }

    /// Append `count` copies of `byte`.
    #[inline(always)]
    pub(crate) fn push_repeat(&mut self, byte: u8, count: usize) -> Result<(), RleError> {
        self.reserve(count)?;
        let new_len = self.inner.len() + count;
        self.inner.resize(new_len, byte);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    /// Trim spare capacity and hand the buffer to the caller.
    pub(crate) fn into_vec(mut self) -> Vec<u8> {
        self.inner.shrink_to_fit();
        self.inner
    }

    #[inline(always)]
    fn reserve(&mut self, additional: usize) -> Result<(), RleError> {
        self.inner.try_reserve(additional).map_err(|_| {
            trace!("allocation of {additional} more byte(s) refused");
            RleError::AllocationFailure {
                requested: additional,
            }
        })
    }
}
