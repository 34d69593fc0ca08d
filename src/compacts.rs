//! [`Compact`] search and processing.
use parity_scale_codec::{Compact, Decode, HasCompact};

use crate::error::ParserError;

/// Compact found in data.
pub struct FoundCompact<T: HasCompact> {
    /// Compact found and decoded.
    pub compact: T,

    /// Position of first data element after the compact part.
    pub start_next_unit: usize,
}

/// Search `&[u8]` for compact starting at `position`.
///
/// Does not modify the input.
pub fn find_compact<T>(data: &[u8], position: usize) -> Result<FoundCompact<T>, ParserError>
where
    T: HasCompact,
    Compact<T>: Decode,
{
    let mut tail = data
        .get(position..)
        .ok_or(ParserError::NoCompact { position })?;
    let total = tail.len();
    let compact = <Compact<T>>::decode(&mut tail)
        .map_err(|_| ParserError::NoCompact { position })?;
    Ok(FoundCompact {
        compact: compact.0,
        start_next_unit: position + total - tail.len(),
    })
}

/// Find compact at `position` and move `position` past it.
pub(crate) fn get_compact<T>(data: &[u8], position: &mut usize) -> Result<T, ParserError>
where
    T: HasCompact,
    Compact<T>: Decode,
{
    let found_compact = find_compact::<T>(data, *position)?;
    *position = found_compact.start_next_unit;
    Ok(found_compact.compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_in_the_middle() {
        // `0xff`, then compact `100_000_000` (4 bytes), then `0x00`
        let data = hex::decode("ff0284d71700").unwrap();
        let mut position = 1;
        let found = get_compact::<u128>(&data, &mut position).unwrap();
        assert_eq!(found, 100_000_000);
        assert_eq!(position, 5);
    }

    #[test]
    fn no_compact() {
        let data = [0b0000_0011u8];
        assert_eq!(
            find_compact::<u32>(&data, 0).err(),
            Some(ParserError::NoCompact { position: 0 })
        );
        assert!(find_compact::<u32>(&data, 5).is_err());
    }
}
