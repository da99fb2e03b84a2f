//! Repeated data bytes.
//!
//! With the `batch` feature the bytes are staged in a stack buffer and sent
//! with one bus write per display row instead of one write per byte.

use crate::interface::Interface;

#[cfg(feature = "batch")]
pub(crate) fn write_repeated<DI>(di: &mut DI, byte: u8, count: usize) -> Result<(), DI::Error>
where
    DI: Interface + ?Sized,
{
    const CHUNK: usize = crate::WIDTH as usize;

    let mut chunk: heapless::Vec<u8, CHUNK> = heapless::Vec::new();
    // cannot fail, the length never exceeds the capacity
    let _ = chunk.resize(count.min(CHUNK), byte);

    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(CHUNK);
        di.write_bytes(&chunk[..n])?;
        remaining -= n;
    }
    Ok(())
}

#[cfg(not(feature = "batch"))]
pub(crate) fn write_repeated<DI>(di: &mut DI, byte: u8, count: usize) -> Result<(), DI::Error>
where
    DI: Interface + ?Sized,
{
    for _ in 0..count {
        di.write_byte(byte)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::MockInterface;

    #[test]
    fn writes_exact_count() {
        let mut di = MockInterface::default();
        write_repeated(&mut di, 0xAA, 500).unwrap();
        assert_eq!(di.data_bytes(), vec![0xAA; 500]);

        let mut di = MockInterface::default();
        write_repeated(&mut di, 0x00, 0).unwrap();
        assert!(di.data_bytes().is_empty());
    }

    #[cfg(feature = "batch")]
    #[test]
    fn one_write_per_row() {
        let mut di = MockInterface::default();
        write_repeated(&mut di, 0xFF, 2 * crate::WIDTH as usize).unwrap();
        assert_eq!(di.bulk_writes, 2);
    }
}
