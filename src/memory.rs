use crate::error::ErrorDetail;

/// The size of the CHIP-8 memory space (in bytes).
pub const MEMORY_SIZE_BYTES: usize = 0x1000;
/// The address at which programs are loaded and execution begins.  Everything below this
/// address is reserved for the interpreter (the font lives at 0x000).
pub const PROGRAM_START_ADDRESS: usize = 0x200;
/// The largest ROM that fits between the program start address and the end of memory.
pub const MAX_PROGRAM_SIZE_BYTES: usize = MEMORY_SIZE_BYTES - PROGRAM_START_ADDRESS;

/// An abstraction of the CHIP-8 memory space.
///
/// Every access is bounds-checked and reported as
/// [ErrorDetail::MemoryAddressOutOfBounds] rather than indexing past the end of the array.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    /// A stack-allocated array of bytes representing the entire CHIP-8 memory space
    pub bytes: [u8; MEMORY_SIZE_BYTES],
}

impl Memory {
    /// Constructor that returns a [Memory] instance initialised with all bytes 0x00.
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0x0; MEMORY_SIZE_BYTES],
        }
    }

    /// Sets every byte back to 0x00.
    pub(crate) fn clear(&mut self) {
        self.bytes.fill(0x0);
    }

    /// Returns an array slice from memory as per the specified start address and
    /// number of bytes.  If the slice would extend beyond addressable memory then returns
    /// [ErrorDetail::MemoryAddressOutOfBounds] naming the first unaddressable byte.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range from which to read
    /// * `num_bytes` - the number of bytes to read from memory
    pub fn read_bytes(&self, start_address: usize, num_bytes: usize) -> Result<&[u8], ErrorDetail> {
        let end_address: usize = Memory::checked_end(start_address, num_bytes)?;
        Ok(&self.bytes[start_address..end_address])
    }

    /// Returns a 16-bit unsigned integer constructed by reading two consecutive bytes from memory
    /// starting from the specified address.  The construction is big-endian.  If the second byte
    /// would fall outside the addressable memory space, this returns
    /// [ErrorDetail::MemoryAddressOutOfBounds].
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address of the first (most significant) byte to read
    pub fn read_two_bytes(&self, start_address: usize) -> Result<u16, ErrorDetail> {
        let bytes: &[u8] = self.read_bytes(start_address, 2)?;
        Ok(((bytes[0] as u16) << 8) | bytes[1] as u16)
    }

    /// Writes the passed byte array slice to memory starting at the specified address.  Nothing
    /// is written if any part of the range would fall outside addressable memory; in that case
    /// [ErrorDetail::MemoryAddressOutOfBounds] is returned.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range to which to write
    /// * `bytes_to_write` - the array slice containing the bytes to write to memory
    pub fn write_bytes(
        &mut self,
        start_address: usize,
        bytes_to_write: &[u8],
    ) -> Result<(), ErrorDetail> {
        let end_address: usize = Memory::checked_end(start_address, bytes_to_write.len())?;
        self.bytes[start_address..end_address].copy_from_slice(bytes_to_write);
        Ok(())
    }

    // Returns the exclusive end of the range, or the first out-of-range address
    fn checked_end(start_address: usize, num_bytes: usize) -> Result<usize, ErrorDetail> {
        let end_address: usize = start_address + num_bytes;
        if end_address > MEMORY_SIZE_BYTES || start_address >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: start_address.max(MEMORY_SIZE_BYTES),
            });
        }
        Ok(end_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_two_bytes() {
        let mut memory = Memory::new();
        memory.bytes[0x3] = 0xF2;
        memory.bytes[0x4] = 0x1C;
        assert_eq!(memory.read_two_bytes(0x3).unwrap(), 0xF21C);
    }

    #[test]
    fn test_read_two_bytes_last_word() {
        let mut memory = Memory::new();
        memory.bytes[0xFFE] = 0x12;
        memory.bytes[0xFFF] = 0x34;
        assert_eq!(memory.read_two_bytes(0xFFE).unwrap(), 0x1234);
    }

    #[test]
    fn test_read_two_bytes_out_of_bounds_error() {
        let memory = Memory::new();
        assert_eq!(
            memory.read_two_bytes(0xFFF).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds {
                address: MEMORY_SIZE_BYTES
            }
        );
    }

    #[test]
    fn test_read_bytes() {
        let mut memory = Memory::new();
        memory.bytes[0x3] = 0xF2;
        memory.bytes[0x4] = 0x18;
        memory.bytes[0x5] = 0xCC;
        assert_eq!(memory.read_bytes(0x3, 3).unwrap(), &[0xF2, 0x18, 0xCC]);
    }

    #[test]
    fn test_read_bytes_empty() {
        let memory = Memory::new();
        assert!(memory.read_bytes(0x200, 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_bytes_out_of_bounds_error() {
        let memory = Memory::new();
        assert!(memory.read_bytes(MEMORY_SIZE_BYTES - 1, 2).is_err());
    }

    #[test]
    fn test_write_bytes() {
        let mut memory = Memory::new();
        let bytes_to_write: [u8; 3] = [0xF2, 0x18, 0xCC];
        memory.write_bytes(0x3, &bytes_to_write).unwrap();
        assert_eq!(&memory.bytes[0x3..0x6], &bytes_to_write);
    }

    #[test]
    fn test_write_bytes_out_of_bounds_leaves_memory_untouched() {
        let mut memory = Memory::new();
        let bytes_to_write: [u8; 2] = [0xF2, 0x18];
        assert!(memory
            .write_bytes(MEMORY_SIZE_BYTES - 1, &bytes_to_write)
            .is_err());
        assert_eq!(memory.bytes[MEMORY_SIZE_BYTES - 1], 0x0);
    }

    #[test]
    fn test_clear() {
        let mut memory = Memory::new();
        memory.bytes[0x400] = 0x1;
        memory.clear();
        assert!(memory.bytes.iter().all(|b| *b == 0x0));
    }
}
