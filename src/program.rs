use crate::error::ErrorDetail;
use crate::memory::MAX_PROGRAM_SIZE_BYTES;
use std::io::Read;

/// An abstraction of a CHIP-8 ROM, ready for loading into the Octet interpreter.
///
/// A ROM has no header or checksum: any byte sequence of at most
/// [MAX_PROGRAM_SIZE_BYTES](crate::MAX_PROGRAM_SIZE_BYTES) bytes is accepted, and the
/// instructions it encodes are not validated until they are executed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// A byte vector containing the program data as loaded from the ROM.
    program_data: Vec<u8>,
}

impl Program {
    /// Constructor that returns a [Program] instance representing the passed program data.
    /// Returns [ErrorDetail::RomTooLarge] if the data cannot fit in the program area.
    pub fn new(data: Vec<u8>) -> Result<Self, ErrorDetail> {
        Program::check_size(data.len())?;
        Ok(Program { program_data: data })
    }

    /// Reads exactly `expected_size` bytes of ROM data from the supplied reader.  The size is
    /// checked before anything is read; if the reader is exhausted early then
    /// [ErrorDetail::RomReadIncomplete] is returned and no [Program] is produced.
    ///
    /// # Arguments
    ///
    /// * `reader` - the source of ROM bytes (typically an open file)
    /// * `expected_size` - the declared size of the ROM in bytes
    pub fn read_from<R: Read>(reader: R, expected_size: usize) -> Result<Self, ErrorDetail> {
        Program::check_size(expected_size)?;
        let mut data: Vec<u8> = Vec::with_capacity(expected_size);
        let read: usize = reader
            .take(expected_size as u64)
            .read_to_end(&mut data)
            .map_err(|_| ErrorDetail::RomReadIncomplete {
                expected: expected_size,
                read: 0,
            })?;
        if read != expected_size {
            return Err(ErrorDetail::RomReadIncomplete {
                expected: expected_size,
                read,
            });
        }
        Ok(Program { program_data: data })
    }

    /// Returns a reference to the program data held in this instance.
    pub fn program_data(&self) -> &[u8] {
        &self.program_data
    }

    /// Returns the size of the instance's program data (in bytes).
    pub fn program_data_size(&self) -> usize {
        self.program_data.len()
    }

    // Skips the size check so oversized programs can be handed to the processor in tests
    #[cfg(test)]
    pub(crate) fn new_unchecked(data: Vec<u8>) -> Self {
        Program { program_data: data }
    }

    fn check_size(size: usize) -> Result<(), ErrorDetail> {
        if size > MAX_PROGRAM_SIZE_BYTES {
            return Err(ErrorDetail::RomTooLarge {
                size,
                max_size: MAX_PROGRAM_SIZE_BYTES,
            });
        }
        Ok(())
    }
}
