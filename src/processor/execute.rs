use super::*;

impl Processor {
    /// Executes the 00E0 instruction - CLS
    /// Purpose: clear the display
    pub(super) fn execute_00E0(&mut self) {
        self.frame_buffer.clear();
        self.draw_flag = true;
    }

    /// Executes the 00EE instruction - RET
    /// Purpose: return from a subroutine
    pub(super) fn execute_00EE(&mut self) -> Result<(), ErrorDetail> {
        let address: u16 = self.stack.pop()?;
        self.program_counter = address;
        Ok(())
    }

    /// Executes the 0NNN instruction - SYS addr
    /// Purpose: jump to a machine code routine at NNN; there is no host machine code to run,
    /// so this does nothing
    pub(super) fn execute_0NNN(&mut self, nnn: u16) {
        debug!("ignoring machine code routine call to {:#05X}", nnn);
    }

    /// Executes the 1NNN instruction - JP addr
    /// Purpose: jump to location NNN
    pub(super) fn execute_1NNN(&mut self, nnn: u16) {
        self.program_counter = nnn;
    }

    /// Executes the 2NNN instruction - CALL addr
    /// Purpose: call subroutine at NNN
    pub(super) fn execute_2NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // The program counter already points at the instruction after this call
        self.stack.push(self.program_counter)?;
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 3XNN instruction - SE Vx, byte
    /// Purpose: skip next instruction if Vx = NN
    pub(super) fn execute_3XNN(&mut self, x: usize, nn: u8) {
        if self.variable_registers[x] == nn {
            self.program_counter += 2;
        }
    }

    /// Executes the 4XNN instruction - SNE Vx, byte
    /// Purpose: skip next instruction if Vx != NN
    pub(super) fn execute_4XNN(&mut self, x: usize, nn: u8) {
        if self.variable_registers[x] != nn {
            self.program_counter += 2;
        }
    }

    /// Executes the 5XY0 instruction - SE Vx, Vy
    /// Purpose: skip next instruction if Vx = Vy
    pub(super) fn execute_5XY0(&mut self, x: usize, y: usize) {
        if self.variable_registers[x] == self.variable_registers[y] {
            self.program_counter += 2;
        }
    }

    /// Executes the 6XNN instruction - LD Vx, byte
    /// Purpose: set Vx = NN
    pub(super) fn execute_6XNN(&mut self, x: usize, nn: u8) {
        self.variable_registers[x] = nn;
    }

    /// Executes the 7XNN instruction - ADD Vx, byte
    /// Purpose: set Vx = Vx + NN (wrapping, Vf untouched)
    pub(super) fn execute_7XNN(&mut self, x: usize, nn: u8) {
        self.variable_registers[x] = self.variable_registers[x].wrapping_add(nn);
    }

    /// Executes the 8XY0 instruction - LD Vx, Vy
    /// Purpose: set Vx = Vy
    pub(super) fn execute_8XY0(&mut self, x: usize, y: usize) {
        self.variable_registers[x] = self.variable_registers[y];
    }

    /// Executes the 8XY1 instruction - OR Vx, Vy
    /// Purpose: set Vx = Vx | Vy (bitwise OR)
    pub(super) fn execute_8XY1(&mut self, x: usize, y: usize) {
        self.variable_registers[x] |= self.variable_registers[y];
    }

    /// Executes the 8XY2 instruction - AND Vx, Vy
    /// Purpose: set Vx = Vx & Vy (bitwise AND)
    pub(super) fn execute_8XY2(&mut self, x: usize, y: usize) {
        self.variable_registers[x] &= self.variable_registers[y];
    }

    /// Executes the 8XY3 instruction - XOR Vx, Vy
    /// Purpose: set Vx = Vx ^ Vy (bitwise XOR)
    pub(super) fn execute_8XY3(&mut self, x: usize, y: usize) {
        self.variable_registers[x] ^= self.variable_registers[y];
    }

    /// Executes the 8XY4 instruction - ADD Vx, Vy
    /// Purpose: set Vx = Vx + Vy, set Vf = carry
    pub(super) fn execute_8XY4(&mut self, x: usize, y: usize) {
        let (result, carry) = self.variable_registers[x].overflowing_add(self.variable_registers[y]);
        self.variable_registers[x] = result;
        // Vf is written last so that the flag wins when x is 0xF
        self.variable_registers[0xF] = carry as u8;
    }

    /// Executes the 8XY5 instruction - SUB Vx, Vy
    /// Purpose: set Vx = Vx - Vy, set Vf = NOT borrow
    pub(super) fn execute_8XY5(&mut self, x: usize, y: usize) {
        let (result, borrow) =
            self.variable_registers[x].overflowing_sub(self.variable_registers[y]);
        self.variable_registers[x] = result;
        self.variable_registers[0xF] = !borrow as u8;
    }

    /// Executes the 8XY6 instruction - SHR Vx
    /// Purpose: set Vx = Vx SHR 1, set Vf to the bit shifted out (Vy is ignored)
    pub(super) fn execute_8XY6(&mut self, x: usize, _y: usize) {
        let flag_value: u8 = self.variable_registers[x] & 0x01;
        self.variable_registers[x] >>= 1;
        self.variable_registers[0xF] = flag_value;
    }

    /// Executes the 8XY7 instruction - SUBN Vx, Vy
    /// Purpose: set Vx = Vy - Vx, set Vf = NOT borrow
    pub(super) fn execute_8XY7(&mut self, x: usize, y: usize) {
        let (result, borrow) =
            self.variable_registers[y].overflowing_sub(self.variable_registers[x]);
        self.variable_registers[x] = result;
        self.variable_registers[0xF] = !borrow as u8;
    }

    /// Executes the 8XYE instruction - SHL Vx
    /// Purpose: set Vx = Vx SHL 1, set Vf to the bit shifted out (Vy is ignored)
    pub(super) fn execute_8XYE(&mut self, x: usize, _y: usize) {
        let flag_value: u8 = self.variable_registers[x] >> 7;
        self.variable_registers[x] <<= 1;
        self.variable_registers[0xF] = flag_value;
    }

    /// Executes the 9XY0 instruction - SNE Vx, Vy
    /// Purpose: skip next instruction if Vx != Vy
    pub(super) fn execute_9XY0(&mut self, x: usize, y: usize) {
        if self.variable_registers[x] != self.variable_registers[y] {
            self.program_counter += 2;
        }
    }

    /// Executes the ANNN instruction - LD I, addr
    /// Purpose: set I = NNN
    pub(super) fn execute_ANNN(&mut self, nnn: u16) {
        self.index_register = nnn;
    }

    /// Executes the BNNN instruction - JP V0, addr
    /// Purpose: jump to location NNN + V0
    pub(super) fn execute_BNNN(&mut self, nnn: u16) {
        self.program_counter = nnn + (self.variable_registers[0x0] as u16);
    }

    /// Executes the CXNN instruction - RND Vx, byte
    /// Purpose: set Vx = random byte & NN (bitwise AND)
    pub(super) fn execute_CXNN(&mut self, x: usize, nn: u8) {
        let random: u8 = self.random_byte();
        self.variable_registers[x] = random & nn;
    }

    /// Executes the DXYN instruction - DRW Vx, Vy, nibble
    /// Purpose: display the N-byte sprite starting at memory location I at display
    /// coordinate (Vx, Vy), wrapping at the display edges; set Vf = 1 if any pixel was
    /// turned off, 0 otherwise
    pub(super) fn execute_DXYN(&mut self, x: usize, y: usize, n: u8) -> Result<(), ErrorDetail> {
        // Read the sprite to draw as an N-byte array slice at memory location
        // pointed to by the index register; nothing is drawn if it runs off the end of memory
        let sprite: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, n as usize)?;
        let collision: bool = self.frame_buffer.draw_sprite(
            self.variable_registers[x] as usize,
            self.variable_registers[y] as usize,
            sprite,
        );
        self.variable_registers[0xF] = collision as u8;
        self.draw_flag = true;
        Ok(())
    }

    /// Executes the EX9E instruction - SKP Vx
    /// Purpose: skip next instruction if the key with value Vx is pressed
    pub(super) fn execute_EX9E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if self.keystate.is_key_pressed(self.variable_registers[x])? {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the EXA1 instruction - SKNP Vx
    /// Purpose: skip next instruction if the key with value Vx is not pressed
    pub(super) fn execute_EXA1(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if !self.keystate.is_key_pressed(self.variable_registers[x])? {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the FX07 instruction - LD Vx, DT
    /// Purpose: set Vx = delay timer value
    pub(super) fn execute_FX07(&mut self, x: usize) {
        self.variable_registers[x] = self.delay_timer;
    }

    /// Executes the FX0A instruction - LD Vx, K
    /// Purpose: wait for a key press, store the key value in Vx
    pub(super) fn execute_FX0A(&mut self, x: usize) {
        match self.keystate.first_key_pressed() {
            Some(key) => {
                self.variable_registers[x] = key;
                self.status = ProcessorStatus::Running;
            }
            None => {
                // Rewind the program counter so this instruction is retried next cycle
                self.program_counter -= 2;
                if self.status != ProcessorStatus::WaitingForKeypress {
                    debug!("waiting for keypress into V{:X}", x);
                }
                self.status = ProcessorStatus::WaitingForKeypress;
            }
        }
    }

    /// Executes the FX15 instruction - LD DT, Vx
    /// Purpose: set delay timer = Vx
    pub(super) fn execute_FX15(&mut self, x: usize) {
        self.delay_timer = self.variable_registers[x];
    }

    /// Executes the FX18 instruction - LD ST, Vx
    /// Purpose: set sound timer = Vx
    pub(super) fn execute_FX18(&mut self, x: usize) {
        self.sound_timer = self.variable_registers[x];
    }

    /// Executes the FX1E instruction - ADD I, Vx
    /// Purpose: set I = I + Vx.  Set Vf to 1 if the result is beyond 0xFFF, 0 otherwise
    pub(super) fn execute_FX1E(&mut self, x: usize) {
        let result: u32 = (self.index_register as u32) + (self.variable_registers[x] as u32);
        self.variable_registers[0xF] = (result > 0x0FFF) as u8;
        self.index_register = result as u16;
    }

    /// Executes the FX29 instruction - LD F, Vx
    /// Purpose: set I = location of font sprite for digit Vx
    pub(super) fn execute_FX29(&mut self, x: usize) {
        let character: u8 = self.variable_registers[x];
        self.index_register = (FONT_START_ADDRESS + self.font.glyph_offset(character)) as u16;
    }

    /// Executes the FX33 instruction - LD B, Vx
    /// Purpose: converts value in Vx to decimal, and stores the digits in memory locations I,
    /// I+1 and I+2
    pub(super) fn execute_FX33(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let value: u8 = self.variable_registers[x];
        let digits: [u8; 3] = [value / 100, (value % 100) / 10, value % 10];
        let index: usize = self.writable_index()?;
        self.memory.write_bytes(index, &digits)
    }

    /// Executes the FX55 instruction - LD [I], Vx
    /// Purpose: store registers V0 to Vx in memory starting at the address in I, then set
    /// I to I + x + 1
    pub(super) fn execute_FX55(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let index: usize = self.writable_index()?;
        self.memory
            .write_bytes(index, &self.variable_registers[0..=x])?;
        self.index_register = self.index_register.wrapping_add((x + 1) as u16);
        Ok(())
    }

    /// Executes the FX65 instruction - LD Vx, [I]
    /// Purpose: populate registers V0 to Vx from memory starting at the address in I, then set
    /// I to I + x + 1
    pub(super) fn execute_FX65(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let values: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, x + 1)?;
        self.variable_registers[0..=x].copy_from_slice(values);
        self.index_register = self.index_register.wrapping_add((x + 1) as u16);
        Ok(())
    }

    // Returns I as a memory address, refusing addresses inside the reserved interpreter area
    fn writable_index(&self) -> Result<usize, ErrorDetail> {
        let index: usize = self.index_register as usize;
        if index < PROGRAM_START_ADDRESS {
            return Err(ErrorDetail::ReservedMemoryWrite { address: index });
        }
        Ok(index)
    }
}
