//! Register map dump
//!
//! Snapshot of all 64 registers, read one address at a time. `Display`
//! renders the 4x16 table with reserved slots masked, followed by the
//! magnetometer output registers by name in hex and binary.

use super::registers::{self, REGISTER_COUNT};
use std::fmt;

/// Values of registers `0x00..=0x3F`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDump {
    bytes: [u8; REGISTER_COUNT],
}

impl RegisterDump {
    pub fn new(bytes: [u8; REGISTER_COUNT]) -> Self {
        Self { bytes }
    }

    /// Value read from `addr`
    pub fn get(&self, addr: u8) -> Option<u8> {
        self.bytes.get(addr as usize).copied()
    }

    pub fn bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.bytes
    }
}

const RULE: &str = "------------------------------------------------------";

/// Registers listed by name under the table
const NAMED: [u8; 10] = [0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0F];

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "STMicroelectronics LSM303D register dump:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, " reg    0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F")?;
        writeln!(f, "{RULE}")?;

        for (addr, value) in self.bytes.iter().enumerate() {
            if addr % 16 == 0 {
                if addr != 0 {
                    writeln!(f)?;
                }
                write!(f, "[0x{addr:02X}]")?;
            }
            if registers::is_reserved(addr as u8) {
                write!(f, " --")?;
            } else {
                write!(f, " {value:02X}")?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Sensor Reg: hex  binary")?;
        writeln!(f, "---------------------------")?;
        for addr in NAMED {
            let name = registers::name_of(addr).unwrap_or("?");
            let value = self.bytes[addr as usize];
            writeln!(f, "{name:>10}: 0x{value:02X} 0b{value:08b}")?;
        }
        Ok(())
    }
}
