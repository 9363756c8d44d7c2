//! Typed register identifiers
//!
//! Each device family exposes its register map as two enums: one for
//! read-only registers and one for read-write registers. Only the latter
//! implement [`WritableRegister`], so a write to a status or data register
//! does not compile.

use std::fmt::Debug;

/// A one byte register in a device register map
pub trait Register: Copy + Debug {
    /// Register address on the device
    fn address(self) -> u8;

    /// Datasheet name
    fn name(self) -> &'static str;
}

/// Marker for registers the host is allowed to write
pub trait WritableRegister: Register {}

/// Declare a `#[repr(u8)]` register enum with address, name and `ALL` table
macro_rules! register_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $addr:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $($variant = $addr,)+
        }

        impl $name {
            /// Every register of this kind, in address order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Look up a register by address
            pub fn from_address(addr: u8) -> Option<Self> {
                Self::ALL.iter().copied().find(|r| *r as u8 == addr)
            }
        }

        impl $crate::devices::magnetometer::register::Register for $name {
            fn address(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }
    };
}

pub(crate) use register_enum;
