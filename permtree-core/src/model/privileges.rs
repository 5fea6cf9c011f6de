//! Privilege flags and the fixed-width bitmask codec.
//!
//! An elevation carries exactly [`NUM_PRIVILEGES`] boolean capability
//! flags. On the wire they are packed into one integer with the first
//! flag as the most significant bit, so `[true, false, ..]` encodes to
//! `2^(N-1)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the privilege bitmask.
pub const NUM_PRIVILEGES: usize = 10;

/// The capability flags, in bitmask order (most significant first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    CallSubserver = 0,
    CallRoom = 1,
    CallGroup = 2,
    CallUser = 3,
    MessageSubserver = 4,
    MessageRoom = 5,
    MessageGroup = 6,
    MessageUser = 7,
    CreateGroup = 8,
    LoadExport = 9,
}

impl Privilege {
    pub const ALL: [Privilege; NUM_PRIVILEGES] = [
        Privilege::CallSubserver,
        Privilege::CallRoom,
        Privilege::CallGroup,
        Privilege::CallUser,
        Privilege::MessageSubserver,
        Privilege::MessageRoom,
        Privilege::MessageGroup,
        Privilege::MessageUser,
        Privilege::CreateGroup,
        Privilege::LoadExport,
    ];
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrivilegeError {
    /// The mask has bits beyond the fixed flag width.
    #[error("privilege mask {mask} does not fit in {NUM_PRIVILEGES} flags")]
    OutOfRange { mask: u64 },

    /// A flag sequence of the wrong length was supplied.
    #[error("expected {NUM_PRIVILEGES} privilege flags, got {got}")]
    WrongLength { got: usize },
}

/// Ordered, fixed-size set of privilege flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrivilegeSet([bool; NUM_PRIVILEGES]);

impl PrivilegeSet {
    pub fn new(flags: [bool; NUM_PRIVILEGES]) -> Self {
        PrivilegeSet(flags)
    }

    /// Build from a slice, which must have exactly [`NUM_PRIVILEGES`]
    /// entries.
    pub fn from_flags(flags: &[bool]) -> Result<Self, PrivilegeError> {
        if flags.len() != NUM_PRIVILEGES {
            return Err(PrivilegeError::WrongLength { got: flags.len() });
        }
        let mut set = [false; NUM_PRIVILEGES];
        set.copy_from_slice(flags);
        Ok(PrivilegeSet(set))
    }

    pub fn none() -> Self {
        PrivilegeSet::default()
    }

    pub fn all() -> Self {
        PrivilegeSet([true; NUM_PRIVILEGES])
    }

    pub fn grants(&self, privilege: Privilege) -> bool {
        self.0[privilege as usize]
    }

    pub fn grant(&mut self, privilege: Privilege) {
        self.0[privilege as usize] = true;
    }

    pub fn revoke(&mut self, privilege: Privilege) {
        self.0[privilege as usize] = false;
    }

    pub fn flags(&self) -> &[bool; NUM_PRIVILEGES] {
        &self.0
    }

    /// Pack the flags into an integer, first flag as the most
    /// significant bit.
    pub fn encode(&self) -> u16 {
        self.0.iter().fold(0u16, |mask, &flag| (mask << 1) | flag as u16)
    }

    /// Unpack a mask produced by [`PrivilegeSet::encode`]. Short masks
    /// are left-padded with `false`; masks wider than the flag count
    /// are rejected.
    pub fn decode(mask: u64) -> Result<Self, PrivilegeError> {
        if mask >= 1 << NUM_PRIVILEGES {
            return Err(PrivilegeError::OutOfRange { mask });
        }
        let mut flags = [false; NUM_PRIVILEGES];
        for (i, flag) in flags.iter_mut().enumerate() {
            *flag = (mask >> (NUM_PRIVILEGES - 1 - i)) & 1 == 1;
        }
        Ok(PrivilegeSet(flags))
    }
}
