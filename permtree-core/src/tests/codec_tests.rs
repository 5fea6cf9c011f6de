//! Privilege bitmask codec properties

use proptest::prelude::*;

use crate::model::{PrivilegeError, PrivilegeSet, NUM_PRIVILEGES};

#[test]
fn test_known_masks() {
    assert_eq!(PrivilegeSet::none().encode(), 0);
    assert_eq!(PrivilegeSet::all().encode(), 1023);

    let mut first_only = [false; NUM_PRIVILEGES];
    first_only[0] = true;
    assert_eq!(PrivilegeSet::new(first_only).encode(), 512);
}

#[test]
fn test_decode_of_every_valid_mask_is_inverse() {
    // the whole mask space is small enough to sweep
    for mask in 0..(1u64 << NUM_PRIVILEGES) {
        let set = PrivilegeSet::decode(mask).unwrap();
        assert_eq!(set.encode() as u64, mask);
    }
}

#[test]
fn test_wide_mask_rejected() {
    for mask in [1u64 << NUM_PRIVILEGES, u64::MAX, 4096] {
        assert_eq!(PrivilegeSet::decode(mask), Err(PrivilegeError::OutOfRange { mask }));
    }
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(flags in proptest::array::uniform10(any::<bool>())) {
        let set = PrivilegeSet::new(flags);
        let decoded = PrivilegeSet::decode(set.encode() as u64).unwrap();
        prop_assert_eq!(decoded, set);
    }

    #[test]
    fn prop_first_flag_contributes_msb(rest in proptest::array::uniform10(any::<bool>())) {
        let mut with_first = rest;
        with_first[0] = true;
        let mut without_first = rest;
        without_first[0] = false;
        let diff = PrivilegeSet::new(with_first).encode() - PrivilegeSet::new(without_first).encode();
        prop_assert_eq!(diff, 1 << (NUM_PRIVILEGES - 1));
    }
}
