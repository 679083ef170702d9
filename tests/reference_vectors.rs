use hashsweep::{
    compress, fits_single_block, hash_message, pad_message, SaltConfig, SaltPosition, Sha224,
    Sha384,
};
use proptest::prelude::*;
use sha2::Digest as _;

fn ref224(data: &[u8]) -> Vec<u8> {
    sha2::Sha224::digest(data).to_vec()
}

fn ref384(data: &[u8]) -> Vec<u8> {
    sha2::Sha384::digest(data).to_vec()
}

fn salted(msg: &[u8], salt: &SaltConfig) -> Vec<u8> {
    match salt.position {
        SaltPosition::Front => [&salt.bytes[..], msg].concat(),
        SaltPosition::Back => [msg, &salt.bytes[..]].concat(),
    }
}

#[test]
fn standard_vectors() {
    let none = SaltConfig::none();
    for msg in [&b""[..], b"abc", b"The quick brown fox jumps over t"] {
        assert_eq!(hash_message::<Sha224>(msg, &none).as_bytes(), ref224(msg));
        assert_eq!(hash_message::<Sha384>(msg, &none).as_bytes(), ref384(msg));
    }
    assert_eq!(
        hex::encode(hash_message::<Sha224>(b"The quick brown fox jumps over t", &none).as_bytes()),
        "c2ad55a8ce50a2b6718f9c868d3279626ecf61fafdcd3ee5f43ab4c3"
    );
}

#[test]
fn salt_only_block() {
    let salt = SaltConfig::new(b"12345678", SaltPosition::Back).unwrap();
    assert_eq!(hash_message::<Sha224>(b"", &salt).as_bytes(), ref224(b"12345678"));
    let block = pad_message::<Sha224>(b"", &salt);
    assert_eq!(&block.as_bytes()[..9], b"12345678\x80");
}

#[test]
fn longest_supported_inputs_fit() {
    let salt = SaltConfig::new(b"s", SaltPosition::Front).unwrap();
    assert!(fits_single_block::<Sha224>(32, &salt));
    assert!(fits_single_block::<Sha384>(32, &salt));
    let msg = [b'z'; 32];
    let digest = compress::<Sha384>(&pad_message::<Sha384>(&msg, &salt));
    assert_eq!(digest.as_bytes(), ref384(&salted(&msg, &salt)));
}

fn salt_config() -> impl Strategy<Value = SaltConfig> {
    (proptest::collection::vec(any::<u8>(), 0..=8), any::<bool>()).prop_map(|(bytes, back)| {
        let position = if back {
            SaltPosition::Back
        } else {
            SaltPosition::Front
        };
        SaltConfig::new(&bytes, position).unwrap()
    })
}

proptest! {
    #[test]
    fn unsalted_matches_library(msg in proptest::collection::vec(any::<u8>(), 0..=32)) {
        let none = SaltConfig::none();
        let d224 = hash_message::<Sha224>(&msg, &none);
        let d384 = hash_message::<Sha384>(&msg, &none);
        let (r224, r384) = (ref224(&msg), ref384(&msg));
        prop_assert_eq!(d224.as_bytes(), &r224[..]);
        prop_assert_eq!(d384.as_bytes(), &r384[..]);
    }

    #[test]
    fn salted_matches_concatenation(
        msg in proptest::collection::vec(any::<u8>(), 0..=32),
        salt in salt_config(),
    ) {
        let full = salted(&msg, &salt);
        let d224 = hash_message::<Sha224>(&msg, &salt);
        let d384 = hash_message::<Sha384>(&msg, &salt);
        let (r224, r384) = (ref224(&full), ref384(&full));
        prop_assert_eq!(d224.as_bytes(), &r224[..]);
        prop_assert_eq!(d384.as_bytes(), &r384[..]);
    }

    #[test]
    fn salt_placement_changes_digest(
        msg in "[a-z0-9]{1,32}",
        salt in "[A-Z]{1,8}",
    ) {
        let front = SaltConfig::new(salt.as_bytes(), SaltPosition::Front).unwrap();
        let back = SaltConfig::new(salt.as_bytes(), SaltPosition::Back).unwrap();
        let a = hash_message::<Sha224>(msg.as_bytes(), &front);
        let b = hash_message::<Sha224>(msg.as_bytes(), &back);
        let c = hash_message::<Sha224>(msg.as_bytes(), &SaltConfig::none());
        prop_assert_ne!(a, b);
        prop_assert_ne!(a, c);
        prop_assert_ne!(b, c);
    }
}
