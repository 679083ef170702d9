use hashsweep::{hash_message, SaltConfig, SaltPosition, Sha224, Sha384};
use honggfuzz::fuzz;
use sha2::Digest as _;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Some((&ctl, rest)) = data.split_first() else {
                return;
            };
            let salt_len = (ctl & 0x0f) as usize % 9;
            if rest.len() < salt_len {
                return;
            }
            let (salt, msg) = rest.split_at(salt_len);
            let msg = &msg[..msg.len().min(32)];

            let salt = if ctl & 0x10 != 0 {
                let position = if ctl & 0x20 != 0 {
                    SaltPosition::Back
                } else {
                    SaltPosition::Front
                };
                SaltConfig::new(salt, position).unwrap()
            } else {
                SaltConfig::none()
            };
            let full = match (salt.enabled, salt.position) {
                (false, _) => msg.to_vec(),
                (true, SaltPosition::Front) => [&salt.bytes[..], msg].concat(),
                (true, SaltPosition::Back) => [msg, &salt.bytes[..]].concat(),
            };

            assert_eq!(
                hash_message::<Sha224>(msg, &salt).as_bytes(),
                &sha2::Sha224::digest(&full)[..]
            );
            assert_eq!(
                hash_message::<Sha384>(msg, &salt).as_bytes(),
                &sha2::Sha384::digest(&full)[..]
            );
        });
    }
}
