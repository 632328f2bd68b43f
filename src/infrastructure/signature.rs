use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Verifies a gateway webhook signature: an HMAC-SHA512 hex digest of the
/// exact raw body bytes, keyed with the shared secret.
///
/// The body must be the bytes as received. Re-serializing the parsed JSON
/// and signing that instead would accept forged payloads whose canonical
/// form happens to collide.
pub fn verify_webhook_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());
    expected == signature
}
