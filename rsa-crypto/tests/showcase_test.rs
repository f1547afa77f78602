use rsa_crypto::errors::RsaCryptoError;
use rsa_crypto::hash::StandardHashes;
use rsa_crypto::keypair::{KeygenOptions, generate_keypair};
use rsa_crypto::pkcs1;
use rsa_crypto::random::SeededRandom;

use fake::Fake;
use fake::faker::lorem::en::Words;

use std::sync::Once;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[test]
fn showcase_encrypt_sign_full_flow() -> Result<(), RsaCryptoError> {
    init_logging();

    let mut rng = SeededRandom::from_seed(512);
    let (pub_key, priv_key) = generate_keypair(512, &mut rng, &KeygenOptions::default())?;

    let words: Vec<String> = Words(2..4).fake();
    let message = words.join(" ");

    let cipher = pkcs1::encrypt(message.as_bytes(), &pub_key, &mut rng)?;
    let decoded = pkcs1::decrypt(&cipher, &priv_key)?;

    assert_eq!(decoded, message.as_bytes());

    let signature = pkcs1::sign(message.as_bytes(), &priv_key, "SHA-256", &StandardHashes)?;
    pkcs1::verify(message.as_bytes(), &signature, &pub_key, &StandardHashes)?;

    Ok(())
}

#[test]
fn showcase_cipher_decipher_ukrainian_text() -> Result<(), RsaCryptoError> {
    init_logging();

    let mut rng = SeededRandom::from_seed(1024);
    let (pub_key, priv_key) = generate_keypair(512, &mut rng, &KeygenOptions::default())?;

    // 512-bit modulus: up to 53 message bytes; this is 25 bytes of UTF-8.
    let original = "Вітання від RSA";

    let cipher = pkcs1::encrypt(original.as_bytes(), &pub_key, &mut rng)?;
    let decoded = pkcs1::decrypt(&cipher, &priv_key)?;

    assert_eq!(String::from_utf8_lossy(&decoded), original);

    Ok(())
}
