// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use bolero::{check, generator::*};
use sm4_gcm::{
    batch,
    block::Block,
    sm4::{self, Decrypt, Encrypt, Variant, KEY_LEN},
    Aead, Config, Error, Sm4Gcm, Tier,
};

fn supported_tiers() -> impl Iterator<Item = Tier> {
    Tier::ALL.into_iter().filter(|tier| tier.is_supported())
}

#[test]
fn aead_round_trip() {
    check!()
        .with_generator((
            produce::<[u8; KEY_LEN]>(),
            produce::<Vec<u8>>().with().len(1usize..=24),
            produce::<Vec<u8>>().with().len(0usize..64),
            produce::<Vec<u8>>().with().len(0usize..600),
        ))
        .for_each(|(key, iv, aad, payload)| {
            let mut sealed = vec![];

            for tier in supported_tiers() {
                let mut gcm = Sm4Gcm::new(tier, key, iv).unwrap();
                let (ciphertext, tag) = gcm.seal(payload, aad);
                assert_eq!(ciphertext.len(), payload.len());

                let plaintext = gcm
                    .open(&ciphertext, aad, &tag)
                    .expect("round trip should authenticate");
                assert_eq!(&plaintext, payload);

                // a different AAD must not authenticate
                let mut other_aad = aad.clone();
                other_aad.push(0);
                assert!(matches!(
                    gcm.open(&ciphertext, &other_aad, &tag),
                    Err(Error::AuthenticationFailed)
                ));

                sealed.push((tier, ciphertext, tag));
            }

            let (_, first_ct, first_tag) = &sealed[0];
            for (tier, ct, tag) in &sealed[1..] {
                assert_eq!(ct, first_ct, "{tier} ciphertext differs");
                assert_eq!(tag, first_tag, "{tier} tag differs");
            }
        });
}

#[test]
fn block_cipher_round_trip() {
    check!()
        .with_generator((
            produce::<[u8; KEY_LEN]>(),
            produce::<Vec<Block>>().with().len(0usize..40),
        ))
        .for_each(|(key, blocks)| {
            let mut outputs = vec![];

            for variant in Variant::ALL.into_iter().filter(|v| v.is_supported()) {
                let cipher = sm4::new(variant, key).unwrap();

                let mut output = blocks.clone();
                cipher.encrypt_blocks(&mut output);
                outputs.push(output.clone());

                cipher.decrypt_blocks(&mut output);
                assert_eq!(&output, blocks, "{variant}");
            }

            assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
        });
}

#[test]
fn bulk_processing() {
    let key = [0x5c; KEY_LEN];
    let plaintext: Vec<Block> = (0..333u16)
        .map(|i| {
            let mut block = [0u8; 16];
            block[14..].copy_from_slice(&i.to_be_bytes());
            block
        })
        .collect();

    let mut expected = plaintext.clone();
    Config::new().encrypt_blocks(&key, &mut expected).unwrap();

    let config = Config::detect();
    let mut blocks = plaintext.clone();
    config.encrypt_blocks(&key, &mut blocks).unwrap();
    assert_eq!(blocks, expected);

    let cipher = sm4::new(Variant::Reference, &key).unwrap();
    batch::decrypt_parallel(&*cipher, &mut blocks, 5).unwrap();
    assert_eq!(blocks, plaintext);
}
