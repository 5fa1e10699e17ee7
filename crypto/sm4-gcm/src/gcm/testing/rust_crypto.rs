// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use super::Implementation;
use crate::{
    error::Error,
    gcm::{Aead, Tag},
};
use ::sm4::Sm4;
use aes_gcm::{
    aead::{
        consts::{U12, U16},
        generic_array::GenericArray,
        AeadInPlace, KeyInit,
    },
    AesGcm,
};

/// The generic RustCrypto GCM instantiated with their SM4
///
/// Only 12 and 16 byte IVs are supported since the nonce size is fixed at compile time.
enum Impl {
    Nonce12(AesGcm<Sm4, U12>, [u8; 12]),
    Nonce16(AesGcm<Sm4, U16>, [u8; 16]),
}

impl Aead for Impl {
    fn encrypt(&mut self, aad: &[u8], payload: &mut [u8]) -> Tag {
        match self {
            Self::Nonce12(cipher, nonce) => cipher
                .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, payload)
                .unwrap()
                .into(),
            Self::Nonce16(cipher, nonce) => cipher
                .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, payload)
                .unwrap()
                .into(),
        }
    }

    fn decrypt(&mut self, aad: &[u8], payload: &mut [u8], tag: &Tag) -> Result<(), Error> {
        let tag = GenericArray::from_slice(tag);
        let res = match self {
            Self::Nonce12(cipher, nonce) => {
                cipher.decrypt_in_place_detached(GenericArray::from_slice(nonce), aad, payload, tag)
            }
            Self::Nonce16(cipher, nonce) => {
                cipher.decrypt_in_place_detached(GenericArray::from_slice(nonce), aad, payload, tag)
            }
        };
        res.map_err(|_| Error::AuthenticationFailed)
    }
}

pub fn implementations(impls: &mut Vec<Implementation>) {
    impls.push(Implementation {
        name: "RustCrypto",
        new: |key, iv| {
            let key = GenericArray::from(key);
            let imp = match iv.len() {
                12 => Impl::Nonce12(AesGcm::new(&key), iv.try_into().unwrap()),
                16 => Impl::Nonce16(AesGcm::new(&key), iv.try_into().unwrap()),
                _ => return None,
            };
            Some(Box::new(imp))
        },
    });
}
