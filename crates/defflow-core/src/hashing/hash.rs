//! Hash helpers – abstracción para permitir cambiar de algoritmo sin tocar
//! el resto del core. El fingerprint de una revisión es el hash del JSON
//! canónico de su contenido.

use blake3::Hasher;
use serde_json::Value;

use super::to_canonical_json;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hashea un `Value` canonicalizado: mismo contenido lógico ⇒ mismo hash,
/// independiente del orden de claves.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}
