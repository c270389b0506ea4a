use lopdf::encryption::{EncryptionState, EncryptionVersion, Permissions};
use lopdf::Document;

use super::PdfError;

/// Passwords and permission flags for encrypting a document.
///
/// The user password opens the document; the owner password lifts the
/// permission restrictions. Printing is allowed by default, copying and
/// annotating are not.
#[derive(Debug, Clone)]
pub struct EncryptOptions {
    pub user_password: String,
    pub owner_password: String,
    pub allow_print: bool,
    pub allow_copy: bool,
    pub allow_annotate: bool,
}

impl EncryptOptions {
    fn permissions(&self) -> Permissions {
        let mut permissions = Permissions::empty();
        if self.allow_print {
            permissions |= Permissions::PRINTABLE;
        }
        if self.allow_copy {
            permissions |= Permissions::COPYABLE;
        }
        if self.allow_annotate {
            permissions |= Permissions::ANNOTABLE;
        }
        permissions
    }
}

/// Encrypt with the standard security handler, 128-bit RC4.
pub fn encrypt_document(doc: &mut Document, opts: &EncryptOptions) -> Result<(), PdfError> {
    let version = EncryptionVersion::V2 {
        document: doc,
        owner_password: &opts.owner_password,
        user_password: &opts.user_password,
        key_length: 128,
        permissions: opts.permissions(),
    };
    let state = EncryptionState::try_from(version)
        .map_err(|e| PdfError::Encryption(e.to_string()))?;
    doc.encrypt(&state)
        .map_err(|e| PdfError::Encryption(e.to_string()))
}

/// Decrypt in place. A document that is not encrypted passes through
/// untouched; a wrong password is WrongPassword, anything else Decryption.
pub fn decrypt_document(doc: &mut Document, password: &str) -> Result<(), PdfError> {
    if !doc.is_encrypted() {
        return Ok(());
    }

    doc.decrypt(password).map_err(|e| {
        let msg = e.to_string();
        if msg.to_lowercase().contains("password") {
            PdfError::WrongPassword
        } else {
            PdfError::Decryption(msg)
        }
    })?;

    // Saved output must not carry the old encryption dictionary
    doc.trailer.remove(b"Encrypt");
    Ok(())
}
