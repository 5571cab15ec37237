//! Decryption of biller information files.
//!
//! The reader only needs something that turns an encrypted path into
//! plaintext bytes. [`GpgDecryptor`] does this by running an OpenPGP-compatible
//! binary; closures implement [`Decrypt`] too, which lets callers feed canned
//! plaintext without a keyring.

use crate::error::{ReaderError, Result};
use log::{debug, warn};
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use zeroize::Zeroizing;

/// Produces the plaintext of one encrypted file.
pub trait Decrypt {
    fn decrypt(&self, path: &Path) -> Result<Vec<u8>>;
}

impl<F> Decrypt for F
where
    F: Fn(&Path) -> Result<Vec<u8>>,
{
    fn decrypt(&self, path: &Path) -> Result<Vec<u8>> {
        self(path)
    }
}

/// Runs `<binary> --batch --passphrase-fd 0 -d <file>` for each file.
///
/// The passphrase is written to the child's stdin and never appears on its
/// command line. A failed decryption is not an error here: the binary's exit
/// status and stderr are logged and whatever reached stdout (usually nothing)
/// is returned.
pub struct GpgDecryptor {
    binary: PathBuf,
    passphrase: Zeroizing<String>,
    extra_args: Vec<String>,
}

impl GpgDecryptor {
    pub fn new(binary: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        GpgDecryptor {
            binary: binary.into(),
            passphrase: Zeroizing::new(passphrase.into()),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed before the fixed batch/decrypt flags, e.g.
    /// `--pinentry-mode loopback` or `--homedir <dir>`.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}

impl fmt::Debug for GpgDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpgDecryptor")
            .field("binary", &self.binary)
            .field("passphrase", &"<redacted>")
            .field("extra_args", &self.extra_args)
            .finish()
    }
}

impl Decrypt for GpgDecryptor {
    fn decrypt(&self, path: &Path) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.binary)
            .args(&self.extra_args)
            .args(["--batch", "--passphrase-fd", "0", "-d"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ReaderError::DecryptionUnavailable {
                binary: self.binary.clone(),
                source,
            })?;

        // stdin is dropped at the end of this block so the child sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(self.passphrase.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    warn!(
                        "{} closed stdin before reading the passphrase",
                        self.binary.display()
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output()?;

        if !output.stderr.is_empty() {
            debug!(
                "{} stderr for {}: {}",
                self.binary.display(),
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        if !output.status.success() {
            warn!(
                "{} exited with {} while decrypting {}",
                self.binary.display(),
                output.status,
                path.display()
            );
        }

        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// A `sh -c` stand-in for gpg: checks the passphrase on stdin and prints
    /// the file named by the last argument.
    fn fake_gpg(script: &str) -> GpgDecryptor {
        GpgDecryptor::new("sh", "secret").with_extra_args(["-c", script, "fake-gpg"])
    }

    const CAT_IF_SECRET: &str = r#"read -r pass; [ "$pass" = secret ] || exit 2; cat "$5""#;

    #[test]
    fn test_decrypt_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file1.txt.gpg");
        std::fs::write(&path, "1,05,1.00,03/07/06,22:18:39,001,X\n").unwrap();

        let plaintext = fake_gpg(CAT_IF_SECRET).decrypt(&path).unwrap();
        assert_eq!(plaintext, b"1,05,1.00,03/07/06,22:18:39,001,X\n");
    }

    #[test]
    fn test_wrong_passphrase_yields_empty_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file1.txt.gpg");
        std::fs::write(&path, "data").unwrap();

        let decryptor = GpgDecryptor::new("sh", "wrong").with_extra_args([
            "-c",
            CAT_IF_SECRET,
            "fake-gpg",
        ]);
        assert!(decryptor.decrypt(&path).unwrap().is_empty());
    }

    #[test]
    fn test_passphrase_is_not_passed_as_argument() {
        let decryptor = fake_gpg(r#"echo "$@""#);
        let args = decryptor.decrypt(Path::new("in.gpg")).unwrap();
        let args = String::from_utf8(args).unwrap();

        assert_eq!(args.trim(), "--batch --passphrase-fd 0 -d in.gpg");
        assert!(!args.contains("secret"));
    }

    #[test]
    fn test_stderr_does_not_fail_decryption() {
        let decryptor = fake_gpg("echo 'gpg: decryption failed' >&2; exit 2");
        assert!(decryptor.decrypt(Path::new("in.gpg")).unwrap().is_empty());
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let decryptor = GpgDecryptor::new("/nonexistent/bin/gpg", "secret");
        let err = decryptor.decrypt(Path::new("in.gpg")).unwrap_err();
        assert!(matches!(err, ReaderError::DecryptionUnavailable { .. }));
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let shown = format!("{:?}", GpgDecryptor::new("gpg", "secret"));
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn test_closure_decryptor() {
        let canned = |_: &Path| -> Result<Vec<u8>> { Ok(b"plaintext".to_vec()) };
        assert_eq!(canned.decrypt(Path::new("any.gpg")).unwrap(), b"plaintext");
    }
}
