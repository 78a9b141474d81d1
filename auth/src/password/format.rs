use std::fmt;

/// Structural classification of an encoded password hash.
///
/// Derived from the hash string's self-describing prefix, never stored.
/// BCrypt covers every legacy sub-version marker; anything that matches
/// neither family is `Unknown` and always fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFormat {
    /// Modern format, PHC string produced by Argon2id.
    Argon2id,
    /// Legacy format being phased out ($2a$, $2b$, or $2y$).
    Bcrypt,
    /// Neither prefix family matches; verification fails closed.
    Unknown,
}

impl HashFormat {
    const ARGON2ID_PREFIX: &'static str = "$argon2id$";
    const BCRYPT_PREFIXES: [&'static str; 3] = ["$2a$", "$2b$", "$2y$"];

    /// Classify an encoded hash by its prefix.
    ///
    /// Pure and total: empty or malformed input classifies as `Unknown`.
    pub fn classify(hash: &str) -> Self {
        if hash.starts_with(Self::ARGON2ID_PREFIX) {
            HashFormat::Argon2id
        } else if Self::BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            HashFormat::Bcrypt
        } else {
            HashFormat::Unknown
        }
    }

    /// Human-readable algorithm name for logs and statistics.
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            HashFormat::Argon2id => "Argon2id",
            HashFormat::Bcrypt => "BCrypt",
            HashFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HashFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.algorithm_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_argon2id() {
        let hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hashhashhash";
        assert_eq!(HashFormat::classify(hash), HashFormat::Argon2id);
    }

    #[test]
    fn test_classify_bcrypt_all_versions() {
        for prefix in ["$2a$", "$2b$", "$2y$"] {
            let hash = format!("{}10$N9qo8uLOickgx2ZMRZoMye", prefix);
            assert_eq!(HashFormat::classify(&hash), HashFormat::Bcrypt);
        }
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(HashFormat::classify(""), HashFormat::Unknown);
        assert_eq!(HashFormat::classify("plaintext"), HashFormat::Unknown);
        assert_eq!(HashFormat::classify("$md5$abcdef"), HashFormat::Unknown);
        // $2x$ was never a recognized bcrypt marker here
        assert_eq!(HashFormat::classify("$2x$10$abc"), HashFormat::Unknown);
    }

    #[test]
    fn test_classify_truncated_prefix_is_unknown() {
        assert_eq!(HashFormat::classify("$argon2"), HashFormat::Unknown);
        assert_eq!(HashFormat::classify("$argon2i$v=19$..."), HashFormat::Unknown);
        assert_eq!(HashFormat::classify("$2"), HashFormat::Unknown);
        assert_eq!(HashFormat::classify("$2a"), HashFormat::Unknown);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(HashFormat::Argon2id.to_string(), "Argon2id");
        assert_eq!(HashFormat::Bcrypt.to_string(), "BCrypt");
        assert_eq!(HashFormat::Unknown.to_string(), "unknown");
    }
}
