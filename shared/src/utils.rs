//! # Shared Utility Functions
//!
//! Helpers for presenting and deriving values from wallet addresses.
//!
//! ```rust
//! use shared::utils::{short_address, wallet_username};
//!
//! let address = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
//! assert_eq!(short_address(address), "8W6Q...JKAL");
//! assert_eq!(wallet_username(address), "wallet_8W6Qgink");
//! ```

/// Number of address characters kept in a synthesized username.
pub const USERNAME_PREFIX_LEN: usize = 8;

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten are returned unchanged.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 6, 6), "8W6Qgi...KuJKAL");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// [`format_address`] with a 4/4 split, as shown in status lines.
pub fn short_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Username given to accounts created from a wallet alone.
///
/// The backend requires a username; wallet sign-ups derive one from the
/// address prefix so the same wallet always proposes the same name.
pub fn wallet_username(address: &str) -> String {
    let prefix: String = address.chars().take(USERNAME_PREFIX_LEN).collect();
    format!("wallet_{}", prefix)
}
