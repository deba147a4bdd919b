// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical attribute-key form
//!
//! Property names arrive with inconsistent casing and punctuation
//! ("System Type", "SystemType", "system_type"). Both sides of every name
//! comparison are reduced to the same canonical form first.

/// Canonical form of an attribute key: lower-case, non-alphanumerics stripped
pub fn canon(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Canonical form of the System Type attribute key
pub const SYSTEM_TYPE_KEY: &str = "systemtype";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canon_strips_case_and_punctuation() {
        assert_eq!(canon("System Type"), "systemtype");
        assert_eq!(canon("SYSTEM_TYPE"), "systemtype");
        assert_eq!(canon("system-type"), "systemtype");
        assert_eq!(canon(" System  Type "), "systemtype");
    }

    #[test]
    fn test_canon_matches_target_constant() {
        assert_eq!(canon("System Type"), SYSTEM_TYPE_KEY);
    }

    #[test]
    fn test_canon_keeps_digits() {
        assert_eq!(canon("Zone 2 Supply"), "zone2supply");
    }
}
