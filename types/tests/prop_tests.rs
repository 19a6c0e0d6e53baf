use proptest::prelude::*;

use custody_types::{ContentHash, Role};

proptest! {
    /// Any digest produced from file contents is accepted by the parser.
    #[test]
    fn digest_of_any_contents_is_valid(contents in prop::collection::vec(any::<u8>(), 0..512)) {
        let hash = ContentHash::of_bytes(&contents);
        prop_assert_eq!(hash.as_str().len(), ContentHash::HEX_LEN);
        prop_assert!(ContentHash::parse(hash.as_str()).is_ok());
    }

    /// Hex strings of the wrong length are always rejected.
    #[test]
    fn wrong_length_hex_is_rejected(s in "[0-9a-f]{0,128}") {
        prop_assume!(s.len() != ContentHash::HEX_LEN);
        prop_assert!(ContentHash::parse(&s).is_err());
    }

    /// Only the five lowercase wire names resolve to a role.
    #[test]
    fn arbitrary_names_resolve_only_if_known(name in "[a-zA-Z]{0,16}") {
        let known = Role::ALL.iter().any(|r| r.as_str() == name);
        prop_assert_eq!(name.parse::<Role>().is_ok(), known);
    }
}
