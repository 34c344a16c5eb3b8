//! Target namespaces of the supported schema versions.
//!
//! Each standard is written with its conventional `eCH-nnnn` prefix. Two
//! versions of one standard never meet in the same document, so they share a
//! prefix.

use ech_wire::Namespace;

pub const ECH_0007: Namespace = Namespace::new("eCH-0007", "http://www.ech.ch/xmlns/eCH-0007/5");
pub const ECH_0008: Namespace = Namespace::new("eCH-0008", "http://www.ech.ch/xmlns/eCH-0008/3");
pub const ECH_0010: Namespace = Namespace::new("eCH-0010", "http://www.ech.ch/xmlns/eCH-0010/5");
pub const ECH_0011: Namespace = Namespace::new("eCH-0011", "http://www.ech.ch/xmlns/eCH-0011/8");
pub const ECH_0020: Namespace = Namespace::new("eCH-0020", "http://www.ech.ch/xmlns/eCH-0020/3");
pub const ECH_0021_V7: Namespace =
    Namespace::new("eCH-0021", "http://www.ech.ch/xmlns/eCH-0021/7");
pub const ECH_0021_V8: Namespace =
    Namespace::new("eCH-0021", "http://www.ech.ch/xmlns/eCH-0021/8");
pub const ECH_0044: Namespace = Namespace::new("eCH-0044", "http://www.ech.ch/xmlns/eCH-0044/4");
pub const ECH_0058_V4: Namespace =
    Namespace::new("eCH-0058", "http://www.ech.ch/xmlns/eCH-0058/4");
pub const ECH_0058_V5: Namespace =
    Namespace::new("eCH-0058", "http://www.ech.ch/xmlns/eCH-0058/5");
pub const ECH_0099: Namespace = Namespace::new("eCH-0099", "http://www.ech.ch/xmlns/eCH-0099/2");

/// Every namespace above, for lookups by URI.
pub const ALL: &[Namespace] = &[
    ECH_0007,
    ECH_0008,
    ECH_0010,
    ECH_0011,
    ECH_0020,
    ECH_0021_V7,
    ECH_0021_V8,
    ECH_0044,
    ECH_0058_V4,
    ECH_0058_V5,
    ECH_0099,
];

pub fn by_uri(uri: &str) -> Option<Namespace> {
    ALL.iter().copied().find(|ns| ns.uri == uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_uri() {
        assert_eq!(by_uri("http://www.ech.ch/xmlns/eCH-0020/3"), Some(ECH_0020));
        assert_eq!(by_uri("http://www.ech.ch/xmlns/eCH-0020/2"), None);
    }

    #[test]
    fn test_uris_are_distinct() {
        for (i, a) in ALL.iter().enumerate() {
            for b in &ALL[i + 1..] {
                assert_ne!(a.uri, b.uri);
            }
        }
    }
}
