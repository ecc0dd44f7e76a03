/// Provides the PackURI value type and utilities for working with package URIs.
///
/// A PackURI is a part name within an OPC package: it always begins with a
/// forward slash and uses forward slashes as separators, e.g.
/// `/word/document.xml`. The ZIP member name is the same string without the
/// leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string.
    ///
    /// Returns an error if the URI doesn't start with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a ZIP member name (`word/document.xml`).
    pub fn from_membername(membername: &str) -> Result<Self, String> {
        Self::new(format!("/{}", membername.trim_start_matches('/')))
    }

    /// Resolve a relative reference (like `../styles.xml`) against a base URI
    /// (like `/word`) into an absolute PackURI.
    ///
    /// Absolute references (starting with `/`) ignore the base.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// The directory portion, e.g. `/word` for `/word/document.xml`.
    ///
    /// For the package pseudo-partname `/`, returns `/`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// The filename portion, e.g. `document.xml`.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// The extension without the leading period, lowercased by the caller if needed.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// The ZIP member name (URI with leading slash stripped).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Relative reference from `base_uri` to this PackURI, as written in a
    /// `.rels` Target attribute.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from_parts: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to_parts: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from_parts
            .iter()
            .zip(to_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = vec![".."; from_parts.len() - common];
        segments.extend_from_slice(&to_parts[common..]);
        segments.join("/")
    }

    /// The PackURI of the `.rels` item holding this part's relationships,
    /// e.g. `/word/_rels/document.xml.rels`.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base_uri = self.base_uri();
        if base_uri == "/" {
            Self::new(format!("/_rels/{}.rels", self.filename()))
        } else {
            Self::new(format!("{}/_rels/{}.rels", base_uri, self.filename()))
        }
    }

    /// The inverse of [`rels_uri`](Self::rels_uri): for a `.rels` item, the
    /// URI of the source it describes. Returns `None` for anything that is not
    /// a relationships item.
    pub fn rels_source(&self) -> Option<PackURI> {
        let filename = self.filename().strip_suffix(".rels")?;
        let dir = self.base_uri();
        let parent = if dir == "/_rels" {
            "/"
        } else {
            dir.strip_suffix("/_rels")?
        };
        if filename.is_empty() {
            return Some(PackURI {
                uri: PACKAGE_URI.to_string(),
            });
        }
        Self::from_rel_ref(parent, filename).ok()
    }

    /// Get the full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve `.` and `..` segments.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                _ => parts.push(part),
            }
        }
        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml item
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/word/document.xml").is_ok());
        assert!(PackURI::new("word/document.xml").is_err());
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/word", "footer1.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/footer1.xml");

        let uri = PackURI::from_rel_ref("/word", "../customXml/item1.xml").unwrap();
        assert_eq!(uri.as_str(), "/customXml/item1.xml");

        let uri = PackURI::from_rel_ref("/", "word/document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");

        let uri = PackURI::from_rel_ref("/word", "/word/styles.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/styles.xml");
    }

    #[test]
    fn test_components() {
        let uri = PackURI::new("/word/header2.xml").unwrap();
        assert_eq!(uri.base_uri(), "/word");
        assert_eq!(uri.filename(), "header2.xml");
        assert_eq!(uri.ext(), "xml");
        assert_eq!(uri.membername(), "word/header2.xml");

        let root = PackURI::new("/").unwrap();
        assert_eq!(root.base_uri(), "/");
        assert_eq!(root.filename(), "");
    }

    #[test]
    fn test_relative_ref() {
        let uri = PackURI::new("/word/footer1.xml").unwrap();
        assert_eq!(uri.relative_ref("/word"), "footer1.xml");
        assert_eq!(uri.relative_ref("/"), "word/footer1.xml");

        let uri = PackURI::new("/customXml/item1.xml").unwrap();
        assert_eq!(uri.relative_ref("/word"), "../customXml/item1.xml");
    }

    #[test]
    fn test_rels_uri_round_trip() {
        let uri = PackURI::new("/word/document.xml").unwrap();
        let rels = uri.rels_uri().unwrap();
        assert_eq!(rels.as_str(), "/word/_rels/document.xml.rels");
        assert_eq!(rels.rels_source(), Some(uri));

        let pkg_rels = PackURI::new("/_rels/.rels").unwrap();
        assert_eq!(pkg_rels.rels_source().unwrap().as_str(), PACKAGE_URI);

        let plain = PackURI::new("/word/styles.xml").unwrap();
        assert_eq!(plain.rels_source(), None);
    }
}
