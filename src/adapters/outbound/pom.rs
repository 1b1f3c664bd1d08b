//! Extraction of the declared license from a Maven POM descriptor.

use crate::sbom_generation::domain::LicenseRecord;
use crate::sbom_generation::policies::LicenseNormalization;
use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Declared license of a POM, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredLicense {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl DeclaredLicense {
    pub fn into_record(self) -> Option<LicenseRecord> {
        LicenseNormalization::to_record(self.name.as_deref(), self.url.as_deref())
    }
}

/// Reads the first `<project><licenses><license>` entry.
///
/// Returns `Ok(None)` when the POM declares no license.
pub fn parse_declared_license(content: &str) -> Result<Option<DeclaredLicense>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut declared = DeclaredLicense::default();
    let mut in_first_license = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(e.local_name().as_ref().to_vec());
                if is_license_entry(&path) {
                    in_first_license = true;
                }
            }
            Event::End(_) => {
                if in_first_license && is_license_entry(&path) {
                    break;
                }
                path.pop();
            }
            Event::Text(text) if in_first_license => {
                let value = text.unescape()?.trim().to_string();
                if value.is_empty() {
                    continue;
                }
                match path.last().map(Vec::as_slice) {
                    Some(b"name") if path.len() == 4 => declared.name = Some(value),
                    Some(b"url") if path.len() == 4 => declared.url = Some(value),
                    _ => {}
                }
            }
            Event::CData(data) if in_first_license => {
                let value = String::from_utf8_lossy(&data.into_inner()).trim().to_string();
                match path.last().map(Vec::as_slice) {
                    Some(b"name") if path.len() == 4 && !value.is_empty() => {
                        declared.name = Some(value)
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if declared.name.is_none() && declared.url.is_none() {
        return Ok(None);
    }
    Ok(Some(declared))
}

fn is_license_entry(path: &[Vec<u8>]) -> bool {
    path.len() == 3 && path[0] == b"project" && path[1] == b"licenses" && path[2] == b"license"
}

#[cfg(test)]
mod tests {
    use super::*;

    const OKIO_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.squareup.okio</groupId>
  <artifactId>okio</artifactId>
  <version>3.6.0</version>
  <name>okio</name>
  <url>https://github.com/square/okio/</url>
  <licenses>
    <license>
      <name>The Apache Software License, Version 2.0</name>
      <url>https://www.apache.org/licenses/LICENSE-2.0.txt</url>
      <distribution>repo</distribution>
    </license>
    <license>
      <name>MIT</name>
    </license>
  </licenses>
</project>"#;

    #[test]
    fn test_parse_first_license_only() {
        let declared = parse_declared_license(OKIO_POM).unwrap().unwrap();
        assert_eq!(
            declared.name.as_deref(),
            Some("The Apache Software License, Version 2.0")
        );
        assert_eq!(
            declared.url.as_deref(),
            Some("https://www.apache.org/licenses/LICENSE-2.0.txt")
        );

        let record = declared.into_record().unwrap();
        assert_eq!(record.id(), "Apache-2.0");
    }

    #[test]
    fn test_project_name_and_url_are_not_the_license() {
        let pom = r#"<project><name>lib</name><url>https://example.com</url></project>"#;
        assert!(parse_declared_license(pom).unwrap().is_none());
    }

    #[test]
    fn test_url_only_license() {
        let pom = r#"<project><licenses><license><url>https://opensource.org/licenses/MIT</url></license></licenses></project>"#;
        let record = parse_declared_license(pom).unwrap().unwrap().into_record().unwrap();
        assert_eq!(record.id(), "MIT");
    }

    #[test]
    fn test_escaped_text() {
        let pom = r#"<project><licenses><license><name>Eclipse Public License &amp; v 2.0</name></license></licenses></project>"#;
        let declared = parse_declared_license(pom).unwrap().unwrap();
        assert_eq!(declared.name.as_deref(), Some("Eclipse Public License & v 2.0"));
    }

    #[test]
    fn test_malformed_xml_is_error() {
        assert!(parse_declared_license("<project><licenses></project>").is_err());
    }
}
