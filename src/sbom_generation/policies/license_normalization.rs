use crate::sbom_generation::domain::LicenseRecord;

/// Substring rule over a lower-cased license name.
///
/// Every `all` needle must be present and, when `any` is non-empty, at least
/// one of its needles too.
struct NameRule {
    all: &'static [&'static str],
    any: &'static [&'static str],
    id: &'static str,
}

const fn rule(
    all: &'static [&'static str],
    any: &'static [&'static str],
    id: &'static str,
) -> NameRule {
    NameRule { all, any, id }
}

/// Curated name table. Order matters: specific entries come before the
/// broader ones that would also match (LGPL before GPL, versioned BSD before
/// bare BSD).
const NAME_RULES: &[NameRule] = &[
    rule(&["apache"], &["1.1"], "Apache-1.1"),
    rule(&["apache"], &["2"], "Apache-2.0"),
    rule(&["asl"], &["2"], "Apache-2.0"),
    rule(&["bsd"], &["2-clause", "2 clause", "simplified", "freebsd"], "BSD-2-Clause"),
    rule(&["bsd"], &[], "BSD-3-Clause"),
    rule(&["eclipse distribution license"], &[], "BSD-3-Clause"),
    rule(&["lgpl"], &["2.1"], "LGPL-2.1-or-later"),
    rule(&["lgpl"], &["3"], "LGPL-3.0-or-later"),
    rule(&["lesser general public"], &["2.1"], "LGPL-2.1-or-later"),
    rule(&["lesser general public"], &["3"], "LGPL-3.0-or-later"),
    rule(&["affero"], &[], "AGPL-3.0-or-later"),
    rule(&["agpl"], &[], "AGPL-3.0-or-later"),
    rule(&["gpl", "classpath"], &[], "GPL-2.0-with-classpath-exception"),
    rule(&["general public license", "classpath"], &[], "GPL-2.0-with-classpath-exception"),
    rule(&["gpl"], &["3"], "GPL-3.0-or-later"),
    rule(&["gpl"], &["2"], "GPL-2.0-or-later"),
    rule(&["general public license"], &["3"], "GPL-3.0-or-later"),
    rule(&["general public license"], &["2"], "GPL-2.0-or-later"),
    rule(&["eclipse public license"], &["2"], "EPL-2.0"),
    rule(&["eclipse public license"], &[], "EPL-1.0"),
    rule(&["epl"], &["2"], "EPL-2.0"),
    rule(&["epl"], &["1"], "EPL-1.0"),
    rule(&["mozilla"], &["1.1"], "MPL-1.1"),
    rule(&["mozilla"], &["2"], "MPL-2.0"),
    rule(&["mpl"], &["2"], "MPL-2.0"),
    rule(&["cddl"], &["1.1"], "CDDL-1.1"),
    rule(&["cddl"], &[], "CDDL-1.0"),
    rule(&["common development and distribution"], &[], "CDDL-1.0"),
    rule(&["unlicense"], &[], "Unlicense"),
    rule(&["cc0"], &[], "CC0-1.0"),
    rule(&["boost software"], &[], "BSL-1.0"),
    rule(&["zlib"], &[], "Zlib"),
    rule(&["wtfpl"], &[], "WTFPL"),
];

/// Short names matched as whole words only ("mit" must not hit "permitted")
const WORD_RULES: &[(&str, &str)] = &[("mit", "MIT"), ("isc", "ISC"), ("x11", "X11")];

/// Well-known license URL fragments, matched against the lower-cased URL
/// with its scheme removed
const URL_RULES: &[(&str, &str)] = &[
    ("apache.org/licenses/license-2.0", "Apache-2.0"),
    ("opensource.org/licenses/apache-2.0", "Apache-2.0"),
    ("opensource.org/licenses/mit", "MIT"),
    ("mit-license.org", "MIT"),
    ("opensource.org/licenses/bsd-2-clause", "BSD-2-Clause"),
    ("opensource.org/licenses/bsd-3-clause", "BSD-3-Clause"),
    ("opensource.org/licenses/bsd-license", "BSD-3-Clause"),
    ("gnu.org/licenses/lgpl-2.1", "LGPL-2.1-or-later"),
    ("gnu.org/licenses/old-licenses/lgpl-2.1", "LGPL-2.1-or-later"),
    ("gnu.org/licenses/lgpl", "LGPL-3.0-or-later"),
    ("gnu.org/licenses/agpl", "AGPL-3.0-or-later"),
    ("gnu.org/licenses/old-licenses/gpl-2.0", "GPL-2.0-or-later"),
    ("gnu.org/licenses/gpl-2.0", "GPL-2.0-or-later"),
    ("gnu.org/licenses/gpl", "GPL-3.0-or-later"),
    ("eclipse.org/legal/epl-2.0", "EPL-2.0"),
    ("eclipse.org/legal/epl-v20", "EPL-2.0"),
    ("eclipse.org/legal/epl-v10", "EPL-1.0"),
    ("eclipse.org/org/documents/edl-v10", "BSD-3-Clause"),
    ("mozilla.org/mpl/2.0", "MPL-2.0"),
    ("creativecommons.org/publicdomain/zero/1.0", "CC0-1.0"),
    ("unlicense.org", "Unlicense"),
    ("opensource.org/licenses/isc", "ISC"),
];

/// LicenseNormalization policy for mapping declared licenses to SPDX ids
///
/// Priority order:
/// 1. declared name, through the curated substring table
/// 2. declared URL, through the well-known URL table
/// 3. declared name verbatim (then URL verbatim) as a best-effort id
pub struct LicenseNormalization;

impl LicenseNormalization {
    /// Canonical id for a free-text license name, if it is a known license
    pub fn normalize_name(name: &str) -> Option<&'static str> {
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        if let Some((_, id)) = WORD_RULES.iter().find(|(word, _)| words.contains(word)) {
            return Some(*id);
        }

        NAME_RULES
            .iter()
            .find(|rule| {
                rule.all.iter().all(|needle| lowered.contains(needle))
                    && (rule.any.is_empty() || rule.any.iter().any(|needle| lowered.contains(needle)))
            })
            .map(|rule| rule.id)
    }

    /// Canonical id for a well-known license URL
    pub fn normalize_url(url: &str) -> Option<&'static str> {
        let lowered = url.trim().to_lowercase();
        let stripped = lowered
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.");

        URL_RULES
            .iter()
            .find(|(fragment, _)| stripped.contains(fragment))
            .map(|(_, id)| *id)
    }

    /// Builds the record for a declared license; `None` when nothing was declared
    pub fn to_record(name: Option<&str>, url: Option<&str>) -> Option<LicenseRecord> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let url = url.map(str::trim).filter(|u| !u.is_empty());

        let id = name
            .and_then(Self::normalize_name)
            .or_else(|| url.and_then(Self::normalize_url))
            .map(str::to_string)
            .or_else(|| name.map(str::to_string))
            .or_else(|| url.map(str::to_string))?;

        Some(LicenseRecord::new(
            id,
            name.or(url).unwrap_or_default().to_string(),
            url.map(str::to_string),
        ))
    }
}
