//! Code table
//!
//! Maps symbolic command names to command codes for one display family.
//! Built once from the model name and never modified afterwards.

use std::collections::BTreeMap;

use crate::error::{Result, TvError};

type CodeGroup = &'static [(&'static str, &'static str)];

/// Codes understood by every supported set
const COMMON_CODES: CodeGroup = &[
    ("poweroff", "ka 00 00"),
    ("poweron", "ka 00 01"),
    ("powerstatus", "ka 00 ff"),
    ("aspect43", "kc 00 01"),
    ("aspect169", "kc 00 02"),
    ("aspectzoom", "kc 00 04"),
    ("aspectstatus", "kc 00 ff"),
    ("screenmuteoff", "kd 00 00"),
    ("screenmuteon", "kd 00 01"),
    ("screenmutestatus", "kd 00 ff"),
    ("mute", "ke 00 00"),
    ("unmute", "ke 00 01"),
    ("mutestatus", "ke 00 ff"),
    ("volumelevel", "kf 00 ff"),
    ("contrastlevel", "kg 00 ff"),
    ("brightnesslevel", "kh 00 ff"),
    ("colorlevel", "ki 00 ff"),
    ("tintlevel", "kj 00 ff"),
    ("sharpnesslevel", "kk 00 ff"),
    ("osdoff", "kl 00 00"),
    ("osdon", "kl 00 01"),
    ("osdstatus", "kl 00 ff"),
    ("remotelockoff", "km 00 00"),
    ("remotelockon", "km 00 01"),
    ("remotelockstatus", "km 00 ff"),
    ("backlightlevel", "mg 00 ff"),
    ("inputdigitalantenna", "xb 00 00"),
    ("inputdigitalcable", "xb 00 01"),
    ("inputanalogantenna", "xb 00 10"),
    ("inputanalogcable", "xb 00 11"),
    ("inputav1", "xb 00 20"),
    ("inputav2", "xb 00 21"),
    ("inputcomponent1", "xb 00 40"),
    ("inputcomponent2", "xb 00 41"),
    ("inputrgbpc", "xb 00 60"),
    ("inputhdmi1", "xb 00 70"),
    ("inputhdmi2", "xb 00 71"),
    ("inputhdmi3", "xb 00 72"),
    ("inputhdmi4", "xb 00 73"),
    ("inputstatus", "xb 00 ff"),
];

/// Stereoscopic mode codes (multi-field payload, static use only)
const THREE_D_CODES: CodeGroup = &[
    ("3Dstatus", "xt 00 FF FF FF FF"),
    ("3Dnone", "xt 00 01 00 00 00"),
    ("3Dsbs", "xt 00 00 01 00 00"),
    ("3Dou", "xt 00 00 00 00 00"),
];

/// One selectable code set and the model suffixes that use it
struct CodeSet {
    family: &'static str,
    suffixes: &'static [&'static str],
    groups: &'static [CodeGroup],
}

const REGISTRY: &[CodeSet] = &[
    CodeSet {
        family: "LK_etc",
        suffixes: &["LK450", "LD450", "LD550", "LE5300"],
        groups: &[COMMON_CODES],
    },
    CodeSet {
        family: "LW_etc",
        suffixes: &["LW650", "LW650S", "LW5700", "LW6500"],
        groups: &[COMMON_CODES, THREE_D_CODES],
    },
];

/// Reduce a model name to its family suffix.
///
/// Model names embed the screen size as leading digits, sometimes behind a
/// single `M` (monitor) marker: `42LW650s` and `M2342LW650S` both become
/// `LW650S`.
pub fn normalize_model(model: &str) -> String {
    let upper = model.trim().to_ascii_uppercase();
    let without_marker = upper.strip_prefix('M').unwrap_or(&upper);
    without_marker
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .to_string()
}

/// Immutable name → code mapping for one display family
#[derive(Debug, Clone)]
pub struct CodeTable {
    family: String,
    codes: BTreeMap<String, String>,
}

impl CodeTable {
    /// Select the code set registered for `model`
    pub fn for_model(model: &str) -> Result<Self> {
        let suffix = normalize_model(model);

        let set = REGISTRY
            .iter()
            .find(|set| set.suffixes.iter().any(|s| *s == suffix))
            .ok_or_else(|| TvError::UnknownModel(format!("{} (suffix {:?})", model, suffix)))?;

        let codes = set
            .groups
            .iter()
            .flat_map(|group| group.iter())
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect();

        tracing::debug!(model, family = set.family, "selected code set");

        Ok(Self {
            family: set.family.to_string(),
            codes,
        })
    }

    /// Build a table from explicit entries (custom devices, tests)
    pub fn from_entries<I, K, V>(family: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            family: family.into(),
            codes: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Static lookup; `UnknownCommand` if absent
    pub fn lookup(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| TvError::UnknownCommand(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// Name of the selected code set
    pub fn family(&self) -> &str {
        &self.family
    }

    /// All entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
