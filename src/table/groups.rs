/// Field suffixes of a photon column group
pub const PHOTON_FIELDS: &[&str] = &["pt", "eta", "phi"];
/// Field suffixes of a jet column group
pub const JET_FIELDS: &[&str] = &["pt", "eta", "phi", "m"];
/// Field suffixes of a truth-particle column group
pub const TRUTH_FIELDS: &[&str] = &["pt", "eta", "phi", "m", "status", "pid"];

/// The kinds of column groups a table can declare.
///
/// Each kind fixes an ordered list of field suffixes; declaring a group
/// named `g` creates one vector column per suffix (`g_pt`, `g_eta`, ...),
/// all filled together, one slot per object per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Photon group: (pt, eta, phi)
    Photon,
    /// Jet group: (pt, eta, phi, m)
    Jet,
    /// Truth-particle group: (pt, eta, phi, m, status, pid)
    Truth,
}

impl GroupKind {
    /// The ordered field suffixes this kind defines.
    pub fn field_suffixes(self) -> &'static [&'static str] {
        match self {
            GroupKind::Photon => PHOTON_FIELDS,
            GroupKind::Jet => JET_FIELDS,
            GroupKind::Truth => TRUTH_FIELDS,
        }
    }

    /// Human-readable label, used in log lines and error messages.
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Photon => "photon",
            GroupKind::Jet => "jet",
            GroupKind::Truth => "truth",
        }
    }

    pub(super) fn index(self) -> usize {
        match self {
            GroupKind::Photon => 0,
            GroupKind::Jet => 1,
            GroupKind::Truth => 2,
        }
    }
}

/// Number of group kinds, sizing the registry's per-kind name sets.
pub(super) const GROUP_KIND_COUNT: usize = 3;

/// Full column name of one group field.
pub fn group_column_name(group: &str, suffix: &str) -> String {
    format!("{group}_{suffix}")
}
