//! Attack Families
//!
//! Static mapping from specific attack labels to the four coarse KDD
//! categories. Labels keep the dataset's trailing dot.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::layout::NORMAL_FAMILY;

// ============================================================================
// ATTACK FAMILY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackFamily {
    /// Denial of service
    Dos,
    /// Surveillance and probing
    Probe,
    /// Remote to local
    R2l,
    /// User to root
    U2r,
}

impl AttackFamily {
    pub const ALL: [AttackFamily; 4] = [
        AttackFamily::Dos,
        AttackFamily::Probe,
        AttackFamily::R2l,
        AttackFamily::U2r,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackFamily::Dos => "dos",
            AttackFamily::Probe => "probe",
            AttackFamily::R2l => "r2l",
            AttackFamily::U2r => "u2r",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        AttackFamily::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl std::fmt::Display for AttackFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Multiclass target: benign traffic or one attack family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficClass {
    Normal,
    Attack(AttackFamily),
}

impl TrafficClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficClass::Normal => NORMAL_FAMILY,
            TrafficClass::Attack(family) => family.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s == NORMAL_FAMILY {
            Some(TrafficClass::Normal)
        } else {
            AttackFamily::parse(s).map(TrafficClass::Attack)
        }
    }
}

// ============================================================================
// LABEL TABLE
// ============================================================================

/// Known attack labels with their family (training and corrected-test labels)
pub const ATTACK_FAMILY_TABLE: &[(&str, AttackFamily)] = &[
    // DoS
    ("back.", AttackFamily::Dos),
    ("land.", AttackFamily::Dos),
    ("neptune.", AttackFamily::Dos),
    ("pod.", AttackFamily::Dos),
    ("smurf.", AttackFamily::Dos),
    ("teardrop.", AttackFamily::Dos),
    ("apache2.", AttackFamily::Dos),
    ("udpstorm.", AttackFamily::Dos),
    ("processtable.", AttackFamily::Dos),
    ("worm.", AttackFamily::Dos),
    // Probe
    ("satan.", AttackFamily::Probe),
    ("ipsweep.", AttackFamily::Probe),
    ("nmap.", AttackFamily::Probe),
    ("portsweep.", AttackFamily::Probe),
    ("mscan.", AttackFamily::Probe),
    ("saint.", AttackFamily::Probe),
    // R2L
    ("ftp_write.", AttackFamily::R2l),
    ("guess_passwd.", AttackFamily::R2l),
    ("imap.", AttackFamily::R2l),
    ("multihop.", AttackFamily::R2l),
    ("phf.", AttackFamily::R2l),
    ("spy.", AttackFamily::R2l),
    ("warezclient.", AttackFamily::R2l),
    ("warezmaster.", AttackFamily::R2l),
    ("named.", AttackFamily::R2l),
    ("sendmail.", AttackFamily::R2l),
    ("snmpgetattack.", AttackFamily::R2l),
    ("snmpguess.", AttackFamily::R2l),
    // U2R
    ("buffer_overflow.", AttackFamily::U2r),
    ("loadmodule.", AttackFamily::U2r),
    ("perl.", AttackFamily::U2r),
    ("rootkit.", AttackFamily::U2r),
    ("httptunnel.", AttackFamily::U2r),
    ("ps.", AttackFamily::U2r),
    ("sqlattack.", AttackFamily::U2r),
    ("xterm.", AttackFamily::U2r),
];

static FAMILY_INDEX: Lazy<HashMap<&'static str, AttackFamily>> =
    Lazy::new(|| ATTACK_FAMILY_TABLE.iter().copied().collect());

/// Family of an attack label; exact match, `None` when the label is unknown
pub fn lookup_family(label: &str) -> Option<AttackFamily> {
    FAMILY_INDEX.get(label).copied()
}

pub fn is_known_attack(label: &str) -> bool {
    FAMILY_INDEX.contains_key(label)
}
