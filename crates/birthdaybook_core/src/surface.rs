//! Declared UI surfaces and the core capabilities each one uses.
//!
//! Front ends look up a surface here instead of probing which widgets exist,
//! and consult `SessionGate` only when `requires_session` says so.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Core operation group a surface may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Authenticate,
    RegisterAccount,
    ManageRecords,
    QueryRecords,
    Calendar,
    TodayAlert,
    Theme,
    Logout,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::RegisterAccount => "register_account",
            Self::ManageRecords => "manage_records",
            Self::QueryRecords => "query_records",
            Self::Calendar => "calendar",
            Self::TodayAlert => "today_alert",
            Self::Theme => "theme",
            Self::Logout => "logout",
        }
    }
}

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Login,
    Register,
    Agenda,
}

const LOGIN_CAPABILITIES: &[Capability] = &[Capability::Authenticate];
const REGISTER_CAPABILITIES: &[Capability] = &[Capability::RegisterAccount];
const AGENDA_CAPABILITIES: &[Capability] = &[
    Capability::ManageRecords,
    Capability::QueryRecords,
    Capability::Calendar,
    Capability::TodayAlert,
    Capability::Theme,
    Capability::Logout,
];

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Agenda => "agenda",
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Login => LOGIN_CAPABILITIES,
            Self::Register => REGISTER_CAPABILITIES,
            Self::Agenda => AGENDA_CAPABILITIES,
        }
    }

    /// Only the agenda is behind the login gate.
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Agenda)
    }

    /// Rejects use of a capability the surface did not declare.
    pub fn assert_capability(self, capability: Capability) -> Result<(), CapabilityDenied> {
        if self.capabilities().contains(&capability) {
            Ok(())
        } else {
            Err(CapabilityDenied {
                surface: self,
                capability,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDenied {
    pub surface: Surface,
    pub capability: Capability,
}

impl Display for CapabilityDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "surface `{}` does not declare capability `{}`",
            self.surface.as_str(),
            self.capability.as_str()
        )
    }
}

impl Error for CapabilityDenied {}
