use crate::request::{FIELD_UID, FIELD_USER_ID};

/// The remote-callable procedures offered by this component.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Procedure {
    DeleteUser,
    DeleteUserByUid,
    SetAdminClaim,
}

impl Procedure {
    pub const ALL: [Procedure; 3] = [
        Procedure::DeleteUser,
        Procedure::DeleteUserByUid,
        Procedure::SetAdminClaim,
    ];

    /// Name under which the procedure is invoked.
    pub fn name(&self) -> &'static str {
        match self {
            Procedure::DeleteUser => "deleteUser",
            Procedure::DeleteUserByUid => "deleteUserByUid",
            Procedure::SetAdminClaim => "setAdminClaim",
        }
    }

    /// The single request field the procedure requires.
    pub fn field(&self) -> &'static str {
        match self {
            Procedure::DeleteUser => FIELD_USER_ID,
            Procedure::DeleteUserByUid | Procedure::SetAdminClaim => FIELD_UID,
        }
    }
}

impl core::fmt::Display for Procedure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
