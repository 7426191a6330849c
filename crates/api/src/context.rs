use idadmin_auth::CallerIdentity;

/// Caller context for a request.
///
/// Absent identity is a legitimate state here: the procedure itself decides
/// that an anonymous call is `unauthenticated`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    caller: Option<CallerIdentity>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn authenticated(caller: CallerIdentity) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    pub fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }
}
