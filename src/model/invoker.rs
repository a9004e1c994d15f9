/// The member who invoked a command.
///
/// Roles are looked up from Discord on every invocation, never cached between
/// commands, so a revoked role takes effect immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub user_id: u64,
    pub display_name: String,
    pub role_ids: Vec<u64>,
    /// Channel the command was invoked from.
    pub channel_id: u64,
}

impl Invoker {
    pub fn has_any_role(&self, roles: &[u64]) -> bool {
        roles.iter().any(|r| self.role_ids.contains(r))
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}
