pub const WILDCARD: &str = "*";

/// Permission ids the key-creation form offers, with display descriptions.
pub const AVAILABLE_PERMISSIONS: &[(&str, &str)] = &[
    ("ban_user", "Ban a user from the global chat"),
    ("ban_server", "Ban a server from the global chat"),
    ("unban_user", "Lift a user ban"),
    ("unban_server", "Lift a server ban"),
    ("view_bans", "View the ban list"),
    ("manage_api_keys", "Create, delete and toggle API keys"),
    (WILDCARD, "Full access to every endpoint"),
];

/// Permission picker state for key creation.
///
/// Invariant: the selection is either exactly `{"*"}` or a wildcard-free
/// subset, never both. Selecting the wildcard clears everything else;
/// selecting a specific permission while the wildcard is active drops the
/// wildcard.
#[derive(Debug, Default, Clone)]
pub struct PermissionSelection {
    selected: Vec<String>,
}

impl PermissionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, permission: &str) {
        if permission == WILDCARD {
            if self.is_wildcard() {
                self.selected.clear();
            } else {
                self.selected = vec![WILDCARD.to_string()];
            }
            return;
        }

        self.selected.retain(|p| p != WILDCARD);
        if let Some(pos) = self.selected.iter().position(|p| p == permission) {
            self.selected.remove(pos);
        } else {
            self.selected.push(permission.to_string());
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.selected.iter().any(|p| p == WILDCARD)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.selected
    }
}
