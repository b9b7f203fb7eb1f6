use serde::{Deserialize, Serialize};

/// One broker connection target in the daemon's config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerEntry {
    pub url: String,
    pub secret: String,
    pub name: String,
}

impl ServerEntry {
    /// Whether a config reload should trigger a full reconnect for this
    /// entry: a name change always does, since the name is advertised to
    /// the broker over `X-Client-Name` at connect time.
    pub fn requires_reconnect(&self, other: &ServerEntry) -> bool {
        self.url != other.url || self.secret != other.secret || self.name != other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_entry_does_not_require_reconnect() {
        let a = ServerEntry {
            url: "ws://a".into(),
            secret: "s".into(),
            name: "n".into(),
        };
        let b = a.clone();
        assert!(!a.requires_reconnect(&b));
    }

    #[test]
    fn name_change_requires_reconnect() {
        let a = ServerEntry {
            url: "ws://a".into(),
            secret: "s".into(),
            name: "n".into(),
        };
        let mut b = a.clone();
        b.name = "other".into();
        assert!(a.requires_reconnect(&b));
    }
}
