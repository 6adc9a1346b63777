//! The shared link settings of a file or a folder

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// Who can reach the item through its shared link
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedLinkAccess {
    Open,
    Company,
    Collaborators,
}

impl SharedLinkAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Company => "company",
            Self::Collaborators => "collaborators",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SharedLinkPermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_download: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_preview: Option<bool>,
}

/// Shared link passed along when updating an item.
///
/// ```
/// use boxapi::shared_link::{SharedLink, SharedLinkAccess};
///
/// let link = SharedLink::new(SharedLinkAccess::Company).with_can_download(false);
/// assert_eq!(link.access, SharedLinkAccess::Company);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SharedLink {
    pub access: SharedLinkAccess,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unshared_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<SharedLinkPermissions>,
}

impl SharedLink {
    pub fn new(access: SharedLinkAccess) -> Self {
        Self {
            access,
            unshared_at: None,
            permissions: None,
        }
    }

    pub fn set_unshared_at(&mut self, value: DateTime<FixedOffset>) {
        self.unshared_at = Some(value);
    }

    pub fn with_unshared_at(mut self, value: DateTime<FixedOffset>) -> Self {
        self.set_unshared_at(value);
        self
    }

    pub fn set_can_download(&mut self, value: bool) {
        self.permissions.get_or_insert_with(Default::default).can_download = Some(value);
    }

    pub fn with_can_download(mut self, value: bool) -> Self {
        self.set_can_download(value);
        self
    }

    pub fn set_can_preview(&mut self, value: bool) {
        self.permissions.get_or_insert_with(Default::default).can_preview = Some(value);
    }

    pub fn with_can_preview(mut self, value: bool) -> Self {
        self.set_can_preview(value);
        self
    }
}

impl From<&SharedLink> for Value {
    fn from(link: &SharedLink) -> Self {
        let mut map = Map::new();
        map.insert("access".into(), Value::from(link.access.as_str()));
        if let Some(ref unshared_at) = link.unshared_at {
            map.insert("unshared_at".into(), Value::from(unshared_at.to_rfc3339()));
        }
        if let Some(ref permissions) = link.permissions {
            let mut inner = Map::new();
            if let Some(value) = permissions.can_download {
                inner.insert("can_download".into(), Value::from(value));
            }
            if let Some(value) = permissions.can_preview {
                inner.insert("can_preview".into(), Value::from(value));
            }
            map.insert("permissions".into(), Value::Object(inner));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::{SharedLink, SharedLinkAccess};
    use chrono::DateTime;
    use serde_json::{json, Value};

    #[test]
    fn should_only_contain_access() {
        let link = SharedLink::new(SharedLinkAccess::Open);
        assert_eq!(Value::from(&link), json!({ "access": "open" }));
    }

    #[test]
    fn should_contain_everything() {
        let date = DateTime::parse_from_rfc3339("2012-12-12T10:53:43-08:00").unwrap();
        let link = SharedLink::new(SharedLinkAccess::Collaborators)
            .with_unshared_at(date)
            .with_can_preview(true);
        assert_eq!(
            Value::from(&link),
            json!({
                "access": "collaborators",
                "unshared_at": "2012-12-12T10:53:43-08:00",
                "permissions": { "can_preview": true },
            })
        );
    }

    #[test]
    fn should_match_serde_representation() {
        let link = SharedLink::new(SharedLinkAccess::Company).with_can_download(false);
        assert_eq!(serde_json::to_value(&link).unwrap(), Value::from(&link));
    }

    #[test]
    fn should_deserialize() {
        let link: SharedLink = serde_json::from_str(
            r#"{"access":"open","unshared_at":null,"permissions":{"can_download":true}}"#,
        )
        .unwrap();
        assert_eq!(link.access, SharedLinkAccess::Open);
        assert!(link.unshared_at.is_none());
        assert_eq!(link.permissions.unwrap().can_download, Some(true));
    }
}
