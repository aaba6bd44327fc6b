use serde::{Deserialize, Serialize};

use crate::item::ResourceItem;

/// How a resource family removes records.
///
/// Families were never consistent about this, so it is configured per
/// resource rather than inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// `DELETE /<resource>/:id`, the record disappears.
    Hard,
    /// `PATCH /<resource>/:id {"isActive": false}`, the record stays addressable.
    Soft,
}

/// Where a collection lives and how it deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDef {
    pub name: String,
    pub path: String,
    pub delete_policy: DeletePolicy,
}

impl ResourceDef {
    pub fn new(name: impl Into<String>, path: impl Into<String>, delete_policy: DeletePolicy) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            path: format!("/{}", path.trim_matches('/')),
            delete_policy,
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    /// `GET /<resource>/:id/relations`
    pub fn relations_path(&self, id: &str) -> String {
        format!("{}/{}/relations", self.path, id)
    }

    /// `GET /<child>/influencer/:parent_id`
    pub fn children_path(&self, parent_id: &str) -> String {
        format!("{}/influencer/{}", self.path, parent_id)
    }
}

/// A typed model bound to its collection.
pub trait Resource: ResourceItem {
    fn definition() -> ResourceDef;
}
