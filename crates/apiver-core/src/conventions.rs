//! Version conventions
//!
//! Declares versions for a resource and its actions without annotating each
//! action by hand. Every step returns a new value, so a convention can be
//! shared and extended without affecting other copies.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver_core::{ApiVersion, ResourceConventions};
//!
//! let candidates = ResourceConventions::new("Orders")
//!     .has(ApiVersion::new(1, 0))
//!     .has(ApiVersion::new(2, 0))
//!     .has_deprecated(ApiVersion::new(0, 9))
//!     .action("Get", |a| a)
//!     .action("GetV2", |a| a.map_to(ApiVersion::new(2, 0)))
//!     .build();
//! ```

use crate::candidate::Candidate;
use crate::version::ApiVersion;
use crate::version_set::VersionSet;
use tracing::warn;

/// Action name used when a resource declares no actions
pub const DEFAULT_ACTION: &str = "*";

/// Errors found while building conventions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConventionError {
    /// An action maps a version neither it nor its resource implements
    #[error("action '{resource}.{action}' maps API version '{version}' which is not implemented")]
    UnknownMappedVersion {
        resource: String,
        action: String,
        version: ApiVersion,
    },
}

/// Version declarations for a single action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConventions {
    name: String,
    versions: VersionSet,
}

impl ActionConventions {
    fn new(name: String) -> Self {
        Self {
            name,
            versions: VersionSet::new(),
        }
    }

    /// Action name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map a version to this action
    pub fn map_to(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.map_to(version);
        self
    }

    /// Make this action version-neutral
    pub fn version_neutral(mut self) -> Self {
        self.versions = self.versions.version_neutral();
        self
    }

    /// Declare a supported version for this action
    pub fn has(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.has(version);
        self
    }

    /// Declare a deprecated version for this action
    pub fn has_deprecated(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.has_deprecated(version);
        self
    }

    /// Advertise a version implemented elsewhere
    pub fn advertises(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.advertises(version);
        self
    }

    /// Advertise a deprecated version implemented elsewhere
    pub fn advertises_deprecated(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.advertises_deprecated(version);
        self
    }
}

/// Version declarations for a resource (controller) and its actions
///
/// Actions inherit every resource-level declaration and add their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConventions {
    resource: String,
    versions: VersionSet,
    actions: Vec<ActionConventions>,
}

impl ResourceConventions {
    /// Start conventions for a resource
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            versions: VersionSet::new(),
            actions: Vec::new(),
        }
    }

    /// Resource (controller) name
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Make every action of the resource version-neutral
    pub fn version_neutral(mut self) -> Self {
        self.versions = self.versions.version_neutral();
        self
    }

    /// Declare a version implemented by the resource
    pub fn has(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.has(version);
        self
    }

    /// Declare a deprecated version implemented by the resource
    pub fn has_deprecated(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.has_deprecated(version);
        self
    }

    /// Advertise a version implemented elsewhere
    pub fn advertises(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.advertises(version);
        self
    }

    /// Advertise a deprecated version implemented elsewhere
    pub fn advertises_deprecated(mut self, version: ApiVersion) -> Self {
        self.versions = self.versions.advertises_deprecated(version);
        self
    }

    /// Configure an action; configuring the same action again extends it
    pub fn action(
        mut self,
        name: impl Into<String>,
        configure: impl FnOnce(ActionConventions) -> ActionConventions,
    ) -> Self {
        let name = name.into();
        match self.actions.iter().position(|a| a.name == name) {
            Some(index) => {
                let existing = self.actions.remove(index);
                self.actions.insert(index, configure(existing));
            }
            None => {
                let action = ActionConventions::new(name);
                self.actions.push(configure(action));
            }
        }
        self
    }

    /// Build candidates, failing on mappings to unimplemented versions
    pub fn try_build(self) -> Result<Vec<Candidate>, ConventionError> {
        let (candidates, errors) = self.assemble();
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(candidates),
        }
    }

    /// Build candidates, logging mappings to unimplemented versions
    ///
    /// Such mappings are kept: a mapped version is implemented by its action.
    pub fn build(self) -> Vec<Candidate> {
        let (candidates, errors) = self.assemble();
        for err in errors {
            warn!(%err, "lenient convention");
        }
        candidates
    }

    fn assemble(self) -> (Vec<Candidate>, Vec<ConventionError>) {
        let mut errors = Vec::new();

        if self.actions.is_empty() {
            let candidate = Candidate::new(self.resource, DEFAULT_ACTION, self.versions);
            return (vec![candidate], errors);
        }

        let candidates = self
            .actions
            .into_iter()
            .map(|action| {
                let versions = self.versions.clone().merge(&action.versions);
                for version in action.versions.mapped() {
                    if !versions.supported().contains(version)
                        && !versions.deprecated().contains(version)
                    {
                        errors.push(ConventionError::UnknownMappedVersion {
                            resource: self.resource.clone(),
                            action: action.name.clone(),
                            version: version.clone(),
                        });
                    }
                }
                Candidate::new(self.resource.clone(), action.name, versions)
            })
            .collect();

        (candidates, errors)
    }
}
