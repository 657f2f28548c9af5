//! Composite cache key of a structured type and an API version

use apiver_core::ApiVersion;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Odd multiplier used to mix the name hash before combining
const HASH_MULTIPLIER: u64 = 397;

/// Anything with a fully qualified type name, e.g. an EDM structured type
pub trait TypeIdentity {
    /// Fully qualified name, such as `Contoso.Models.Order`
    fn full_name(&self) -> &str;
}

impl TypeIdentity for str {
    fn full_name(&self) -> &str {
        self
    }
}

impl TypeIdentity for String {
    fn full_name(&self) -> &str {
        self
    }
}

/// Identity of a structured type at one API version
///
/// Two keys are equal only when both the type name and the version are equal.
/// The hash is computed once at construction.
#[derive(Clone)]
pub struct VersionedTypeKey {
    full_name: Arc<str>,
    version: ApiVersion,
    hash: u64,
}

impl VersionedTypeKey {
    /// Create a key from a type name and version
    pub fn new(full_name: impl Into<Arc<str>>, version: ApiVersion) -> Self {
        let full_name = full_name.into();
        let hash = combine(hash_of(&*full_name), hash_of(&version));
        Self {
            full_name,
            version,
            hash,
        }
    }

    /// Create a key for a type
    pub fn for_type<T: TypeIdentity + ?Sized>(ty: &T, version: ApiVersion) -> Self {
        Self::new(ty.full_name(), version)
    }

    /// Fully qualified type name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// API version of the model
    pub fn version(&self) -> &ApiVersion {
        &self.version
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn combine(name: u64, version: u64) -> u64 {
    name.wrapping_mul(HASH_MULTIPLIER) ^ version
}

impl PartialEq for VersionedTypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.full_name == other.full_name
            && self.version == other.version
    }
}

impl Eq for VersionedTypeKey {}

impl Hash for VersionedTypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for VersionedTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedTypeKey")
            .field("full_name", &self.full_name)
            .field("version", &self.version.to_string())
            .finish()
    }
}

impl fmt::Display for VersionedTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.full_name, self.version)
    }
}
