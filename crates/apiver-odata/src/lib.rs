//! # apiver OData support
//!
//! Caching for models that differ per API version.
//!
//! A structured type such as `Contoso.Models.Order` can expose different
//! properties at `1.0` and `2.0`. Anything derived from it per version (a
//! schema, a property map, a serializer plan) is keyed by
//! [`VersionedTypeKey`] and kept in a [`ModelCache`].
//!
//! ```rust,ignore
//! use apiver_odata::{ModelCache, VersionedTypeKey};
//!
//! let cache = ModelCache::new();
//! let key = VersionedTypeKey::new("Contoso.Models.Order", ApiVersion::new(2, 0));
//! let schema = cache.get_or_insert_with(key, || build_schema("Contoso.Models.Order"));
//! ```

mod model_cache;
mod type_key;

pub use model_cache::ModelCache;
pub use type_key::{TypeIdentity, VersionedTypeKey};
