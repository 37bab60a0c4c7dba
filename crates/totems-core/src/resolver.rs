//! Action schema resolution.
//!
//! Turns an ABI document into the flat, ordered field list of one action's
//! argument struct. Base structs are expanded in place and type aliases are
//! followed, so the resulting [`SchemaField`] sequence matches the byte order
//! of the encoded action data exactly.
//!
//! Fetching ABIs is delegated to an [`AbiProvider`]. Resolved documents and
//! schemas are memoized in an [`AbiCache`], which callers construct and share
//! explicitly; a deployed contract's ABI is treated as immutable for the
//! cache's lifetime.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use totems_proto::{AbiDocument, GetAbiResponse, TypeTag, encode::encode_name};
use tracing::{debug, trace};

use crate::error::{LayoutError, ProviderError, Result};

/// Bound on alias chains and base-struct nesting.
const MAX_TYPE_DEPTH: usize = 32;

/// One field of an action's argument struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// ABI type string after alias resolution
    pub type_name: String,
    /// Parsed type
    pub ty: TypeTag,
}

impl SchemaField {
    /// Build a field from an ABI type string.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self { name: name.into(), ty: TypeTag::parse(&type_name), type_name }
    }
}

/// Resolve the ordered field list of `action` within `abi`.
pub fn resolve_action(abi: &AbiDocument, action: &str) -> Result<Vec<SchemaField>> {
    let def = abi.action(action).ok_or_else(|| LayoutError::ActionNotFound(action.to_string()))?;
    let mut fields = Vec::new();
    collect_fields(abi, &def.type_name, 0, &mut fields)?;
    Ok(fields)
}

fn collect_fields(
    abi: &AbiDocument,
    struct_name: &str,
    depth: usize,
    out: &mut Vec<SchemaField>,
) -> Result<()> {
    let not_found = || LayoutError::StructNotFound(struct_name.to_string());
    if depth > MAX_TYPE_DEPTH {
        return Err(not_found());
    }

    let resolved = resolve_alias(abi, struct_name).ok_or_else(not_found)?;
    let def = abi.find_struct(resolved).ok_or_else(not_found)?;

    if !def.base.is_empty() {
        collect_fields(abi, &def.base, depth + 1, out)?;
    }

    for field in &def.fields {
        out.push(SchemaField::new(&field.name, resolve_type(abi, &field.type_name)));
    }
    Ok(())
}

/// Follow `name` through the alias table. `None` if the chain is cyclic or
/// too deep.
fn resolve_alias<'a>(abi: &'a AbiDocument, name: &'a str) -> Option<&'a str> {
    let mut current = name;
    for _ in 0..MAX_TYPE_DEPTH {
        match abi.alias(current) {
            Some(target) => current = target,
            None => return Some(current),
        }
    }
    None
}

/// Resolve aliases in a field type, keeping any `[]`, `?` or `$` suffix.
/// Unresolvable aliases are returned unchanged and fail later as unsupported.
fn resolve_type(abi: &AbiDocument, type_name: &str) -> String {
    resolve_type_at(abi, type_name, 0)
}

fn resolve_type_at(abi: &AbiDocument, type_name: &str, depth: usize) -> String {
    if depth > MAX_TYPE_DEPTH {
        return type_name.to_string();
    }
    for suffix in ["[]", "?", "$"] {
        if let Some(inner) = type_name.strip_suffix(suffix) {
            return format!("{}{suffix}", resolve_type_at(abi, inner, depth + 1));
        }
    }
    match resolve_alias(abi, type_name) {
        Some(resolved) if resolved != type_name => resolve_type_at(abi, resolved, depth + 1),
        _ => type_name.to_string(),
    }
}

/// Source of ABI documents, keyed by contract account.
///
/// Network retrieval lives outside this crate; implement this trait over
/// whatever client is at hand.
pub trait AbiProvider {
    /// Fetch the ABI deployed at `contract`.
    fn fetch(&self, contract: &str) -> std::result::Result<AbiDocument, ProviderError>;
}

impl<P: AbiProvider + ?Sized> AbiProvider for &P {
    fn fetch(&self, contract: &str) -> std::result::Result<AbiDocument, ProviderError> {
        (**self).fetch(contract)
    }
}

/// In-memory ABI set.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    abis: HashMap<String, AbiDocument>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ABI for `contract`, replacing any previous one.
    pub fn insert(&mut self, contract: impl Into<String>, abi: AbiDocument) {
        self.abis.insert(contract.into(), abi);
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, contract: impl Into<String>, abi: AbiDocument) -> Self {
        self.insert(contract, abi);
        self
    }
}

impl AbiProvider for MemoryProvider {
    fn fetch(&self, contract: &str) -> std::result::Result<AbiDocument, ProviderError> {
        self.abis
            .get(contract)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(contract.to_string()))
    }
}

/// Reads ABIs from `<dir>/<contract>.abi.json`, `<dir>/<contract>.abi` or
/// `<dir>/<contract>.json`.
///
/// Files may hold either a bare ABI or a `get_abi` response envelope.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Serve ABIs from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory ABIs are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, contract: &str) -> Option<PathBuf> {
        ["abi.json", "abi", "json"]
            .iter()
            .map(|ext| self.root.join(format!("{contract}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl AbiProvider for DirectoryProvider {
    fn fetch(&self, contract: &str) -> std::result::Result<AbiDocument, ProviderError> {
        // Account names cannot contain path separators; reject anything else
        // before touching the filesystem.
        if contract.is_empty() || encode_name(contract).is_err() {
            return Err(ProviderError::NotFound(contract.to_string()));
        }

        let path =
            self.locate(contract).ok_or_else(|| ProviderError::NotFound(contract.to_string()))?;
        let contents = fs::read_to_string(&path)
            .map_err(|source| ProviderError::Io { path: path.clone(), source })?;

        if let Ok(envelope) = serde_json::from_str::<GetAbiResponse>(&contents) {
            return envelope.abi.ok_or_else(|| ProviderError::NotFound(contract.to_string()));
        }
        serde_json::from_str(&contents).map_err(|source| ProviderError::Parse { path, source })
    }
}

/// Process-lifetime memo of fetched ABIs and resolved action schemas.
///
/// Writes are idempotent: two threads racing on the same key both resolve and
/// both store equivalent values, so plain read/write locks suffice.
#[derive(Debug, Default)]
pub struct AbiCache {
    documents: RwLock<HashMap<String, Arc<AbiDocument>>>,
    schemas: RwLock<HashMap<(String, String), Arc<[SchemaField]>>>,
}

impl AbiCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached ABI for `contract`.
    pub fn document(&self, contract: &str) -> Option<Arc<AbiDocument>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner).get(contract).cloned()
    }

    /// Store the ABI for `contract`.
    pub fn insert_document(&self, contract: &str, abi: Arc<AbiDocument>) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(contract.to_string(), abi);
    }

    /// Cached schema for `contract::action`.
    pub fn schema(&self, contract: &str, action: &str) -> Option<Arc<[SchemaField]>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(contract.to_string(), action.to_string()))
            .cloned()
    }

    /// Store the schema for `contract::action`.
    pub fn insert_schema(&self, contract: &str, action: &str, fields: Arc<[SchemaField]>) {
        self.schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((contract.to_string(), action.to_string()), fields);
    }

    /// Number of cached ABI documents.
    pub fn len(&self) -> usize {
        self.documents.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True if no ABI has been cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached document and schema.
    pub fn clear(&self) {
        self.documents.write().unwrap_or_else(PoisonError::into_inner).clear();
        self.schemas.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Memoizing action schema lookup over an [`AbiProvider`].
#[derive(Debug)]
pub struct SchemaResolver<P> {
    provider: P,
    cache: Arc<AbiCache>,
}

impl<P: AbiProvider> SchemaResolver<P> {
    /// Resolve through `provider`, memoizing in `cache`.
    pub fn new(provider: P, cache: Arc<AbiCache>) -> Self {
        Self { provider, cache }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<AbiCache> {
        &self.cache
    }

    /// Ordered fields of `contract::action`.
    ///
    /// The provider is consulted at most once per contract while the ABI stays
    /// cached. Nothing is cached if the action or its struct cannot be found.
    pub fn resolve(&self, contract: &str, action: &str) -> Result<Arc<[SchemaField]>> {
        if let Some(fields) = self.cache.schema(contract, action) {
            trace!(contract, action, "schema cache hit");
            return Ok(fields);
        }

        let (abi, fetched) = match self.cache.document(contract) {
            Some(abi) => (abi, false),
            None => {
                debug!(contract, "fetching ABI");
                (Arc::new(self.provider.fetch(contract)?), true)
            },
        };

        let fields: Arc<[SchemaField]> = resolve_action(&abi, action)?.into();

        if fetched {
            self.cache.insert_document(contract, abi);
        }
        self.cache.insert_schema(contract, action, Arc::clone(&fields));
        debug!(contract, action, fields = fields.len(), "resolved action schema");
        Ok(fields)
    }
}
