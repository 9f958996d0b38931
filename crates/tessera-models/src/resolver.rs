use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tessera_meta::{Metadata, StateId, is_air_name};

use crate::bare_name;
use crate::model::ResolvedVariant;
use crate::table::VariantTable;

/// Models for one concrete block; empty for air.
pub type Resolution = Arc<[ResolvedVariant]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub fallbacks: u64,
    pub entries: usize,
}

/// Memoizes blockstate resolution per `(name, canonical properties)`.
pub struct ModelResolver {
    table: Arc<VariantTable>,
    cache: LruCache<(Arc<str>, Arc<str>), Resolution>,
    missing_block: String,
    empty: Resolution,
    hits: u64,
    misses: u64,
    evictions: u64,
    fallbacks: u64,
}

impl ModelResolver {
    pub fn new(table: Arc<VariantTable>, capacity: usize, missing_block: impl Into<String>) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            table,
            cache: LruCache::new(cap),
            missing_block: missing_block.into(),
            empty: Arc::from(Vec::new()),
            hits: 0,
            misses: 0,
            evictions: 0,
            fallbacks: 0,
        }
    }

    /// Swaps in a new asset table and drops every memoized entry.
    pub fn set_table(&mut self, table: Arc<VariantTable>) {
        self.table = table;
        self.clear();
    }

    pub fn table(&self) -> &Arc<VariantTable> {
        &self.table
    }

    /// `props_key` must be the canonical form of `props` (declaration order, `k=v` joined by commas).
    pub fn resolve(
        &mut self,
        name: &str,
        props: &[(Arc<str>, Arc<str>)],
        props_key: &str,
    ) -> Resolution {
        self.resolve_with_alias(Arc::from(name), None, props, Arc::from(props_key))
    }

    /// Resolves a state id through the version tables. Ids the tables do not
    /// know resolve to the missing-block placeholder.
    pub fn resolve_state(&mut self, meta: &Metadata, state: StateId) -> Resolution {
        let known = meta
            .state(state)
            .and_then(|info| Some((info, meta.block(info.block)?)));
        let Some((info, block)) = known else {
            self.fallbacks += 1;
            log::debug!(target: "mesh", "unknown state {}, using {}", state, self.missing_block);
            return self.fallback();
        };
        let alias = meta.canonical_name(&block.name);
        let alias = (alias != &*block.name).then_some(alias);
        self.resolve_with_alias(block.name.clone(), alias, &info.properties, info.props_key.clone())
    }

    fn resolve_with_alias(
        &mut self,
        name: Arc<str>,
        alias: Option<&str>,
        props: &[(Arc<str>, Arc<str>)],
        props_key: Arc<str>,
    ) -> Resolution {
        let bare_len = bare_name(&name).len();
        let name: Arc<str> = if bare_len == name.len() {
            name
        } else {
            Arc::from(bare_name(&name))
        };
        if is_air_name(&name) {
            return self.empty.clone();
        }
        let key = (name.clone(), props_key.clone());
        if let Some(hit) = self.cache.get(&key) {
            self.hits += 1;
            return hit.clone();
        }
        self.misses += 1;
        let found = self
            .table
            .get(&name)
            .or_else(|| alias.and_then(|a| self.table.get(a)))
            .and_then(|bs| bs.select(props));
        let res: Resolution = match found {
            Some(v) => Arc::from(v),
            None => {
                self.fallbacks += 1;
                log::debug!(target: "mesh", "no model for {}[{}], using {}", name, props_key, self.missing_block);
                self.fallback()
            }
        };
        if let Some((old, _)) = self.cache.push(key.clone(), res.clone()) {
            if old != key {
                self.evictions += 1;
            }
        }
        res
    }

    fn fallback(&self) -> Resolution {
        self.table
            .get(&self.missing_block)
            .and_then(|bs| bs.select(&[]))
            .map(Arc::from)
            .unwrap_or_else(|| self.empty.clone())
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            fallbacks: self.fallbacks,
            entries: self.cache.len(),
        }
    }

    pub fn clear(&mut self) {
        self.evictions += self.cache.len() as u64;
        self.cache.clear();
    }
}
