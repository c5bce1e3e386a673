//! Per-build naming and parameter registry.
//!
//! One environment instance lives for exactly one build call and is threaded
//! `&mut` through the whole recursive compile. It is the single source of
//! truth for reference names and parameter keys:
//! - names are assigned lazily, on first compilation encounter, and are
//!   stable for the lifetime of the environment;
//! - two references get the same name iff they are the same object;
//! - counters are per prefix and monotonic, never reused, so naming does not
//!   depend on traversal-order nuances;
//! - parameter values are recorded at key-assignment time, so a parameter
//!   never reached by a compiled fragment is absent from the output map.

use crate::build::BuildConfig;
use crate::references::{Param, RefId, Reference};
use crate::utils::{escape_identifier, escape_label, escape_relationship_type};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

pub struct CompileEnv {
    name_prefix: Option<String>,
    label_conjunction_token: &'static str,
    disable_label_escaping: bool,
    disable_relationship_type_escaping: bool,
    lenient: bool,

    names: HashMap<RefId, String>,
    used_names: HashSet<String>,
    prefix_counters: HashMap<&'static str, usize>,

    param_keys: HashMap<RefId, String>,
    used_param_keys: HashSet<String>,
    param_counter: usize,
    collected: Map<String, Value>,
    extra: Map<String, Value>,
}

impl CompileEnv {
    /// Fresh environment seeded from build configuration. Strict: compile
    /// errors propagate to the caller unmodified.
    pub fn new(config: &BuildConfig) -> Self {
        CompileEnv {
            name_prefix: config.name_prefix.clone(),
            label_conjunction_token: config.label_conjunction.token(),
            disable_label_escaping: config.disable_label_escaping,
            disable_relationship_type_escaping: config.disable_relationship_type_escaping,
            lenient: false,
            names: HashMap::new(),
            used_names: HashSet::new(),
            prefix_counters: HashMap::new(),
            param_keys: HashMap::new(),
            used_param_keys: HashSet::new(),
            param_counter: 0,
            collected: Map::new(),
            extra: Map::new(),
        }
    }

    /// Best-effort environment for debug rendering: fragments that fail are
    /// replaced with an inline error marker instead of aborting the render.
    pub fn lenient(config: &BuildConfig) -> Self {
        let mut env = Self::new(config);
        env.lenient = true;
        env
    }

    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Name for a reference. First encounter assigns: a caller-supplied name
    /// is escaped and used verbatim; an anonymous reference gets the next
    /// `<prefix><counter>` in its category, skipping names already taken.
    pub fn name_for<R: Reference>(&mut self, reference: &R) -> String {
        if let Some(existing) = self.names.get(&reference.ref_id()) {
            return existing.clone();
        }
        let name = match reference.explicit_name() {
            Some(given) => escape_identifier(given).into_owned(),
            None => self.next_generated_name(reference.category().prefix()),
        };
        self.used_names.insert(name.clone());
        self.names.insert(reference.ref_id(), name.clone());
        name
    }

    /// Next free auto-generated name for a prefix. Counter values consumed by
    /// a skip are never handed out again within this environment.
    fn next_generated_name(&mut self, prefix: &'static str) -> String {
        loop {
            let counter = self.prefix_counters.entry(prefix).or_insert(0);
            let raw = format!(
                "{}{}{}",
                self.name_prefix.as_deref().unwrap_or(""),
                prefix,
                *counter
            );
            *counter += 1;
            let candidate = escape_identifier(&raw).into_owned();
            if !self.used_names.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Key for a parameter. First encounter assigns the key and records the
    /// bound value. Anonymous parameters share one `param{n}` sequence; named
    /// parameters keep their key verbatim but still occupy the namespace.
    pub fn key_for(&mut self, param: &Param) -> String {
        if let Some(existing) = self.param_keys.get(&param.ref_id()) {
            return existing.clone();
        }
        let key = match param.explicit_key() {
            Some(given) => given.to_string(),
            None => loop {
                let candidate = format!(
                    "{}param{}",
                    self.name_prefix.as_deref().unwrap_or(""),
                    self.param_counter
                );
                self.param_counter += 1;
                if !self.used_param_keys.contains(&candidate) {
                    break candidate;
                }
            },
        };
        self.used_param_keys.insert(key.clone());
        self.param_keys.insert(param.ref_id(), key.clone());
        self.collected.insert(key.clone(), param.value().clone());
        key
    }

    /// Caller-supplied parameters merged into the final map after collection;
    /// caller keys win on conflict.
    pub fn add_extra_parameters(&mut self, extra: Map<String, Value>) {
        self.extra.extend(extra);
    }

    /// Final parameter map: collected values in first-encounter order, then
    /// extras applied on top.
    pub fn collect_parameters(mut self) -> Map<String, Value> {
        let mut merged = std::mem::take(&mut self.collected);
        for (key, value) in std::mem::take(&mut self.extra) {
            if merged.insert(key.clone(), value).is_some() {
                log::warn!("extra parameter '{}' overrides a collected parameter", key);
            }
        }
        merged
    }

    /// Token joining labels in a label expression, per build configuration.
    pub fn label_conjunction_token(&self) -> &'static str {
        self.label_conjunction_token
    }

    pub fn escape_label(&self, raw: &str) -> String {
        if self.disable_label_escaping {
            raw.to_string()
        } else {
            escape_label(raw).into_owned()
        }
    }

    pub fn escape_relationship_type(&self, raw: &str) -> String {
        if self.disable_relationship_type_escaping {
            raw.to_string()
        } else {
            escape_relationship_type(raw).into_owned()
        }
    }
}
