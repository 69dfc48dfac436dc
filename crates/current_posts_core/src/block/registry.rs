//! In-process registry of block modules.
//!
//! Modules are registered explicitly by the host; lookups go through the
//! `BlockModule` trait instead of naming conventions.

use crate::access::AccessPolicy;
use crate::block::module::{BlockInfo, BlockModule, BlockView};
use crate::service::recent_items::RecentItemsError;
use chrono::{DateTime, Utc};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MACHINE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]{0,63}$").expect("valid machine name regex"));

/// Returns whether `value` is a valid module id or block delta.
pub fn is_valid_machine_name(value: &str) -> bool {
    MACHINE_NAME_RE.is_match(value)
}

/// One block declared by a registered module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredBlock {
    pub module_id: String,
    pub delta: String,
    pub info: BlockInfo,
}

/// Host-side table of registered block modules.
#[derive(Default)]
pub struct ModuleRegistry<'m> {
    modules: BTreeMap<String, Box<dyn BlockModule + 'm>>,
}

impl<'m> ModuleRegistry<'m> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one module after validating its id and block deltas.
    pub fn register(&mut self, module: Box<dyn BlockModule + 'm>) -> Result<(), RegistryError> {
        let module_id = module.module_id().to_string();
        if !is_valid_machine_name(&module_id) {
            return Err(RegistryError::InvalidModuleId(module_id));
        }
        if self.modules.contains_key(&module_id) {
            return Err(RegistryError::DuplicateModuleId(module_id));
        }
        if let Some(delta) = module
            .describe_blocks()
            .into_keys()
            .find(|delta| !is_valid_machine_name(delta))
        {
            return Err(RegistryError::InvalidBlockDelta { module_id, delta });
        }

        info!("event=module_register module=registry status=ok module_id={module_id}");
        self.modules.insert(module_id, module);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns sorted module ids.
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Asks every module for help on `page_key`; first answer wins.
    pub fn help_for(&self, page_key: &str) -> Option<String> {
        self.modules
            .values()
            .find_map(|module| module.help_for(page_key))
    }

    /// Lists every declared block ordered by module id then delta.
    pub fn blocks(&self) -> Vec<RegisteredBlock> {
        self.modules
            .iter()
            .flat_map(|(module_id, module)| {
                module
                    .describe_blocks()
                    .into_iter()
                    .map(move |(delta, info)| RegisteredBlock {
                        module_id: module_id.clone(),
                        delta,
                        info,
                    })
            })
            .collect()
    }

    /// Renders one block; `Ok(None)` when the module or delta is unknown.
    pub fn view_block(
        &self,
        module_id: &str,
        delta: &str,
        access: &dyn AccessPolicy,
        now: DateTime<Utc>,
    ) -> Result<Option<BlockView>, RecentItemsError> {
        match self.modules.get(module_id) {
            Some(module) => module.view_block(delta, access, now),
            None => Ok(None),
        }
    }
}

/// Module registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidModuleId(String),
    InvalidBlockDelta { module_id: String, delta: String },
    DuplicateModuleId(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModuleId(value) => write!(f, "module id is invalid: {value}"),
            Self::InvalidBlockDelta { module_id, delta } => {
                write!(f, "module `{module_id}` declares invalid block delta: {delta}")
            }
            Self::DuplicateModuleId(value) => write!(f, "module id already registered: {value}"),
        }
    }
}

impl Error for RegistryError {}
