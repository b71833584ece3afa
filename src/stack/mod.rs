// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Host-side view of the IUT's protocol stack.
//!
//! The stack only remembers what the test cases have done to the IUT: which profile modules were
//! initialised, what GAP data is advertised, which address the IUT uses. Modules have to be
//! initialised in dependency order (GAP, GATT, ASCS, BAP, CAP, PBP).

mod gap;

use log::debug;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::{Error, Result};

pub use self::gap::Gap;

/// Profile modules tracked by the [`Stack`], in initialisation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Module {
    Gap,
    Gatt,
    Ascs,
    Bap,
    Cap,
    Pbp,
}

impl Module {
    pub fn name(&self) -> &'static str {
        match self {
            Module::Gap => "gap",
            Module::Gatt => "gatt",
            Module::Ascs => "ascs",
            Module::Bap => "bap",
            Module::Cap => "cap",
            Module::Pbp => "pbp",
        }
    }

    fn requires(&self) -> Option<Module> {
        match self {
            Module::Gap => None,
            Module::Gatt => Some(Module::Gap),
            Module::Ascs => Some(Module::Gatt),
            Module::Bap => Some(Module::Ascs),
            Module::Cap => Some(Module::Bap),
            Module::Pbp => Some(Module::Cap),
        }
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
pub struct Stack {
    gap: Option<Gap>,
    initialized: BTreeSet<Module>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gap_init(&mut self, name: &str) {
        debug!("Initializing GAP with device name {}", name);
        self.gap = Some(Gap::new(name));
        self.initialized.insert(Module::Gap);
    }

    pub fn gatt_init(&mut self) -> Result<()> {
        self.module_init(Module::Gatt)
    }

    pub fn ascs_init(&mut self) -> Result<()> {
        self.module_init(Module::Ascs)
    }

    pub fn bap_init(&mut self) -> Result<()> {
        self.module_init(Module::Bap)
    }

    pub fn cap_init(&mut self) -> Result<()> {
        self.module_init(Module::Cap)
    }

    pub fn pbp_init(&mut self) -> Result<()> {
        self.module_init(Module::Pbp)
    }

    pub fn is_initialized(&self, module: Module) -> bool {
        self.initialized.contains(&module)
    }

    pub fn gap(&self) -> Result<&Gap> {
        self.gap.as_ref().ok_or(Error::NotInitialized("gap"))
    }

    pub fn gap_mut(&mut self) -> Result<&mut Gap> {
        self.gap.as_mut().ok_or(Error::NotInitialized("gap"))
    }

    fn module_init(&mut self, module: Module) -> Result<()> {
        if let Some(required) = module.requires() {
            if !self.is_initialized(required) {
                return Err(Error::NotInitialized(required.name()));
            }
        }
        debug!("Initializing {}", module);
        self.initialized.insert(module);
        Ok(())
    }
}
