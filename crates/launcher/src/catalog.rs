//! Fixed, ordered catalog of launchable tools.

use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use umrs_shared::{CatalogError, LaunchDescriptor, ToolId};

pub const DEFAULT_SCRIPT_INTERPRETER: &str = "/usr/bin/python3";

/// What a catalog entry points at before it is turned into a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Runs directly. Relative paths are taken from the launcher's own directory.
    Executable(PathBuf),
    /// Runs through the configured interpreter. Relative paths are taken from
    /// the tools directory.
    Script(PathBuf),
}

/// Locations used to resolve [`LaunchTarget`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLocation {
    pub interpreter: PathBuf,
    pub exe_dir: PathBuf,
    pub tools_dir: PathBuf,
}

impl RuntimeLocation {
    /// Uses the directory of the running executable for sibling binaries and,
    /// unless told otherwise, for scripts too.
    pub fn current(interpreter: Option<PathBuf>, tools_dir: Option<PathBuf>) -> Self {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            interpreter: interpreter.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT_INTERPRETER)),
            tools_dir: tools_dir.unwrap_or_else(|| exe_dir.clone()),
            exe_dir,
        }
    }
}

impl LaunchTarget {
    pub fn resolve(&self, runtime: &RuntimeLocation, args: &[String]) -> LaunchDescriptor {
        match self {
            LaunchTarget::Executable(path) => LaunchDescriptor {
                program: join_relative(&runtime.exe_dir, path),
                args: args.to_vec(),
            },
            LaunchTarget::Script(path) => {
                let script = join_relative(&runtime.tools_dir, path);
                let mut all_args = Vec::with_capacity(args.len() + 1);
                all_args.push(script.to_string_lossy().into_owned());
                all_args.extend(args.iter().cloned());
                LaunchDescriptor {
                    program: runtime.interpreter.clone(),
                    args: all_args,
                }
            }
        }
    }
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[derive(Debug, Clone, Copy)]
enum BuiltinTarget {
    Sibling(&'static str),
    Script(&'static str),
}

const BUILTIN_TOOLS: [(&str, BuiltinTarget); 4] = [
    ("Audit Log Signing", BuiltinTarget::Sibling("umrs-audit-signing")),
    ("Compliance Status", BuiltinTarget::Sibling("umrs-compliance-status")),
    ("Script One", BuiltinTarget::Script("script_one.py")),
    ("Script Two", BuiltinTarget::Script("script_two.py")),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    pub id: ToolId,
    pub name: String,
    pub descriptor: LaunchDescriptor,
}

#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    entries: Vec<ToolEntry>,
    by_name: HashMap<String, ToolId>,
}

impl ToolCatalog {
    /// Builds a catalog in the given order. Names must be non-empty and
    /// unique; every command needs a program.
    pub fn new<N>(
        entries: impl IntoIterator<Item = (N, LaunchDescriptor)>,
    ) -> Result<Self, CatalogError>
    where
        N: Into<String>,
    {
        let mut catalog = Self::default();
        for (position, (name, descriptor)) in entries.into_iter().enumerate() {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName { position });
            }
            if descriptor.program.as_os_str().is_empty() {
                return Err(CatalogError::EmptyProgram { name });
            }
            if catalog.by_name.contains_key(&name) {
                return Err(CatalogError::DuplicateName { name });
            }

            let id = ToolId(position);
            catalog.by_name.insert(name.clone(), id);
            catalog.entries.push(ToolEntry {
                id,
                name,
                descriptor,
            });
        }
        Ok(catalog)
    }

    pub fn builtin(runtime: &RuntimeLocation) -> Result<Self, CatalogError> {
        Self::new(BUILTIN_TOOLS.iter().map(|(name, target)| {
            let target = match target {
                BuiltinTarget::Sibling(binary) => LaunchTarget::Executable(PathBuf::from(format!(
                    "{binary}{}",
                    env::consts::EXE_SUFFIX
                ))),
                BuiltinTarget::Script(script) => LaunchTarget::Script(PathBuf::from(script)),
            };
            (*name, target.resolve(runtime, &[]))
        }))
    }

    pub fn lookup(&self, name: &str) -> Option<ToolId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: ToolId) -> Option<&ToolEntry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
