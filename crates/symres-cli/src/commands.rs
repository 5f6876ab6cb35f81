//! The `resolve` and `overrides` subcommands.

use crate::args::{OverridesArgs, ResolveArgs};
use anyhow::{Context, Result, anyhow};
use std::fmt::Write;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use symres_common::diagnostics::Diagnostic;
use symres_deserializer::{LoadedFragment, LoadedModule, find_member_path, load_all, resolve_local};
use symres_metadata::{MemorySymbolTable, RecordRef};
use symres_model::{DeclId, DeclarationStore, Name, SymbolError, render_declaration};
use symres_overrides::{EffectiveMembers, OverrideSynthesis, SynthesisOptions};
use tracing::debug;

/// What a subcommand produced: text for stdout and diagnostics for stderr.
#[derive(Debug, Default)]
pub struct Report {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    fn failed(error: &SymbolError, file: &str) -> Self {
        Self {
            output: String::new(),
            diagnostics: error.to_diagnostics(file),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// A loaded dump: its reader, the store and what `load_all` registered.
///
/// Failing to read or load the dump is an `anyhow` error; failures while
/// resolving inside it become diagnostics.
pub struct Session {
    file: String,
    table: MemorySymbolTable,
    store: DeclarationStore,
    module: LoadedModule,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let table = MemorySymbolTable::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to read symbol table {}", path.display()))?;
        let store = DeclarationStore::new();
        let module = load_all(&store, &table)
            .with_context(|| format!("failed to load declarations of {}", path.display()))?;
        Ok(Self {
            file: path.display().to_string(),
            table,
            store,
            module,
        })
    }

    pub fn store(&self) -> &DeclarationStore {
        &self.store
    }

    /// The named fragment, or the first one when `name` is `None`.
    fn fragment(&self, name: Option<&str>) -> Result<(&Name, &LoadedFragment)> {
        match name {
            Some(name) => self
                .module
                .fragments
                .get_key_value(name)
                .ok_or_else(|| anyhow!("no package fragment `{name}` in {}", self.file)),
            None => self
                .module
                .fragments
                .first()
                .ok_or_else(|| anyhow!("{} has no package fragments", self.file)),
        }
    }

    fn resolve_record(
        &self,
        fragment: &LoadedFragment,
        parent: Option<&str>,
        target: &RecordRef,
    ) -> Result<String, SymbolError> {
        let parent = match parent {
            Some(path) => find_member_path(&self.store, fragment, path)?,
            None => fragment.id,
        };
        let chain = self.store.ownership_chain(parent)?;
        let id = resolve_local(&self.store, &self.table, target, &chain)?;
        debug!(%id, "record resolved");
        self.describe(id)
    }

    /// The declaration, followed by its members when it is a class.
    fn describe(&self, id: DeclId) -> Result<String, SymbolError> {
        let declaration = self.store.resolve(id)?;
        let mut out = render_declaration(&declaration);
        if declaration.as_class().is_some() {
            for member in self.store.class_members(id)? {
                out.push_str("\n  ");
                out.push_str(&render_declaration(&*self.store.resolve(member)?));
            }
        }
        Ok(out)
    }

    fn describe_synthesis(&self, synthesis: &OverrideSynthesis) -> String {
        let set = &synthesis.set;
        let mut out = self.qualified(set.class);
        for member in set.members() {
            let _ = write!(out, "\n  {:<9} {}", member.origin.label(), self.qualified(member.id));
            for overridden in set.overridden_by(member.id) {
                let _ = write!(out, "\n            overrides {}", self.qualified(*overridden));
            }
        }
        out
    }

    /// `Owner :: signature`, or the bare signature of top-level declarations.
    fn qualified(&self, id: DeclId) -> String {
        let Some(declaration) = self.store.get(id) else {
            return id.to_string();
        };
        let signature = render_declaration(&declaration);
        match declaration
            .containing
            .and_then(|owner| self.store.get(owner))
            .filter(|owner| owner.as_class().is_some())
        {
            Some(owner) => format!("{} :: {signature}", owner.name),
            None => signature,
        }
    }
}

/// `symres resolve`: deserializes one local record under its parent.
pub fn resolve(args: &ResolveArgs) -> Result<Report> {
    let session = Session::open(&args.dump)?;
    let (fragment_name, fragment) = session.fragment(args.fragment.as_deref())?;
    let target = RecordRef::new(fragment_name, args.record);
    Ok(
        match session.resolve_record(fragment, args.parent.as_deref(), &target) {
            Ok(output) => Report {
                output,
                diagnostics: Vec::new(),
            },
            Err(error) => Report::failed(&error, &session.file),
        },
    )
}

/// `symres overrides`: the effective members of a class and its conflicts.
pub fn overrides(args: &OverridesArgs) -> Result<Report> {
    let session = Session::open(&args.dump)?;
    let (_, fragment) = session.fragment(args.fragment.as_deref())?;
    let options = SynthesisOptions::default()
        .with_relation(args.relation.into())
        .materialize_unmodified(!args.no_materialize);
    let effective = EffectiveMembers::new(&session.store, options);

    let synthesis = match find_member_path(&session.store, fragment, &args.class)
        .and_then(|class| effective.synthesis(class))
    {
        Ok(synthesis) => synthesis,
        Err(error) => return Ok(Report::failed(&error, &session.file)),
    };
    let output = session.describe_synthesis(&synthesis);
    let diagnostics = if synthesis.has_conflicts() {
        synthesis
            .conflict_error(&session.store)
            .to_diagnostics(&session.file)
    } else {
        Vec::new()
    };
    Ok(Report {
        output,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
