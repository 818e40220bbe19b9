//! Compilation context threaded through the lowering pass
//!
//! Everything the pass shares — the diagnostic sink, the type-tag
//! table, the interner, and the anonymous-type name generator — is
//! passed in explicitly so that independent compilations can run
//! concurrently in one process. There are no process-wide singletons.

use hn_ast::TypeTable;
use hn_diagnostic::DiagnosticSink;
use hn_intern::Interner;

/// Per-compilation state for one lowering pass
#[derive(Debug)]
pub struct LowerContext {
    /// Identifier interner
    pub interner: Interner,
    /// Type-tag lookup table
    pub types: TypeTable,
    /// Diagnostic accumulator
    pub sink: DiagnosticSink,
    /// Name of the source file being lowered
    pub source_name: String,
    anon_type_names: AnonTypeNamer,
}

impl LowerContext {
    /// Creates a context for the named source file
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            interner: Interner::new(),
            types: TypeTable::new(),
            sink: DiagnosticSink::new(),
            source_name: source_name.into(),
            anon_type_names: AnonTypeNamer::default(),
        }
    }

    /// Creates a context around existing collaborators
    pub fn with_collaborators(
        source_name: impl Into<String>,
        interner: Interner,
        types: TypeTable,
        sink: DiagnosticSink,
    ) -> Self {
        Self {
            interner,
            types,
            sink,
            source_name: source_name.into(),
            anon_type_names: AnonTypeNamer::default(),
        }
    }

    /// The next unique anonymous type name for this compilation
    pub fn next_anonymous_type_name(&mut self) -> String {
        self.anon_type_names.next_name()
    }
}

/// Monotonic generator for anonymous type names
///
/// Two inline types in the same module never share a name, even when
/// structurally identical; every use site gets its own declaration.
#[derive(Debug, Default)]
struct AnonTypeNamer {
    next: u32,
}

impl AnonTypeNamer {
    fn next_name(&mut self) -> String {
        let index = self.next;
        self.next += 1;
        format!("$anonType${index}")
    }
}
