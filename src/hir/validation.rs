//! Validation - checks run on linked documents.

use rustc_hash::FxHashSet;

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::linker::CrossReference;
use super::name::NameProvider;
use crate::base::{DocumentUri, LineIndex};
use crate::parser::{Member, SourceFile};

/// What a validator sees of a document.
pub struct ValidationContext<'a> {
    pub uri: &'a DocumentUri,
    pub file: &'a SourceFile,
    pub line_index: &'a LineIndex,
    pub references: &'a [CrossReference],
}

pub trait Validator: Send + Sync {
    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic>;
}

/// Reports a name declared twice in the same container.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator {
    name_provider: NameProvider,
}

impl DefaultValidator {
    fn check_container(
        &self,
        members: Vec<Member>,
        ctx: &ValidationContext<'_>,
        collector: &mut DiagnosticCollector,
    ) {
        let mut seen = FxHashSet::default();
        for member in members {
            if let Some(token) = self.name_provider.get_name_node(&member) {
                if !seen.insert(token.text().to_string()) {
                    let segment = ctx.line_index.segment(token.text_range());
                    collector.duplicate_definition(segment, token.text());
                }
            }
            if member.body().is_some() {
                self.check_container(member.members(), ctx, collector);
            }
        }
    }
}

impl Validator for DefaultValidator {
    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut collector = DiagnosticCollector::new();
        self.check_container(ctx.file.members().collect(), ctx, &mut collector);
        collector.finish()
    }
}
