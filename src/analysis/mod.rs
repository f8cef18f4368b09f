//! Structural analysis of parsed source files.
//!
//! Turns a tree-sitter tree into a [`FeatureRecord`]:
//! - `extract`: functions, classes and imports declared directly under the root
//! - `complexity`: cyclomatic complexity over the entire tree
//! - `rules`: the per-grammar tables both passes are driven by
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────┐     ┌───────────────┐
//! │ ParsedSource │────▶│ extract   │────▶│ FeatureRecord │
//! │ (tree, text) │  ┌─▶│ (shallow) │     │ (functions,   │
//! └──────────────┘  │  └───────────┘     │  classes,     │
//!        │          │  ┌────────────┐    │  imports, cc) │
//!        └──────────┴─▶│ complexity │───▶└───────────────┘
//!                      │ (recursive)│
//!                      └────────────┘
//! ```

mod complexity;
mod extract;
mod facts;
mod rules;

pub use complexity::{classify, complexity, DecisionKind, DecisionTable};
pub use extract::{extract, Extracted};
pub use facts::{count_lines, ClassInfo, DeclarationKind, FeatureRecord, FunctionInfo};
pub use rules::{DeclarationRule, ParamRule, RuleTable};
