mod dependency_manager;
mod selector_chain;

pub use dependency_manager::{
    DependencyManager, DependencyManagerKind, ManagedOutcome, ManagementContext,
    ManagementPrecedence,
};
pub use selector_chain::{
    DependencySelector, RejectReason, ScopeDeriver, Selection, SelectionContext, SelectorChain,
};
