mod graph_collector;
mod metadata_generator;
mod module_closure_finder;
mod scope_filter;
mod violation_evaluator;

pub use graph_collector::{CollectionOutcome, CollectionWarning, GraphCollector, MAX_TRAVERSAL_DEPTH};
pub use metadata_generator::MetadataGenerator;
pub use module_closure_finder::{ModuleClosure, ModuleClosureFinder, ModuleSet};
pub use scope_filter::ScopeFilter;
pub use violation_evaluator::{CiContext, PolicyEvaluation, ViolationEvaluator};
