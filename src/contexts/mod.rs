mod classifier;
mod dispatcher;
mod file_medium;
mod history_store;
mod synthesizer;

pub use classifier::{GenerationMode, classify};
pub use dispatcher::{
    BACKEND_URL_VAR, DEFAULT_BACKEND_URL, DispatchError, DispatchGate, DispatchState, Dispatcher,
    GenerationRequest,
};
pub use file_medium::FileHistoryMedium;
pub use history_store::{HISTORY_CAPACITY, HistoryEntry, HistoryStore, SNIPPET_LIMIT};
pub use synthesizer::{SpecInfo, SynthesizedSpec, synthesize};
