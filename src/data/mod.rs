mod medium;

pub use medium::HistoryMedium;
