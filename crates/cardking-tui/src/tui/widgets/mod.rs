// TUI widget modules for each dashboard panel.

pub mod explanation;
pub mod form;
pub mod market;
pub mod probabilities;
pub mod status_bar;
pub mod verdict;
