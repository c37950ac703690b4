//! Terminal rendering: chart, status lines, progress spinner.

pub(crate) mod chart;
pub(crate) mod spinner;
pub(crate) mod status;
