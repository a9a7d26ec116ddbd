/// egui views: parameter form and menus, the J-V plot, and the results table.
pub mod panels;
pub mod plot;
pub mod results;
